// netequip-api: Async Rust client for the netequip inventory REST API

pub mod client;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use endpoints::paths;
pub use error::Error;
pub use transport::TransportConfig;
pub use types::*;
