// Transport configuration for building the reqwest::Client behind ApiClient.
//
// Requests never time out unless a timeout is configured explicitly; a hung
// backend leaves the caller pending.

use std::time::Duration;

use crate::error::Error;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Accept self-signed certificates when the API sits behind TLS.
    pub accept_invalid_certs: bool,
}

impl TransportConfig {
    /// Config with a timeout, treating zero as "no timeout".
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("netequip/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }
}
