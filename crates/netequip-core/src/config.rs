// ── Runtime connection configuration ──
//
// These types describe how to reach the inventory API and how values are
// displayed. They never touch disk: the CLI builds them from its config
// file and flags and hands them in.

use std::time::Duration;

use netequip_api::{DEFAULT_BASE_URL, TransportConfig};

use crate::present::DisplayLocale;

/// Where the inventory API lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// API root, e.g. `http://localhost:8080/api`.
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            accept_invalid_certs: false,
        }
    }
}

impl ConnectionConfig {
    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            accept_invalid_certs: self.accept_invalid_certs,
        }
    }
}

/// Locale-dependent display settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub locale: DisplayLocale,
    /// ISO 4217 code used for maintenance costs.
    pub currency: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            locale: DisplayLocale::RuRu,
            currency: "RUB".into(),
        }
    }
}
