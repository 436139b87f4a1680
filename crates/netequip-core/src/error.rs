// ── Core error types ──
//
// Errors surfaced by page controllers. Consumers never match on reqwest
// or JSON failures directly: `From<netequip_api::Error>` folds them into
// connection, not-found, conflict and API variants.

use thiserror::Error;

use crate::validate::ValidationError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to inventory API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to the inventory API timed out")]
    Timeout,

    // ── Server answers ───────────────────────────────────────────────
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    Api { message: String, status: Option<u16> },

    // ── Local checks ─────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    Duplicate { message: String },

    #[error("Port {port_id} is not available on equipment {equipment_id}")]
    PortUnavailable { port_id: i64, equipment_id: i64 },

    #[error("Unknown form field `{0}`")]
    UnknownField(String),

    #[error("No form is open")]
    NoOpenForm,

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// HTTP status behind the error, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Conflict { .. } => Some(409),
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns `true` when the action was stopped before any request.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::Duplicate { .. }
                | Self::PortUnavailable { .. }
                | Self::UnknownField(_)
                | Self::NoOpenForm
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<netequip_api::Error> for CoreError {
    fn from(err: netequip_api::Error) -> Self {
        match err {
            netequip_api::Error::Http { status: 404, .. } => CoreError::NotFound {
                message: err.to_string(),
            },
            netequip_api::Error::Http { status: 409, .. } => CoreError::Conflict {
                message: err.to_string(),
            },
            netequip_api::Error::Http { status, .. } => CoreError::Api {
                message: err.to_string(),
                status: Some(status),
            },
            netequip_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            netequip_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid API URL: {e}"),
            },
            netequip_api::Error::ClientBuild(message) => CoreError::Config { message },
            netequip_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Unexpected response body: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_statuses_map_to_variants() {
        let not_found: CoreError = netequip_api::Error::Http {
            status: 404,
            message: Some("Equipment not found with id: 9".into()),
        }
        .into();
        assert!(matches!(not_found, CoreError::NotFound { .. }));
        assert_eq!(not_found.to_string(), "Equipment not found with id: 9");

        let conflict: CoreError = netequip_api::Error::Http {
            status: 409,
            message: None,
        }
        .into();
        assert_eq!(conflict.status(), Some(409));
        assert_eq!(conflict.to_string(), "HTTP error! status: 409");

        let server: CoreError = netequip_api::Error::Http {
            status: 500,
            message: None,
        }
        .into();
        assert!(matches!(server, CoreError::Api { status: Some(500), .. }));
        assert!(!server.is_local());
    }
}
