//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use netequip_config::ConfigError;
use netequip_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the inventory API at {url}")]
    #[diagnostic(
        code(netequip::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Reason: {reason}\n\
             Set the API root with: netequip config set-url <URL>, or pass --api-url"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to the inventory API timed out")]
    #[diagnostic(
        code(netequip::timeout),
        help("Increase the timeout with --timeout, or use 0 to wait indefinitely.")
    )]
    Timeout,

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource} {id} not found")]
    #[diagnostic(
        code(netequip::not_found),
        help("Run: netequip {list_command} to see what exists")
    )]
    NotFound {
        resource: String,
        id: i64,
        list_command: String,
    },

    #[error("{message}")]
    #[diagnostic(code(netequip::not_found))]
    RemoteNotFound { message: String },

    #[error("{message}")]
    #[diagnostic(code(netequip::conflict))]
    Conflict { message: String },

    #[error("Port {port_id} is not available on equipment {equipment_id}")]
    #[diagnostic(
        code(netequip::port_unavailable),
        help("Run: netequip ports available {equipment_id}")
    )]
    PortUnavailable { port_id: i64, equipment_id: i64 },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(netequip::api_error))]
    Api { message: String, status: Option<u16> },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(netequip::validation))]
    Validation { field: String, reason: String },

    #[error("Unknown form field `{name}`")]
    #[diagnostic(code(netequip::unknown_field), help("Valid fields: {valid}"))]
    UnknownField { name: String, valid: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(netequip::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: netequip config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(netequip::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("'{action}' needs input that was not given")]
    #[diagnostic(
        code(netequip::interactive_required),
        help("Pass {hint}, or run in an interactive terminal.")
    )]
    NonInteractive { action: String, hint: String },

    // ── Internal / IO ────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    #[diagnostic(code(netequip::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(netequip::json), help("Check the JSON input and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } | Self::RemoteNotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } | Self::PortUnavailable { .. } => exit_code::CONFLICT,
            Self::Validation { .. }
            | Self::UnknownField { .. }
            | Self::NonInteractive { .. }
            | Self::ProfileNotFound { .. }
            | Self::Json(_)
            | Self::Api {
                status: Some(400), ..
            } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::Timeout => CliError::Timeout,
            CoreError::NotFound { message } => CliError::RemoteNotFound { message },
            CoreError::Conflict { message } | CoreError::Duplicate { message } => {
                CliError::Conflict { message }
            }
            CoreError::Api { message, status } => CliError::Api { message, status },
            CoreError::Validation(invalid) => CliError::Validation {
                field: invalid.field.into(),
                reason: invalid.reason,
            },
            CoreError::PortUnavailable {
                port_id,
                equipment_id,
            } => CliError::PortUnavailable {
                port_id,
                equipment_id,
            },
            CoreError::UnknownField(name) => CliError::UnknownField {
                name,
                valid: String::new(),
            },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::NoOpenForm => CliError::Internal("no form is open".into()),
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        let not_found = CliError::from(CoreError::NotFound {
            message: "Equipment not found".into(),
        });
        assert_eq!(not_found.exit_code(), exit_code::NOT_FOUND);

        let duplicate = CliError::from(CoreError::Duplicate {
            message: "exists".into(),
        });
        assert_eq!(duplicate.exit_code(), exit_code::CONFLICT);

        let bad_request = CliError::from(CoreError::Api {
            message: "Bad request".into(),
            status: Some(400),
        });
        assert_eq!(bad_request.exit_code(), exit_code::USAGE);

        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);
        assert_eq!(
            CliError::Internal("boom".into()).exit_code(),
            exit_code::GENERAL
        );
    }
}
