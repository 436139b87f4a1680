use thiserror::Error;

/// Top-level error type for the `netequip-api` crate.
///
/// Every HTTP verb on [`ApiClient`](crate::ApiClient) funnels failures
/// through this enum. `netequip-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── HTTP ────────────────────────────────────────────────────────
    /// Non-2xx response. `message` is the `message` field of a JSON error
    /// body when the server sent one.
    #[error("{}", http_error_text(.status, .message.as_deref()))]
    Http { status: u16, message: Option<String> },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The underlying `reqwest::Client` could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn http_error_text(status: &u16, message: Option<&str>) -> String {
    match message {
        Some(message) => message.to_owned(),
        None => format!("HTTP error! status: {status}"),
    }
}

impl Error {
    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` for a 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` for a 409 response (duplicates, ports in use, ...).
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}
