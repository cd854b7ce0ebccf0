use thiserror::Error;

/// Everything that can go wrong talking to the backend. All variants
/// are caught at the controller boundary, logged to the console, and
/// turned into a user-visible message; none escape as panics.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The fetch itself rejected (network down, CORS, bad URL) or the
    /// response body could not be read.
    #[error("network request failed: {0}")]
    Network(String),

    /// The server answered with a non-ok status. `message` carries the
    /// body's `{"error": ...}` field when one was present.
    #[error("server responded with status {status}")]
    Http { status: u16, message: Option<String> },

    /// Admin verification did not produce an ok status plus an explicit
    /// `valid: true` flag.
    #[error("invalid credentials")]
    InvalidCredentials,
}

impl ApiError {
    /// The inline message to show the user, preferring a server-supplied
    /// error string over the caller's generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::InvalidCredentials => "Invalid credentials".to_owned(),
            ApiError::Http {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Http { message: None, .. } | ApiError::Network(_) => fallback.to_owned(),
        }
    }
}
