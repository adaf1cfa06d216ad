//! Error types for narrative generation.

use thiserror::Error;

/// Result type alias for narrative operations.
pub type Result<T> = std::result::Result<T, NarrativeError>;

/// Errors that can occur while generating narrative text.
#[derive(Error, Debug)]
pub enum NarrativeError {
    /// The API credential is absent. Raised before any request is sent.
    #[error("{env_var} is not set in the environment")]
    MissingCredential { env_var: String },

    /// Transport failure, including timeouts.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The model answered with blank text.
    #[error("model returned empty content")]
    EmptyContent,
}

impl NarrativeError {
    /// Whether this is a local configuration problem rather than a service failure.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingCredential { .. })
    }
}
