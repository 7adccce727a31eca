//! Error types for the console data layer.

/// Failure of a single page fetch at the data-source boundary.
///
/// A fetch failure is terminal for that request: the controller logs it,
/// publishes an empty item list, and waits for the next user interaction.
/// There is no stale-response variant; a superseded response is discarded
/// silently inside the controller and never surfaces as an error.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("api error {code}: {message}")]
    Api { code: u16, message: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
}

impl FetchError {
    /// Check if this error carries a backend-reported status code.
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Check if this error represents a timed-out request.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}
