//! Error types for the claw-api crate.

/// Errors that can occur while talking to the controller backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error(
        "API error: HTTP {status}{}",
        .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
    )]
    Rejected {
        status: u16,
        /// Human-readable reason reported by the backend, if any.
        detail: Option<String>,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),
}

impl ApiError {
    /// The message to show an operator, when the error carries one.
    ///
    /// A rejection without a backend-supplied reason has no message; callers
    /// substitute their own generic text in that case.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Rejected { detail, .. } => detail.clone(),
            Self::Auth(msg) => Some(msg.clone()),
            other => Some(other.to_string()),
        }
    }
}
