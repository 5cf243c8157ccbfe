use std::error::Error;

/// Reasons a single push to Loki did not go through.
///
/// These never reach the code that emitted the log line; loggers hand
/// them to a [`crate::fallback::FallbackLog`] and carry on.
#[derive(thiserror::Error, Debug)]
pub enum PushError {
    /// The field set or the push request could not be rendered as JSON.
    #[error("failed to serialize log entry: {0}")]
    Serialization(String),

    /// Connection, TLS or timeout failure while posting.
    #[error("failed to send log entry: {0}")]
    Transport(#[source] Box<dyn Error + Send + Sync>),

    /// The endpoint answered with something other than `204 No Content`.
    #[error("loki push rejected with status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl PushError {
    /// HTTP status for [`PushError::UnexpectedStatus`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            PushError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PushError {
    fn from(e: serde_json::Error) -> Self {
        PushError::Serialization(e.to_string())
    }
}

#[cfg(feature = "loki")]
impl From<reqwest::Error> for PushError {
    fn from(e: reqwest::Error) -> Self {
        PushError::Transport(Box::new(e))
    }
}

/// Error returned when building a sink's HTTP client fails.
#[derive(thiserror::Error, Debug)]
pub enum SinkBuildError {
    #[error("failed to build http client: {0}")]
    Client(#[source] Box<dyn Error + Send + Sync>),

    #[error("invalid loki endpoint: {0}")]
    InvalidEndpoint(String),
}

#[cfg(feature = "loki")]
impl From<reqwest::Error> for SinkBuildError {
    fn from(e: reqwest::Error) -> Self {
        SinkBuildError::Client(Box::new(e))
    }
}
