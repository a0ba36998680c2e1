//! Error types shared by the scholarbot crates.

use std::time::Duration;

/// Errors from talking to the assistant's HTTP endpoints.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Network-level failure (connection refused, reset, DNS, ...).
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The request timed out.
    #[error("timeout after {0:?}")]
    Timeout(Duration),
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },
    /// The response body could not be interpreted.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Whether retrying the request might succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::InvalidResponse(_) => false,
        }
    }
}

/// Errors raised while decoding a single event of a response stream.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// A `data:` payload was not the expected JSON. Affects that event only.
    #[error("malformed {event} payload: {reason}")]
    MalformedPayload {
        /// Which kind of event was being parsed (`data` or `end_stream`).
        event: &'static str,
        /// Parser message.
        reason: String,
    },
    /// Reading the response body failed. The stream ends after this.
    #[error("stream read error: {0}")]
    Transport(String),
    /// The server sent `event: error`. Raised by consumers of
    /// [`StreamEvent::ServerError`](crate::StreamEvent::ServerError).
    #[error("server reported an error during streaming")]
    ServerSignaled,
}
