//! Session-level error taxonomy.

use scholarbot_types::{ClientError, StreamError};

/// Why a turn or a locale switch failed.
///
/// Turn failures never escape the session: they are rendered as the locale's
/// error message and recorded in history. They are still surfaced in
/// [`TurnOutcome::Failed`](crate::TurnOutcome::Failed) for callers and logs.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Non-success status, or the connection failed before or during the body.
    #[error("network or HTTP error: {0}")]
    NetworkOrHttp(#[source] ClientError),
    /// The server sent `event: error`, or an event payload was malformed.
    #[error("stream protocol error: {0}")]
    StreamProtocol(#[source] StreamError),
    /// The locale resource could not be loaded.
    #[error("failed to load locale {lang}: {source}")]
    LocaleLoad {
        /// Requested locale code.
        lang: String,
        /// Underlying client error.
        #[source]
        source: ClientError,
    },
}

impl From<StreamError> for SessionError {
    fn from(err: StreamError) -> Self {
        match err {
            // A body read failure is a transport problem, not a framing one.
            StreamError::Transport(_) => Self::NetworkOrHttp(ClientError::Network(Box::new(err))),
            other => Self::StreamProtocol(other),
        }
    }
}
