//! Streaming event types for incremental chat answers.

use std::pin::Pin;

use futures::Stream;

use crate::error::StreamError;
use crate::types::SourceContext;

/// A typed event decoded from the chat endpoint's event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// An incremental fragment of the answer text.
    ContentDelta(String),
    /// Terminal event carrying reference metadata.
    EndOfStream {
        /// Documents cited by the answer.
        contexts: Vec<SourceContext>,
        /// Server-assigned id used for feedback, when the answer was logged.
        log_id: Option<i64>,
    },
    /// The server signaled a failure mid-stream (`event: error`).
    ServerError,
}

/// Item type produced by a decoded event stream.
pub type EventResult = Result<StreamEvent, StreamError>;

/// Handle to a decoded chat response.
pub struct StreamHandle {
    /// The stream of events. Consume with `StreamExt::next()`.
    pub receiver: Pin<Box<dyn Stream<Item = EventResult> + Send>>,
}

impl StreamHandle {
    /// Wrap any event stream.
    pub fn new(stream: impl Stream<Item = EventResult> + Send + 'static) -> Self {
        Self {
            receiver: Box::pin(stream),
        }
    }
}

impl std::fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamHandle").finish_non_exhaustive()
    }
}
