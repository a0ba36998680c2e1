//! One question and its streamed answer.

use std::fmt;

use scholarbot_types::SourceContext;
use uuid::Uuid;

use crate::error::SessionError;

/// Unique identifier binding a turn to its placeholder in the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnId(Uuid);

impl TurnId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bot-{}", self.0)
    }
}

/// Where a turn is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Placeholder shown, request not yet accepted.
    Submitted,
    /// Success status received; consuming events.
    Streaming,
    /// Ended normally, by `end_stream` or by the body closing.
    Completed,
    /// Ended with an error; the answer is the locale's error message.
    Failed,
}

impl TurnPhase {
    /// Whether the turn has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// A single question/answer exchange.
#[derive(Debug, Clone)]
pub struct Turn {
    id: TurnId,
    query: String,
    answer: String,
    phase: TurnPhase,
    received_delta: bool,
    log_id: Option<i64>,
    contexts: Vec<SourceContext>,
}

impl Turn {
    pub(crate) fn new(query: impl Into<String>) -> Self {
        Self {
            id: TurnId::new(),
            query: query.into(),
            answer: String::new(),
            phase: TurnPhase::Submitted,
            received_delta: false,
            log_id: None,
            contexts: Vec::new(),
        }
    }

    /// Identifier of this turn.
    pub fn id(&self) -> TurnId {
        self.id
    }

    /// The question as submitted.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The accumulated answer (or the error message once failed).
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Feedback id assigned by the server, if any.
    pub fn log_id(&self) -> Option<i64> {
        self.log_id
    }

    /// References cited by the answer.
    pub fn contexts(&self) -> &[SourceContext] {
        &self.contexts
    }

    pub(crate) fn start_streaming(&mut self) {
        debug_assert_eq!(self.phase, TurnPhase::Submitted);
        self.phase = TurnPhase::Streaming;
    }

    /// Append a fragment. Returns `true` for the first fragment of the turn.
    pub(crate) fn push_delta(&mut self, text: &str) -> bool {
        debug_assert_eq!(self.phase, TurnPhase::Streaming);
        self.answer.push_str(text);
        !std::mem::replace(&mut self.received_delta, true)
    }

    pub(crate) fn complete(&mut self, contexts: Vec<SourceContext>, log_id: Option<i64>) {
        self.contexts = contexts;
        self.log_id = log_id;
        self.phase = TurnPhase::Completed;
    }

    pub(crate) fn fail(&mut self, message: &str) {
        self.answer = message.to_string();
        self.phase = TurnPhase::Failed;
    }
}

/// Result of [`Session::submit_turn`](crate::Session::submit_turn).
#[derive(Debug)]
pub enum TurnOutcome {
    /// Blank input, or a turn was already in flight. Nothing changed.
    Rejected,
    /// The answer was recorded in history.
    Completed {
        /// Feedback id assigned by the server, if any.
        log_id: Option<i64>,
    },
    /// The turn failed; the error message was recorded in history.
    Failed(SessionError),
}

impl TurnOutcome {
    /// Whether a turn was created.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Rejected)
    }
}
