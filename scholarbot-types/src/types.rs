//! Conversation and wire types shared by every scholarbot crate.

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Who authored a [`ChatMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person typing questions.
    User,
    /// The Q&A assistant.
    Assistant,
}

/// One entry of the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author of the message.
    pub role: Role,
    /// Plain text (Markdown for assistant answers).
    pub content: String,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A reference document cited alongside an answer.
///
/// Only the two fields used for rendering links are kept; anything else the
/// server sends is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceContext {
    /// Display name of the source document.
    #[serde(default)]
    pub source_file: Option<String>,
    /// Link target for the source document.
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    /// The new question.
    pub query: String,
    /// Prior conversation, never including the turn being submitted.
    pub history: Vec<ChatMessage>,
    /// Active locale code (e.g. `zh`, `en`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// A like/dislike reaction on a completed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    /// Thumbs up.
    Like,
    /// Thumbs down.
    Dislike,
}

/// The feedback kind sent to the server. `Unset` clears a previous reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackKind {
    /// Thumbs up.
    Like,
    /// Thumbs down.
    Dislike,
    /// No reaction; serialized as `null`.
    Unset,
}

impl FeedbackKind {
    /// The active reaction, if any.
    pub fn reaction(self) -> Option<Reaction> {
        match self {
            Self::Like => Some(Reaction::Like),
            Self::Dislike => Some(Reaction::Dislike),
            Self::Unset => None,
        }
    }
}

impl From<Option<Reaction>> for FeedbackKind {
    fn from(reaction: Option<Reaction>) -> Self {
        match reaction {
            Some(Reaction::Like) => Self::Like,
            Some(Reaction::Dislike) => Self::Dislike,
            None => Self::Unset,
        }
    }
}

impl Serialize for FeedbackKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.reaction() {
            Some(reaction) => reaction.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

/// Body of `POST /feedback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackRecord {
    /// Server-assigned id of the answer being rated.
    pub log_id: i64,
    /// Reaction, or `null` when cleared.
    pub feedback_type: FeedbackKind,
    /// Optional free-text comment. An empty string is a valid comment.
    pub feedback_text: Option<String>,
}

impl FeedbackRecord {
    /// Build a record for `log_id`.
    pub fn new(log_id: i64, kind: FeedbackKind, text: Option<String>) -> Self {
        // Clearing a reaction clears its comment as well.
        let feedback_text = match kind {
            FeedbackKind::Unset => None,
            _ => text,
        };
        Self {
            log_id,
            feedback_type: kind,
            feedback_text,
        }
    }
}
