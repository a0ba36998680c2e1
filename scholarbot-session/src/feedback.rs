//! Like/dislike state for completed answers.
//!
//! The board only decides *what* to send; the session sends it. Reactions are
//! keyed by the server's log id, and only answers that finished with a log id
//! are registered.

use std::collections::HashMap;

use scholarbot_types::{FeedbackKind, FeedbackRecord, Reaction};

/// Feedback on one answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackState {
    /// Selected reaction, if any.
    pub reaction: Option<Reaction>,
    /// Free-text comment attached to a dislike.
    pub text: Option<String>,
}

/// What a reaction click produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Record to send to the feedback endpoint.
    pub record: FeedbackRecord,
    /// Reaction now shown as selected.
    pub reaction: Option<Reaction>,
    /// Whether the free-text prompt should open.
    pub open_prompt: bool,
}

/// Feedback state for every answer in the current conversation.
#[derive(Debug, Default)]
pub struct FeedbackBoard {
    states: HashMap<i64, FeedbackState>,
    prompt: Option<i64>,
}

impl FeedbackBoard {
    /// Make `log_id` eligible for reactions.
    pub fn register(&mut self, log_id: i64) {
        self.states.entry(log_id).or_default();
    }

    /// Current state for `log_id`.
    pub fn state(&self, log_id: i64) -> Option<&FeedbackState> {
        self.states.get(&log_id)
    }

    /// Log id the free-text prompt is open for.
    pub fn prompt(&self) -> Option<i64> {
        self.prompt
    }

    /// Apply a click on `reaction` for `log_id`.
    ///
    /// Clicking the selected reaction clears it. Clicking the other one
    /// replaces it. A new dislike opens the free-text prompt. Returns `None`
    /// for unregistered log ids.
    pub fn select(&mut self, log_id: i64, reaction: Reaction) -> Option<Selection> {
        let state = self.states.get_mut(&log_id)?;

        if state.reaction == Some(reaction) {
            *state = FeedbackState::default();
            if self.prompt == Some(log_id) {
                self.prompt = None;
            }
            return Some(Selection {
                record: FeedbackRecord::new(log_id, FeedbackKind::Unset, None),
                reaction: None,
                open_prompt: false,
            });
        }

        state.reaction = Some(reaction);
        state.text = None;
        let open_prompt = reaction == Reaction::Dislike;
        if open_prompt {
            self.prompt = Some(log_id);
        } else if self.prompt == Some(log_id) {
            self.prompt = None;
        }

        Some(Selection {
            record: FeedbackRecord::new(log_id, FeedbackKind::from(Some(reaction)), None),
            reaction: Some(reaction),
            open_prompt,
        })
    }

    /// Submit the free-text prompt. Empty text is still a valid dislike
    /// comment. Returns `None` when no prompt is open.
    pub fn submit_text(&mut self, text: &str) -> Option<FeedbackRecord> {
        let log_id = self.prompt.take()?;
        let text = text.trim().to_string();
        let state = self.states.entry(log_id).or_default();
        state.reaction = Some(Reaction::Dislike);
        state.text = Some(text.clone());
        Some(FeedbackRecord::new(log_id, FeedbackKind::Dislike, Some(text)))
    }

    /// Close the prompt without sending anything.
    pub fn close_prompt(&mut self) -> bool {
        self.prompt.take().is_some()
    }

    /// Forget everything (the conversation was reset).
    pub fn clear(&mut self) {
        self.states.clear();
        self.prompt = None;
    }
}
