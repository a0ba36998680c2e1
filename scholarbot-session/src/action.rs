//! User interface events and their dispatch onto session operations.

use scholarbot_types::{ChatBackend, Reaction};

use crate::presenter::Presenter;
use crate::session::Session;
use crate::turn::TurnOutcome;

/// Everything a user can do in the chat view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// The input text changed.
    InputChanged(String),
    /// The submit control was pressed.
    Submit,
    /// An example-question shortcut (1-based) was clicked.
    AskExample(usize),
    /// The clear-chat control was pressed.
    ClearSession,
    /// The help control was pressed.
    ShowHelp,
    /// A different locale was selected.
    SwitchLocale(String),
    /// A like/dislike control was clicked.
    React {
        /// Log id the controls are bound to.
        log_id: i64,
        /// Which control.
        reaction: Reaction,
    },
    /// The free-text feedback prompt was submitted.
    SubmitFeedbackText(String),
    /// The free-text feedback prompt was dismissed.
    CloseFeedbackPrompt,
}

impl<B, P> Session<B, P>
where
    B: ChatBackend + 'static,
    P: Presenter,
{
    /// Route a user action to the matching operation.
    ///
    /// Returns the outcome when the action ran a turn.
    pub async fn dispatch(&mut self, action: UserAction) -> Option<TurnOutcome> {
        tracing::trace!(?action, "dispatch");
        match action {
            UserAction::InputChanged(text) => self.set_draft(text),
            UserAction::Submit => return Some(self.submit_draft().await),
            UserAction::AskExample(n) => return Some(self.ask_example(n).await),
            UserAction::ClearSession => self.clear(),
            UserAction::ShowHelp => self.show_help(),
            UserAction::SwitchLocale(lang) => {
                // Already logged; the previous strings stay in place.
                let _ = self.switch_locale(&lang).await;
            }
            UserAction::React { log_id, reaction } => self.react(log_id, reaction),
            UserAction::SubmitFeedbackText(text) => self.submit_feedback_text(&text),
            UserAction::CloseFeedbackPrompt => self.close_feedback_prompt(),
        }
        None
    }
}
