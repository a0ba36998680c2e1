//! The rendering seam between the session controller and a front-end.

use scholarbot_types::Reaction;

use crate::locale::Locale;
use crate::turn::TurnId;

/// A resolved reference link, ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceLink {
    /// Link text (source file name or the locale's unknown-source label).
    pub label: String,
    /// Link target (`#` when the source has no URL).
    pub url: String,
}

/// The answer so far, in both source and rendered form.
#[derive(Debug, Clone, Copy)]
pub struct RenderedAnswer<'a> {
    /// Accumulated Markdown source.
    pub markdown: &'a str,
    /// The same text rendered to HTML.
    pub html: &'a str,
}

/// Front-end operations the session drives.
///
/// Implementations own all layout decisions; the session only says what
/// changed. Calls arrive in the order the user should see them.
pub trait Presenter {
    /// New strings were loaded; refresh titles and labels.
    fn apply_locale(&mut self, locale: &Locale);

    /// Remove every message from the view.
    fn clear_messages(&mut self);

    /// Append a message typed by the user.
    fn show_user_message(&mut self, text: &str);

    /// Append a static assistant message (the greeting).
    fn show_assistant_message(&mut self, text: &str);

    /// Append the "thinking" placeholder for a new turn.
    fn show_placeholder(&mut self, turn: TurnId, text: &str);

    /// The first fragment arrived; remove the placeholder text.
    fn clear_placeholder(&mut self, turn: TurnId);

    /// Replace the turn's answer with the newly accumulated text.
    fn update_answer(&mut self, turn: TurnId, answer: RenderedAnswer<'_>);

    /// Replace the turn's answer with an error message.
    fn show_error(&mut self, turn: TurnId, message: &str);

    /// Attach reference links under the turn's answer.
    fn attach_references(&mut self, turn: TurnId, title: &str, links: &[ReferenceLink]);

    /// Attach like/dislike controls bound to `log_id`.
    fn attach_feedback_controls(
        &mut self,
        turn: TurnId,
        log_id: i64,
        like_label: &str,
        dislike_label: &str,
    );

    /// Highlight the selected reaction for `log_id` (`None` clears both).
    fn set_reaction(&mut self, log_id: i64, reaction: Option<Reaction>);

    /// Enable or disable the submit control.
    fn set_submit_enabled(&mut self, enabled: bool);

    /// Show the example-question shortcuts.
    fn show_examples(&mut self, examples: &[String]);

    /// Hide the example-question shortcuts.
    fn hide_examples(&mut self);

    /// Open the free-text feedback prompt for `log_id`.
    fn open_feedback_prompt(&mut self, log_id: i64);

    /// Close the free-text feedback prompt.
    fn close_feedback_prompt(&mut self);

    /// Show static help/contact text.
    fn show_help(&mut self, text: &str);

    /// The turn has ended, successfully or not. Nothing more is sent for it.
    fn finish_answer(&mut self, _turn: TurnId) {}

    /// Scroll so the newest content is visible.
    fn scroll_to_latest(&mut self) {}
}
