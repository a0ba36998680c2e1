//! Terminal rendering of the chat view.

use std::collections::HashMap;
use std::fmt;
use std::io::Write;

use scholarbot_session::{Locale, PresentationMode, Presenter, ReferenceLink, RenderedAnswer, TurnId};
use scholarbot_types::Reaction;

/// Erase the current line (used to remove the "thinking" placeholder).
const CLEAR_LINE: &str = "\r\x1b[2K";

/// Prints the conversation to a terminal.
///
/// Answers are printed incrementally: each update writes only the text added
/// since the previous one. Popup mode drops the title banner and the
/// reference heading.
pub struct TerminalPresenter<W: Write> {
    out: W,
    mode: PresentationMode,
    printed: HashMap<TurnId, usize>,
    placeholder_open: bool,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, mode: PresentationMode) -> Self {
        Self {
            out,
            mode,
            printed: HashMap::new(),
            placeholder_open: false,
        }
    }

    /// Print the input prompt.
    pub fn input_prompt(&mut self, feedback: bool) {
        self.emit(format_args!("{}", if feedback { "feedback> " } else { "> " }));
    }

    /// Print a one-line notice.
    pub fn notice(&mut self, text: &str) {
        self.emit(format_args!("{text}\n"));
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = self.out.write_fmt(args).and_then(|()| self.out.flush()) {
            tracing::debug!(error = %e, "terminal write failed");
        }
    }

    fn end_answer_line(&mut self, turn: TurnId) {
        if self.printed.remove(&turn).is_some() {
            self.emit(format_args!("\n"));
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn apply_locale(&mut self, locale: &Locale) {
        if self.mode == PresentationMode::FullPage {
            let title = locale.title();
            let rule = "=".repeat(title.chars().count().max(8) * 2);
            self.emit(format_args!("\n{title}\n{rule}\n"));
        }
    }

    fn clear_messages(&mut self) {
        self.printed.clear();
        self.placeholder_open = false;
        self.emit(format_args!("\n"));
    }

    fn show_user_message(&mut self, text: &str) {
        self.emit(format_args!("you: {text}\n"));
    }

    fn show_assistant_message(&mut self, text: &str) {
        self.emit(format_args!("bot: {text}\n"));
    }

    fn show_placeholder(&mut self, _turn: TurnId, text: &str) {
        self.placeholder_open = true;
        self.emit(format_args!("bot: {text}"));
    }

    fn clear_placeholder(&mut self, turn: TurnId) {
        if std::mem::take(&mut self.placeholder_open) {
            self.emit(format_args!("{CLEAR_LINE}bot: "));
        }
        self.printed.insert(turn, 0);
    }

    fn update_answer(&mut self, turn: TurnId, answer: RenderedAnswer<'_>) {
        let done = self.printed.get(&turn).copied().unwrap_or(0);
        if let Some(new_text) = answer.markdown.get(done..) {
            self.emit(format_args!("{new_text}"));
        }
        self.printed.insert(turn, answer.markdown.len());
    }

    fn show_error(&mut self, turn: TurnId, message: &str) {
        if std::mem::take(&mut self.placeholder_open) {
            self.emit(format_args!("{CLEAR_LINE}bot: {message}\n"));
        } else {
            self.end_answer_line(turn);
            self.emit(format_args!("bot: {message}\n"));
        }
        self.printed.remove(&turn);
    }

    fn attach_references(&mut self, turn: TurnId, title: &str, links: &[ReferenceLink]) {
        self.end_answer_line(turn);
        if self.mode == PresentationMode::FullPage {
            self.emit(format_args!("{title}\n"));
        }
        for link in links {
            self.emit(format_args!("  ➤ {} <{}>\n", link.label, link.url));
        }
    }

    fn attach_feedback_controls(
        &mut self,
        turn: TurnId,
        log_id: i64,
        like_label: &str,
        dislike_label: &str,
    ) {
        self.end_answer_line(turn);
        self.emit(format_args!(
            "  [{like_label}: /like {log_id}]  [{dislike_label}: /dislike {log_id}]\n"
        ));
    }

    fn finish_answer(&mut self, turn: TurnId) {
        if std::mem::take(&mut self.placeholder_open) {
            // Empty answer.
            self.emit(format_args!("{CLEAR_LINE}bot:\n"));
        }
        self.end_answer_line(turn);
    }

    fn set_reaction(&mut self, log_id: i64, reaction: Option<Reaction>) {
        let state = match reaction {
            Some(Reaction::Like) => "👍",
            Some(Reaction::Dislike) => "👎",
            None => "-",
        };
        self.emit(format_args!("  #{log_id}: {state}\n"));
    }

    fn set_submit_enabled(&mut self, _enabled: bool) {}

    fn show_examples(&mut self, examples: &[String]) {
        for (i, example) in examples.iter().enumerate() {
            self.emit(format_args!("  /ask {}  {example}\n", i + 1));
        }
    }

    fn hide_examples(&mut self) {}

    fn open_feedback_prompt(&mut self, _log_id: i64) {
        self.emit(format_args!("  (type your feedback, or /cancel)\n"));
    }

    fn close_feedback_prompt(&mut self) {}

    fn show_help(&mut self, text: &str) {
        self.emit(format_args!("{text}\n"));
    }
}
