//! The chat session controller.

use std::sync::Arc;

use futures::StreamExt;
use scholarbot_types::{
    ChatBackend, ChatMessage, ChatRequest, FeedbackKind, FeedbackRecord, Reaction,
    SourceContext, StreamError, StreamEvent,
};
use tokio::task::JoinHandle;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::feedback::FeedbackBoard;
use crate::locale::Locale;
use crate::markdown::render_markdown;
use crate::presenter::{Presenter, ReferenceLink, RenderedAnswer};
use crate::turn::{Turn, TurnOutcome};

/// Link target used when a reference has no URL.
const MISSING_URL: &str = "#";

/// One user's conversation with the assistant.
///
/// Holds the history, the active locale, the draft input and the feedback
/// board. At most one turn runs at a time: [`submit_turn`](Self::submit_turn)
/// borrows the session mutably until the answer has ended.
pub struct Session<B, P> {
    backend: Arc<B>,
    presenter: P,
    config: SessionConfig,
    locale: Locale,
    lang: String,
    history: Vec<ChatMessage>,
    turns: Vec<Turn>,
    draft: String,
    in_flight: bool,
    examples_visible: bool,
    feedback: FeedbackBoard,
    pending_feedback: Vec<JoinHandle<()>>,
}

impl<B, P> Session<B, P>
where
    B: ChatBackend + 'static,
    P: Presenter,
{
    /// Create a session with built-in strings. Call [`start`](Self::start) to
    /// load the configured locale and seed the conversation.
    pub fn new(backend: B, presenter: P, config: SessionConfig) -> Self {
        let lang = config.default_lang.clone();
        Self {
            backend: Arc::new(backend),
            presenter,
            config,
            locale: Locale::default(),
            lang,
            history: Vec::new(),
            turns: Vec::new(),
            draft: String::new(),
            in_flight: false,
            examples_visible: false,
            feedback: FeedbackBoard::default(),
            pending_feedback: Vec::new(),
        }
    }

    /// Load the configured locale and show the greeting.
    ///
    /// A locale failure is logged and the built-in strings are used instead.
    pub async fn start(&mut self) {
        self.presenter.set_submit_enabled(false);
        let lang = self.config.default_lang.clone();
        if self.switch_locale(&lang).await.is_err() {
            self.presenter.apply_locale(&self.locale);
            self.clear();
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────────

    /// Conversation history as it will be sent with the next question.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Turns finished since the last reset, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Active locale code.
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Active strings.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current draft input.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Whether a turn is being answered.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.in_flight && !self.draft.trim().is_empty()
    }

    /// Whether the example shortcuts are visible.
    pub fn examples_visible(&self) -> bool {
        self.examples_visible
    }

    /// Feedback state per log id.
    pub fn feedback(&self) -> &FeedbackBoard {
        &self.feedback
    }

    /// The front-end.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The front-end, mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    // ─── Input ───────────────────────────────────────────────────────────────

    /// Replace the draft input and refresh the submit control.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.presenter.set_submit_enabled(self.can_submit());
    }

    /// Submit the current draft.
    pub async fn submit_draft(&mut self) -> TurnOutcome {
        let query = self.draft.clone();
        self.submit_turn(&query).await
    }

    /// Put example question `n` (1-based) in the input and submit it.
    pub async fn ask_example(&mut self, n: usize) -> TurnOutcome {
        let Some(question) = self.locale.example(n) else {
            tracing::warn!(index = n, "no such example question");
            return TurnOutcome::Rejected;
        };
        self.set_draft(question);
        self.submit_draft().await
    }

    // ─── Turns ───────────────────────────────────────────────────────────────

    /// Ask `query` and stream the answer into the view.
    ///
    /// Blank queries are rejected without touching any state. Errors never
    /// escape: a failed turn shows and records the locale's error message.
    pub async fn submit_turn(&mut self, query: &str) -> TurnOutcome {
        let query = query.trim();
        if query.is_empty() || self.in_flight {
            return TurnOutcome::Rejected;
        }

        if self.examples_visible {
            self.presenter.hide_examples();
            self.examples_visible = false;
        }

        let request = ChatRequest {
            query: query.to_string(),
            history: self.history.clone(),
            lang: Some(self.lang.clone()),
        };

        self.presenter.show_user_message(query);
        self.history.push(ChatMessage::user(query));
        self.draft.clear();
        self.in_flight = true;
        self.presenter.set_submit_enabled(false);

        let mut turn = Turn::new(query);
        self.presenter
            .show_placeholder(turn.id(), self.locale.thinking_message());
        tracing::info!(turn = %turn.id(), history = request.history.len(), "turn submitted");

        let outcome = match self.stream_answer(&mut turn, request).await {
            Ok(()) => {
                if !turn.phase().is_terminal() {
                    // The body closed without `end_stream`.
                    turn.complete(Vec::new(), None);
                }
                tracing::info!(turn = %turn.id(), chars = turn.answer().len(), "turn completed");
                TurnOutcome::Completed {
                    log_id: turn.log_id(),
                }
            }
            Err(err) => {
                tracing::error!(turn = %turn.id(), error = %err, "turn failed");
                let message = self.locale.error_message().to_string();
                turn.fail(&message);
                self.presenter.show_error(turn.id(), &message);
                TurnOutcome::Failed(err)
            }
        };

        self.presenter.finish_answer(turn.id());
        self.history.push(ChatMessage::assistant(turn.answer()));
        self.turns.push(turn);
        self.in_flight = false;
        self.presenter.set_submit_enabled(self.can_submit());
        outcome
    }

    async fn stream_answer(
        &mut self,
        turn: &mut Turn,
        request: ChatRequest,
    ) -> Result<(), SessionError> {
        let handle = self
            .backend
            .open_chat(request)
            .await
            .map_err(SessionError::NetworkOrHttp)?;
        turn.start_streaming();

        let mut events = handle.receiver;
        while let Some(event) = events.next().await {
            match event? {
                StreamEvent::ContentDelta(text) => {
                    if turn.push_delta(&text) {
                        self.presenter.clear_placeholder(turn.id());
                    }
                    let html = render_markdown(turn.answer());
                    self.presenter.update_answer(
                        turn.id(),
                        RenderedAnswer {
                            markdown: turn.answer(),
                            html: &html,
                        },
                    );
                    self.presenter.scroll_to_latest();
                }
                StreamEvent::EndOfStream { contexts, log_id } => {
                    self.attach_answer_extras(turn, &contexts, log_id);
                    turn.complete(contexts, log_id);
                    return Ok(());
                }
                StreamEvent::ServerError => {
                    return Err(SessionError::StreamProtocol(StreamError::ServerSignaled));
                }
            }
        }
        Ok(())
    }

    fn attach_answer_extras(
        &mut self,
        turn: &Turn,
        contexts: &[SourceContext],
        log_id: Option<i64>,
    ) {
        if !contexts.is_empty() {
            let links: Vec<ReferenceLink> = contexts
                .iter()
                .map(|ctx| ReferenceLink {
                    label: ctx
                        .source_file
                        .clone()
                        .filter(|s| !s.is_empty())
                        .unwrap_or_else(|| self.locale.unknown_source().to_string()),
                    url: ctx
                        .source_url
                        .clone()
                        .filter(|s| !s.is_empty())
                        .unwrap_or_else(|| MISSING_URL.to_string()),
                })
                .collect();
            self.presenter
                .attach_references(turn.id(), self.locale.reference_title(), &links);
        }

        if let Some(log_id) = log_id {
            self.feedback.register(log_id);
            self.presenter.attach_feedback_controls(
                turn.id(),
                log_id,
                self.locale.like_label(),
                self.locale.dislike_label(),
            );
        }
        self.presenter.scroll_to_latest();
    }

    // ─── Session lifecycle ───────────────────────────────────────────────────

    /// Discard the conversation and reseed it with the greeting.
    pub fn clear(&mut self) {
        self.presenter.clear_messages();
        if self.feedback.close_prompt() {
            self.presenter.close_feedback_prompt();
        }
        self.feedback.clear();
        self.turns.clear();

        let greeting = self.locale.initial_message().to_string();
        self.presenter.show_assistant_message(&greeting);
        self.history = vec![ChatMessage::assistant(greeting)];

        self.presenter.show_examples(&self.locale.examples());
        self.examples_visible = true;
        tracing::debug!(lang = %self.lang, "session cleared");
    }

    /// Load `lang`, apply its strings and reset the conversation.
    ///
    /// On failure the previous strings and locale stay active.
    pub async fn switch_locale(&mut self, lang: &str) -> Result<(), SessionError> {
        match self.backend.fetch_locale(lang).await {
            Ok(strings) => {
                self.locale = Locale::from(strings);
                self.lang = lang.to_string();
                self.presenter.apply_locale(&self.locale);
                self.clear();
                tracing::info!(lang = %lang, "locale loaded");
                Ok(())
            }
            Err(source) => {
                tracing::error!(lang = %lang, error = %source, "could not load locale");
                Err(SessionError::LocaleLoad {
                    lang: lang.to_string(),
                    source,
                })
            }
        }
    }

    /// Show the help/contact text.
    pub fn show_help(&mut self) {
        self.presenter.show_help(self.locale.help_text());
    }

    // ─── Feedback ────────────────────────────────────────────────────────────

    /// Click on a like/dislike control of the answer tagged `log_id`.
    pub fn react(&mut self, log_id: i64, reaction: Reaction) {
        let prompt_was_open = self.feedback.prompt().is_some();
        let Some(selection) = self.feedback.select(log_id, reaction) else {
            tracing::warn!(log_id, "reaction for an answer without feedback controls");
            return;
        };
        self.presenter.set_reaction(log_id, selection.reaction);
        self.send_feedback(selection.record);
        if selection.open_prompt {
            self.presenter.open_feedback_prompt(log_id);
        } else if prompt_was_open && self.feedback.prompt().is_none() {
            self.presenter.close_feedback_prompt();
        }
    }

    /// Submit the free-text prompt opened by a dislike.
    pub fn submit_feedback_text(&mut self, text: &str) {
        if let Some(record) = self.feedback.submit_text(text) {
            self.send_feedback(record);
            self.presenter.close_feedback_prompt();
        }
    }

    /// Dismiss the free-text prompt without sending anything.
    pub fn close_feedback_prompt(&mut self) {
        if self.feedback.close_prompt() {
            self.presenter.close_feedback_prompt();
        }
    }

    /// Send a feedback record directly, bypassing the reaction toggles.
    pub fn record_feedback(&mut self, log_id: i64, kind: FeedbackKind, text: Option<String>) {
        self.send_feedback(FeedbackRecord::new(log_id, kind, text));
    }

    /// Wait for every feedback request started so far.
    pub async fn flush_feedback(&mut self) {
        for handle in self.pending_feedback.drain(..) {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "feedback task panicked");
            }
        }
    }

    /// Fire-and-forget: failures are logged and never touch turn state.
    fn send_feedback(&mut self, record: FeedbackRecord) {
        self.pending_feedback.retain(|h| !h.is_finished());
        let backend = Arc::clone(&self.backend);
        self.pending_feedback.push(tokio::spawn(async move {
            let log_id = record.log_id;
            tracing::debug!(log_id, kind = ?record.feedback_type, "sending feedback");
            if let Err(e) = backend.send_feedback(record).await {
                tracing::warn!(log_id, error = %e, "feedback submission failed");
            }
        }));
    }
}
