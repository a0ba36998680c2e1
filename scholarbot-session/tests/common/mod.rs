//! Scripted backend and recording presenter shared by the session tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use scholarbot_session::{Locale, Presenter, ReferenceLink, RenderedAnswer, TurnId};
use scholarbot_stream::decode_to_handle;
use scholarbot_types::{
    ChatBackend, ChatRequest, ClientError, FeedbackRecord, Reaction, StreamHandle,
};

/// A canned reply to one `/chat` request.
pub enum Reply {
    /// Success status; the body arrives in these chunks.
    Chunks(Vec<&'static str>),
    /// Success status; these chunks, then a read error.
    ChunksThenReset(Vec<&'static str>),
    /// Non-success status.
    Status(u16),
}

#[derive(Default)]
struct Inner {
    replies: VecDeque<Reply>,
    requests: Vec<ChatRequest>,
    feedback: Vec<FeedbackRecord>,
    locales: HashMap<String, HashMap<String, String>>,
    fail_feedback: bool,
}

/// In-memory [`ChatBackend`]. Clones share state so tests can inspect it
/// after handing one to the session.
#[derive(Clone, Default)]
pub struct ScriptedBackend {
    inner: Arc<Mutex<Inner>>,
}

impl ScriptedBackend {
    pub fn reply(self, reply: Reply) -> Self {
        self.inner.lock().unwrap().replies.push_back(reply);
        self
    }

    pub fn locale(self, lang: &str, strings: &[(&str, &str)]) -> Self {
        let map = strings
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.inner.lock().unwrap().locales.insert(lang.to_string(), map);
        self
    }

    pub fn failing_feedback(self) -> Self {
        self.inner.lock().unwrap().fail_feedback = true;
        self
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn feedback(&self) -> Vec<FeedbackRecord> {
        self.inner.lock().unwrap().feedback.clone()
    }
}

impl ChatBackend for ScriptedBackend {
    fn open_chat(
        &self,
        request: ChatRequest,
    ) -> impl Future<Output = Result<StreamHandle, ClientError>> + Send {
        let reply = {
            let mut inner = self.inner.lock().unwrap();
            inner.requests.push(request);
            inner.replies.pop_front()
        };
        async move {
            match reply {
                Some(Reply::Chunks(parts)) => Ok(decode_to_handle(futures::stream::iter(
                    parts
                        .into_iter()
                        .map(|p| Ok::<_, String>(Bytes::from_static(p.as_bytes()))),
                ))),
                Some(Reply::ChunksThenReset(parts)) => {
                    let mut items: Vec<Result<Bytes, String>> = parts
                        .into_iter()
                        .map(|p| Ok(Bytes::from_static(p.as_bytes())))
                        .collect();
                    items.push(Err("connection reset".into()));
                    Ok(decode_to_handle(futures::stream::iter(items)))
                }
                Some(Reply::Status(status)) => Err(ClientError::Http {
                    status,
                    body: String::new(),
                }),
                None => Err(ClientError::InvalidResponse("no scripted reply".into())),
            }
        }
    }

    fn send_feedback(
        &self,
        record: FeedbackRecord,
    ) -> impl Future<Output = Result<(), ClientError>> + Send {
        let fail = {
            let mut inner = self.inner.lock().unwrap();
            inner.feedback.push(record);
            inner.fail_feedback
        };
        async move {
            if fail {
                Err(ClientError::Http {
                    status: 500,
                    body: "db down".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn fetch_locale(
        &self,
        lang: &str,
    ) -> impl Future<Output = Result<HashMap<String, String>, ClientError>> + Send {
        let found = self.inner.lock().unwrap().locales.get(lang).cloned();
        async move {
            found.ok_or(ClientError::Http {
                status: 404,
                body: String::new(),
            })
        }
    }
}

/// Presenter that logs every call as a short string.
#[derive(Default)]
pub struct RecordingPresenter {
    pub calls: Vec<String>,
    pub submit_enabled: Option<bool>,
    pub title: Option<String>,
    pub answers: HashMap<TurnId, String>,
}

impl RecordingPresenter {
    pub fn count(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn has(&self, call: &str) -> bool {
        self.calls.iter().any(|c| c == call)
    }
}

impl Presenter for RecordingPresenter {
    fn apply_locale(&mut self, locale: &Locale) {
        self.title = Some(locale.title().to_string());
        self.calls.push(format!("locale:{}", locale.title()));
    }

    fn clear_messages(&mut self) {
        self.calls.push("clear".into());
        self.answers.clear();
    }

    fn show_user_message(&mut self, text: &str) {
        self.calls.push(format!("user:{text}"));
    }

    fn show_assistant_message(&mut self, text: &str) {
        self.calls.push(format!("assistant:{text}"));
    }

    fn show_placeholder(&mut self, turn: TurnId, text: &str) {
        self.answers.insert(turn, text.to_string());
        self.calls.push(format!("placeholder:{text}"));
    }

    fn clear_placeholder(&mut self, turn: TurnId) {
        self.answers.insert(turn, String::new());
        self.calls.push("clear_placeholder".into());
    }

    fn update_answer(&mut self, turn: TurnId, answer: RenderedAnswer<'_>) {
        self.answers.insert(turn, answer.html.to_string());
        self.calls.push(format!("answer:{}", answer.markdown));
    }

    fn show_error(&mut self, turn: TurnId, message: &str) {
        self.answers.insert(turn, message.to_string());
        self.calls.push(format!("error:{message}"));
    }

    fn attach_references(&mut self, _turn: TurnId, title: &str, links: &[ReferenceLink]) {
        let links: Vec<String> = links
            .iter()
            .map(|l| format!("{}|{}", l.label, l.url))
            .collect();
        self.calls.push(format!("refs:{title}:{}", links.join(",")));
    }

    fn attach_feedback_controls(
        &mut self,
        _turn: TurnId,
        log_id: i64,
        like_label: &str,
        dislike_label: &str,
    ) {
        self.calls
            .push(format!("controls:{log_id}:{like_label}:{dislike_label}"));
    }

    fn set_reaction(&mut self, log_id: i64, reaction: Option<Reaction>) {
        self.calls.push(format!("reaction:{log_id}:{reaction:?}"));
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = Some(enabled);
        self.calls.push(format!("submit:{enabled}"));
    }

    fn show_examples(&mut self, examples: &[String]) {
        self.calls.push(format!("examples:{}", examples.len()));
    }

    fn hide_examples(&mut self) {
        self.calls.push("hide_examples".into());
    }

    fn open_feedback_prompt(&mut self, log_id: i64) {
        self.calls.push(format!("prompt_open:{log_id}"));
    }

    fn close_feedback_prompt(&mut self) {
        self.calls.push("prompt_close".into());
    }

    fn show_help(&mut self, text: &str) {
        self.calls.push(format!("help:{text}"));
    }

    fn finish_answer(&mut self, _turn: TurnId) {
        self.calls.push("finish".into());
    }

    fn scroll_to_latest(&mut self) {
        self.calls.push("scroll".into());
    }
}

pub const ZH: &[(&str, &str)] = &[
    ("title", "獎學金問答"),
    ("thinking_message", "思考中..."),
    ("initial_bot_message", "您好！請問有什麼可以幫您？"),
    ("error_message", "抱歉，連線時發生錯誤。"),
    ("reference_title", "參考資料："),
    ("unknown_source", "未知來源"),
    ("like_button_title", "滿意"),
    ("dislike_button_title", "不滿意"),
    ("help_alert", "請聯絡生輔組"),
    ("example_question_1", "有哪些獎學金？"),
];

pub const EN: &[(&str, &str)] = &[
    ("title", "Scholarship Q&A"),
    ("initial_bot_message", "Hi! Ask me about scholarships."),
    ("error_message", "Something went wrong."),
];

pub const HELLO_WORLD: [&str; 2] = [
    "data: {\"data\":\"Hel",
    "lo\"}\n\ndata: {\"data\":\" world\"}\n\nevent: end_stream\ndata: {\"data\":{\"contexts\":[],\"log_id\":42}}\n\n",
];
