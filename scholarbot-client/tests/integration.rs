//! Integration tests for the chat client using wiremock.

use futures::StreamExt;
use scholarbot_client::ChatClient;
use scholarbot_types::{
    ChatBackend, ChatMessage, ChatRequest, ClientError, EventResult, FeedbackKind, FeedbackRecord,
    StreamEvent,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> ChatRequest {
    ChatRequest {
        query: "什麼是清寒獎學金?".into(),
        history: vec![ChatMessage::assistant("您好！")],
        lang: Some("zh".into()),
    }
}

const SSE_BODY: &str = concat!(
    "data: {\"data\":\"Hello\"}\n\n",
    "data: {\"data\":\" world\"}\n\n",
    "event: end_stream\n",
    "data: {\"data\":{\"contexts\":[{\"source_file\":\"a.pdf\",\"source_url\":\"https://x/a.pdf\"}],\"log_id\":42}}\n\n",
);

#[tokio::test]
async fn open_chat_posts_query_history_and_lang() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "query": "什麼是清寒獎學金?",
            "history": [{"role": "assistant", "content": "您好！"}],
            "lang": "zh"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SSE_BODY, "text/event-stream"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(mock_server.uri());
    let handle = client.open_chat(request()).await.unwrap();
    let events: Vec<EventResult> = handle.receiver.collect().await;
    let events: Vec<StreamEvent> = events.into_iter().map(Result::unwrap).collect();

    assert_eq!(events.len(), 3);
    assert_eq!(events[0], StreamEvent::ContentDelta("Hello".into()));
    assert_eq!(events[1], StreamEvent::ContentDelta(" world".into()));
    assert!(matches!(
        &events[2],
        StreamEvent::EndOfStream { contexts, log_id: Some(42) }
            if contexts.len() == 1 && contexts[0].source_file.as_deref() == Some("a.pdf")
    ));
}

#[tokio::test]
async fn open_chat_returns_http_error_on_non_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(mock_server.uri());
    let err = client.open_chat(request()).await.unwrap_err();
    assert!(
        matches!(err, ClientError::Http { status: 503, ref body } if body == "overloaded"),
        "expected Http 503, got: {err:?}"
    );
}

#[tokio::test]
async fn open_chat_reports_network_error_when_server_is_down() {
    let client = ChatClient::new("http://127.0.0.1:9");
    let err = client.open_chat(request()).await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)), "got: {err:?}");
}

#[tokio::test]
async fn send_feedback_posts_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/feedback"))
        .and(body_json(serde_json::json!({
            "log_id": 42,
            "feedback_type": "dislike",
            "feedback_text": ""
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(mock_server.uri());
    client
        .send_feedback(FeedbackRecord::new(42, FeedbackKind::Dislike, Some(String::new())))
        .await
        .unwrap();
}

#[tokio::test]
async fn send_feedback_surfaces_failure_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/feedback"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(mock_server.uri());
    let err = client
        .send_feedback(FeedbackRecord::new(1, FeedbackKind::Like, None))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http { status: 500, .. }));
}

#[tokio::test]
async fn fetch_locale_keeps_string_entries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/locales/en.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "Scholarship Q&A",
            "thinking_message": "Thinking...",
            "version": 3
        })))
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(mock_server.uri());
    let strings = client.fetch_locale("en").await.unwrap();
    assert_eq!(strings.get("title").map(String::as_str), Some("Scholarship Q&A"));
    assert_eq!(strings.len(), 2);
}

#[tokio::test]
async fn fetch_locale_missing_file_is_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/locales/xx.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(mock_server.uri());
    let err = client.fetch_locale("xx").await.unwrap_err();
    assert!(matches!(err, ClientError::Http { status: 404, .. }));
}

#[tokio::test]
async fn fetch_locale_rejects_non_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/locales/en.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(mock_server.uri());
    let err = client.fetch_locale("en").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}
