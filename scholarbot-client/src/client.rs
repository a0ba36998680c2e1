//! Chat client struct and builder.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use scholarbot_stream::decode_to_handle;
use scholarbot_types::{ChatBackend, ChatRequest, ClientError, FeedbackRecord, StreamHandle};

use crate::error::{map_http_status, map_reqwest_error};

/// Default server address, matching a local development server.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default timeout for the short feedback and locale requests.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Q&A server's `/chat`, `/feedback` and `/locales` routes.
///
/// Implements [`ChatBackend`] for use by the session controller.
#[derive(Debug, Clone)]
pub struct ChatClient {
    /// Server base URL, without a trailing slash.
    pub(crate) base_url: String,
    /// Timeout applied to feedback and locale requests. Chat streams are not
    /// bounded, since answers may take arbitrarily long to generate.
    pub(crate) request_timeout: Duration,
    /// Shared HTTP client.
    pub(crate) client: reqwest::Client,
}

impl Default for ChatClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ChatClient {
    /// Create a client for the server at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    /// Override the timeout for feedback and locale requests.
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Use a preconfigured [`reqwest::Client`] (proxies, connect timeouts, TLS).
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }

    pub(crate) fn feedback_url(&self) -> String {
        format!("{}/feedback", self.base_url)
    }

    pub(crate) fn locale_url(&self, lang: &str) -> String {
        format!("{}/locales/{lang}.json", self.base_url)
    }
}

fn normalize_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

impl ChatBackend for ChatClient {
    /// Post the question and hand back the decoded event stream.
    fn open_chat(
        &self,
        request: ChatRequest,
    ) -> impl Future<Output = Result<StreamHandle, ClientError>> + Send {
        let url = self.chat_url();
        let http_client = self.client.clone();
        let timeout = self.request_timeout;

        async move {
            tracing::debug!(
                url = %url,
                history = request.history.len(),
                lang = request.lang.as_deref().unwrap_or("-"),
                "sending chat request"
            );

            let response = http_client
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|e| map_reqwest_error(e, timeout))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(map_http_status(status, &body));
            }

            Ok(decode_to_handle(response.bytes_stream()))
        }
    }

    fn send_feedback(
        &self,
        record: FeedbackRecord,
    ) -> impl Future<Output = Result<(), ClientError>> + Send {
        let url = self.feedback_url();
        let http_client = self.client.clone();
        let timeout = self.request_timeout;

        async move {
            tracing::debug!(url = %url, log_id = record.log_id, "sending feedback");

            let response = http_client
                .post(&url)
                .timeout(timeout)
                .json(&record)
                .send()
                .await
                .map_err(|e| map_reqwest_error(e, timeout))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(map_http_status(status, &body));
            }
            Ok(())
        }
    }

    fn fetch_locale(
        &self,
        lang: &str,
    ) -> impl Future<Output = Result<HashMap<String, String>, ClientError>> + Send {
        let url = self.locale_url(lang);
        let http_client = self.client.clone();
        let timeout = self.request_timeout;

        async move {
            tracing::debug!(url = %url, "fetching locale");

            let response = http_client
                .get(&url)
                .timeout(timeout)
                .send()
                .await
                .map_err(|e| map_reqwest_error(e, timeout))?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| map_reqwest_error(e, timeout))?;
            if !status.is_success() {
                return Err(map_http_status(status, &text));
            }

            let json: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&text)
                .map_err(|e| ClientError::InvalidResponse(format!("invalid locale JSON: {e}")))?;

            // Non-string entries are not UI strings.
            Ok(json
                .into_iter()
                .filter_map(|(key, value)| match value {
                    serde_json::Value::String(s) => Some((key, s)),
                    _ => None,
                })
                .collect())
        }
    }
}
