//! The backend seam between the session controller and the HTTP client.

use std::collections::HashMap;
use std::future::Future;

use crate::error::ClientError;
use crate::stream::StreamHandle;
use crate::types::{ChatRequest, FeedbackRecord};

/// The three remote operations the chat widget depends on.
///
/// Uses RPITIT and is not object-safe; compose with generics
/// (`Session<B: ChatBackend, ..>`).
pub trait ChatBackend: Send + Sync {
    /// Issue `POST /chat` and return the decoded event stream once a success
    /// status has been received.
    fn open_chat(
        &self,
        request: ChatRequest,
    ) -> impl Future<Output = Result<StreamHandle, ClientError>> + Send;

    /// Issue `POST /feedback`.
    fn send_feedback(
        &self,
        record: FeedbackRecord,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Fetch `GET /locales/{lang}.json`.
    fn fetch_locale(
        &self,
        lang: &str,
    ) -> impl Future<Output = Result<HashMap<String, String>, ClientError>> + Send;
}
