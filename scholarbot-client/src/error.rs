//! Internal helpers for mapping HTTP/reqwest errors to [`ClientError`].

use std::time::Duration;

use scholarbot_types::ClientError;

/// Map a non-success status and its body to a [`ClientError`].
pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str) -> ClientError {
    ClientError::Http {
        status: status.as_u16(),
        body: body.to_string(),
    }
}

/// Map a [`reqwest::Error`] to a [`ClientError`].
pub(crate) fn map_reqwest_error(err: reqwest::Error, timeout: Duration) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout(timeout)
    } else if err.is_decode() {
        ClientError::InvalidResponse(err.to_string())
    } else {
        ClientError::Network(Box::new(err))
    }
}
