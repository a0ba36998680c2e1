//! Async adapter driving [`EventDecoder`] over a byte stream.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use scholarbot_types::{EventResult, StreamError, StreamHandle};

use crate::decoder::EventDecoder;

/// Decode a raw byte stream into a stream of events.
///
/// The decoder is owned by the returned stream, so one body always gets its
/// own decoder. The stream ends when the byte stream ends; any text still
/// buffered at that point is incomplete framing and is dropped. A read error
/// is yielded as [`StreamError::Transport`] and ends the stream.
pub fn decode_stream<S, E>(byte_stream: S) -> impl Stream<Item = EventResult> + Send + 'static
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    async_stream::stream! {
        let mut decoder = EventDecoder::new();
        let mut bytes_stream = std::pin::pin!(byte_stream);

        while let Some(chunk_result) = bytes_stream.next().await {
            let chunk = match chunk_result {
                Ok(b) => b,
                Err(e) => {
                    yield Err(StreamError::Transport(e.to_string()));
                    return;
                }
            };

            for event in decoder.push(&chunk) {
                yield event;
            }
        }

        if let Some(residual) = decoder.finish() {
            tracing::debug!(bytes = residual.len(), "discarding incomplete trailing event");
        }
    }
}

/// [`decode_stream`] wrapped in a [`StreamHandle`].
pub fn decode_to_handle<S, E>(byte_stream: S) -> StreamHandle
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    StreamHandle::new(decode_stream(byte_stream))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholarbot_types::StreamEvent;

    fn chunks(parts: Vec<&'static str>) -> impl Stream<Item = Result<Bytes, String>> + Send {
        futures::stream::iter(
            parts
                .into_iter()
                .map(|p| Ok(Bytes::from_static(p.as_bytes()))),
        )
    }

    #[tokio::test]
    async fn transport_error_ends_stream() {
        let source = futures::stream::iter(vec![
            Ok(Bytes::from_static(b"data: {\"data\":\"a\"}\n\n")),
            Err("connection reset".to_string()),
            Ok(Bytes::from_static(b"data: {\"data\":\"b\"}\n\n")),
        ]);
        let events: Vec<EventResult> = decode_stream(source).collect().await;
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], Ok(StreamEvent::ContentDelta(t)) if t == "a"));
        assert!(matches!(&events[1], Err(StreamError::Transport(m)) if m == "connection reset"));
    }

    #[tokio::test]
    async fn trailing_fragment_is_dropped_silently() {
        let events: Vec<EventResult> =
            decode_stream(chunks(vec!["data: {\"data\":\"a\"}\n\n", "data: {\"data\":\"par"]))
                .collect()
                .await;
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], Ok(StreamEvent::ContentDelta(t)) if t == "a"));
    }

    #[tokio::test]
    async fn handle_wraps_decoded_stream() {
        let handle = decode_to_handle(chunks(vec!["event: error\n\n"]));
        let events: Vec<EventResult> = handle.receiver.collect().await;
        assert!(matches!(events.as_slice(), [Ok(StreamEvent::ServerError)]));
    }
}
