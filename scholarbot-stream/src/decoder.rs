//! Synchronous event decoder.

use scholarbot_types::{EventResult, SourceContext, StreamError, StreamEvent};
use serde::Deserialize;

use crate::utf8::Utf8Carry;

/// Separator between two events.
const EVENT_DELIMITER: &str = "\n\n";

/// Leading line of the terminal metadata event.
const END_STREAM_MARKER: &str = "event: end_stream";

/// Leading line of a server-side failure event.
const ERROR_MARKER: &str = "event: error";

/// Field prefix carrying a JSON payload.
const DATA_FIELD: &str = "data:";

/// Incremental decoder for one chat response body.
///
/// Feed raw byte chunks with [`push`](Self::push); each call returns the
/// events completed by that chunk. Chunk boundaries may fall anywhere,
/// including inside a UTF-8 character or inside the blank-line delimiter.
/// Call [`finish`](Self::finish) once the body ends.
///
/// A decoder belongs to a single response body and is consumed by `finish`.
#[derive(Debug, Default)]
pub struct EventDecoder {
    utf8: Utf8Carry,
    buffer: String,
    /// Buffer offset before which no delimiter can start.
    scanned: usize,
}

impl EventDecoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `chunk` and return every event it completed, in order.
    ///
    /// A segment with a malformed payload produces an `Err` in its slot; the
    /// segments around it are unaffected.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<EventResult> {
        self.utf8.decode_into(chunk, &mut self.buffer);

        let mut events = Vec::new();
        while let Some(rel) = self.buffer[self.scanned..].find(EVENT_DELIMITER) {
            let pos = self.scanned + rel;
            let segment: String = self.buffer.drain(..pos + EVENT_DELIMITER.len()).collect();
            self.scanned = 0;
            if let Some(event) = classify(&segment[..pos]) {
                events.push(event);
            }
        }
        self.scanned = self.resume_offset();
        events
    }

    /// Where the next scan starts: far enough back that a delimiter split
    /// across chunks is still found, on a char boundary.
    fn resume_offset(&self) -> usize {
        let mut offset = self
            .buffer
            .len()
            .saturating_sub(EVENT_DELIMITER.len() - 1);
        while !self.buffer.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    /// Text held back waiting for its delimiter.
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// End the stream, returning the residual text that never saw a
    /// delimiter. The residual is incomplete framing and is not decoded.
    pub fn finish(self) -> Option<String> {
        let mut residual = self.buffer;
        if self.utf8.pending_len() > 0 {
            residual.push(char::REPLACEMENT_CHARACTER);
        }
        if residual.trim().is_empty() {
            None
        } else {
            Some(residual)
        }
    }
}

#[derive(Deserialize)]
struct DeltaPayload {
    data: String,
}

#[derive(Deserialize)]
struct EndPayload {
    #[serde(default)]
    data: Option<EndData>,
}

#[derive(Default, Deserialize)]
struct EndData {
    #[serde(default)]
    contexts: Option<Vec<SourceContext>>,
    #[serde(default)]
    log_id: Option<i64>,
}

/// Map one complete segment to an event, or `None` for anything unrecognised.
fn classify(segment: &str) -> Option<EventResult> {
    if segment.starts_with(END_STREAM_MARKER) {
        Some(parse_end_stream(segment))
    } else if let Some(rest) = segment.strip_prefix(DATA_FIELD) {
        Some(parse_delta(rest))
    } else if segment.starts_with(ERROR_MARKER) {
        Some(Ok(StreamEvent::ServerError))
    } else {
        if !segment.trim().is_empty() {
            tracing::trace!(segment = %segment, "ignoring unrecognised event");
        }
        None
    }
}

fn parse_delta(rest: &str) -> EventResult {
    let payload: DeltaPayload =
        serde_json::from_str(strip_field_space(rest)).map_err(|e| malformed("data", e))?;
    Ok(StreamEvent::ContentDelta(payload.data))
}

fn parse_end_stream(segment: &str) -> EventResult {
    let Some(idx) = segment.find(DATA_FIELD) else {
        return Err(StreamError::MalformedPayload {
            event: "end_stream",
            reason: "missing data field".into(),
        });
    };
    let json = strip_field_space(&segment[idx + DATA_FIELD.len()..]);
    let payload: EndPayload = serde_json::from_str(json).map_err(|e| malformed("end_stream", e))?;
    let data = payload.data.unwrap_or_default();
    Ok(StreamEvent::EndOfStream {
        contexts: data.contexts.unwrap_or_default(),
        log_id: data.log_id,
    })
}

fn strip_field_space(value: &str) -> &str {
    value.strip_prefix(' ').unwrap_or(value)
}

fn malformed(event: &'static str, err: serde_json::Error) -> StreamError {
    StreamError::MalformedPayload {
        event,
        reason: err.to_string(),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
