#![deny(missing_docs)]
//! Decoder for the chat endpoint's server-sent event stream.
//!
//! The chat endpoint answers with blank-line separated blocks:
//!
//! ```text
//! data: {"data":"Hel"}
//!
//! data: {"data":"lo"}
//!
//! event: end_stream
//! data: {"data":{"contexts":[],"log_id":42}}
//! ```
//!
//! [`EventDecoder`] is the synchronous state machine that turns byte chunks
//! into [`StreamEvent`]s; [`decode_stream`] drives it over an async byte
//! stream such as `reqwest::Response::bytes_stream()`.
//!
//! [`StreamEvent`]: scholarbot_types::StreamEvent

mod decoder;
mod streaming;
mod utf8;

pub use decoder::EventDecoder;
pub use streaming::{decode_stream, decode_to_handle};
