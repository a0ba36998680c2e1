#![deny(missing_docs)]
//! Shared types for the scholarbot client.
//!
//! Holds the conversation model ([`ChatMessage`]), the typed events produced
//! by the stream decoder ([`StreamEvent`]), the request bodies for the chat and
//! feedback endpoints, and the [`ChatBackend`] trait that the session
//! controller drives.

pub mod error;
pub mod stream;
pub mod traits;
pub mod types;

pub use error::*;
pub use stream::*;
pub use traits::*;
pub use types::*;
