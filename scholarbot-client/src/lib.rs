#![deny(missing_docs)]
//! reqwest-based [`ChatBackend`](scholarbot_types::ChatBackend) for the
//! scholarship Q&A server.
//!
//! ```no_run
//! use scholarbot_client::ChatClient;
//!
//! let client = ChatClient::new("http://localhost:8000")
//!     .request_timeout(std::time::Duration::from_secs(5));
//! ```

mod client;
mod error;

pub use client::ChatClient;
