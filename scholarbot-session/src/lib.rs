#![deny(missing_docs)]
//! Chat session controller.
//!
//! A [`Session`] owns the conversation history, the active locale and the
//! per-answer feedback state. It drives one question at a time through a
//! [`ChatBackend`](scholarbot_types::ChatBackend), renders progress through a
//! [`Presenter`], and maps user interface events onto its operations via
//! [`UserAction`].

pub mod action;
pub mod config;
pub mod error;
pub mod feedback;
pub mod locale;
pub mod markdown;
pub mod presenter;
pub mod session;
pub mod turn;

pub use action::UserAction;
pub use config::{PresentationMode, SessionConfig};
pub use error::SessionError;
pub use feedback::{FeedbackBoard, FeedbackState, Selection};
pub use locale::Locale;
pub use markdown::render_markdown;
pub use presenter::{Presenter, ReferenceLink, RenderedAnswer};
pub use session::Session;
pub use turn::{Turn, TurnId, TurnOutcome, TurnPhase};
