//! Command-line arguments.

use clap::{ArgAction, Parser};
use scholarbot_session::PresentationMode;

/// Chat with the scholarship Q&A assistant.
#[derive(Debug, Parser)]
#[command(name = "scholarbot", version, about)]
pub struct Args {
    /// Base URL of the Q&A server.
    #[arg(long, env = "SCHOLARBOT_URL", default_value = "http://localhost:8000")]
    pub url: String,

    /// Locale loaded at startup.
    #[arg(long, env = "SCHOLARBOT_LANG", default_value = "zh")]
    pub lang: String,

    /// Layout: `popup` (compact) or `full-page`.
    #[arg(long, env = "SCHOLARBOT_MODE", default_value = "full-page")]
    pub mode: PresentationMode,

    /// Timeout for feedback and locale requests, in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Increase log verbosity (repeatable). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
