//! Configuration for a [`Session`](crate::Session).

use std::fmt;
use std::str::FromStr;

/// Where the chat is shown. Both modes share one controller; only the
/// presenter's layout differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PresentationMode {
    /// Compact widget embedded in another page.
    Popup,
    /// Dedicated full-page chat.
    #[default]
    FullPage,
}

impl fmt::Display for PresentationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Popup => "popup",
            Self::FullPage => "full-page",
        })
    }
}

impl FromStr for PresentationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "popup" | "embedded" => Ok(Self::Popup),
            "full-page" | "fullpage" | "page" => Ok(Self::FullPage),
            other => Err(format!("unknown presentation mode: {other}")),
        }
    }
}

/// Static configuration for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Locale loaded when the session starts.
    pub default_lang: String,
    /// Presentation mode for the front-end.
    pub mode: PresentationMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_lang: "zh".into(),
            mode: PresentationMode::FullPage,
        }
    }
}

impl SessionConfig {
    /// Override the startup locale.
    #[must_use]
    pub fn default_lang(mut self, lang: impl Into<String>) -> Self {
        self.default_lang = lang.into();
        self
    }

    /// Override the presentation mode.
    #[must_use]
    pub fn mode(mut self, mode: PresentationMode) -> Self {
        self.mode = mode;
        self
    }
}
