//! Localized UI strings with built-in fallbacks.

use std::collections::HashMap;

/// Number of example-question shortcuts shown after a reset.
pub const EXAMPLE_COUNT: usize = 5;

/// Built-in English strings, used for any key a locale file lacks.
const DEFAULTS: &[(&str, &str)] = &[
    ("title", "TCU Scholarship Q&A"),
    ("thinking_message", "Thinking..."),
    ("initial_bot_message", "Hello! How can I help you?"),
    (
        "error_message",
        "Sorry, an error occurred while connecting. Please try again later.",
    ),
    ("reference_title", "References:"),
    ("unknown_source", "Unknown source"),
    ("like_button_title", "Satisfied"),
    ("dislike_button_title", "Dissatisfied"),
    ("help_alert", "Contact info not available."),
    ("example_question_1", "What scholarships can I apply for?"),
    ("example_question_2", "How do I apply for a scholarship?"),
    ("example_question_3", "What are the eligibility requirements?"),
    ("example_question_4", "When is the application deadline?"),
    ("example_question_5", "Who can I contact about scholarships?"),
];

/// A loaded set of UI strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locale {
    strings: HashMap<String, String>,
}

impl From<HashMap<String, String>> for Locale {
    fn from(strings: HashMap<String, String>) -> Self {
        Self { strings }
    }
}

impl Locale {
    /// The raw value for `key`, if the locale file defines a non-empty one.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings
            .get(key)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// The value for `key`, falling back to the built-in default, then to the
    /// key itself.
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key)
            .or_else(|| {
                DEFAULTS
                    .iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, v)| *v)
            })
            .unwrap_or(key)
    }

    /// Page title.
    pub fn title(&self) -> &str {
        self.text("title")
    }

    /// Placeholder shown while waiting for the first answer fragment.
    pub fn thinking_message(&self) -> &str {
        self.text("thinking_message")
    }

    /// Greeting that seeds a fresh conversation.
    pub fn initial_message(&self) -> &str {
        self.text("initial_bot_message")
    }

    /// Message shown (and recorded) when a turn fails.
    pub fn error_message(&self) -> &str {
        self.text("error_message")
    }

    /// Heading above reference links.
    pub fn reference_title(&self) -> &str {
        self.text("reference_title")
    }

    /// Label for a reference with no file name.
    pub fn unknown_source(&self) -> &str {
        self.text("unknown_source")
    }

    /// Tooltip of the like control.
    pub fn like_label(&self) -> &str {
        self.text("like_button_title")
    }

    /// Tooltip of the dislike control.
    pub fn dislike_label(&self) -> &str {
        self.text("dislike_button_title")
    }

    /// Contact information shown by the help control.
    pub fn help_text(&self) -> &str {
        self.text("help_alert")
    }

    /// The example-question shortcuts, in order.
    pub fn examples(&self) -> Vec<String> {
        (1..=EXAMPLE_COUNT)
            .map(|n| self.text(&format!("example_question_{n}")).to_string())
            .collect()
    }

    /// Example question `n` (1-based).
    pub fn example(&self, n: usize) -> Option<String> {
        (1..=EXAMPLE_COUNT)
            .contains(&n)
            .then(|| self.text(&format!("example_question_{n}")).to_string())
    }
}
