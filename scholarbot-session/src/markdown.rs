//! Markdown rendering for assistant answers.

use pulldown_cmark::{Options, Parser, html};

/// Render Markdown to HTML.
///
/// Called on the whole accumulated answer after every fragment, so partially
/// streamed constructs (an unclosed `**`, half a table) simply render as text
/// until the rest arrives.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
