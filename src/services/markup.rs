//! Minimal semantic markup: chapter container, heading, paragraph.
//!
//! Styling is left to whoever displays the markup; every piece of user text
//! is escaped.

use crate::models::{Chapter, ProcessedContent};
use regex::Regex;
use std::sync::LazyLock;

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("PARAGRAPH_BREAK should compile"));

/// Non-empty, trimmed paragraphs of a chapter body.
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
}

pub fn heading(title: &str) -> String {
    format!("<h2>{}</h2>\n", html_escape::encode_text(title))
}

pub fn paragraph(text: &str) -> String {
    format!("<p>{}</p>\n", html_escape::encode_text(text.trim()))
}

pub fn chapter_markup(chapter: &Chapter) -> String {
    let mut html = format!(
        "<section class=\"chapter\" id=\"{}\">\n",
        html_escape::encode_double_quoted_attribute(&chapter.id)
    );
    html.push_str(&heading(&chapter.title));
    for text in paragraphs(&chapter.content) {
        html.push_str(&paragraph(text));
    }
    html.push_str("</section>\n");
    html
}

/// Render every chapter of `content` in order.
pub fn to_markup(content: &ProcessedContent) -> String {
    content.chapters().iter().map(chapter_markup).collect()
}
