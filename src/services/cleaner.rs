//! Markdown artifact removal.
//!
//! Emphasis stripping is a flat pattern replacement and is not aware of
//! nesting; unbalanced or nested `*`/`_` runs can swallow text between
//! unrelated delimiters (`snake_case_names` lose their underscores).

use regex::Regex;
use std::sync::LazyLock;

/// Ordered `(pattern, replacement)` passes applied to the whole text.
static CLEANUP_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // Fenced code: keep the body, drop the fences and language tag
        (r"(?s)```[A-Za-z0-9_+\-]*[ \t]*\n(.*?)```", "$1"),
        // Header markers
        (r"(?m)^[ \t]*#{1,6}[ \t]+", ""),
        // Horizontal rules (before list markers so `- - -` is a rule)
        (r"(?m)^[ \t]*(?:[-*_][ \t]*){3,}$", ""),
        // Blockquote markers, including nested `> >`
        (r"(?m)^[ \t]*(?:>[ \t]?)+", ""),
        // Unordered list markers
        (r"(?m)^[ \t]*[-*+][ \t]+", ""),
        // Ordered list markers
        (r"(?m)^[ \t]*\d+\.[ \t]+", ""),
        // Bold / italic
        (r"\*{1,3}([^*]+)\*{1,3}", "$1"),
        (r"_{1,3}([^_]+)_{1,3}", "$1"),
        // Inline code
        (r"`([^`]+)`", "$1"),
        // Horizontal whitespace
        (r"[ \t]+", " "),
        (r"(?m) $", ""),
        (r"(?m)^ ", ""),
        (r"\n{3,}", "\n\n"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        let regex = Regex::new(pattern)
            .unwrap_or_else(|err| panic!("cleanup pattern {pattern:?} should compile: {err}"));
        (regex, replacement)
    })
    .collect()
});

pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Strip markdown syntax from `raw`, keeping the text it decorates.
pub fn clean_content(raw: &str) -> String {
    let mut cleaned = normalize_line_endings(raw);
    for (regex, replacement) in CLEANUP_RULES.iter() {
        cleaned = regex.replace_all(&cleaned, *replacement).into_owned();
    }
    cleaned.trim().to_string()
}
