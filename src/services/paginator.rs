//! Stateless pagination over the global word sequence of a
//! [`ProcessedContent`].
//!
//! A page is the word window `[(page - 1) * words_per_page, page *
//! words_per_page)`. Nothing is remembered between calls; the same inputs
//! always produce the same [`PageSlice`].

use crate::models::{Chapter, PageSlice, ProcessedContent};
use crate::services::markup;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WORDS_PER_PAGE: usize = 300;
pub const NO_CONTENT_FRAGMENT: &str = "<p>No content available for this page.</p>";

/// How paragraph boundaries are rebuilt inside a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphMode {
    /// Re-split the sliced words on `". "`. Abbreviations, decimals and
    /// quotations can land on the wrong side of a boundary.
    #[default]
    SentenceSplit,
    /// Keep the paragraph each word came from.
    SourceParagraphs,
}

/// Half-open global word window of a page. Empty for page 0 or a zero budget.
pub fn page_window(page_number: usize, words_per_page: usize) -> (usize, usize) {
    if page_number == 0 || words_per_page == 0 {
        return (0, 0);
    }
    let start = (page_number - 1).saturating_mul(words_per_page);
    (start, start.saturating_add(words_per_page))
}

pub fn page_count(content: &ProcessedContent, words_per_page: usize) -> usize {
    if words_per_page == 0 {
        return 0;
    }
    content.total_words().div_ceil(words_per_page)
}

/// `round(page_end / total_words * 100)` capped at 100, half rounding up.
pub fn progress_percent(page_end: usize, total_words: usize) -> u8 {
    if total_words == 0 {
        return 0;
    }
    let (end, total) = (page_end as u128, total_words as u128);
    let percent = (end * 200 + total) / (total * 2);
    percent.min(100) as u8
}

pub fn get_page(content: &ProcessedContent, page_number: usize, words_per_page: usize) -> PageSlice {
    get_page_with(content, page_number, words_per_page, ParagraphMode::default())
}

pub fn get_page_with(
    content: &ProcessedContent,
    page_number: usize,
    words_per_page: usize,
    mode: ParagraphMode,
) -> PageSlice {
    let (page_start, page_end) = page_window(page_number, words_per_page);
    let mut fragment = String::new();
    let mut current_title: Option<&str> = None;
    let mut offset = 0usize;

    for chapter in content.chapters() {
        let chapter_start = offset;
        let chapter_end = chapter_start + chapter.word_count;

        if chapter_end > page_start && chapter_start < page_end {
            current_title.get_or_insert(&chapter.title);
            let rel_start = page_start.saturating_sub(chapter_start);
            let rel_end = chapter.word_count.min(page_end - chapter_start);

            if rel_start == 0 {
                fragment.push_str(&markup::heading(&chapter.title));
            }
            match mode {
                ParagraphMode::SentenceSplit => {
                    push_sentence_paragraphs(&mut fragment, chapter, rel_start, rel_end)
                }
                ParagraphMode::SourceParagraphs => {
                    push_source_paragraphs(&mut fragment, chapter, rel_start, rel_end)
                }
            }
        }

        offset = chapter_end;
        if offset >= page_end {
            break;
        }
    }

    let progress_percent = progress_percent(page_end, content.total_words());
    match current_title {
        Some(title) => PageSlice {
            fragment,
            current_chapter_title: title.to_string(),
            progress_percent,
        },
        None => PageSlice {
            fragment: NO_CONTENT_FRAGMENT.to_string(),
            current_chapter_title: String::new(),
            progress_percent,
        },
    }
}

fn push_sentence_paragraphs(out: &mut String, chapter: &Chapter, start: usize, end: usize) {
    let text = chapter
        .content
        .split_whitespace()
        .skip(start)
        .take(end - start)
        .collect::<Vec<_>>()
        .join(" ");
    let pieces: Vec<&str> = text.split(". ").collect();
    let last = pieces.len() - 1;
    for (i, piece) in pieces.iter().enumerate() {
        if piece.trim().is_empty() {
            continue;
        }
        if i < last {
            out.push_str(&markup::paragraph(&format!("{}.", piece)));
        } else {
            out.push_str(&markup::paragraph(piece));
        }
    }
}

fn push_source_paragraphs(out: &mut String, chapter: &Chapter, start: usize, end: usize) {
    let mut index = 0usize;
    for paragraph in markup::paragraphs(&chapter.content) {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        let (para_start, para_end) = (index, index + words.len());
        index = para_end;

        let (lo, hi) = (start.max(para_start), end.min(para_end));
        if lo < hi {
            out.push_str(&markup::paragraph(
                &words[lo - para_start..hi - para_start].join(" "),
            ));
        }
        if index >= end {
            break;
        }
    }
}
