use serde::{Deserialize, Serialize};

/// Minutes of reading per this many words.
pub const WORDS_PER_MINUTE: usize = 200;

/// Whitespace-token count, the only notion of "word" the engine uses.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn chapter_id(order: usize) -> String {
    format!("chapter-{}", order)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub word_count: usize,
    #[serde(default)]
    pub order: usize,
}

impl Chapter {
    pub fn new(order: usize, title: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Chapter {
            id: chapter_id(order),
            title: title.into(),
            word_count: count_words(&content),
            content,
            order,
        }
    }
}

/// Render contract the chapters are meant for downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    #[default]
    Html,
}

/// Structured result of one content version.
///
/// Stats are derived from `chapters` at construction and cannot be set
/// independently. Deserialization goes through [`ContentDocument`] so a
/// stored copy is re-derived rather than trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ContentDocument")]
pub struct ProcessedContent {
    chapters: Vec<Chapter>,
    total_words: usize,
    estimated_reading_time: usize,
    format: ContentFormat,
}

impl ProcessedContent {
    /// Chapters are renumbered to their position, word counts recomputed
    /// from `content`, and blank ids re-synthesized.
    pub fn new(chapters: Vec<Chapter>) -> Self {
        let chapters: Vec<Chapter> = chapters
            .into_iter()
            .enumerate()
            .map(|(order, chapter)| {
                let id = if chapter.id.trim().is_empty() {
                    chapter_id(order)
                } else {
                    chapter.id
                };
                Chapter {
                    id,
                    word_count: count_words(&chapter.content),
                    order,
                    ..chapter
                }
            })
            .collect();
        let total_words = total_words(&chapters);
        ProcessedContent {
            chapters,
            total_words,
            estimated_reading_time: reading_time_minutes(total_words),
            format: ContentFormat::Html,
        }
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn total_words(&self) -> usize {
        self.total_words
    }

    pub fn estimated_reading_time(&self) -> usize {
        self.estimated_reading_time
    }

    pub fn format(&self) -> ContentFormat {
        self.format
    }

    pub fn into_chapters(self) -> Vec<Chapter> {
        self.chapters
    }
}

pub fn total_words(chapters: &[Chapter]) -> usize {
    chapters.iter().map(|chapter| chapter.word_count).sum()
}

pub fn reading_time_minutes(total_words: usize) -> usize {
    total_words.div_ceil(WORDS_PER_MINUTE)
}

/// Wire shape of a stored [`ProcessedContent`]; derived fields are ignored.
#[derive(Debug, Deserialize)]
pub struct ContentDocument {
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl From<ContentDocument> for ProcessedContent {
    fn from(document: ContentDocument) -> Self {
        ProcessedContent::new(document.chapters)
    }
}

/// One rendered page. Computed per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSlice {
    pub fragment: String,
    pub current_chapter_title: String,
    pub progress_percent: u8,
}
