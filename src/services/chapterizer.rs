use crate::models::{Chapter, ProcessedContent};
use crate::services::cleaner::{clean_content, normalize_line_endings};
use crate::services::noise;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Sections longer than this (in chars) are never headings.
pub const MAX_HEADING_CHARS: usize = 100;
pub const FALLBACK_TITLE: &str = "Main Content";

/// Two or more newlines, blank lines holding only spaces included.
static SECTION_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n)+").expect("SECTION_BREAK should compile"));

static TITLE_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[#*_]+").expect("TITLE_MARKUP should compile"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingKind {
    Chapter,
    Part,
    Section,
    Numbered,
    Capitalized,
}

struct HeadingRule {
    kind: HeadingKind,
    regex: Regex,
    /// Weak rules only fire on a one-line section that is not denylisted
    /// boilerplate.
    weak: bool,
    title: fn(&Captures) -> String,
}

/// Heading detectors in priority order; the first match wins.
static HEADING_RULES: LazyLock<Vec<HeadingRule>> = LazyLock::new(|| {
    vec![
        labelled_rule(HeadingKind::Chapter, "chapter"),
        labelled_rule(HeadingKind::Part, "part"),
        labelled_rule(HeadingKind::Section, "section"),
        HeadingRule {
            kind: HeadingKind::Numbered,
            regex: Regex::new(r"^(\d+)\.[ \t]+(.+)$").expect("numbered heading should compile"),
            weak: false,
            title: |caps| caps[2].to_string(),
        },
        // Weakest rule and the usual source of false positives: any short
        // capitalised line without sentence punctuation.
        HeadingRule {
            kind: HeadingKind::Capitalized,
            regex: Regex::new(r"^(\p{Lu}[^.!?\n]{10,50})$")
                .expect("capitalized heading should compile"),
            weak: true,
            title: |caps| caps[1].to_string(),
        },
    ]
});

/// `Chapter 3: Title`, `Part IV - Title`, or a bare `Section 2`.
fn labelled_rule(kind: HeadingKind, keyword: &str) -> HeadingRule {
    let pattern = format!(
        r"(?i)^({keyword})[ \t]+(\d+|(?-i:[IVX]+))(?:(?:[ \t]*[:.\-–—][ \t]*|[ \t]+)(.*))?$"
    );
    HeadingRule {
        kind,
        regex: Regex::new(&pattern).expect("labelled heading should compile"),
        weak: false,
        title: |caps| match caps.get(3).map(|m| m.as_str().trim()) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("{} {}", capitalize(&caps[1]), &caps[2]),
        },
    }
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A section recognised as a heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub kind: HeadingKind,
    pub title: String,
    /// Lines after the heading line, kept as body text.
    pub remainder: Option<String>,
}

/// Run the heading rule table against one trimmed section.
pub fn detect_heading(section: &str) -> Option<Heading> {
    let section = section.trim();
    if section.is_empty() || section.chars().count() >= MAX_HEADING_CHARS {
        return None;
    }
    let (first_line, rest) = match section.split_once('\n') {
        Some((first, rest)) => (first.trim(), Some(rest.trim())),
        None => (section, None),
    };

    for rule in HEADING_RULES.iter() {
        if rule.weak && (rest.is_some() || noise::is_boilerplate(first_line)) {
            continue;
        }
        let Some(caps) = rule.regex.captures(first_line) else {
            continue;
        };
        let title = clean_title(&(rule.title)(&caps));
        let title = if title.is_empty() {
            clean_title(first_line)
        } else {
            title
        };
        trace!(kind = ?rule.kind, %title, "heading matched");
        return Some(Heading {
            kind: rule.kind,
            title,
            remainder: rest.filter(|text| !text.is_empty()).map(str::to_string),
        });
    }
    None
}

fn clean_title(title: &str) -> String {
    TITLE_MARKUP.replace_all(title, "").trim().to_string()
}

pub fn split_sections(text: &str) -> impl Iterator<Item = &str> {
    SECTION_BREAK
        .split(text)
        .map(str::trim)
        .filter(|section| !section.is_empty())
}

struct Draft {
    order: usize,
    title: String,
    content: String,
}

/// Fold state threaded through the sections.
#[derive(Default)]
struct Segmentation {
    chapters: Vec<Chapter>,
    current: Option<Draft>,
    sections: usize,
    headings: usize,
}

impl Segmentation {
    /// Order of the next chapter to be opened. A draft that never receives
    /// body text is dropped, so orders stay contiguous.
    fn next_order(&self) -> usize {
        self.chapters.len()
    }

    fn commit_current(&mut self) {
        if let Some(draft) = self.current.take() {
            if draft.content.trim().is_empty() {
                trace!(title = %draft.title, "dropping chapter without body");
                return;
            }
            self.chapters
                .push(Chapter::new(draft.order, draft.title, draft.content));
        }
    }

    fn start_chapter(&mut self, title: String) {
        self.commit_current();
        self.headings += 1;
        self.current = Some(Draft {
            order: self.next_order(),
            title,
            content: String::new(),
        });
    }

    fn append_body(&mut self, block: &str) {
        if let Some(kind) = noise::classify(block) {
            trace!(?kind, block, "skipping noise");
            return;
        }
        let order = self.next_order();
        let draft = self.current.get_or_insert_with(|| Draft {
            order,
            title: format!("Section {}", order + 1),
            content: String::new(),
        });
        if !draft.content.is_empty() {
            draft.content.push_str("\n\n");
        }
        draft.content.push_str(block);
    }

    fn step(mut self, section: &str) -> Self {
        self.sections += 1;
        match detect_heading(section) {
            Some(heading) => {
                self.start_chapter(heading.title);
                if let Some(rest) = heading.remainder {
                    self.append_body(&rest);
                }
            }
            None => self.append_body(section),
        }
        self
    }

    fn finish(mut self, original: &str) -> Vec<Chapter> {
        self.commit_current();
        // One unbroken block with no heading is kept as submitted.
        if self.chapters.is_empty() || (self.headings == 0 && self.sections <= 1) {
            return fallback_chapter(original);
        }
        self.chapters
    }
}

/// Split cleaned text into ordered chapters.
///
/// `original` is the pre-clean input, used verbatim when no structure is
/// recovered.
pub fn segment_chapters(cleaned: &str, original: &str) -> Vec<Chapter> {
    split_sections(cleaned)
        .fold(Segmentation::default(), Segmentation::step)
        .finish(original)
}

/// Single chapter holding the trimmed original input. Denylisted blocks are
/// still removed; if nothing else remains there is no chapter at all.
fn fallback_chapter(original: &str) -> Vec<Chapter> {
    let trimmed = original.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    let normalized = normalize_line_endings(trimmed);
    let blocks: Vec<&str> = split_sections(&normalized).collect();
    let content = if blocks.iter().any(|block| noise::is_boilerplate(block)) {
        blocks
            .into_iter()
            .filter(|block| !noise::is_boilerplate(block))
            .collect::<Vec<_>>()
            .join("\n\n")
    } else {
        trimmed.to_string()
    };
    if content.is_empty() {
        return Vec::new();
    }
    debug!("no structure recovered, using fallback chapter");
    vec![Chapter::new(0, FALLBACK_TITLE, content)]
}

/// Build the reading model for one version of raw content.
#[tracing::instrument(level = "debug", skip_all, fields(raw_len = raw.len()))]
pub fn process(raw: &str) -> ProcessedContent {
    let cleaned = clean_content(raw);
    let content = ProcessedContent::new(segment_chapters(&cleaned, raw));
    debug!(
        chapters = content.chapters().len(),
        total_words = content.total_words(),
        "processed content"
    );
    content
}
