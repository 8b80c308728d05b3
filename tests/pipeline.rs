//! End-to-end behaviour of the reading pipeline: raw submission in,
//! chapters and pages out.

use folio::{Chapter, ParagraphMode, ProcessedContent, get_page, get_page_with, process, to_markup};

const STORY: &str = "Chapter 1: The Start\n\nOnce upon a time there was a girl.\n\nChapter 2: The Middle\n\nShe went on an adventure.";

fn long_story() -> String {
    let mut raw = String::from("# My Story\n\nTable of Contents\n\n");
    for n in 1..=5 {
        raw.push_str(&format!("## Chapter {n}: Part number {n}\n\n"));
        for p in 0..4 {
            raw.push_str(&format!(
                "Paragraph {p} of chapter {n} tells how the **travellers** walked on. They rested by the river and talked until dark.\n\n"
            ));
        }
        raw.push_str("---\n\n");
    }
    raw.push_str("Copyright 2024 by the author of this story");
    raw
}

#[test]
fn worked_example() {
    let content = process(STORY);
    let titles: Vec<_> = content.chapters().iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["The Start", "The Middle"]);
    let counts: Vec<_> = content.chapters().iter().map(|c| c.word_count).collect();
    assert_eq!(counts, [8, 5]);
    assert_eq!(content.total_words(), 13);
    assert_eq!(content.estimated_reading_time(), 1);
}

#[test]
fn processing_is_idempotent() {
    assert_eq!(process(STORY), process(STORY));
    let raw = long_story();
    assert_eq!(process(&raw), process(&raw));
}

#[test]
fn totals_and_orders_hold() {
    let content = process(&long_story());
    assert_eq!(content.chapters().len(), 5);
    let sum: usize = content.chapters().iter().map(|c| c.word_count).sum();
    assert_eq!(content.total_words(), sum);
    for (i, chapter) in content.chapters().iter().enumerate() {
        assert_eq!(chapter.order, i);
        assert_eq!(chapter.title, format!("Part number {}", i + 1));
        assert_eq!(chapter.word_count, chapter.content.split_whitespace().count());
    }
}

#[test]
fn empty_input() {
    let content = process("");
    assert!(content.chapters().is_empty());
    assert_eq!(content.total_words(), 0);
    assert_eq!(content.estimated_reading_time(), 0);
}

#[test]
fn unstructured_input_is_kept_verbatim() {
    let raw = "  It was a *dark* night and nothing at all happened, which was fine by everyone.\n";
    let content = process(raw);
    assert_eq!(content.chapters().len(), 1);
    let chapter = &content.chapters()[0];
    assert_eq!(chapter.title, "Main Content");
    assert_eq!(chapter.content, raw.trim());
    assert_eq!(chapter.order, 0);
}

#[test]
fn boilerplate_never_reaches_chapter_bodies() {
    let content = process(&long_story());
    for chapter in content.chapters() {
        assert!(!chapter.content.contains("Table of Contents"));
        assert!(!chapter.content.contains("Copyright"));
        assert!(!chapter.content.contains("**"));
    }
}

#[test]
fn heading_prefix_in_long_paragraph_is_body() {
    let paragraph = "Chapter 1: The Beginning was not where the story really started, because long before that the river had already carved its way through the hills.";
    assert!(paragraph.len() > 100);
    let raw = format!("Chapter 1: The Beginning\n\n{paragraph}");
    let content = process(&raw);
    assert_eq!(content.chapters().len(), 1);
    assert_eq!(content.chapters()[0].title, "The Beginning");
    assert_eq!(content.chapters()[0].content, paragraph);
}

#[test]
fn pagination_is_deterministic() {
    let content = process(&long_story());
    for page in 1..=4 {
        assert_eq!(get_page(&content, page, 50), get_page(&content, page, 50));
    }
}

fn words_of_fragment(fragment: &str, titles: &[&str]) -> Vec<String> {
    let mut text = fragment.to_string();
    for title in titles {
        text = text.replace(&format!("<h2>{title}</h2>"), " ");
    }
    text.replace("<p>", " ")
        .replace("</p>", " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[test]
fn pages_cover_every_word_once() {
    let content = process(&long_story());
    let titles: Vec<&str> = content.chapters().iter().map(|c| c.title.as_str()).collect();
    let expected: Vec<String> = content
        .chapters()
        .iter()
        .flat_map(|c| c.content.split_whitespace().map(str::to_string))
        .collect();

    for words_per_page in [7, 50, 300] {
        let pages = content.total_words().div_ceil(words_per_page);
        let mut seen = Vec::new();
        for page in 1..=pages {
            let slice = get_page(&content, page, words_per_page);
            seen.extend(words_of_fragment(&slice.fragment, &titles));
        }
        assert_eq!(seen, expected, "words_per_page = {words_per_page}");
    }
}

#[test]
fn progress_is_monotonic_and_ends_at_100() {
    let content = process(&long_story());
    let words_per_page = 37;
    let pages = content.total_words().div_ceil(words_per_page);
    let progress: Vec<u8> = (1..=pages)
        .map(|page| get_page(&content, page, words_per_page).progress_percent)
        .collect();
    assert!(progress.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(progress.last(), Some(&100));
}

#[test]
fn page_beyond_content_falls_back() {
    let content = process(STORY);
    let slice = get_page(&content, 99, 300);
    assert_eq!(slice.fragment, "<p>No content available for this page.</p>");
    assert_eq!(slice.current_chapter_title, "");
}

#[test]
fn page_title_is_first_chapter_on_page() {
    let content = process(STORY);
    let slice = get_page(&content, 2, 5);
    assert_eq!(slice.current_chapter_title, "The Start");
    assert!(!slice.fragment.contains("<h2>The Start</h2>"));
    assert!(slice.fragment.contains("<h2>The Middle</h2>"));
}

#[test]
fn source_paragraph_mode_keeps_abbreviations_together() {
    let content = ProcessedContent::new(vec![Chapter::new(
        0,
        "Town",
        "Dr. Smith arrived at 3.5 p.m. sharp.\n\nNobody noticed.",
    )]);
    let split = get_page(&content, 1, 300);
    assert!(split.fragment.contains("<p>Dr.</p>"));

    let kept = get_page_with(&content, 1, 300, ParagraphMode::SourceParagraphs);
    assert_eq!(
        kept.fragment,
        "<h2>Town</h2>\n<p>Dr. Smith arrived at 3.5 p.m. sharp.</p>\n<p>Nobody noticed.</p>\n"
    );
}

#[test]
fn markup_contains_every_chapter() {
    let html = to_markup(&process(STORY));
    assert!(html.contains("<h2>The Start</h2>"));
    assert!(html.contains("<p>Once upon a time there was a girl.</p>"));
    assert!(html.contains("<h2>The Middle</h2>"));
    assert_eq!(html.matches("<section").count(), 2);
}
