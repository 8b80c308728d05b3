//! Boilerplate detection for body blocks.

use regex::RegexSet;
use std::sync::LazyLock;

/// Blocks shorter than this (in chars) carry no narrative.
pub const MIN_BLOCK_CHARS: usize = 20;
/// Minimum share of alphabetic chars in a narrative block.
pub const MIN_ALPHA_RATIO: f64 = 0.5;

static BOILERPLATE: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)^(?:table of )?contents$",
        r"(?i)^index$",
        r"(?i)^copyright",
        r"(?i)^©",
        r"(?i)^all rights reserved",
        r"(?i)^isbn",
        r"(?i)^published by",
        r"(?i)^printed in",
        r"(?i)^dedication$",
        r"(?i)^acknowledge?ments?$",
        r"(?i)^about the author$",
        r"(?i)^bibliography$",
        r"(?i)^references$",
        r"(?i)^appendix",
        r"(?i)^glossary$",
        r"(?i)^notes$",
        r"(?i)^preface$",
        r"(?i)^foreword$",
        r"(?i)^end of (?:the )?(?:book|chapter|section)",
        r"(?i)^page \d+$",
        r"^\d+$",
        r"^[-_*]{3,}$",
        r"^(?:\.{3,}|…+)$",
    ])
    .expect("boilerplate patterns should compile")
});

/// Why a block was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseKind {
    TooShort,
    Boilerplate,
    Symbolic,
}

/// Classify a trimmed block, checking length, then the denylist, then the
/// alphabetic ratio.
pub fn classify(block: &str) -> Option<NoiseKind> {
    let block = block.trim();
    if block.chars().count() < MIN_BLOCK_CHARS {
        return Some(NoiseKind::TooShort);
    }
    if is_boilerplate(block) {
        return Some(NoiseKind::Boilerplate);
    }
    if alpha_ratio(block) < MIN_ALPHA_RATIO {
        return Some(NoiseKind::Symbolic);
    }
    None
}

pub fn is_noise(block: &str) -> bool {
    classify(block).is_some()
}

/// Denylist check alone, without the length and ratio rules.
pub fn is_boilerplate(block: &str) -> bool {
    BOILERPLATE.is_match(block.trim())
}

pub fn alpha_ratio(block: &str) -> f64 {
    let (alpha, total) = block.chars().fold((0usize, 0usize), |(alpha, total), ch| {
        (alpha + usize::from(ch.is_alphabetic()), total + 1)
    });
    if total == 0 {
        return 0.0;
    }
    alpha as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_blocks_are_noise() {
        assert_eq!(classify("Hello there"), Some(NoiseKind::TooShort));
        assert_eq!(classify("Table of Contents"), Some(NoiseKind::TooShort));
    }

    #[test]
    fn denylist_catches_long_boilerplate() {
        assert_eq!(
            classify("Copyright 2024 by Someone Important"),
            Some(NoiseKind::Boilerplate)
        );
        assert_eq!(
            classify("ISBN 978-3-16-148410-0 first edition"),
            Some(NoiseKind::Boilerplate)
        );
        assert_eq!(
            classify("Appendix A: Maps of the northern realm"),
            Some(NoiseKind::Boilerplate)
        );
        assert_eq!(
            classify("End of Chapter One, turn the page"),
            Some(NoiseKind::Boilerplate)
        );
        assert_eq!(
            classify("------------------------------"),
            Some(NoiseKind::Boilerplate)
        );
        assert_eq!(classify("12345678901234567890"), Some(NoiseKind::Boilerplate));
    }

    #[test]
    fn denylist_is_anchored_to_block_start() {
        assert!(!is_boilerplate("She read the copyright notice twice."));
        assert!(is_boilerplate("Table of Contents"));
        assert!(is_boilerplate("Page 12"));
    }

    #[test]
    fn symbol_heavy_blocks_are_noise() {
        assert_eq!(classify("== 12 / 45 == 33 % 17 =="), Some(NoiseKind::Symbolic));
    }

    #[test]
    fn narrative_passes() {
        assert_eq!(classify("Once upon a time there was a girl."), None);
        assert_eq!(classify("Él caminó despacio por la orilla del río."), None);
        assert!(!is_noise("  She went on an adventure.  "));
    }

    #[test]
    fn ratio_of_empty_is_zero() {
        assert_eq!(alpha_ratio(""), 0.0);
    }
}
