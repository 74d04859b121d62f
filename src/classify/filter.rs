//! Text predicates shared by the title and heading detectors.

use once_cell::sync::Lazy;
use regex::Regex;

/// Section numbering followed by a word: "1 Introduction", "3.2.1 Metrics".
static NUMBERED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)*\s+\w+").unwrap());

/// Course-catalog enumeration lines ("3 credits"), optionally bulleted.
static CREDITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^●?\s*\d+\s+credits").unwrap());

const BULLET_PREFIXES: &[char] = &['•', '●', '-', '*'];

/// Lower-cased, trimmed form used for deduplication and list lookups.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Whether the text starts with explicit section numbering.
pub fn is_numbered(text: &str) -> bool {
    NUMBERED_RE.is_match(text)
}

/// Shape test for a bold line that reads like a heading: short, capitalized,
/// starts with a letter, and does not end like a sentence or a label.
pub fn is_probable_heading(text: &str, max_words: usize) -> bool {
    let text = text.trim();
    let Some(first) = text.chars().next() else {
        return false;
    };
    word_count(text) <= max_words
        && first.is_uppercase()
        && first.is_alphabetic()
        && !text.ends_with(['.', ':', ';'])
}

/// Whether the line is a list item rather than a heading.
pub fn is_bullet_point(text: &str) -> bool {
    let text = text.trim();
    text.starts_with(BULLET_PREFIXES) || CREDITS_RE.is_match(&text.to_lowercase())
}
