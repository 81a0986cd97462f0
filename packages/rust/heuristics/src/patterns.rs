//! Line-level predicates shared by the author and title rules.
//!
//! All patterns are compiled once. Year ranges accept a hyphen, an en-dash
//! or an em-dash as separator, with optional surrounding whitespace.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Regex patterns (compiled once)
// ---------------------------------------------------------------------------

/// Matches a parenthesized life-span: `(1853-1890)`.
static PAREN_LIFESPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\d{4}\s*[-–—]\s*\d{4}\)").expect("paren lifespan regex")
});

/// Matches a bare year range anywhere: `1625–1654`.
static YEAR_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}\s*[-–—]\s*\d{4}").expect("year range regex")
});

/// Matches `born 1929` / `b. 1929`.
static BORN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:born|b\.)\s*\d{4}").expect("born regex")
});

/// Matches `died 1890` / `d. 1890`.
static DIED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:died|d\.)\s*\d{4}").expect("died regex")
});

/// Matches `Place 1625-1654 Place`: capitalized word first, capitalized word last.
static BIO_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{Lu}\p{Ll}+.*\d{4}\s*[-–—]\s*\d{4}.*\p{Lu}\p{Ll}+$").expect("bio line regex")
});

/// Matches `73.7 cm × 92.1 cm`, `50x60`, `10 in. x 12 in.`.
static DIMENSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\d+(?:[.,]\d+)?\s*(?:(?:cm|mm|in|ft|m)\.?|["″'′])?\s*[x×]\s*\d+(?:[.,]\d+)?"#)
        .expect("dimension regex")
});

/// Medium and provenance phrases that never appear in a title line.
const TITLE_DENYLIST: &[&str] = &[
    "oil on canvas",
    "acrylic",
    "watercolor",
    "bronze",
    "marble",
    "photograph",
    "lithograph",
    "collection",
    "gift of",
    "bequest",
    "museum",
    "gallery",
];

/// Shortest and longest title, in characters.
const TITLE_MIN_CHARS: usize = 2;
const TITLE_MAX_CHARS: usize = 120;

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Length in characters (not bytes).
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// `Vincent van Gogh (1853-1890)`.
pub(crate) fn has_parenthesized_lifespan(text: &str) -> bool {
    PAREN_LIFESPAN_RE.is_match(text)
}

/// `Enkhuizen 1625-1654 Amsterdam`: a year range between capitalized
/// words, not inside parentheses.
pub(crate) fn is_biographical_line(text: &str) -> bool {
    BIO_LINE_RE.is_match(text) && !PAREN_LIFESPAN_RE.is_match(text)
}

/// Any date evidence that marks an author line: a year range, a birth
/// year or a death year.
pub(crate) fn has_life_dates(text: &str) -> bool {
    PAREN_LIFESPAN_RE.is_match(text)
        || YEAR_RANGE_RE.is_match(text)
        || BORN_RE.is_match(text)
        || DIED_RE.is_match(text)
}

/// Physical dimensions such as `73.7 cm × 92.1 cm`.
pub(crate) fn has_dimensions(text: &str) -> bool {
    DIMENSION_RE.is_match(text)
}

/// Whether a line could be the artwork title.
pub fn looks_like_title(text: &str) -> bool {
    let trimmed = text.trim();
    let len = char_len(trimmed);

    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&len) {
        return false;
    }
    if has_life_dates(trimmed) || has_dimensions(trimmed) {
        return false;
    }

    let lowercased = trimmed.to_lowercase();
    !TITLE_DENYLIST
        .iter()
        .any(|keyword| lowercased.contains(keyword))
}
