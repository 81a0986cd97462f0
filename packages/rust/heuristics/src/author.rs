//! Author line detection and cleanup.
//!
//! Detection is an ordered chain of tiers. The first tier that finds a
//! line wins; within a tier, lines are scanned top to bottom. Reordering
//! [`AUTHOR_TIERS`] changes results, and the tests below pin the order.

use std::sync::LazyLock;

use regex::Regex;

use crate::lines::Line;
use crate::names::NameDetector;
use crate::patterns::{
    char_len, has_dimensions, has_life_dates, has_parenthesized_lifespan, is_biographical_line,
    looks_like_title,
};

/// A line preceding a biographical line is accepted when shorter than this.
const BIO_PRECEDING_MAX_CHARS: usize = 50;

/// Name-fallback candidates must be shorter than this.
const NAME_FALLBACK_MAX_CHARS: usize = 80;

/// Which rule located the author line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorTier {
    /// `Vincent van Gogh (1853-1890)`
    ParenthesizedLifespan,
    /// Name on the line above `Enkhuizen 1625-1654 Amsterdam`.
    BiographicalLine,
    /// `French, 1840-1926`, `Born 1929`, `d. 1890`.
    LifeDates,
    /// A short line containing a personal name.
    PersonName,
}

/// Author line found by the tier chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorMatch {
    pub index: usize,
    pub tier: AuthorTier,
}

type TierRule = fn(&[Line], &dyn NameDetector) -> Option<usize>;

/// The tier chain, highest priority first.
pub const AUTHOR_TIERS: [(AuthorTier, TierRule); 4] = [
    (AuthorTier::ParenthesizedLifespan, parenthesized_lifespan),
    (AuthorTier::BiographicalLine, biographical_line),
    (AuthorTier::LifeDates, life_dates),
    (AuthorTier::PersonName, person_name),
];

/// Run the tier chain over the ordered lines.
pub fn detect_author(lines: &[Line], names: &dyn NameDetector) -> Option<AuthorMatch> {
    AUTHOR_TIERS.iter().find_map(|(tier, rule)| {
        rule(lines, names).map(|index| AuthorMatch { index, tier: *tier })
    })
}

/// Dimension lines are never author candidates.
fn candidate(line: &Line) -> bool {
    !has_dimensions(&line.text)
}

fn parenthesized_lifespan(lines: &[Line], _names: &dyn NameDetector) -> Option<usize> {
    lines
        .iter()
        .position(|line| candidate(line) && has_parenthesized_lifespan(&line.text))
}

fn biographical_line(lines: &[Line], names: &dyn NameDetector) -> Option<usize> {
    // The length branch accepts any short line, name or not.
    lines.windows(2).enumerate().find_map(|(i, pair)| {
        let (previous, bio) = (&pair[0], &pair[1]);
        let accepted = is_biographical_line(&bio.text)
            && candidate(previous)
            && (names.contains_person_name(&previous.text)
                || char_len(&previous.text) < BIO_PRECEDING_MAX_CHARS);
        accepted.then_some(i)
    })
}

fn life_dates(lines: &[Line], _names: &dyn NameDetector) -> Option<usize> {
    lines
        .iter()
        .position(|line| candidate(line) && has_life_dates(&line.text))
}

fn person_name(lines: &[Line], names: &dyn NameDetector) -> Option<usize> {
    lines.iter().position(|line| {
        candidate(line)
            && char_len(&line.text) < NAME_FALLBACK_MAX_CHARS
            && names.contains_person_name(&line.text)
            && !looks_like_title(&line.text)
    })
}

// ---------------------------------------------------------------------------
// Cleanup
// ---------------------------------------------------------------------------

/// Substitutions applied in order to the author line.
static AUTHOR_CLEANUP: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        // `(1853-1890)` / `(1950–present)`
        Regex::new(r"\s*\(\d{4}\s*[-–—]\s*(?:\d{4}|present)\)").expect("paren lifespan cleanup"),
        // `, 1840-1926`
        Regex::new(r",?\s*\d{4}\s*[-–—]\s*(?:\d{4}|present)").expect("year range cleanup"),
        // `, born 1929` / `b. 1929`
        Regex::new(r"(?i),?\s*\b(?:born|b\.)\s*\d{4}").expect("born cleanup"),
        // `(Spanish)` and any other parenthetical
        Regex::new(r"\s*\([^)]*\)").expect("parenthetical cleanup"),
    ]
});

/// Strip dates and parentheticals from an author line.
pub fn clean_author(text: &str) -> String {
    let mut cleaned = text.to_string();
    for pattern in AUTHOR_CLEANUP.iter() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }

    cleaned
        .trim_matches(|c: char| {
            c.is_whitespace() || matches!(c, ',' | ';' | ':' | '-' | '–' | '—' | '/' | '|')
        })
        .to_string()
}
