//! Deterministic heuristic parsing of exhibit label text.
//!
//! Given the label's lines in reading order, the classifier locates the
//! author line (see [`author`] for the tier chain) and the title line, and
//! the remaining long lines are bucketed into background and
//! interpretation paragraphs. Every function here is total: odd input
//! yields empty fields, never an error.

pub mod author;
pub mod fields;
pub mod lines;
pub mod names;
pub mod patterns;
pub mod title;

use placard_shared::ParsedLabel;
use tracing::{debug, trace};

pub use author::{AUTHOR_TIERS, AuthorMatch, AuthorTier, clean_author, detect_author};
pub use fields::bucket_paragraphs;
pub use lines::{Line, joined_text, order_fragments, split_lines};
pub use names::{CapitalizedNameDetector, NameDetector};
pub use patterns::looks_like_title;
pub use title::{clean_title, detect_title};

/// Where the author and title sit in the line sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub author: Option<AuthorMatch>,
    pub title_index: Option<usize>,
}

impl Classification {
    pub fn author_index(&self) -> Option<usize> {
        self.author.map(|found| found.index)
    }

    /// Indices excluded from paragraph bucketing.
    fn claimed(&self) -> Vec<usize> {
        self.author_index().into_iter().chain(self.title_index).collect()
    }
}

/// Locate the author and title lines.
pub fn classify(lines: &[Line], names: &dyn NameDetector) -> Classification {
    let author = detect_author(lines, names);
    let title_index = detect_title(lines, author.map(|found| found.index));

    debug!(
        author_index = ?author.map(|found| found.index),
        author_tier = ?author.map(|found| found.tier),
        title_index = ?title_index,
        lines = lines.len(),
        "classified label lines"
    );

    Classification {
        author,
        title_index,
    }
}

/// Build the parsed label from a classification.
pub fn extract_fields(lines: &[Line], classification: &Classification) -> ParsedLabel {
    let text_at = |index: Option<usize>| index.and_then(|i| lines.get(i)).map(|l| l.text.as_str());

    let author = text_at(classification.author_index())
        .map(clean_author)
        .unwrap_or_default();
    let title = text_at(classification.title_index)
        .map(clean_title)
        .unwrap_or_default();
    let (background, interpretation) = bucket_paragraphs(lines, &classification.claimed());

    ParsedLabel {
        title,
        author,
        background,
        interpretation,
    }
}

/// Parse already ordered lines.
pub fn parse_lines(lines: &[Line], names: &dyn NameDetector) -> ParsedLabel {
    if lines.is_empty() {
        return ParsedLabel::default();
    }
    let classification = classify(lines, names);
    extract_fields(lines, &classification)
}

/// Parse a block of label text, one label line per text line.
pub fn parse_text(text: &str, names: &dyn NameDetector) -> ParsedLabel {
    trace!(text, "heuristic parse");
    parse_lines(&split_lines(text), names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ParsedLabel {
        parse_text(text, &CapitalizedNameDetector)
    }

    const STARRY_NIGHT: &str = "Vincent van Gogh (1853-1890)\nThe Starry Night\nOil on canvas, 1889\n73.7 cm × 92.1 cm\nThis painting depicts the view from Van Gogh's asylum room at Saint-Rémy-de-Provence.";

    #[test]
    fn author_first_label() {
        let label = parse(STARRY_NIGHT);
        assert_eq!(label.title, "The Starry Night");
        assert_eq!(label.author, "Vincent van Gogh");
        assert_eq!(
            label.background,
            "This painting depicts the view from Van Gogh's asylum room at Saint-Rémy-de-Provence."
        );
        assert_eq!(label.interpretation, "");
    }

    #[test]
    fn title_first_label() {
        let label = parse(
            "Mona Lisa\nLeonardo da Vinci (1452-1519)\nOil on poplar panel, c. 1503-1519\nThe Mona Lisa is a half-length portrait painting.",
        );
        assert_eq!(label.title, "Mona Lisa");
        assert_eq!(label.author, "Leonardo da Vinci");
        assert_eq!(
            label.background,
            "Oil on poplar panel, c. 1503-1519\n\nThe Mona Lisa is a half-length portrait painting."
        );
    }

    #[test]
    fn dutch_biographical_label() {
        let text = std::fs::read_to_string("../../../fixtures/labels/potter.txt")
            .expect("read potter fixture");
        let label = parse(&text);
        assert_eq!(label.title, "Cattle in a Meadow");
        assert_eq!(label.author, "Paulus Potter");
        assert_eq!(
            label.background,
            "Acquired by Prince William V, 1768 (inv. no. 138)"
        );
    }

    #[test]
    fn nationality_in_parentheses() {
        let label = parse(
            "Pablo Picasso (Spanish, 1881-1973)\nGuernica\n1937, Oil on canvas\nGuernica shows the tragedies of war.",
        );
        assert_eq!(label.title, "Guernica");
        assert_eq!(label.author, "Pablo Picasso");
    }

    #[test]
    fn quoted_title_with_year_and_paragraphs() {
        let text = std::fs::read_to_string("../../../fixtures/labels/vermeer.txt")
            .expect("read vermeer fixture");
        let label = parse(&text);
        assert_eq!(label.author, "Johannes Vermeer");
        assert_eq!(label.title, "The Milkmaid");
        assert!(label.background.starts_with("A maidservant pours milk"));
        assert!(label.background.contains("\n\nExcept for the stream of milk"));
        assert!(label.interpretation.starts_with("Vermeer took this simple"));
        assert!(label.interpretation.ends_with("every surface tangible."));
    }

    #[test]
    fn author_and_title_never_in_paragraphs() {
        let long_title = "A Very Long Title That Easily Exceeds Thirty Characters";
        let text = format!("{long_title}\nJane Doe (1901-1980)\nSome closing remarks about the work go here.");
        let label = parse(&text);
        assert_eq!(label.title, long_title);
        assert!(!label.background.contains(long_title));
        assert!(!label.background.contains("Jane Doe"));
        assert!(!label.interpretation.contains(long_title));
    }

    #[test]
    fn dimension_line_never_chosen() {
        let label = parse("73.7 cm × 92.1 cm\n120 x 80 cm");
        assert_eq!(label.title, "");
        assert_eq!(label.author, "");
    }

    #[test]
    fn no_short_line_in_paragraphs() {
        let label = parse(STARRY_NIGHT);
        for paragraph in label
            .background
            .split("\n\n")
            .chain(label.interpretation.split("\n\n"))
            .filter(|p| !p.is_empty())
        {
            assert!(paragraph.chars().count() >= fields::MIN_PARAGRAPH_CHARS);
        }
    }

    #[test]
    fn empty_and_garbage_input() {
        assert!(parse("").is_empty());
        assert!(parse("   \n\t  \n").is_empty());
        let garbage = parse("%%%\n((((\n)))\n—–-\n\u{0}\u{feff}");
        assert_eq!(garbage.author, "");
    }

    #[test]
    fn carriage_return_line_endings() {
        let label = parse("Mona Lisa\rLeonardo da Vinci (1452-1519)");
        assert_eq!(label.title, "Mona Lisa");
        assert_eq!(label.author, "Leonardo da Vinci");
    }

    #[test]
    fn deterministic_across_calls() {
        assert_eq!(parse(STARRY_NIGHT), parse(STARRY_NIGHT));
    }

    #[test]
    fn classification_indices_differ() {
        let lines = split_lines("Mona Lisa\nLeonardo da Vinci (1452-1519)");
        let classification = classify(&lines, &CapitalizedNameDetector);
        assert_eq!(classification.author_index(), Some(1));
        assert_eq!(classification.title_index, Some(0));
    }
}
