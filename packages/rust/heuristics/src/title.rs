//! Title line detection and cleanup.

use std::sync::LazyLock;

use regex::Regex;

use crate::lines::Line;
use crate::patterns::looks_like_title;

/// Matches a trailing `, 1652` or ` 1889`.
static TRAILING_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[,\s]+\d{4}\s*$").expect("trailing year regex")
});

/// Quote pairs stripped from around a title.
const QUOTE_PAIRS: &[(char, char)] = &[('"', '"'), ('\'', '\''), ('“', '”'), ('‘', '’')];

/// Locate the title line.
///
/// Lines adjacent to the author line are preferred (above first, then
/// below); otherwise the first title-like line other than the author.
pub fn detect_title(lines: &[Line], author_index: Option<usize>) -> Option<usize> {
    let qualifies = |index: usize| lines.get(index).is_some_and(|l| looks_like_title(&l.text));

    if let Some(author) = author_index {
        if let Some(above) = author.checked_sub(1).filter(|&i| qualifies(i)) {
            return Some(above);
        }
        if qualifies(author + 1) {
            return Some(author + 1);
        }
    }

    (0..lines.len()).find(|&i| Some(i) != author_index && qualifies(i))
}

/// Remove one layer of matching surrounding quotes.
fn strip_quotes(text: &str) -> Option<&str> {
    QUOTE_PAIRS.iter().find_map(|&(open, close)| {
        text.strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
    })
}

/// Strip surrounding quotes and a trailing year from a title line.
///
/// Handles both `"The Starry Night, 1889"` and `"The Starry Night", 1889`:
/// when the quotes only close once the year is gone, they are stripped
/// after it.
pub fn clean_title(text: &str) -> String {
    let trimmed = text.trim();
    let unquoted = strip_quotes(trimmed);
    let body = unquoted.unwrap_or(trimmed);

    let without_year = TRAILING_YEAR_RE.replace(body, "");
    let mut cleaned = without_year.trim();

    if unquoted.is_none() {
        if let Some(inner) = strip_quotes(cleaned) {
            cleaned = inner.trim();
        }
    }

    cleaned.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::split_lines;

    #[test]
    fn prefers_line_above_author() {
        let lines = split_lines("Mona Lisa\nLeonardo da Vinci (1452-1519)\nPortrait");
        assert_eq!(detect_title(&lines, Some(1)), Some(0));
    }

    #[test]
    fn falls_back_to_line_below_author() {
        let lines = split_lines("Vincent van Gogh (1853-1890)\nThe Starry Night");
        assert_eq!(detect_title(&lines, Some(0)), Some(1));
    }

    #[test]
    fn scans_when_neighbours_disqualified() {
        let lines = split_lines(
            "Paulus Potter\nEnkhuizen 1625-1654 Amsterdam\nCattle in a Meadow, 1652\nOil on panel",
        );
        assert_eq!(detect_title(&lines, Some(0)), Some(2));
    }

    #[test]
    fn without_author_takes_first_title_like_line() {
        let lines = split_lines("77 × 53 cm\nOil on canvas\nThe Night Watch");
        assert_eq!(detect_title(&lines, None), Some(2));
    }

    #[test]
    fn scan_never_returns_author_line() {
        let lines = split_lines("Jane Doe\n120 x 80 cm");
        assert_eq!(detect_title(&lines, Some(0)), None);
    }

    #[test]
    fn no_lines_no_title() {
        assert_eq!(detect_title(&[], None), None);
    }

    #[test]
    fn clean_title_strips_trailing_year() {
        assert_eq!(clean_title("Cattle in a Meadow, 1652"), "Cattle in a Meadow");
        assert_eq!(clean_title("Water Lilies 1906"), "Water Lilies");
        assert_eq!(clean_title("1889"), "1889");
    }

    #[test]
    fn clean_title_strips_quotes_and_year() {
        assert_eq!(clean_title("\"The Starry Night, 1889\""), "The Starry Night");
        assert_eq!(clean_title("\"The Starry Night\", 1889"), "The Starry Night");
        assert_eq!(clean_title("'Sunflowers'"), "Sunflowers");
        assert_eq!(clean_title("“Impression, Sunrise”"), "Impression, Sunrise");
    }

    #[test]
    fn clean_title_strips_one_layer_only() {
        assert_eq!(clean_title("\"'Nested'\""), "'Nested'");
        assert_eq!(clean_title("\"Unbalanced"), "\"Unbalanced");
    }
}
