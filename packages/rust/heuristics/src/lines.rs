//! Line ordering: recognized fragments or a text block → ordered lines.

use placard_shared::RecognizedFragment;

/// A trimmed, non-empty line with its position in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub position: usize,
    pub text: String,
}

impl Line {
    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Build the line sequence from already ordered strings: trim each,
/// drop the empty ones, number the rest.
fn number_lines<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<Line> {
    raw.map(str::trim)
        .filter(|text| !text.is_empty())
        .enumerate()
        .map(|(position, text)| Line {
            position,
            text: text.to_string(),
        })
        .collect()
}

/// Sort fragments top-to-bottom (larger `y` first).
///
/// The sort is stable, so fragments on the same baseline keep their
/// recognition order.
fn sorted_top_down(fragments: &[RecognizedFragment]) -> Vec<&RecognizedFragment> {
    let mut sorted: Vec<&RecognizedFragment> = fragments.iter().collect();
    sorted.sort_by(|a, b| b.bounding_box.y.total_cmp(&a.bounding_box.y));
    sorted
}

/// Order recognized fragments into the line sequence.
pub fn order_fragments(fragments: &[RecognizedFragment]) -> Vec<Line> {
    number_lines(
        sorted_top_down(fragments)
            .into_iter()
            .map(|fragment| fragment.text.as_str()),
    )
}

/// Any Unicode line terminator: `\n`, `\r`, NEL, LINE SEPARATOR,
/// PARAGRAPH SEPARATOR. `\r\n` leaves an empty piece that is dropped.
fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

/// Split a text block into the line sequence.
pub fn split_lines(text: &str) -> Vec<Line> {
    number_lines(text.split(is_line_break))
}

/// Raw top-to-bottom text of a fragment set, one fragment per line,
/// untrimmed.
pub fn joined_text(fragments: &[RecognizedFragment]) -> String {
    sorted_top_down(fragments)
        .into_iter()
        .map(|fragment| fragment.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
