//! Paragraph bucketing for background and interpretation.
//!
//! The split is positional: the first qualifying lines form the
//! background, the rest the interpretation.

use crate::lines::Line;

/// Lines shorter than this are treated as noise (medium tags, dimensions,
/// accession numbers).
pub const MIN_PARAGRAPH_CHARS: usize = 30;

/// Number of qualifying lines that go into `background`.
pub const BACKGROUND_PARAGRAPHS: usize = 2;

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Split the lines not claimed as author or title into
/// `(background, interpretation)`.
pub fn bucket_paragraphs(lines: &[Line], claimed: &[usize]) -> (String, String) {
    let mut background: Vec<&str> = Vec::new();
    let mut interpretation: Vec<&str> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if claimed.contains(&index) || line.len() < MIN_PARAGRAPH_CHARS {
            continue;
        }
        if background.len() < BACKGROUND_PARAGRAPHS {
            background.push(&line.text);
        } else {
            interpretation.push(&line.text);
        }
    }

    (
        background.join(PARAGRAPH_SEPARATOR),
        interpretation.join(PARAGRAPH_SEPARATOR),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::split_lines;

    const LONG_A: &str = "A maidservant pours milk, entirely absorbed in her work.";
    const LONG_B: &str = "Except for the stream of milk, everything else is still.";
    const LONG_C: &str = "Vermeer made a simple everyday activity the theme of a painting.";

    #[test]
    fn first_two_lines_are_background() {
        let text = format!("{LONG_A}\n{LONG_B}\n{LONG_C}");
        let (background, interpretation) = bucket_paragraphs(&split_lines(&text), &[]);
        assert_eq!(background, format!("{LONG_A}\n\n{LONG_B}"));
        assert_eq!(interpretation, LONG_C);
    }

    #[test]
    fn short_lines_are_noise() {
        let text = format!("Oil on panel\n{LONG_A}\n45.5 × 41 cm\ninv. no. 138");
        let (background, interpretation) = bucket_paragraphs(&split_lines(&text), &[]);
        assert_eq!(background, LONG_A);
        assert!(interpretation.is_empty());
    }

    #[test]
    fn threshold_is_thirty_characters() {
        let exactly = "x".repeat(MIN_PARAGRAPH_CHARS);
        let shorter = "y".repeat(MIN_PARAGRAPH_CHARS - 1);
        let text = format!("{shorter}\n{exactly}");
        let (background, _) = bucket_paragraphs(&split_lines(&text), &[]);
        assert_eq!(background, exactly);
    }

    #[test]
    fn claimed_lines_are_excluded() {
        let text = format!("{LONG_A}\n{LONG_B}\n{LONG_C}");
        let (background, interpretation) = bucket_paragraphs(&split_lines(&text), &[0, 2]);
        assert_eq!(background, LONG_B);
        assert!(interpretation.is_empty());
    }

    #[test]
    fn interpretation_collects_everything_after_background() {
        let text = format!("{LONG_A}\n{LONG_B}\n{LONG_C}\n{LONG_A}");
        let (_, interpretation) = bucket_paragraphs(&split_lines(&text), &[]);
        assert_eq!(interpretation, format!("{LONG_C}\n\n{LONG_A}"));
    }
}
