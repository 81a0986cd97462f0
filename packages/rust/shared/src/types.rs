//! Core domain types: recognized text fragments in, parsed labels out.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Recognition input
// ---------------------------------------------------------------------------

/// Normalized rectangle of a recognized text region.
///
/// Coordinates are in `[0, 1]` with the origin at the bottom-left corner,
/// so a larger `y` means higher up on the physical label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One text region as produced by a recognition step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedFragment {
    /// Recognized text of the region.
    pub text: String,
    /// Position of the region on the label.
    pub bounding_box: BoundingBox,
    /// Recognizer confidence in `[0, 1]`.
    #[serde(default = "full_confidence")]
    pub confidence: f32,
}

fn full_confidence() -> f32 {
    1.0
}

impl RecognizedFragment {
    /// Fragment whose box starts at vertical origin `y`.
    pub fn new(text: impl Into<String>, y: f64) -> Self {
        Self {
            text: text.into(),
            bounding_box: BoundingBox {
                y,
                ..Default::default()
            },
            confidence: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// ParsedLabel
// ---------------------------------------------------------------------------

/// Structured fields extracted from an exhibit label.
///
/// Every field may be empty; an all-empty label is the result for
/// degenerate input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedLabel {
    pub title: String,
    pub author: String,
    pub background: String,
    pub interpretation: String,
}

impl ParsedLabel {
    /// True when no field carries any text.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.author.is_empty()
            && self.background.is_empty()
            && self.interpretation.is_empty()
    }

    /// Copy fields from `other` into fields of `self` that are still empty.
    ///
    /// Values a user already entered are never overwritten.
    pub fn fill_missing(&mut self, other: &ParsedLabel) {
        fill(&mut self.title, &other.title);
        fill(&mut self.author, &other.author);
        fill(&mut self.background, &other.background);
        fill(&mut self.interpretation, &other.interpretation);
    }
}

fn fill(slot: &mut String, value: &str) {
    if slot.is_empty() {
        *slot = value.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_label_is_empty() {
        assert!(ParsedLabel::default().is_empty());
    }

    #[test]
    fn fill_missing_keeps_existing_values() {
        let mut record = ParsedLabel {
            title: "My Title".into(),
            ..Default::default()
        };
        let parsed = ParsedLabel {
            title: "Parsed Title".into(),
            author: "Claude Monet".into(),
            background: String::new(),
            interpretation: "Light on water.".into(),
        };

        record.fill_missing(&parsed);

        assert_eq!(record.title, "My Title");
        assert_eq!(record.author, "Claude Monet");
        assert_eq!(record.background, "");
        assert_eq!(record.interpretation, "Light on water.");
    }

    #[test]
    fn partial_record_deserializes() {
        let label: ParsedLabel = serde_json::from_str(r#"{"title":"Guernica"}"#).unwrap();
        assert_eq!(label.title, "Guernica");
        assert_eq!(label.author, "");
    }

    #[test]
    fn fragment_confidence_defaults_when_absent() {
        let json = r#"{"text":"Mona Lisa","bounding_box":{"x":0.1,"y":0.8,"width":0.5,"height":0.05}}"#;
        let fragment: RecognizedFragment = serde_json::from_str(json).unwrap();
        assert_eq!(fragment.text, "Mona Lisa");
        assert_eq!(fragment.confidence, 1.0);
        assert_eq!(fragment.bounding_box.y, 0.8);
    }
}
