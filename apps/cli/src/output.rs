//! Rendering of parse results for the terminal.

use std::fmt::Write as _;

use placard_core::{ParseOutcome, ParseSource, ParsedLabel, SampleReport};
use serde::Serialize;

/// One parsed input, ready to print.
#[derive(Debug, Serialize)]
pub(crate) struct ParsedDocument {
    /// File path, or `-` for stdin.
    pub input: String,
    pub source: ParseSource,
    #[serde(flatten)]
    pub label: ParsedLabel,
    /// Top-to-bottom text of the fragments, when the input was fragments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ParsedDocument {
    pub(crate) fn new(input: String, outcome: ParseOutcome, text: Option<String>) -> Self {
        Self {
            input,
            source: outcome.source,
            label: outcome.label,
            text,
        }
    }
}

/// Human-readable rendering. Headers are added when more than one
/// document is printed.
pub(crate) fn render_text(documents: &[ParsedDocument]) -> String {
    let mut out = String::new();
    let with_headers = documents.len() > 1;

    for (i, doc) in documents.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if with_headers {
            let _ = writeln!(out, "== {} ==", doc.input);
        }
        let _ = writeln!(out, "Title:  {}", or_dash(&doc.label.title));
        let _ = writeln!(out, "Author: {}", or_dash(&doc.label.author));
        let _ = writeln!(out, "Source: {}", doc.source.as_str());
        push_block(&mut out, "Background", &doc.label.background);
        push_block(&mut out, "Interpretation", &doc.label.interpretation);
    }
    out
}

/// JSON rendering: a single object for one document, an array otherwise.
pub(crate) fn render_json(documents: &[ParsedDocument]) -> serde_json::Result<String> {
    match documents {
        [single] => serde_json::to_string_pretty(single),
        many => serde_json::to_string_pretty(many),
    }
}

pub(crate) fn render_samples(reports: &[SampleReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let mark = if report.passed() { "ok  " } else { "MISS" };
        let _ = writeln!(out, "[{mark}] {}", report.name);
        if !report.title_passed() {
            let _ = writeln!(
                out,
                "       title:  expected {:?}, got {:?}",
                report.expected_title, report.actual_title
            );
        }
        if !report.author_passed() {
            let _ = writeln!(
                out,
                "       author: expected {:?}, got {:?}",
                report.expected_author, report.actual_author
            );
        }
    }
    let passed = reports.iter().filter(|r| r.passed()).count();
    let _ = writeln!(out, "\n{passed}/{} samples passed", reports.len());
    out
}

fn or_dash(field: &str) -> &str {
    if field.is_empty() { "-" } else { field }
}

fn push_block(out: &mut String, heading: &str, body: &str) {
    if body.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{heading}:");
    for line in body.lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            let _ = writeln!(out, "  {line}");
        }
    }
}
