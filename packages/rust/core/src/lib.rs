//! Label parsing entry points for Placard.
//!
//! [`LabelParser`] ties the model-assisted path and the heuristic parser
//! together: the model is tried first when a backend is configured, and any
//! failure falls back to the deterministic heuristics. Parsing itself never
//! fails; the worst case is a label with empty fields.

pub mod parser;
pub mod samples;

pub use parser::{LabelParser, ParseOutcome, ParseSource};
pub use placard_heuristics::joined_text;
pub use placard_shared::{ParsedLabel, RecognizedFragment};
pub use samples::{SAMPLES, SampleLabel, SampleReport, run_samples};
