//! Label parsing entry points: model-assisted first, heuristics always.
//!
//! [`LabelParser::parse`] and [`LabelParser::parse_text`] are total. Model
//! failures of any kind (unavailable, bad answer, timeout, panic,
//! cancellation) are logged and answered by the heuristic parser.
//!
//! The model attempt runs as a Tokio task, so it needs a Tokio runtime.
//! Polled from any other executor, the parser skips the backend and uses
//! the heuristics.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::runtime::Handle;
use tokio::task::JoinSet;
use tracing::{debug, instrument, warn};

use placard_heuristics::{CapitalizedNameDetector, NameDetector, order_fragments};
use placard_model::{ModelBackend, OpenRouterBackend, parse_with_model};
use placard_shared::{AppConfig, ParsedLabel, PlacardError, RecognizedFragment, Result};

/// Model time budget when none is configured.
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 30;

/// Which path produced a parsed label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseSource {
    /// Input had no text; nothing was parsed.
    Empty,
    /// The generative backend answered under the schema contract.
    Model,
    /// The heuristic classifier.
    Heuristic,
}

impl ParseSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Model => "model",
            Self::Heuristic => "heuristic",
        }
    }
}

/// A parsed label plus the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseOutcome {
    pub label: ParsedLabel,
    pub source: ParseSource,
}

impl ParseOutcome {
    fn empty() -> Self {
        Self {
            label: ParsedLabel::default(),
            source: ParseSource::Empty,
        }
    }
}

/// Stateless label parser.
///
/// Cheap to clone; clones share the backend and name detector. Concurrent
/// calls share no mutable state. A configured backend is only tried when
/// the call runs inside a Tokio runtime.
#[derive(Clone)]
pub struct LabelParser {
    backend: Option<Arc<dyn ModelBackend>>,
    names: Arc<dyn NameDetector>,
    model_timeout: Duration,
}

impl Default for LabelParser {
    fn default() -> Self {
        Self::heuristic_only()
    }
}

impl std::fmt::Debug for LabelParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelParser")
            .field("backend", &self.backend.as_ref().map(|b| b.name().to_string()))
            .field("model_timeout", &self.model_timeout)
            .finish_non_exhaustive()
    }
}

impl LabelParser {
    /// Parser without a model backend.
    pub fn heuristic_only() -> Self {
        Self {
            backend: None,
            names: Arc::new(CapitalizedNameDetector),
            model_timeout: Duration::from_secs(DEFAULT_MODEL_TIMEOUT_SECS),
        }
    }

    /// Parser configured from the app config: the HTTP backend when
    /// `[model] enabled`, heuristics only otherwise.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let parser = Self::heuristic_only()
            .with_model_timeout(Duration::from_secs(config.model.timeout_secs));

        if !config.model.enabled {
            debug!("model-assisted parsing disabled in config");
            return Ok(parser);
        }

        let backend = OpenRouterBackend::from_config(&config.model)?;
        Ok(parser.with_backend(Arc::new(backend)))
    }

    /// Try this backend before the heuristics.
    pub fn with_backend(mut self, backend: Arc<dyn ModelBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Drop the backend; heuristics only.
    pub fn without_backend(mut self) -> Self {
        self.backend = None;
        self
    }

    /// Replace the personal-name detector used by the classifier.
    pub fn with_name_detector(mut self, names: Arc<dyn NameDetector>) -> Self {
        self.names = names;
        self
    }

    /// Upper bound for one model attempt.
    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = timeout;
        self
    }

    /// Parse recognized fragments.
    pub async fn parse(&self, fragments: &[RecognizedFragment]) -> ParsedLabel {
        self.parse_detailed(fragments).await.label
    }

    /// Parse a block of label text.
    pub async fn parse_text(&self, text: &str) -> ParsedLabel {
        self.parse_text_detailed(text).await.label
    }

    /// Parse recognized fragments, reporting which path answered.
    #[instrument(skip_all, fields(fragments = fragments.len()))]
    pub async fn parse_detailed(&self, fragments: &[RecognizedFragment]) -> ParseOutcome {
        let lines = order_fragments(fragments);
        if lines.is_empty() {
            debug!("no text in fragments");
            return ParseOutcome::empty();
        }

        let text = lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.parse_text_detailed(&text).await
    }

    /// Parse a block of label text, reporting which path answered.
    #[instrument(skip_all, fields(chars = text.len()))]
    pub async fn parse_text_detailed(&self, text: &str) -> ParseOutcome {
        if text.trim().is_empty() {
            debug!("empty label text");
            return ParseOutcome::empty();
        }

        if let Some(backend) = &self.backend {
            if Handle::try_current().is_err() {
                warn!(backend = backend.name(), "no Tokio runtime, skipping model backend");
            } else {
                match self.try_model(Arc::clone(backend), text).await {
                    Ok(label) => {
                        debug!("model-assisted parse succeeded");
                        return ParseOutcome {
                            label,
                            source: ParseSource::Model,
                        };
                    }
                    Err(PlacardError::Unavailable(name)) => {
                        debug!(backend = %name, "model backend unavailable, using heuristics");
                    }
                    Err(e) => {
                        warn!(error = %e, "model-assisted parse failed, falling back to heuristics");
                    }
                }
            }
        }

        ParseOutcome {
            label: placard_heuristics::parse_text(text, self.names.as_ref()),
            source: ParseSource::Heuristic,
        }
    }

    /// Run the model attempt as its own task so that a panicking or
    /// cancelled backend is reported as an error. Dropping the set aborts
    /// the attempt if the caller goes away.
    async fn try_model(&self, backend: Arc<dyn ModelBackend>, text: &str) -> Result<ParsedLabel> {
        let text = text.to_string();
        let timeout = self.model_timeout;

        let mut attempt = JoinSet::new();
        attempt.spawn(async move { parse_with_model(backend.as_ref(), &text, timeout).await });

        match attempt.join_next().await {
            Some(Ok(result)) => result,
            Some(Err(join_error)) if join_error.is_cancelled() => {
                Err(PlacardError::Model("model attempt cancelled".into()))
            }
            Some(Err(join_error)) => Err(PlacardError::Model(format!(
                "model attempt panicked: {join_error}"
            ))),
            None => Err(PlacardError::Model("model attempt was not started".into())),
        }
    }
}
