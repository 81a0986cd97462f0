//! Model-assisted label parsing.
//!
//! A generative backend receives the whole label text under a fixed JSON
//! schema contract. Every failure mode (backend unavailable, bad answer,
//! timeout) surfaces as a [`PlacardError`] from [`parse_with_model`], so
//! callers can fall back to the heuristic parser in one place.

mod backend;
mod openrouter;
pub mod prompt;
pub mod response;

use std::time::Duration;

use placard_shared::{ParsedLabel, PlacardError, Result};
use tracing::{debug, instrument};

pub use backend::ModelBackend;
pub use openrouter::OpenRouterBackend;
pub use prompt::{LABEL_KEYS, build_prompt, label_schema};
pub use response::parse_response;

/// Ask the backend to parse `text`, bounded by `timeout`.
///
/// The availability probe runs on every call; the probe and the request
/// share the time budget.
#[instrument(skip_all, fields(backend = backend.name(), chars = text.len()))]
pub async fn parse_with_model(
    backend: &dyn ModelBackend,
    text: &str,
    timeout: Duration,
) -> Result<ParsedLabel> {
    let attempt = async {
        if !backend.is_available().await {
            return Err(PlacardError::Unavailable(backend.name().to_string()));
        }
        let prompt = build_prompt(text);
        backend.infer(&prompt).await
    };

    let raw = tokio::time::timeout(timeout, attempt)
        .await
        .map_err(|_| PlacardError::Timeout {
            secs: timeout.as_secs(),
        })??;

    debug!(chars = raw.len(), "decoding model answer");
    parse_response(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Scripted {
        available: bool,
        reply: std::result::Result<&'static str, &'static str>,
        delay: Duration,
    }

    #[async_trait]
    impl ModelBackend for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn is_available(&self) -> bool {
            self.available
        }

        async fn infer(&self, prompt: &str) -> Result<String> {
            assert!(prompt.contains("Label text:"));
            tokio::time::sleep(self.delay).await;
            self.reply
                .map(str::to_string)
                .map_err(|e| PlacardError::Model(e.into()))
        }
    }

    const ANSWER: &str = r#"{"title":"Guernica","author":"Pablo Picasso","background":null,"interpretation":null}"#;

    fn scripted(reply: std::result::Result<&'static str, &'static str>) -> Scripted {
        Scripted {
            available: true,
            reply,
            delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn successful_parse() {
        let label = parse_with_model(&scripted(Ok(ANSWER)), "Guernica", Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(label.title, "Guernica");
        assert_eq!(label.author, "Pablo Picasso");
        assert_eq!(label.background, "");
    }

    #[tokio::test]
    async fn unavailable_backend_is_not_called() {
        let backend = Scripted {
            available: false,
            ..scripted(Ok(ANSWER))
        };
        let err = parse_with_model(&backend, "Guernica", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, PlacardError::Unavailable(_)));
    }

    #[tokio::test]
    async fn backend_error_propagates() {
        let err = parse_with_model(&scripted(Err("boom")), "x", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, PlacardError::Model(_)));
    }

    #[tokio::test]
    async fn malformed_answer_is_schema_error() {
        let err = parse_with_model(&scripted(Ok("not json")), "x", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, PlacardError::Schema { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_backend_times_out() {
        let backend = Scripted {
            delay: Duration::from_secs(60),
            ..scripted(Ok(ANSWER))
        };
        let err = parse_with_model(&backend, "x", Duration::from_secs(2))
            .await
            .unwrap_err();
        assert!(matches!(err, PlacardError::Timeout { secs: 2 }));
    }
}
