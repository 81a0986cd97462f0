//! The generative backend capability.

use async_trait::async_trait;
use placard_shared::Result;

/// A generative text backend: an availability probe plus prompt in,
/// text out.
///
/// Implementations must be shareable across concurrent parses; any
/// per-request session state stays inside `infer`.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Human-readable backend name for tracing.
    fn name(&self) -> &str;

    /// Whether the backend can serve a request right now.
    ///
    /// Probed before every parse, never cached by callers.
    async fn is_available(&self) -> bool;

    /// Send one prompt and return the raw response text.
    async fn infer(&self, prompt: &str) -> Result<String>;
}
