//! Error types for Placard.
//!
//! Library crates use [`PlacardError`] via `thiserror` for their internal
//! fallible paths (config loading, backend calls, response decoding).
//! The label parsing entry points never return it: model-layer errors are
//! absorbed at the fallback boundary. The CLI wraps it with `color-eyre`.

use std::path::PathBuf;

/// Top-level error type for all fallible Placard operations.
#[derive(Debug, thiserror::Error)]
pub enum PlacardError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while talking to a model backend.
    #[error("network error: {0}")]
    Network(String),

    /// The model backend reported a runtime failure.
    #[error("model error: {0}")]
    Model(String),

    /// The model backend is not available for this call.
    #[error("model backend unavailable: {0}")]
    Unavailable(String),

    /// The model response did not match the expected JSON schema.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// The model call did not finish within its time budget.
    #[error("model call timed out after {secs}s")]
    Timeout { secs: u64 },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Input validation error (malformed fragment file, bad flag, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PlacardError>;

impl PlacardError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a schema error from any displayable message.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
