//! Shared types, error model, and configuration for Placard.
//!
//! This crate is the foundation depended on by all other Placard crates.
//! It provides:
//! - [`PlacardError`], the unified internal error type
//! - Domain types ([`RecognizedFragment`], [`BoundingBox`], [`ParsedLabel`])
//! - Configuration ([`AppConfig`], [`ModelConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, ModelConfig, OutputFormat, config_dir, config_file_path,
    init_config, load_config, load_config_from, resolve_api_key,
};
pub use error::{PlacardError, Result};
pub use types::{BoundingBox, ParsedLabel, RecognizedFragment};
