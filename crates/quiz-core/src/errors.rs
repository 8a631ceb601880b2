//! Cross-cutting error types for quizgen.
//!
//! Domain-specific errors (`ConfigError`, `EngineError`) are defined in their
//! respective crates. `MediaError` lives in [`crate::media`] next to the
//! collaborator traits that return it. Everything converges into `anyhow` in
//! `quiz-cli`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can be raised while loading shared inputs.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document failed to parse.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A TOML document failed to parse.
    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
