use std::path::PathBuf;

use quiz_core::media::MediaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("input directory not found: {0}")]
    MissingInputDir(PathBuf),

    #[error("no usable assets found for {0}")]
    NoAssets(String),

    #[error("no assets to build questions from in group '{path}'")]
    EmptyBucket { path: String },

    #[error("group path '{path}' terminates at different depths (while inserting '{file}')")]
    DepthConflict { path: String, file: String },

    #[error("group key '{key}' from '{file}' is not a valid folder name")]
    UnsafeGroupKey { key: String, file: String },

    #[error("failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid text rows in {path}: {reason}")]
    InvalidRows { path: PathBuf, reason: String },

    #[error(transparent)]
    Media(#[from] MediaError),
}

impl EngineError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Render a group key path for diagnostics; the root is `<root>`.
#[must_use]
pub fn display_path(path: &[String]) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.join("/")
    }
}
