//! Collaborator seams for media normalization and public URL composition.
//!
//! Implementations live in `quiz-media`; the engine only sees these traits so
//! tests can substitute in-memory fakes.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external encoder could not be started.
    #[error("media encoder '{program}' could not be started: {source}")]
    EncoderUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external encoder ran and reported failure.
    #[error("media encoder failed on {path} (status {status}): {stderr}")]
    EncoderFailed {
        path: PathBuf,
        status: String,
        stderr: String,
    },

    /// The file is not something this normalizer can handle.
    #[error("unsupported media file: {0}")]
    Unsupported(PathBuf),
}

/// Converts a media file into the canonical encoding for its family.
pub trait MediaNormalizer {
    /// Convert `path` in place and return the path of the canonical file.
    ///
    /// The canonical file sits next to the original with the canonical
    /// extension; the original is removed. Files already in canonical form are
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `MediaError` when the conversion cannot be performed.
    fn normalize(&self, path: &Path) -> Result<PathBuf, MediaError>;
}

/// Joins path segments into one public URL.
pub trait UrlComposer {
    /// Compose a URL from ordered segments (base path parts, group keys, file name).
    fn compose(&self, segments: &[&str]) -> String;
}
