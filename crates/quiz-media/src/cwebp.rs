//! webp conversion through the `cwebp` command-line encoder.
//!
//! Runs `cwebp -q <quality> <input> -o <output>`, then removes the input.

use std::path::{Path, PathBuf};
use std::process::Command;

use quiz_core::enums::{CANONICAL_PICTURE_EXTENSION, is_picture_extension};
use quiz_core::media::{MediaError, MediaNormalizer};

pub const DEFAULT_PROGRAM: &str = "cwebp";
pub const DEFAULT_QUALITY: u8 = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CwebpNormalizer {
    program: String,
    quality: u8,
}

impl Default for CwebpNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, DEFAULT_QUALITY)
    }
}

impl CwebpNormalizer {
    /// `quality` is clamped to 0..=100.
    #[must_use]
    pub fn new(program: impl Into<String>, quality: u8) -> Self {
        Self {
            program: program.into(),
            quality: quality.min(100),
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub const fn quality(&self) -> u8 {
        self.quality
    }
}

impl MediaNormalizer for CwebpNormalizer {
    fn normalize(&self, path: &Path) -> Result<PathBuf, MediaError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if ext == CANONICAL_PICTURE_EXTENSION {
            return Ok(path.to_path_buf());
        }
        if !is_picture_extension(&ext) {
            return Err(MediaError::Unsupported(path.to_path_buf()));
        }

        let output = path.with_extension(CANONICAL_PICTURE_EXTENSION);
        let result = Command::new(&self.program)
            .arg("-q")
            .arg(self.quality.to_string())
            .arg(path)
            .arg("-o")
            .arg(&output)
            .output()
            .map_err(|source| MediaError::EncoderUnavailable {
                program: self.program.clone(),
                source,
            })?;

        if !result.status.success() {
            return Err(MediaError::EncoderFailed {
                path: path.to_path_buf(),
                status: result
                    .status
                    .code()
                    .map_or_else(|| "signal".to_string(), |code| code.to_string()),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        std::fs::remove_file(path).map_err(|source| MediaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(from = %path.display(), to = %output.display(), "converted picture");
        Ok(output)
    }
}
