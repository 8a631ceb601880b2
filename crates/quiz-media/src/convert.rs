//! Bulk conversion: every non-webp picture below a root, converted in place.
//!
//! Walks with `ignore` in raw mode (no gitignore, hidden files included) so
//! asset folders are covered no matter what the surrounding repo ignores.
//! A failed file is recorded and the walk continues.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use quiz_core::enums::picture_needs_normalization;
use quiz_core::media::MediaNormalizer;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConvertReport {
    pub root: PathBuf,
    /// Canonical files produced.
    pub converted: Vec<PathBuf>,
    /// Pictures already canonical or non-picture files passed over.
    pub skipped: usize,
    /// Source path and error message for each failure.
    pub failed: Vec<(PathBuf, String)>,
}

impl ConvertReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Convert every picture below `root` that is not in canonical form.
///
/// `on_file` fires once per conversion attempt with the source path.
pub fn convert_tree(
    root: &Path,
    normalizer: &dyn MediaNormalizer,
    on_file: &mut dyn FnMut(&Path),
) -> ConvertReport {
    let mut report = ConvertReport {
        root: root.to_path_buf(),
        ..ConvertReport::default()
    };

    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false).hidden(false).sort_by_file_name(|a, b| a.cmp(b));

    for item in builder.build() {
        let entry = match item {
            Ok(entry) => entry,
            Err(error) => {
                tracing::warn!(%error, "skipping unreadable path");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        let needs = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(picture_needs_normalization);
        if !needs {
            report.skipped += 1;
            continue;
        }

        on_file(path);
        match normalizer.normalize(path) {
            Ok(output) => report.converted.push(output),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "conversion failed");
                report.failed.push((path.to_path_buf(), error.to_string()));
            }
        }
    }

    tracing::info!(
        root = %root.display(),
        converted = report.converted.len(),
        failed = report.failed.len(),
        "conversion finished"
    );
    report
}
