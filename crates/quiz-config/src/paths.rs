//! Input and output folder roots.
//!
//! Every job resolves three folders from these roots:
//!
//! ```text
//! input      scripts_dir/<language>/<type>/<theme>/<subtheme>
//! media      assets_dir/<language>/<type>/<theme>/<subtheme>
//! questions  questions_dir/<language>/<type>/<theme>
//! ```

use std::path::{Path, PathBuf};

use quiz_core::enums::QuestionKind;
use serde::{Deserialize, Serialize};

fn default_scripts_dir() -> PathBuf {
    PathBuf::from("scripts")
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_questions_dir() -> PathBuf {
    PathBuf::from("questions")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Root of the raw input folders.
    #[serde(default = "default_scripts_dir")]
    pub scripts_dir: PathBuf,

    /// Root where renamed media copies are written.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    /// Root where question JSON documents are written.
    #[serde(default = "default_questions_dir")]
    pub questions_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            scripts_dir: default_scripts_dir(),
            assets_dir: default_assets_dir(),
            questions_dir: default_questions_dir(),
        }
    }
}

fn join_segments(root: &Path, segments: &[&str]) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in segments.iter().filter(|segment| !segment.is_empty()) {
        path.push(segment);
    }
    path
}

impl PathsConfig {
    #[must_use]
    pub fn input_dir(
        &self,
        language: &str,
        kind: QuestionKind,
        theme: &str,
        subtheme: &str,
    ) -> PathBuf {
        join_segments(
            &self.scripts_dir,
            &[language, kind.as_str(), theme, subtheme],
        )
    }

    #[must_use]
    pub fn media_output_dir(
        &self,
        language: &str,
        kind: QuestionKind,
        theme: &str,
        subtheme: &str,
    ) -> PathBuf {
        join_segments(&self.assets_dir, &[language, kind.as_str(), theme, subtheme])
    }

    #[must_use]
    pub fn questions_output_dir(&self, language: &str, kind: QuestionKind, theme: &str) -> PathBuf {
        join_segments(&self.questions_dir, &[language, kind.as_str(), theme])
    }
}
