//! Question tree -> JSON files mirroring the grouping.
//!
//! Each terminal at key path `k1/../kn` becomes
//! `<output>/k1/../kn/<set_name>.json`; a terminal at the root becomes
//! `<output>/<set_name>.json`. Documents are pretty-printed with a
//! four-space indent.

use std::fs;
use std::path::{Path, PathBuf};

use quiz_core::entities::{Question, QuestionSet};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::EngineError;
use crate::tree::QuestionTree;

/// Serialize with a four-space indent.
///
/// # Errors
///
/// Propagates serializer failures.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}

#[derive(Debug, Clone)]
pub struct TreeSerializer {
    output_dir: PathBuf,
    set_name: String,
    default_sentence: String,
}

impl TreeSerializer {
    #[must_use]
    pub fn new(
        output_dir: impl Into<PathBuf>,
        set_name: impl Into<String>,
        default_sentence: impl Into<String>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            set_name: set_name.into(),
            default_sentence: default_sentence.into(),
        }
    }

    /// Path of the document for one terminal.
    #[must_use]
    pub fn document_path(&self, group_path: &[String]) -> PathBuf {
        group_path
            .iter()
            .fold(self.output_dir.clone(), |dir, key| dir.join(key))
            .join(format!("{}.json", self.set_name))
    }

    /// Write one document per terminal, depth-first. Returns the written paths.
    ///
    /// # Errors
    ///
    /// I/O or serialization failures abort the walk.
    pub fn write(&self, tree: &QuestionTree) -> Result<Vec<PathBuf>, EngineError> {
        let mut written = Vec::new();
        for (group_path, questions) in tree.terminals() {
            let path = self.document_path(&group_path);
            self.write_document(&path, questions)?;
            written.push(path);
        }
        Ok(written)
    }

    fn write_document(&self, path: &Path, questions: &[Question]) -> Result<(), EngineError> {
        let set = QuestionSet {
            default_sentence: self.default_sentence.clone(),
            questions: questions.to_vec(),
        };
        let bytes = to_pretty_json(&set).map_err(|source| EngineError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| EngineError::io("create directory", parent, err))?;
        }
        fs::write(path, bytes).map_err(|err| EngineError::io("write", path, err))?;
        tracing::debug!(path = %path.display(), questions = questions.len(), "wrote question set");
        Ok(())
    }
}
