//! Input discovery: media files in a folder, or structured text rows in a
//! JSON document.

use std::fs;
use std::path::Path;

use quiz_core::entities::{BucketEntry, RawAsset, RowFields};
use quiz_core::enums::QuestionKind;
use serde_json::Value;

use crate::error::EngineError;
use crate::reveal::list_files;

/// List files under `input_dir` that can back questions of `kind`.
///
/// Directories (including the reveal folders) are skipped. Pictures not yet
/// in canonical form are kept only when `normalizing` is set, since the
/// assembler converts them later. Entry names start as the file stem.
///
/// # Errors
///
/// [`EngineError::MissingInputDir`] when `input_dir` does not exist, or an
/// I/O error while listing it.
pub fn scan_media_files(
    input_dir: &Path,
    kind: QuestionKind,
    normalizing: bool,
) -> Result<Vec<BucketEntry>, EngineError> {
    if !input_dir.is_dir() {
        return Err(EngineError::MissingInputDir(input_dir.to_path_buf()));
    }

    let mut entries = Vec::new();
    for file in list_files(input_dir)? {
        if usable(&file, kind, normalizing) {
            entries.push(BucketEntry::from_file(file.stem().to_string(), file));
        } else {
            tracing::debug!(file = %file.file_name, kind = %kind, "skipping file");
        }
    }
    tracing::debug!(dir = %input_dir.display(), count = entries.len(), "scanned media files");
    Ok(entries)
}

fn usable(file: &RawAsset, kind: QuestionKind, normalizing: bool) -> bool {
    let Some(ext) = file.extension() else {
        return false;
    };
    if !kind.accepts_extension(ext) {
        return false;
    }
    kind.is_question_source(ext) || (normalizing && kind.requires_normalization(ext))
}

/// Load text rows from a JSON array of objects.
///
/// Scalar values are rendered as strings (nulls, arrays and objects are
/// dropped). Each row's `id_field` value becomes the entry name and answer.
///
/// # Errors
///
/// [`EngineError::InvalidRows`] when the document is not an array of objects
/// or a row lacks a usable `id_field`.
pub fn load_text_rows(path: &Path, id_field: &str) -> Result<Vec<BucketEntry>, EngineError> {
    let raw = fs::read_to_string(path).map_err(|source| EngineError::io("read", path, source))?;
    let document: Value = serde_json::from_str(&raw).map_err(|source| EngineError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rows(&document, id_field).map_err(|reason| EngineError::InvalidRows {
        path: path.to_path_buf(),
        reason,
    })
}

fn parse_rows(document: &Value, id_field: &str) -> Result<Vec<BucketEntry>, String> {
    let Value::Array(rows) = document else {
        return Err("expected a JSON array of row objects".to_string());
    };

    let mut entries = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let Value::Object(object) = row else {
            return Err(format!("row {index} is not an object"));
        };
        let mut fields = RowFields::new();
        for (key, value) in object {
            if let Some(text) = scalar_text(value) {
                fields.insert(key.clone(), text);
            }
        }
        let name = fields
            .get(id_field)
            .filter(|name| !name.is_empty())
            .cloned()
            .ok_or_else(|| format!("row {index} has no '{id_field}' value"))?;
        entries.push(BucketEntry::from_row(name, fields));
    }
    Ok(entries)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
