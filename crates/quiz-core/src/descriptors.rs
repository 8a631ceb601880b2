//! Asset descriptor table: short code token -> readable name + optional
//! per-group question template.
//!
//! Loaded once per run from a JSON or TOML file shaped as
//!
//! ```json
//! { "a": { "name": "Animals" }, "b": { "name": "Birds", "question": "Which bird is {{name}}?" } }
//! ```
//!
//! File order is preserved.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A resolved code token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    pub code: String,
    pub name: String,
    pub question: Option<String>,
}

/// On-disk shape of one descriptor; the code is the map key.
#[derive(Debug, Deserialize)]
struct DescriptorEntry {
    name: String,
    #[serde(default)]
    question: Option<String>,
}

/// Immutable for the run once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorTable {
    entries: IndexMap<String, AssetDescriptor>,
}

impl DescriptorTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor, replacing any previous one with the same code.
    pub fn insert(&mut self, descriptor: AssetDescriptor) {
        self.entries.insert(descriptor.code.clone(), descriptor);
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&AssetDescriptor> {
        self.entries.get(code)
    }

    /// The descriptor name for `code`, or `code` itself when unknown.
    #[must_use]
    pub fn resolve_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.get(code).map_or(code, |descriptor| descriptor.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetDescriptor> {
        self.entries.values()
    }

    /// Parse a JSON descriptor document.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Json` on malformed input and `CoreError::Validation`
    /// on empty codes or names.
    pub fn from_json_str(raw: &str, origin: &Path) -> Result<Self, CoreError> {
        let entries: IndexMap<String, DescriptorEntry> =
            serde_json::from_str(raw).map_err(|source| CoreError::Json {
                path: origin.to_path_buf(),
                source,
            })?;
        Self::from_entries(entries)
    }

    /// Parse a TOML descriptor document (one table per code).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Toml` on malformed input and `CoreError::Validation`
    /// on empty codes or names.
    pub fn from_toml_str(raw: &str, origin: &Path) -> Result<Self, CoreError> {
        let entries: IndexMap<String, DescriptorEntry> =
            toml::from_str(raw).map_err(|source| CoreError::Toml {
                path: origin.to_path_buf(),
                source,
            })?;
        Self::from_entries(entries)
    }

    /// Load from disk, picking the format from the extension (`.toml` or JSON).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Io` when the file cannot be read, plus any parse error.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml_str(&raw, path)
        } else {
            Self::from_json_str(&raw, path)
        }
    }

    fn from_entries(entries: IndexMap<String, DescriptorEntry>) -> Result<Self, CoreError> {
        let mut table = Self::new();
        for (code, entry) in entries {
            if code.is_empty() {
                return Err(CoreError::Validation(
                    "descriptor code must not be empty".to_string(),
                ));
            }
            if entry.name.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "descriptor '{code}' has an empty name"
                )));
            }
            table.insert(AssetDescriptor {
                code,
                name: entry.name,
                question: entry.question.filter(|q| !q.trim().is_empty()),
            });
        }
        Ok(table)
    }
}

impl FromIterator<AssetDescriptor> for DescriptorTable {
    fn from_iter<I: IntoIterator<Item = AssetDescriptor>>(iter: I) -> Self {
        let mut table = Self::new();
        for descriptor in iter {
            table.insert(descriptor);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn unknown_codes_resolve_to_themselves() {
        let table: DescriptorTable = [AssetDescriptor {
            code: "a".into(),
            name: "Animals".into(),
            question: None,
        }]
        .into_iter()
        .collect();

        assert_eq!(table.resolve_name("a"), "Animals");
        assert_eq!(table.resolve_name("zz"), "zz");
    }

    #[test]
    fn json_preserves_file_order_and_questions() {
        let raw = r#"{
            "b": { "name": "Birds", "question": "Which bird?" },
            "a": { "name": "Animals" }
        }"#;
        let table = DescriptorTable::from_json_str(raw, Path::new("d.json")).unwrap();
        let codes: Vec<&str> = table.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["b", "a"]);
        assert_eq!(table.get("b").and_then(|d| d.question.as_deref()), Some("Which bird?"));
        assert_eq!(table.get("a").and_then(|d| d.question.as_deref()), None);
    }

    #[test]
    fn toml_tables_load() {
        let raw = r#"
[gen1]
name = "Generation 1"
question = "Which {{group}} pokemon is this?"
"#;
        let table = DescriptorTable::from_toml_str(raw, Path::new("d.toml")).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve_name("gen1"), "Generation 1");
    }

    #[test]
    fn blank_names_are_rejected() {
        let raw = r#"{ "a": { "name": "  " } }"#;
        let err = DescriptorTable::from_json_str(raw, Path::new("d.json")).unwrap_err();
        assert!(err.to_string().contains("descriptor 'a' has an empty name"));
    }

    #[test]
    fn load_reports_missing_file_path() {
        let err = DescriptorTable::load(Path::new("/definitely/missing.json")).unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
        assert!(err.to_string().contains("/definitely/missing.json"));
    }

    #[test]
    fn load_reads_toml_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("descriptors.toml");
        std::fs::write(&path, "[x]\nname = \"Xylophones\"\n").unwrap();
        let table = DescriptorTable::load(&path).unwrap();
        assert_eq!(table.resolve_name("x"), "Xylophones");
    }
}
