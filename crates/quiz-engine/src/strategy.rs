//! Pluggable stages of a generation run.
//!
//! A run is `source -> grouping -> sentence`; each stage is a trait object so
//! media and text jobs, flat and grouped layouts, and the different sentence
//! rules combine freely instead of living in separate generators.

use std::path::{Path, PathBuf};

use quiz_core::descriptors::DescriptorTable;
use quiz_core::entities::{BucketEntry, RowFields};
use quiz_core::enums::{DepthConflictPolicy, QuestionKind};

use crate::code_path::CodePath;
use crate::error::EngineError;
use crate::scan::{load_text_rows, scan_media_files};
use crate::template;
use crate::tree::{AssetTree, GroupNode, TreeBuilder};

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Stage 1: discover the entries a job builds questions from.
pub trait SourceStrategy {
    /// Short label for logs and reports.
    fn label(&self) -> String;

    /// # Errors
    ///
    /// Missing inputs or unreadable documents.
    fn scan(&self, input_dir: &Path) -> Result<Vec<BucketEntry>, EngineError>;

    /// Whether reveal folders beside the input should be matched in.
    fn has_reveal_media(&self) -> bool {
        false
    }
}

/// Picture or sound files directly inside the input folder.
#[derive(Debug, Clone, Copy)]
pub struct MediaFiles {
    pub kind: QuestionKind,
    pub normalizing: bool,
}

impl SourceStrategy for MediaFiles {
    fn label(&self) -> String {
        format!("{} files", self.kind)
    }

    fn scan(&self, input_dir: &Path) -> Result<Vec<BucketEntry>, EngineError> {
        scan_media_files(input_dir, self.kind, self.normalizing)
    }

    fn has_reveal_media(&self) -> bool {
        true
    }
}

/// Rows of a JSON document; `id_field` names the answer column.
#[derive(Debug, Clone)]
pub struct TextRows {
    pub rows_path: PathBuf,
    pub id_field: String,
}

impl SourceStrategy for TextRows {
    fn label(&self) -> String {
        format!("rows of {}", self.rows_path.display())
    }

    fn scan(&self, _input_dir: &Path) -> Result<Vec<BucketEntry>, EngineError> {
        load_text_rows(&self.rows_path, &self.id_field)
    }

    fn has_reveal_media(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Stage 2: arrange entries into a group tree.
pub trait GroupingStrategy {
    /// # Errors
    ///
    /// Depth conflicts under a rejecting policy.
    fn group(&self, entries: Vec<BucketEntry>) -> Result<AssetTree, EngineError>;
}

/// Everything in one root bucket.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatGrouping;

impl GroupingStrategy for FlatGrouping {
    fn group(&self, entries: Vec<BucketEntry>) -> Result<AssetTree, EngineError> {
        if entries.is_empty() {
            return Ok(GroupNode::empty());
        }
        Ok(GroupNode::Terminal(entries))
    }
}

/// Split names on a delimiter; all tokens but the last are group codes.
#[derive(Debug, Clone)]
pub struct CodePathGrouping<'a> {
    pub delimiter: String,
    pub descriptors: &'a DescriptorTable,
    pub policy: DepthConflictPolicy,
    pub default_subgroup: String,
}

impl CodePathGrouping<'_> {
    fn code_path(&self, entry: &BucketEntry) -> CodePath {
        match entry.file() {
            Some(file) => CodePath::parse(&file.file_name, &self.delimiter, self.descriptors),
            None => CodePath::parse_stem(&entry.name, &self.delimiter, self.descriptors),
        }
    }
}

impl GroupingStrategy for CodePathGrouping<'_> {
    fn group(&self, entries: Vec<BucketEntry>) -> Result<AssetTree, EngineError> {
        let mut builder = TreeBuilder::new(self.policy, self.default_subgroup.clone());
        for entry in entries {
            let path = self.code_path(&entry);
            builder.insert(&path, entry)?;
        }
        Ok(builder.finish())
    }
}

// ---------------------------------------------------------------------------
// Sentences
// ---------------------------------------------------------------------------

/// Stage 3: the prompt text for one question.
pub trait SentenceStrategy {
    fn sentence(&self, entry: &BucketEntry, group_path: &[String]) -> String;
}

/// The same sentence for every question.
#[derive(Debug, Clone)]
pub struct FixedSentence(pub String);

impl SentenceStrategy for FixedSentence {
    fn sentence(&self, _entry: &BucketEntry, _group_path: &[String]) -> String {
        self.0.clone()
    }
}

/// The innermost group's descriptor question, else a default. Both may use
/// `{{name}}`, `{{group}}` and `{{code}}`.
#[derive(Debug, Clone)]
pub struct DescriptorSentence<'a> {
    pub descriptors: &'a DescriptorTable,
    pub default_sentence: String,
}

impl SentenceStrategy for DescriptorSentence<'_> {
    fn sentence(&self, entry: &BucketEntry, group_path: &[String]) -> String {
        let group = group_path.last().map_or("", String::as_str);
        let code = entry.group_code.as_deref().unwrap_or_default();
        let template_text = self
            .descriptors
            .get(code)
            .and_then(|descriptor| descriptor.question.as_deref())
            .unwrap_or(&self.default_sentence);

        let mut fields = RowFields::new();
        fields.insert("name".to_string(), entry.name.clone());
        fields.insert("group".to_string(), group.to_string());
        fields.insert("code".to_string(), code.to_string());
        fill(template_text, &fields, entry)
    }
}

/// A template filled from the row's own fields (plus `{{name}}`).
#[derive(Debug, Clone)]
pub struct RowTemplate {
    pub template: String,
}

impl SentenceStrategy for RowTemplate {
    fn sentence(&self, entry: &BucketEntry, _group_path: &[String]) -> String {
        let mut fields = entry.row().cloned().unwrap_or_default();
        fields
            .entry("name".to_string())
            .or_insert_with(|| entry.name.clone());
        fill(&self.template, &fields, entry)
    }
}

fn fill(template_text: &str, fields: &RowFields, entry: &BucketEntry) -> String {
    let rendered = template::render(template_text, fields);
    if !rendered.missing.is_empty() {
        tracing::warn!(
            entry = %entry.name,
            missing = ?rendered.missing,
            "sentence placeholders left unfilled"
        );
    }
    rendered.text
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quiz_core::descriptors::AssetDescriptor;
    use quiz_core::entities::RawAsset;

    use super::*;

    fn table() -> DescriptorTable {
        [
            AssetDescriptor {
                code: "a".into(),
                name: "Animals".into(),
                question: None,
            },
            AssetDescriptor {
                code: "b".into(),
                name: "Birds".into(),
                question: Some("Which {{group}} is {{name}}?".into()),
            },
        ]
        .into_iter()
        .collect()
    }

    fn file_entry(name: &str) -> BucketEntry {
        let raw = RawAsset::from_path(Path::new(name)).unwrap();
        BucketEntry::from_file(raw.stem().to_string(), raw)
    }

    #[test]
    fn code_path_grouping_resolves_descriptors() {
        let table = table();
        let grouping = CodePathGrouping {
            delimiter: "_".into(),
            descriptors: &table,
            policy: DepthConflictPolicy::Reject,
            default_subgroup: "default".into(),
        };
        let tree = grouping
            .group(vec![file_entry("a_b_leaf.png"), file_entry("solo_x.png")])
            .unwrap();

        let bucket = tree.bucket(&["Animals", "Birds"]).unwrap();
        assert_eq!(bucket[0].name, "leaf");
        assert_eq!(tree.bucket(&["solo"]).unwrap()[0].name, "x");
    }

    #[test]
    fn flat_grouping_keeps_everything_at_root() {
        let tree = FlatGrouping
            .group(vec![file_entry("a_b_leaf.png"), file_entry("solo.png")])
            .unwrap();
        let names: Vec<&str> = tree.bucket(&[]).unwrap().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a_b_leaf", "solo"]);
        assert!(FlatGrouping.group(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn descriptor_question_beats_default() {
        let table = table();
        let sentences = DescriptorSentence {
            descriptors: &table,
            default_sentence: "Who is it? ({{code}})".into(),
        };
        let mut entry = BucketEntry::from_file("Sparrow", RawAsset::from_path(Path::new("a_b_Sparrow.webp")).unwrap());

        entry.group_code = Some("b".into());
        let birds = vec!["Animals".to_string(), "Birds".to_string()];
        assert_eq!(sentences.sentence(&entry, &birds), "Which Birds is Sparrow?");

        entry.group_code = Some("a".into());
        let animals = vec!["Animals".to_string()];
        assert_eq!(sentences.sentence(&entry, &animals), "Who is it? (a)");

        entry.group_code = None;
        assert_eq!(sentences.sentence(&entry, &[]), "Who is it? ()");
    }

    #[test]
    fn resolved_names_are_not_looked_up_as_codes() {
        let table = table();
        let sentences = DescriptorSentence {
            descriptors: &table,
            default_sentence: "Who is it?".into(),
        };
        // The group key is "Birds", but the raw code `x` has no descriptor.
        let mut entry = BucketEntry::from_file("Cod", RawAsset::from_path(Path::new("x_Cod.webp")).unwrap());
        entry.group_code = Some("x".into());
        assert_eq!(sentences.sentence(&entry, &["Birds".to_string()]), "Who is it?");
    }

    #[test]
    fn row_template_fills_from_row_fields() {
        let mut fields = RowFields::new();
        fields.insert("species".into(), "Lion".into());
        let entry = BucketEntry::from_row("Lion", fields);
        let sentences = RowTemplate {
            template: "What is {{species}}?".into(),
        };
        assert_eq!(sentences.sentence(&entry, &[]), "What is Lion?");
    }

    #[test]
    fn row_template_leaves_unknown_fields() {
        let entry = BucketEntry::from_row("Lion", RowFields::new());
        let sentences = RowTemplate {
            template: "{{name}} has {{legs}} legs".into(),
        };
        assert_eq!(sentences.sentence(&entry, &[]), "Lion has {{legs}} legs");
    }
}
