use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

/// Scalar fields of one structured text row, rendered as strings.
pub type RowFields = IndexMap<String, String>;

/// One scanned input file that is not a directory and not reveal media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAsset {
    pub file_name: String,
    pub source_path: PathBuf,
}

impl RawAsset {
    /// Build from a path on disk. Returns `None` when the file name is not UTF-8.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name().and_then(OsStr::to_str)?.to_string();
        Some(Self {
            file_name,
            source_path: path.to_path_buf(),
        })
    }

    /// File name without its final extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        Path::new(&self.file_name)
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or(&self.file_name)
    }

    /// Final extension without the dot.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.file_name)
            .extension()
            .and_then(OsStr::to_str)
    }
}

/// Optional secondary media shown once a question is answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealMedia {
    pub picture: Option<PathBuf>,
    pub sound: Option<PathBuf>,
}

impl RevealMedia {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.picture.is_none() && self.sound.is_none()
    }
}

/// Where a bucket entry's content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// A media file backing a picture or sound question.
    File(RawAsset),
    /// A structured row backing a text question.
    Row(RowFields),
}

/// One sibling in a bucket: the leaf name used as the answer, plus its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketEntry {
    pub name: String,
    pub source: AssetSource,
    pub reveal: RevealMedia,
    /// Raw code of the innermost group, as written in the name. `None` at
    /// the root.
    pub group_code: Option<String>,
}

impl BucketEntry {
    #[must_use]
    pub fn from_file(name: impl Into<String>, file: RawAsset) -> Self {
        Self {
            name: name.into(),
            source: AssetSource::File(file),
            reveal: RevealMedia::default(),
            group_code: None,
        }
    }

    #[must_use]
    pub fn from_row(name: impl Into<String>, fields: RowFields) -> Self {
        Self {
            name: name.into(),
            source: AssetSource::Row(fields),
            reveal: RevealMedia::default(),
            group_code: None,
        }
    }

    #[must_use]
    pub const fn file(&self) -> Option<&RawAsset> {
        match &self.source {
            AssetSource::File(file) => Some(file),
            AssetSource::Row(_) => None,
        }
    }

    #[must_use]
    pub const fn row(&self) -> Option<&RowFields> {
        match &self.source {
            AssetSource::Row(fields) => Some(fields),
            AssetSource::File(_) => None,
        }
    }
}

/// Siblings sharing one group path, in discovery order. Duplicate names are kept.
pub type AssetBucket = Vec<BucketEntry>;
