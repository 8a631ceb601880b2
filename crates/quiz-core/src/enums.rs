//! Question kinds and grouping policies.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Extensions accepted as picture input (primary or reveal).
pub const PICTURE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Extensions accepted as sound input (primary or reveal).
pub const SOUND_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg"];

/// Canonical picture encoding. Every picture is converted to this before use.
pub const CANONICAL_PICTURE_EXTENSION: &str = "webp";

fn has_extension(ext: &str, allowed: &[&str]) -> bool {
    allowed
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(ext))
}

/// Whether `ext` names a picture file that must be normalized before use.
#[must_use]
pub fn picture_needs_normalization(ext: &str) -> bool {
    has_extension(ext, PICTURE_EXTENSIONS)
        && !ext.eq_ignore_ascii_case(CANONICAL_PICTURE_EXTENSION)
}

#[must_use]
pub fn is_picture_extension(ext: &str) -> bool {
    has_extension(ext, PICTURE_EXTENSIONS)
}

#[must_use]
pub fn is_sound_extension(ext: &str) -> bool {
    has_extension(ext, SOUND_EXTENSIONS)
}

// ---------------------------------------------------------------------------
// QuestionKind
// ---------------------------------------------------------------------------

/// The media type a question is built around. Serialized as the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Picture,
    Sound,
    Text,
}

impl QuestionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Picture => "picture",
            Self::Sound => "sound",
            Self::Text => "text",
        }
    }

    /// Whether a scanned file with this extension belongs to this kind at all.
    ///
    /// Pictures accept every picture extension here; only the canonical one
    /// becomes a question (see [`Self::is_question_source`]).
    #[must_use]
    pub fn accepts_extension(self, ext: &str) -> bool {
        match self {
            Self::Picture => is_picture_extension(ext),
            Self::Sound => is_sound_extension(ext),
            Self::Text => false,
        }
    }

    /// Whether a file with this extension must be normalized before it can
    /// back a question.
    #[must_use]
    pub fn requires_normalization(self, ext: &str) -> bool {
        matches!(self, Self::Picture) && picture_needs_normalization(ext)
    }

    /// Whether a file with this extension can back a question once
    /// normalization is done.
    #[must_use]
    pub fn is_question_source(self, ext: &str) -> bool {
        match self {
            Self::Picture => ext.eq_ignore_ascii_case(CANONICAL_PICTURE_EXTENSION),
            Self::Sound => is_sound_extension(ext),
            Self::Text => false,
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DepthConflictPolicy
// ---------------------------------------------------------------------------

/// What to do when file names sharing a prefix terminate at different depths,
/// e.g. `a_leaf1.png` next to `a_b_leaf2.png`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DepthConflictPolicy {
    /// Abort the run, naming the offending path.
    #[default]
    Reject,
    /// Move the shallower assets into an implicit subgroup.
    DefaultSubgroup,
}

impl DepthConflictPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::DefaultSubgroup => "default_subgroup",
        }
    }
}

impl fmt::Display for DepthConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
