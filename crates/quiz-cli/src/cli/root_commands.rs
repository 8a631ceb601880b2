use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use quiz_core::enums::QuestionKind;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Build questions from a folder of picture or sound files.
    Generate(GenerateArgs),
    /// Build text questions from a JSON array of rows.
    Text(TextArgs),
    /// Run every job listed in a TOML manifest, in order.
    Batch(BatchArgs),
    /// Convert every png/jpg/jpeg below a folder to webp.
    Convert(ConvertArgs),
    /// Print the JSON Schema of the question-set document.
    Schema(SchemaArgs),
}

/// Media question types accepted by `generate`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum MediaKind {
    Picture,
    Sound,
}

impl From<MediaKind> for QuestionKind {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Picture => Self::Picture,
            MediaKind::Sound => Self::Sound,
        }
    }
}

/// Arguments for `quizgen generate`.
#[derive(Clone, Debug, Args)]
pub struct GenerateArgs {
    /// Question type
    #[arg(long = "type", value_enum)]
    pub kind: MediaKind,

    /// Theme folder
    #[arg(long)]
    pub theme: String,

    /// Subtheme folder (may be empty)
    #[arg(long, default_value = "")]
    pub subtheme: String,

    /// Question-set name, used as the document file name
    #[arg(long)]
    pub name: String,

    /// Default question sentence
    #[arg(long)]
    pub sentence: String,

    /// Group assets by the code path in their file names
    #[arg(long)]
    pub grouped: bool,

    /// Descriptor file (JSON or TOML) resolving group codes; implies --grouped
    #[arg(long)]
    pub descriptors: Option<PathBuf>,

    /// Language folder (defaults to general.language)
    #[arg(long)]
    pub language: Option<String>,
}

/// Arguments for `quizgen text`.
#[derive(Clone, Debug, Args)]
pub struct TextArgs {
    /// Theme folder
    #[arg(long)]
    pub theme: String,

    /// Subtheme folder (may be empty)
    #[arg(long, default_value = "")]
    pub subtheme: String,

    /// Default question sentence
    #[arg(long)]
    pub sentence: String,

    /// Row field holding the answer
    #[arg(long)]
    pub id: String,

    /// Sentence template, e.g. "What is {{species}}?"
    #[arg(long)]
    pub template: String,

    /// Rows document (defaults to rows.json in the input folder)
    #[arg(long)]
    pub rows: Option<PathBuf>,

    /// Language folder (defaults to general.language)
    #[arg(long)]
    pub language: Option<String>,
}

/// Arguments for `quizgen batch`.
#[derive(Clone, Debug, Args)]
pub struct BatchArgs {
    /// Manifest file listing jobs
    pub manifest: PathBuf,
}

/// Arguments for `quizgen convert`.
#[derive(Clone, Debug, Args)]
pub struct ConvertArgs {
    /// Folder to convert recursively
    pub dir: PathBuf,
}

/// Arguments for `quizgen schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Document to describe
    #[arg(long, value_enum, default_value = "question-set")]
    pub document: SchemaDocument,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaDocument {
    QuestionSet,
    Question,
}
