//! Shared job runner for `generate`, `text`, and `batch`.
//!
//! A request names a job the way the command line does; the runner resolves
//! folders from config, installs the collaborators, and drives the pipeline
//! stages with a progress bar between them.

use std::path::{Path, PathBuf};

use anyhow::Context;
use quiz_config::QuizConfig;
use quiz_core::descriptors::DescriptorTable;
use quiz_core::enums::QuestionKind;
use quiz_engine::strategy::{
    CodePathGrouping, DescriptorSentence, FixedSentence, FlatGrouping, MediaFiles, RowTemplate,
    TextRows,
};
use quiz_engine::{JobLayout, JobSpec, Pipeline, RunReport};
use quiz_media::{CwebpNormalizer, RepoUrlComposer};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::progress::Progress;

/// Rows document looked up in the input folder when none is given.
pub const DEFAULT_ROWS_FILE: &str = "rows.json";

/// Text question sets always share this document name.
pub const TEXT_SET_NAME: &str = "questions";

/// A picture or sound job.
#[derive(Debug, Clone)]
pub struct MediaJobRequest {
    pub kind: QuestionKind,
    pub language: Option<String>,
    pub theme: String,
    pub subtheme: String,
    pub set_name: String,
    pub sentence: String,
    pub grouped: bool,
    pub descriptors: Option<PathBuf>,
}

/// A text-row job.
#[derive(Debug, Clone)]
pub struct TextJobRequest {
    pub language: Option<String>,
    pub theme: String,
    pub subtheme: String,
    pub sentence: String,
    pub id_field: String,
    pub template: String,
    pub rows: Option<PathBuf>,
}

/// Seeded when `general.seed` is set, otherwise from the OS.
#[must_use]
pub fn make_rng(config: &QuizConfig) -> StdRng {
    config
        .general
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

fn language<'a>(request: Option<&'a str>, config: &'a QuizConfig) -> &'a str {
    request
        .filter(|lang| !lang.is_empty())
        .unwrap_or(config.general.language.as_str())
}

fn normalizer(config: &QuizConfig) -> Option<CwebpNormalizer> {
    config
        .media
        .normalize
        .then(|| CwebpNormalizer::new(config.media.cwebp_bin.clone(), config.media.webp_quality))
}

/// Run a picture or sound job.
///
/// # Errors
///
/// Unreadable descriptors, or any pipeline stage failure.
pub fn run_media_job(
    request: &MediaJobRequest,
    config: &QuizConfig,
    rng: &mut StdRng,
) -> anyhow::Result<RunReport> {
    let lang = language(request.language.as_deref(), config);
    let paths = &config.paths;
    let job = JobSpec {
        kind: request.kind,
        language: lang.to_string(),
        theme: request.theme.clone(),
        subtheme: request.subtheme.clone(),
        set_name: request.set_name.clone(),
        default_sentence: request.sentence.clone(),
    };
    let layout = JobLayout {
        input_dir: paths.input_dir(lang, request.kind, &request.theme, &request.subtheme),
        media_dir: paths.media_output_dir(lang, request.kind, &request.theme, &request.subtheme),
        questions_dir: paths.questions_output_dir(lang, request.kind, &request.theme),
    };

    let descriptors = match &request.descriptors {
        Some(path) => DescriptorTable::load(path)
            .with_context(|| format!("failed to load descriptors from {}", path.display()))?,
        None => DescriptorTable::new(),
    };
    let grouped = request.grouped || request.descriptors.is_some();

    let urls = RepoUrlComposer::new(config.repo.base_url.clone());
    let cwebp = normalizer(config);
    let mut pipeline = Pipeline::new(job, layout, &urls).with_source(MediaFiles {
        kind: request.kind,
        normalizing: cwebp.is_some(),
    });
    if let Some(cwebp) = &cwebp {
        pipeline = pipeline.with_normalizer(cwebp);
    }
    if grouped {
        pipeline = pipeline
            .with_grouping(CodePathGrouping {
                delimiter: config.grouping.delimiter.clone(),
                descriptors: &descriptors,
                policy: config.grouping.depth_conflict,
                default_subgroup: config.grouping.default_subgroup.clone(),
            })
            .with_sentences(DescriptorSentence {
                descriptors: &descriptors,
                default_sentence: request.sentence.clone(),
            });
    } else {
        pipeline = pipeline
            .with_grouping(FlatGrouping)
            .with_sentences(FixedSentence(request.sentence.clone()));
    }

    drive(&pipeline, rng)
}

/// Run a text-row job.
///
/// # Errors
///
/// Unreadable or malformed rows, or any pipeline stage failure.
pub fn run_text_job(
    request: &TextJobRequest,
    config: &QuizConfig,
    rng: &mut StdRng,
) -> anyhow::Result<RunReport> {
    let lang = language(request.language.as_deref(), config);
    let paths = &config.paths;
    let kind = QuestionKind::Text;
    let input_dir = paths.input_dir(lang, kind, &request.theme, &request.subtheme);
    let rows_path = request
        .rows
        .clone()
        .unwrap_or_else(|| input_dir.join(DEFAULT_ROWS_FILE));

    let job = JobSpec {
        kind,
        language: lang.to_string(),
        theme: request.theme.clone(),
        subtheme: request.subtheme.clone(),
        set_name: TEXT_SET_NAME.to_string(),
        default_sentence: request.sentence.clone(),
    };
    let layout = JobLayout {
        media_dir: paths.media_output_dir(lang, kind, &request.theme, &request.subtheme),
        questions_dir: text_questions_dir(
            &paths.questions_output_dir(lang, kind, &request.theme),
            &request.subtheme,
        ),
        input_dir,
    };

    let urls = RepoUrlComposer::new(config.repo.base_url.clone());
    let cwebp = normalizer(config);
    let mut pipeline = Pipeline::new(job, layout, &urls)
        .with_source(TextRows {
            rows_path,
            id_field: request.id_field.clone(),
        })
        .with_grouping(FlatGrouping)
        .with_sentences(RowTemplate {
            template: request.template.clone(),
        });
    if let Some(cwebp) = &cwebp {
        pipeline = pipeline.with_normalizer(cwebp);
    }

    drive(&pipeline, rng)
}

fn text_questions_dir(theme_dir: &Path, subtheme: &str) -> PathBuf {
    if subtheme.is_empty() {
        theme_dir.to_path_buf()
    } else {
        theme_dir.join(subtheme)
    }
}

fn drive(pipeline: &Pipeline<'_>, rng: &mut StdRng) -> anyhow::Result<RunReport> {
    let job = pipeline.job();
    let label = format!("{} {}", job.kind, job.theme);
    tracing::debug!(job = %label, input = %pipeline.layout().input_dir.display(), "starting job");

    let entries = pipeline
        .scan()
        .with_context(|| format!("{label}: failed to scan inputs"))?;
    let (assets, stats) = pipeline
        .group(entries)
        .with_context(|| format!("{label}: failed to group assets"))?;

    let progress = Progress::bar(u64::try_from(stats.assets).unwrap_or(u64::MAX), &label);
    let questions = match pipeline.assemble(&assets, rng, &mut |_| progress.inc(1)) {
        Ok(questions) => questions,
        Err(error) => {
            progress.finish_err("failed");
            return Err(error).with_context(|| format!("{label}: failed to assemble questions"));
        }
    };
    let documents = match pipeline.serialize(&questions) {
        Ok(documents) => documents,
        Err(error) => {
            progress.finish_err("failed");
            return Err(error).with_context(|| format!("{label}: failed to write question sets"));
        }
    };
    progress.finish_ok(&format!("{} questions", questions.item_count()));

    Ok(pipeline.report(stats, questions.item_count(), documents))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::Rng;

    use super::*;

    #[test]
    fn seeded_config_gives_repeatable_rng() {
        let mut config = QuizConfig::default();
        config.general.seed = Some(11);
        let a: u64 = make_rng(&config).random();
        let b: u64 = make_rng(&config).random();
        assert_eq!(a, b);
    }

    #[test]
    fn request_language_overrides_config() {
        let config = QuizConfig::default();
        assert_eq!(language(Some("en"), &config), "en");
        assert_eq!(language(Some(""), &config), config.general.language);
        assert_eq!(language(None, &config), config.general.language);
    }

    #[test]
    fn normalizer_follows_media_switch() {
        let mut config = QuizConfig::default();
        assert!(normalizer(&config).is_some());
        config.media.normalize = false;
        assert!(normalizer(&config).is_none());
    }

    #[test]
    fn unreadable_descriptors_fail_with_their_path() {
        let config = QuizConfig::default();
        let request = MediaJobRequest {
            kind: QuestionKind::Picture,
            language: None,
            theme: "animals".into(),
            subtheme: String::new(),
            set_name: "wild".into(),
            sentence: "?".into(),
            grouped: false,
            descriptors: Some(PathBuf::from("/nonexistent/descriptors.toml")),
        };
        let error = run_media_job(&request, &config, &mut make_rng(&config))
            .expect_err("missing descriptors must fail");
        let message = format!("{error:#}");
        assert!(message.contains("failed to load descriptors from /nonexistent/descriptors.toml"));
        assert!(message.contains("failed to read"));
    }

    #[test]
    fn text_documents_land_under_subtheme() {
        let theme = Path::new("questions/fr/text/animals");
        assert_eq!(text_questions_dir(theme, "cats"), theme.join("cats"));
        assert_eq!(text_questions_dir(theme, ""), theme.to_path_buf());
    }
}
