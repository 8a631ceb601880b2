//! `quizgen batch`: an ordered TOML list of jobs run one after another.
//!
//! ```toml
//! language = "fr"
//!
//! [[job]]
//! type = "picture"
//! theme = "animals"
//! name = "wild"
//! sentence = "Quel est cet animal ?"
//! descriptors = "descriptors/animals.toml"
//!
//! [[job]]
//! type = "text"
//! theme = "geography"
//! subtheme = "capitals"
//! sentence = "Capitale ?"
//! id = "country"
//! template = "Quelle est la capitale de {{country}} ?"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use quiz_config::QuizConfig;
use quiz_core::enums::QuestionKind;
use serde::Deserialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::BatchArgs;
use crate::commands::shared::{
    MediaJobRequest, TextJobRequest, make_rng, run_media_job, run_text_job,
};
use crate::output::output;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    /// Default language for jobs that do not name one.
    language: Option<String>,
    #[serde(default, rename = "job")]
    jobs: Vec<ManifestJob>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestJob {
    #[serde(rename = "type")]
    kind: QuestionKind,
    theme: String,
    #[serde(default)]
    subtheme: String,
    sentence: String,
    name: Option<String>,
    #[serde(default)]
    grouped: bool,
    descriptors: Option<PathBuf>,
    id: Option<String>,
    template: Option<String>,
    rows: Option<PathBuf>,
    language: Option<String>,
}

#[derive(Debug)]
enum JobRequest {
    Media(MediaJobRequest),
    Text(TextJobRequest),
}

fn resolve(base: &Path, path: Option<PathBuf>) -> Option<PathBuf> {
    path.map(|path| if path.is_relative() { base.join(path) } else { path })
}

impl ManifestJob {
    fn into_request(self, base: &Path, default_language: Option<&str>) -> anyhow::Result<JobRequest> {
        let language = self
            .language
            .or_else(|| default_language.map(str::to_string));
        match self.kind {
            QuestionKind::Picture | QuestionKind::Sound => {
                let set_name = self
                    .name
                    .with_context(|| format!("{} job '{}' needs a name", self.kind, self.theme))?;
                Ok(JobRequest::Media(MediaJobRequest {
                    kind: self.kind,
                    language,
                    theme: self.theme,
                    subtheme: self.subtheme,
                    set_name,
                    sentence: self.sentence,
                    grouped: self.grouped,
                    descriptors: resolve(base, self.descriptors),
                }))
            }
            QuestionKind::Text => {
                let (Some(id_field), Some(template)) = (self.id, self.template) else {
                    anyhow::bail!("text job '{}' needs both id and template", self.theme);
                };
                Ok(JobRequest::Text(TextJobRequest {
                    language,
                    theme: self.theme,
                    subtheme: self.subtheme,
                    sentence: self.sentence,
                    id_field,
                    template,
                    rows: resolve(base, self.rows),
                }))
            }
        }
    }
}

fn load_manifest(path: &Path) -> anyhow::Result<Vec<JobRequest>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    let manifest: Manifest = toml::from_str(&raw)
        .with_context(|| format!("failed to parse manifest {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));

    manifest
        .jobs
        .into_iter()
        .enumerate()
        .map(|(index, job)| {
            job.into_request(base, manifest.language.as_deref())
                .with_context(|| format!("invalid job #{} in {}", index + 1, path.display()))
        })
        .collect()
}

/// Handle `quizgen batch`. Stops at the first failing job; reports of the
/// jobs that finished are printed either way.
pub fn handle(args: &BatchArgs, config: &QuizConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let jobs = load_manifest(&args.manifest)?;
    if jobs.is_empty() {
        anyhow::bail!("manifest {} lists no jobs", args.manifest.display());
    }

    let mut rng = make_rng(config);
    let mut reports = Vec::with_capacity(jobs.len());
    let mut failure = None;
    for (index, job) in jobs.iter().enumerate() {
        let result = match job {
            JobRequest::Media(request) => run_media_job(request, config, &mut rng),
            JobRequest::Text(request) => run_text_job(request, config, &mut rng),
        };
        match result {
            Ok(report) => reports.push(report),
            Err(error) => {
                failure = Some(error.context(format!("batch job #{} failed", index + 1)));
                break;
            }
        }
    }

    tracing::info!(finished = reports.len(), total = jobs.len(), "batch done");
    output(&reports, flags.format)?;
    failure.map_or(Ok(()), Err)
}
