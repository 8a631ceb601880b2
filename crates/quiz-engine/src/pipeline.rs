//! A generation run: scan -> group -> assemble -> serialize.
//!
//! Each stage is a public method so callers can drive progress reporting
//! between them; [`Pipeline::run`] chains all four.

use std::path::PathBuf;

use quiz_core::entities::{BucketEntry, Question};
use quiz_core::enums::QuestionKind;
use quiz_core::media::{MediaNormalizer, UrlComposer};
use rand::Rng;
use serde::Serialize;

use crate::assembler::{MediaLayout, QuestionAssembler};
use crate::error::{EngineError, display_path};
use crate::reveal::RevealIndex;
use crate::serialize::TreeSerializer;
use crate::strategy::{
    FixedSentence, FlatGrouping, GroupingStrategy, MediaFiles, SentenceStrategy, SourceStrategy,
};
use crate::tree::{AssetTree, QuestionTree};

/// What a run produces: the identity of one question set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSpec {
    pub kind: QuestionKind,
    pub language: String,
    pub theme: String,
    pub subtheme: String,
    /// Question-set name, used as the document file name.
    pub set_name: String,
    pub default_sentence: String,
}

impl JobSpec {
    /// URL segments preceding the group path: language, type, theme, subtheme.
    /// Empty segments are dropped.
    #[must_use]
    pub fn url_prefix(&self) -> Vec<String> {
        [
            self.language.as_str(),
            self.kind.as_str(),
            self.theme.as_str(),
            self.subtheme.as_str(),
        ]
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
    }
}

/// Where a run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobLayout {
    pub input_dir: PathBuf,
    pub media_dir: PathBuf,
    pub questions_dir: PathBuf,
}

/// Summary of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub kind: QuestionKind,
    pub language: String,
    pub theme: String,
    pub subtheme: String,
    pub set_name: String,
    pub source: String,
    pub assets: usize,
    pub groups: usize,
    pub reveals: usize,
    pub questions: usize,
    pub documents: Vec<PathBuf>,
}

pub struct Pipeline<'a> {
    job: JobSpec,
    layout: JobLayout,
    media: MediaLayout,
    source: Box<dyn SourceStrategy + 'a>,
    grouping: Box<dyn GroupingStrategy + 'a>,
    sentences: Box<dyn SentenceStrategy + 'a>,
    normalizer: Option<&'a dyn MediaNormalizer>,
    urls: &'a dyn UrlComposer,
}

/// Counts gathered while grouping, carried into the report.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupStats {
    pub assets: usize,
    pub groups: usize,
    pub reveals: usize,
}

impl<'a> Pipeline<'a> {
    /// A flat media run with a fixed sentence and no normalization. Swap
    /// stages with the `with_*` methods.
    #[must_use]
    pub fn new(job: JobSpec, layout: JobLayout, urls: &'a dyn UrlComposer) -> Self {
        let media = MediaLayout {
            output_dir: layout.media_dir.clone(),
            url_prefix: job.url_prefix(),
        };
        let source = MediaFiles {
            kind: job.kind,
            normalizing: false,
        };
        let sentences = FixedSentence(job.default_sentence.clone());
        Self {
            job,
            layout,
            media,
            source: Box::new(source),
            grouping: Box::new(FlatGrouping),
            sentences: Box::new(sentences),
            normalizer: None,
            urls,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl SourceStrategy + 'a) -> Self {
        self.source = Box::new(source);
        self
    }

    #[must_use]
    pub fn with_grouping(mut self, grouping: impl GroupingStrategy + 'a) -> Self {
        self.grouping = Box::new(grouping);
        self
    }

    #[must_use]
    pub fn with_sentences(mut self, sentences: impl SentenceStrategy + 'a) -> Self {
        self.sentences = Box::new(sentences);
        self
    }

    #[must_use]
    pub fn with_normalizer(mut self, normalizer: &'a dyn MediaNormalizer) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    #[must_use]
    pub const fn job(&self) -> &JobSpec {
        &self.job
    }

    #[must_use]
    pub const fn layout(&self) -> &JobLayout {
        &self.layout
    }

    /// Stage 1.
    ///
    /// # Errors
    ///
    /// See [`SourceStrategy::scan`].
    pub fn scan(&self) -> Result<Vec<BucketEntry>, EngineError> {
        let entries = self.source.scan(&self.layout.input_dir)?;
        tracing::info!(source = %self.source.label(), count = entries.len(), "scanned inputs");
        Ok(entries)
    }

    /// Stage 2, plus reveal-media matching for sources that have it.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoAssets`] when nothing usable was scanned, or a
    /// grouping error.
    pub fn group(&self, entries: Vec<BucketEntry>) -> Result<(AssetTree, GroupStats), EngineError> {
        let mut tree = self.grouping.group(entries)?;
        if tree.item_count() == 0 {
            return Err(EngineError::NoAssets(self.source.label()));
        }

        let mut reveals = 0;
        if self.source.has_reveal_media() {
            let index = RevealIndex::scan(&self.layout.input_dir, self.normalizer)?;
            if !index.is_empty() {
                reveals = index.attach_tree(&mut tree);
            }
        }

        let stats = GroupStats {
            assets: tree.item_count(),
            groups: tree.terminal_count(),
            reveals,
        };
        tracing::info!(
            assets = stats.assets,
            groups = stats.groups,
            reveals = stats.reveals,
            "grouped assets"
        );
        Ok((tree, stats))
    }

    /// Stage 3. `on_question` fires after each question is built.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmptyBucket`] for a terminal with no entries, or any
    /// primary-media failure.
    pub fn assemble<R: Rng + ?Sized>(
        &self,
        tree: &AssetTree,
        rng: &mut R,
        on_question: &mut dyn FnMut(&Question),
    ) -> Result<QuestionTree, EngineError> {
        let assembler = QuestionAssembler::new(self.job.kind, &self.media, self.normalizer, self.urls);
        tree.try_map(&mut |path: &[String], bucket: &[BucketEntry]| {
            if bucket.is_empty() {
                return Err(EngineError::EmptyBucket {
                    path: display_path(path),
                });
            }
            let mut questions = Vec::with_capacity(bucket.len());
            for entry in bucket {
                let sentence = self.sentences.sentence(entry, path);
                let question = assembler.assemble(entry, bucket, path, sentence, rng)?;
                on_question(&question);
                questions.push(question);
            }
            tracing::debug!(group = %display_path(path), count = questions.len(), "assembled bucket");
            Ok(questions)
        })
    }

    /// Stage 4.
    ///
    /// # Errors
    ///
    /// I/O or serialization failures.
    pub fn serialize(&self, tree: &QuestionTree) -> Result<Vec<PathBuf>, EngineError> {
        let serializer = TreeSerializer::new(
            &self.layout.questions_dir,
            &self.job.set_name,
            &self.job.default_sentence,
        );
        let written = serializer.write(tree)?;
        tracing::info!(documents = written.len(), dir = %self.layout.questions_dir.display(), "wrote question sets");
        Ok(written)
    }

    /// All four stages.
    ///
    /// # Errors
    ///
    /// The first stage error; nothing is written when an earlier stage fails.
    pub fn run<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        on_question: &mut dyn FnMut(&Question),
    ) -> Result<RunReport, EngineError> {
        let entries = self.scan()?;
        let (assets, stats) = self.group(entries)?;
        let questions = self.assemble(&assets, rng, on_question)?;
        let documents = self.serialize(&questions)?;
        Ok(self.report(stats, questions.item_count(), documents))
    }

    #[must_use]
    pub fn report(&self, stats: GroupStats, questions: usize, documents: Vec<PathBuf>) -> RunReport {
        RunReport {
            kind: self.job.kind,
            language: self.job.language.clone(),
            theme: self.job.theme.clone(),
            subtheme: self.job.subtheme.clone(),
            set_name: self.job.set_name.clone(),
            source: self.source.label(),
            assets: stats.assets,
            groups: stats.groups,
            reveals: stats.reveals,
            questions,
            documents,
        }
    }
}
