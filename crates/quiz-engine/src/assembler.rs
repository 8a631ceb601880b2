//! Question assembly: one bucket entry plus its siblings in, one question out.
//!
//! Side effects per question: the primary media file is normalized if needed
//! and copied to `<media dir>/<group path>/<id>.<ext>`; reveal media is copied
//! under `reveal_picture/` and `reveal_sound/` with a shared reveal id.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use quiz_core::entities::{BucketEntry, Question, QuestionData};
use quiz_core::enums::{CANONICAL_PICTURE_EXTENSION, QuestionKind};
use quiz_core::media::{MediaNormalizer, UrlComposer};
use rand::Rng;
use uuid::Uuid;

use crate::error::EngineError;
use crate::reveal::{REVEAL_PICTURE_DIR, REVEAL_SOUND_DIR};
use crate::sampler::DistractorSampler;

/// Fresh v4 identifier drawn from `rng`.
pub fn new_id<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

/// Where copied media lands on disk and under which URL prefix it is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLayout {
    pub output_dir: PathBuf,
    /// Segments between the repository base and the group path, e.g.
    /// `[language, type, theme, subtheme]`.
    pub url_prefix: Vec<String>,
}

pub struct QuestionAssembler<'a> {
    kind: QuestionKind,
    layout: &'a MediaLayout,
    normalizer: Option<&'a dyn MediaNormalizer>,
    urls: &'a dyn UrlComposer,
    sampler: DistractorSampler,
}

impl<'a> QuestionAssembler<'a> {
    #[must_use]
    pub fn new(
        kind: QuestionKind,
        layout: &'a MediaLayout,
        normalizer: Option<&'a dyn MediaNormalizer>,
        urls: &'a dyn UrlComposer,
    ) -> Self {
        Self {
            kind,
            layout,
            normalizer,
            urls,
            sampler: DistractorSampler::default(),
        }
    }

    /// Build the question for `entry`, drawing distractors from `bucket`.
    ///
    /// # Errors
    ///
    /// Primary media that cannot be normalized or copied is fatal. Reveal
    /// media failures are logged and the reveal URL is omitted.
    pub fn assemble<R: Rng + ?Sized>(
        &self,
        entry: &BucketEntry,
        bucket: &[BucketEntry],
        group_path: &[String],
        sentence: String,
        rng: &mut R,
    ) -> Result<Question, EngineError> {
        let id = new_id(rng);
        let mut data = QuestionData::default();

        if let Some(file) = entry.file() {
            let url = self.place_primary(&file.source_path, group_path, id)?;
            match self.kind {
                QuestionKind::Picture => data.picture_url = Some(url),
                QuestionKind::Sound => data.sound_url = Some(url),
                QuestionKind::Text => {}
            }
        }

        if !entry.reveal.is_empty() {
            let reveal_id = new_id(rng);
            if let Some(picture) = &entry.reveal.picture {
                data.reveal_picture_url =
                    self.place_reveal(picture, group_path, REVEAL_PICTURE_DIR, reveal_id, Some(CANONICAL_PICTURE_EXTENSION));
            }
            if let Some(sound) = &entry.reveal.sound {
                data.reveal_sound_url = self.place_reveal(sound, group_path, REVEAL_SOUND_DIR, reveal_id, None);
            }
        }

        let proposal = self.sampler.build_proposals(&entry.name, bucket, rng);

        Ok(Question {
            id,
            kind: self.kind,
            sentence,
            data,
            proposal,
        })
    }

    fn place_primary(&self, source: &Path, group_path: &[String], id: Uuid) -> Result<String, EngineError> {
        let source = self.normalized(source)?;
        let ext = extension_of(&source);
        let file_name = format!("{id}.{ext}");
        let dir = self.group_dir(group_path);
        copy_into(&source, &dir, &file_name)?;
        Ok(self.url(group_path, &[file_name.as_str()]))
    }

    fn place_reveal(
        &self,
        source: &Path,
        group_path: &[String],
        folder: &str,
        reveal_id: Uuid,
        forced_ext: Option<&str>,
    ) -> Option<String> {
        let ext = forced_ext.map_or_else(|| extension_of(source), str::to_string);
        let file_name = format!("{reveal_id}.{ext}");
        let dir = self.group_dir(group_path).join(folder);
        match copy_into(source, &dir, &file_name) {
            Ok(()) => Some(self.url(group_path, &[folder, file_name.as_str()])),
            Err(error) => {
                tracing::warn!(source = %source.display(), %error, "reveal media skipped");
                None
            }
        }
    }

    fn normalized(&self, source: &Path) -> Result<PathBuf, EngineError> {
        let needs = source
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.kind.requires_normalization(ext));
        match (needs, self.normalizer) {
            (true, Some(normalizer)) => Ok(normalizer.normalize(source)?),
            _ => Ok(source.to_path_buf()),
        }
    }

    fn group_dir(&self, group_path: &[String]) -> PathBuf {
        group_path
            .iter()
            .fold(self.layout.output_dir.clone(), |dir, key| dir.join(key))
    }

    fn url(&self, group_path: &[String], tail: &[&str]) -> String {
        let segments: Vec<&str> = self
            .layout
            .url_prefix
            .iter()
            .chain(group_path)
            .map(String::as_str)
            .chain(tail.iter().copied())
            .collect();
        self.urls.compose(&segments)
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

fn copy_into(source: &Path, dir: &Path, file_name: &str) -> Result<(), EngineError> {
    fs::create_dir_all(dir).map_err(|err| EngineError::io("create directory", dir, err))?;
    let target = dir.join(file_name);
    fs::copy(source, &target).map_err(|err| EngineError::io("copy media to", &target, err))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quiz_core::entities::{RawAsset, RowFields};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    struct Slash;

    impl UrlComposer for Slash {
        fn compose(&self, segments: &[&str]) -> String {
            format!("https://cdn.test/{}", segments.join("/"))
        }
    }

    fn layout(dir: &Path) -> MediaLayout {
        MediaLayout {
            output_dir: dir.to_path_buf(),
            url_prefix: vec!["fr".into(), "picture".into()],
        }
    }

    #[test]
    fn ids_are_reproducible_from_seed() {
        let a = new_id(&mut StdRng::seed_from_u64(3));
        let b = new_id(&mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
        assert_eq!(a.get_version_num(), 4);
    }

    #[test]
    fn copies_primary_media_under_group_path() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let source = input.path().join("a_b_Sparrow.webp");
        fs::write(&source, b"img").unwrap();

        let entry = BucketEntry::from_file("Sparrow", RawAsset::from_path(&source).unwrap());
        let layout = layout(output.path());
        let assembler = QuestionAssembler::new(QuestionKind::Picture, &layout, None, &Slash);
        let group = vec!["Animals".to_string(), "Birds".to_string()];
        let question = assembler
            .assemble(&entry, std::slice::from_ref(&entry), &group, "Who?".into(), &mut StdRng::seed_from_u64(1))
            .unwrap();

        let expected = output
            .path()
            .join("Animals")
            .join("Birds")
            .join(format!("{}.webp", question.id));
        assert!(expected.exists());
        assert_eq!(
            question.data.picture_url.as_deref(),
            Some(format!("https://cdn.test/fr/picture/Animals/Birds/{}.webp", question.id).as_str())
        );
        assert_eq!(question.sentence, "Who?");
        assert_eq!(question.proposal.len(), 1);
        assert!(question.data.reveal_picture_url.is_none());
    }

    #[test]
    fn missing_primary_media_is_fatal() {
        let output = tempfile::tempdir().unwrap();
        let raw = RawAsset::from_path(Path::new("/gone/Cat.webp")).unwrap();
        let entry = BucketEntry::from_file("Cat", raw);
        let layout = layout(output.path());
        let assembler = QuestionAssembler::new(QuestionKind::Picture, &layout, None, &Slash);
        let err = assembler
            .assemble(&entry, &[], &[], "Who?".into(), &mut StdRng::seed_from_u64(1))
            .unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }

    #[test]
    fn reveal_media_shares_one_id_and_failures_are_skipped() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let source = input.path().join("Lion.mp3");
        let reveal_picture = input.path().join("Lion.webp");
        fs::write(&source, b"snd").unwrap();
        fs::write(&reveal_picture, b"img").unwrap();

        let mut entry = BucketEntry::from_file("Lion", RawAsset::from_path(&source).unwrap());
        entry.reveal.picture = Some(reveal_picture);
        entry.reveal.sound = Some(input.path().join("missing.ogg"));

        let layout = MediaLayout {
            output_dir: output.path().to_path_buf(),
            url_prefix: vec!["fr".into(), "sound".into()],
        };
        let assembler = QuestionAssembler::new(QuestionKind::Sound, &layout, None, &Slash);
        let question = assembler
            .assemble(&entry, &[], &[], "Listen".into(), &mut StdRng::seed_from_u64(2))
            .unwrap();

        assert!(question.data.sound_url.is_some());
        let reveal_url = question.data.reveal_picture_url.unwrap();
        assert!(reveal_url.starts_with("https://cdn.test/fr/sound/reveal_picture/"));
        assert!(reveal_url.ends_with(".webp"));
        assert!(question.data.reveal_sound_url.is_none());
        assert_eq!(fs::read_dir(output.path().join(REVEAL_PICTURE_DIR)).unwrap().count(), 1);
    }

    #[test]
    fn text_rows_carry_no_media() {
        let output = tempfile::tempdir().unwrap();
        let mut fields = RowFields::new();
        fields.insert("species".into(), "Lion".into());
        let lion = BucketEntry::from_row("Lion", fields.clone());
        fields.insert("species".into(), "Cod".into());
        let cod = BucketEntry::from_row("Cod", fields);
        let bucket = vec![lion.clone(), cod];

        let layout = layout(output.path());
        let assembler = QuestionAssembler::new(QuestionKind::Text, &layout, None, &Slash);
        let question = assembler
            .assemble(&lion, &bucket, &[], "What is Lion?".into(), &mut StdRng::seed_from_u64(4))
            .unwrap();

        assert_eq!(question.data, QuestionData::default());
        assert_eq!(question.proposal[0].name, "Lion");
        assert_eq!(question.proposal[1].name, "Cod");
        assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
    }
}
