//! Reveal media: optional secondary picture/sound shown after answering.
//!
//! Reveal files live in `reveal_picture/` and `reveal_sound/` beside the
//! primary assets and are matched to questions by file stem == leaf name.
//! Normalization failures here are logged and the reveal is dropped; they
//! never abort a run.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use quiz_core::entities::{BucketEntry, RawAsset};
use quiz_core::enums::{
    CANONICAL_PICTURE_EXTENSION, is_picture_extension, is_sound_extension,
    picture_needs_normalization,
};
use quiz_core::media::MediaNormalizer;

use crate::error::EngineError;
use crate::tree::AssetTree;

pub const REVEAL_PICTURE_DIR: &str = "reveal_picture";
pub const REVEAL_SOUND_DIR: &str = "reveal_sound";

/// Reveal files found for one input directory, keyed by stem.
#[derive(Debug, Default, Clone)]
pub struct RevealIndex {
    pictures: HashMap<String, PathBuf>,
    sounds: HashMap<String, PathBuf>,
}

impl RevealIndex {
    /// Scan the reveal folders under `input_dir`. Missing folders are fine.
    ///
    /// Non-canonical pictures go through `normalizer`; without one they are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Io`] when an existing reveal folder cannot be read.
    pub fn scan(input_dir: &Path, normalizer: Option<&dyn MediaNormalizer>) -> Result<Self, EngineError> {
        let mut index = Self::default();

        for file in list_files(&input_dir.join(REVEAL_PICTURE_DIR))? {
            let Some(ext) = file.extension().map(str::to_ascii_lowercase) else {
                continue;
            };
            if !is_picture_extension(&ext) {
                tracing::debug!(file = %file.file_name, "ignoring non-picture reveal file");
                continue;
            }
            let path = if picture_needs_normalization(&ext) {
                let Some(normalizer) = normalizer else {
                    tracing::warn!(
                        file = %file.file_name,
                        "reveal picture needs conversion to {CANONICAL_PICTURE_EXTENSION} but normalization is off"
                    );
                    continue;
                };
                match normalizer.normalize(&file.source_path) {
                    Ok(path) => path,
                    Err(error) => {
                        tracing::warn!(file = %file.file_name, %error, "reveal picture conversion failed");
                        continue;
                    }
                }
            } else {
                file.source_path.clone()
            };
            index.pictures.insert(file.stem().to_string(), path);
        }

        for file in list_files(&input_dir.join(REVEAL_SOUND_DIR))? {
            if file.extension().is_some_and(is_sound_extension) {
                index
                    .sounds
                    .insert(file.stem().to_string(), file.source_path.clone());
            } else {
                tracing::debug!(file = %file.file_name, "ignoring non-sound reveal file");
            }
        }

        Ok(index)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pictures.is_empty() && self.sounds.is_empty()
    }

    #[must_use]
    pub fn picture(&self, name: &str) -> Option<&Path> {
        self.pictures.get(name).map(PathBuf::as_path)
    }

    #[must_use]
    pub fn sound(&self, name: &str) -> Option<&Path> {
        self.sounds.get(name).map(PathBuf::as_path)
    }

    /// Attach reveal media to one entry by its name.
    pub fn attach(&self, entry: &mut BucketEntry) {
        if let Some(path) = self.picture(&entry.name) {
            entry.reveal.picture = Some(path.to_path_buf());
        }
        if let Some(path) = self.sound(&entry.name) {
            entry.reveal.sound = Some(path.to_path_buf());
        }
    }

    /// Attach reveal media across a whole tree. Returns how many entries got any.
    pub fn attach_tree(&self, tree: &mut AssetTree) -> usize {
        let mut attached = 0;
        tree.for_each_terminal_mut(&mut |_path: &[String], bucket: &mut Vec<BucketEntry>| {
            for entry in bucket.iter_mut() {
                self.attach(entry);
                if !entry.reveal.is_empty() {
                    attached += 1;
                }
            }
        });
        attached
    }
}

/// Regular files directly inside `dir`, sorted by name. Missing `dir` yields nothing.
pub(crate) fn list_files(dir: &Path) -> Result<Vec<RawAsset>, EngineError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let reader = fs::read_dir(dir).map_err(|source| EngineError::io("read directory", dir, source))?;
    let mut files = Vec::new();
    for item in reader {
        let item = item.map_err(|source| EngineError::io("read directory", dir, source))?;
        let path = item.path();
        if !path.is_file() {
            continue;
        }
        match RawAsset::from_path(&path) {
            Some(asset) => files.push(asset),
            None => tracing::warn!(path = %path.display(), "skipping file with non UTF-8 name"),
        }
    }
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use quiz_core::media::MediaError;

    use super::*;

    struct RenameToWebp;

    impl MediaNormalizer for RenameToWebp {
        fn normalize(&self, path: &Path) -> Result<PathBuf, MediaError> {
            let out = path.with_extension("webp");
            fs::rename(path, &out).map_err(|source| MediaError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(out)
        }
    }

    struct AlwaysFails;

    impl MediaNormalizer for AlwaysFails {
        fn normalize(&self, path: &Path) -> Result<PathBuf, MediaError> {
            Err(MediaError::Unsupported(path.to_path_buf()))
        }
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"data").unwrap();
    }

    #[test]
    fn missing_folders_give_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let index = RevealIndex::scan(dir.path(), None).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn matches_by_stem_and_normalizes_pictures() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join(REVEAL_PICTURE_DIR).join("Lion.png"));
        touch(&dir.path().join(REVEAL_SOUND_DIR).join("Lion.mp3"));
        touch(&dir.path().join(REVEAL_SOUND_DIR).join("notes.txt"));

        let index = RevealIndex::scan(dir.path(), Some(&RenameToWebp)).unwrap();
        let picture = index.picture("Lion").unwrap();
        assert_eq!(picture.extension().and_then(|e| e.to_str()), Some("webp"));
        assert!(picture.exists());
        assert!(index.sound("Lion").is_some());
        assert!(index.sound("notes").is_none());

        let raw = RawAsset::from_path(Path::new("Lion.webp")).unwrap();
        let mut entry = BucketEntry::from_file("Lion", raw);
        index.attach(&mut entry);
        assert!(entry.reveal.picture.is_some());
        assert!(entry.reveal.sound.is_some());
    }

    #[test]
    fn conversion_failures_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join(REVEAL_PICTURE_DIR).join("Lion.jpg"));
        touch(&dir.path().join(REVEAL_PICTURE_DIR).join("Tiger.webp"));

        let index = RevealIndex::scan(dir.path(), Some(&AlwaysFails)).unwrap();
        assert!(index.picture("Lion").is_none());
        assert!(index.picture("Tiger").is_some());
    }

    #[test]
    fn unconverted_pictures_skipped_without_normalizer() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join(REVEAL_PICTURE_DIR).join("Lion.png"));
        let index = RevealIndex::scan(dir.path(), None).unwrap();
        assert!(index.is_empty());
    }
}
