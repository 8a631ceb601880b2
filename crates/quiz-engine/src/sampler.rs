//! Distractor sampling.
//!
//! Each draw picks uniformly among the bucket entries whose name has not been
//! used yet (the answer counts as used from the start), so names are never
//! repeated and entries sharing a name weigh in proportion to their count.

use quiz_core::entities::{BucketEntry, Proposal};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Most proposals a question carries: the answer plus five distractors.
pub const MAX_PROPOSALS: usize = 6;

/// Most distractors drawn for one question.
pub const MAX_DISTRACTORS: usize = MAX_PROPOSALS - 1;

/// Anything that exposes the name used for proposal comparison.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for BucketEntry {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for String {
    fn name(&self) -> &str {
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DistractorSampler {
    max_distractors: usize,
}

impl Default for DistractorSampler {
    fn default() -> Self {
        Self {
            max_distractors: MAX_DISTRACTORS,
        }
    }
}

impl DistractorSampler {
    #[cfg(test)]
    fn with_max(max_distractors: usize) -> Self {
        Self {
            max_distractors: max_distractors.min(MAX_DISTRACTORS),
        }
    }

    /// Draw distinct distractor names from `bucket`, excluding `answer`.
    ///
    /// Stops early once every distinct name is used.
    pub fn sample_distractors<T, R>(&self, answer: &str, bucket: &[T], rng: &mut R) -> Vec<String>
    where
        T: Named,
        R: Rng + ?Sized,
    {
        let mut used: Vec<&str> = vec![answer];
        let mut drawn = Vec::with_capacity(self.max_distractors);
        for _ in 0..self.max_distractors {
            let candidates: Vec<&T> = bucket
                .iter()
                .filter(|entry| !used.contains(&entry.name()))
                .collect();
            let Some(&pick) = candidates.choose(rng) else {
                break;
            };
            used.push(pick.name());
            drawn.push(pick.name().to_string());
        }
        drawn
    }

    /// The answer first, then sampled distractors.
    pub fn build_proposals<T, R>(&self, answer: &str, bucket: &[T], rng: &mut R) -> Vec<Proposal>
    where
        T: Named,
        R: Rng + ?Sized,
    {
        std::iter::once(Proposal::answer(answer))
            .chain(
                self.sample_distractors(answer, bucket, rng)
                    .into_iter()
                    .map(Proposal::distractor),
            )
            .collect()
    }
}
