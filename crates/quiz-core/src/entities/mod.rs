//! Entity structs for quizgen.
//!
//! Asset types describe what a scan found on disk; question types describe
//! what is written out. Question types derive `Serialize`, `Deserialize`, and
//! `JsonSchema` so the output document can be validated against its schema.

mod asset;
mod question;

pub use asset::{AssetBucket, AssetSource, BucketEntry, RawAsset, RevealMedia, RowFields};
pub use question::{Proposal, Question, QuestionData, QuestionSet};
