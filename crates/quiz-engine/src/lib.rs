//! # quiz-engine
//!
//! Turns a folder of raw assets into a tree of question documents.
//!
//! ```text
//! file names -> code_path -> tree (buckets) -> sampler + assembler -> serialize -> JSON files
//! ```
//!
//! The stages are exposed individually on [`pipeline::Pipeline`] and composed
//! through strategy objects ([`strategy`]): one source strategy per asset type
//! (media files or text rows), one grouping strategy (flat or code-path), one
//! sentence strategy (fixed, descriptor template, or row template).
//!
//! Randomness (distractor draws and question identifiers) always comes from a
//! caller-supplied [`rand::Rng`], so a seeded generator reproduces a run
//! byte for byte.

pub mod assembler;
pub mod code_path;
pub mod error;
pub mod pipeline;
pub mod reveal;
pub mod sampler;
pub mod scan;
pub mod serialize;
pub mod strategy;
pub mod template;
pub mod tree;

pub use error::EngineError;
pub use pipeline::{JobLayout, JobSpec, Pipeline, RunReport};
pub use tree::{AssetTree, GroupNode, QuestionTree, TreeBuilder};
