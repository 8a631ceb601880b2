//! # quiz-media
//!
//! Concrete implementations of the media seams declared in
//! `quiz_core::media`:
//!
//! - [`CwebpNormalizer`] shells out to `cwebp` to turn png/jpg/jpeg into webp.
//! - [`RepoUrlComposer`] joins path segments onto the asset repository base URL.
//! - [`convert_tree`] converts every picture below a directory in one pass.

pub mod convert;
pub mod cwebp;
pub mod url;

pub use convert::{ConvertReport, convert_tree};
pub use cwebp::CwebpNormalizer;
pub use url::RepoUrlComposer;
