//! # quiz-core
//!
//! Core types, question kinds, and error types for quizgen.
//!
//! This crate provides the foundational types shared across all quizgen crates:
//! - Asset and bucket types produced by scanning an input folder
//! - Question, proposal, and output document types (serialized as JSON)
//! - Question kinds and the file extensions each one accepts
//! - The asset descriptor table mapping code tokens to readable names
//! - Collaborator traits for media normalization and URL composition
//! - Cross-cutting error types

pub mod descriptors;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod media;
