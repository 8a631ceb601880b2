use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::QuestionKind;

/// One answer option. Exactly one per question has `is_answer = true` and it
/// is always the first element of the proposal list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Proposal {
    pub name: String,
    pub is_answer: bool,
}

impl Proposal {
    #[must_use]
    pub fn answer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_answer: true,
        }
    }

    #[must_use]
    pub fn distractor(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_answer: false,
        }
    }
}

/// Media references attached to a question. Absent fields are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuestionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_picture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_sound_url: Option<String>,
}

/// A generated multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Question {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub sentence: String,
    pub data: QuestionData,
    pub proposal: Vec<Proposal>,
}

impl Question {
    /// The correct proposal, if the list is well formed.
    #[must_use]
    pub fn answer(&self) -> Option<&Proposal> {
        self.proposal.first().filter(|proposal| proposal.is_answer)
    }
}

/// The JSON document written once per terminal group path.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuestionSet {
    pub default_sentence: String,
    pub questions: Vec<Question>,
}
