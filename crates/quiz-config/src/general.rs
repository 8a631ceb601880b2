//! General run configuration.

use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "fr".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Language folder used when a job does not name one.
    #[serde(default = "default_language")]
    pub language: String,

    /// Seed for distractor sampling and identifier generation.
    /// Unset means a fresh entropy-seeded run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            seed: None,
        }
    }
}
