//! Public asset repository configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://raw.githubusercontent.com/FlowdyWorld/FlowdyFrenzyQuizAssets/master/".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepoConfig {
    /// Base URL under which `assets_dir` is published.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl RepoConfig {
    /// Whether the base URL looks like an absolute http(s) URL.
    #[must_use]
    pub fn is_http(&self) -> bool {
        self.base_url.starts_with("https://") || self.base_url.starts_with("http://")
    }
}
