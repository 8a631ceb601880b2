//! File-name grouping configuration.

use quiz_core::enums::DepthConflictPolicy;
use serde::{Deserialize, Serialize};

fn default_delimiter() -> String {
    "_".to_string()
}

fn default_subgroup() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GroupingConfig {
    /// Separator between code tokens in a file stem.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Resolution when sibling paths terminate at different depths.
    #[serde(default)]
    pub depth_conflict: DepthConflictPolicy,

    /// Group key receiving the shallower assets under `default_subgroup` policy.
    #[serde(default = "default_subgroup")]
    pub default_subgroup: String,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            depth_conflict: DepthConflictPolicy::default(),
            default_subgroup: default_subgroup(),
        }
    }
}
