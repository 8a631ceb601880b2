//! Media normalization configuration.

use serde::{Deserialize, Serialize};

fn default_cwebp_bin() -> String {
    "cwebp".to_string()
}

const fn default_webp_quality() -> u8 {
    80
}

const fn default_normalize() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    /// Encoder executable used to produce webp pictures.
    #[serde(default = "default_cwebp_bin")]
    pub cwebp_bin: String,

    /// Encoder quality, 0..=100.
    #[serde(default = "default_webp_quality")]
    pub webp_quality: u8,

    /// When false, pictures are used as found and only webp files become questions.
    #[serde(default = "default_normalize")]
    pub normalize: bool,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            cwebp_bin: default_cwebp_bin(),
            webp_quality: default_webp_quality(),
            normalize: default_normalize(),
        }
    }
}
