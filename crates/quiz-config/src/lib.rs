//! # quiz-config
//!
//! Layered configuration loading for quizgen using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`QUIZGEN_*` prefix, `__` as separator)
//! 2. Project-level `.quizgen/config.toml`
//! 3. User-level `~/.config/quizgen/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `QUIZGEN_REPO__BASE_URL` -> `repo.base_url`,
//! `QUIZGEN_GENERAL__SEED` -> `general.seed`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use quiz_config::QuizConfig;
//!
//! let config = QuizConfig::load_with_dotenv(None).expect("config");
//! println!("questions go to {}", config.paths.questions_dir.display());
//! ```

mod error;
mod general;
mod grouping;
mod media;
mod paths;
mod repo;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use grouping::GroupingConfig;
pub use media::MediaConfig;
pub use paths::PathsConfig;
pub use repo::RepoConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project-local configuration directory.
pub const PROJECT_DIR_NAME: &str = ".quizgen";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QuizConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub repo: RepoConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub grouping: GroupingConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl QuizConfig {
    /// Load configuration from all sources rooted at the current directory.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."))
    }

    /// Load configuration using `project_dir/.quizgen/config.toml` as the
    /// project layer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when extraction fails or a value is out of range.
    pub fn load_from(project_dir: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_in(project_dir).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Reads `project_dir/.env` (or `./.env`) before building the figment.
    /// This is the typical entry point for the CLI.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when extraction fails or a value is out of range.
    pub fn load_with_dotenv(project_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let root = project_dir.unwrap_or_else(|| Path::new("."));
        let env_path = root.join(".env");
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
        } else {
            let _ = dotenvy::dotenv();
        }
        Self::load_from(root)
    }

    /// Build the figment provider chain for the current directory.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_in(Path::new("."))
    }

    /// Build the figment provider chain with `project_dir` as the project layer.
    #[must_use]
    pub fn figment_in(project_dir: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = Self::project_config_path(project_dir);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("QUIZGEN_").split("__"))
    }

    /// Path of the project-local config file under `project_dir`.
    #[must_use]
    pub fn project_config_path(project_dir: &Path) -> PathBuf {
        project_dir.join(PROJECT_DIR_NAME).join("config.toml")
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("quizgen").join("config.toml"))
    }

    /// Check value ranges figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.media.webp_quality > 100 {
            return Err(ConfigError::InvalidValue {
                field: "media.webp_quality".to_string(),
                reason: format!("{} is outside 0..=100", self.media.webp_quality),
            });
        }
        if self.grouping.delimiter.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "grouping.delimiter".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        let subgroup = self.grouping.default_subgroup.trim();
        if subgroup.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "grouping.default_subgroup".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if matches!(subgroup, "." | "..") || subgroup.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                field: "grouping.default_subgroup".to_string(),
                reason: format!("'{subgroup}' is not a plain folder name"),
            });
        }
        if !self.repo.is_http() {
            return Err(ConfigError::InvalidValue {
                field: "repo.base_url".to_string(),
                reason: format!("'{}' is not an http(s) URL", self.repo.base_url),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use quiz_core::enums::DepthConflictPolicy;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = QuizConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grouping.delimiter, "_");
        assert_eq!(config.grouping.depth_conflict, DepthConflictPolicy::Reject);
        assert!(config.general.seed.is_none());
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = QuizConfig::figment_in(Path::new("/nonexistent-quizgen-project"));
        let config: QuizConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.media.webp_quality, 80);
        assert_eq!(config.general.language, "fr");
    }

    #[test]
    fn validate_rejects_out_of_range_quality() {
        let mut config = QuizConfig::default();
        config.media.webp_quality = 101;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("media.webp_quality"));
    }

    #[test]
    fn validate_rejects_empty_delimiter() {
        let mut config = QuizConfig::default();
        config.grouping.delimiter.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("grouping.delimiter"));
    }

    #[test]
    fn validate_rejects_path_like_default_subgroup() {
        for name in ["..", "a/b"] {
            let mut config = QuizConfig::default();
            config.grouping.default_subgroup = name.into();
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("grouping.default_subgroup"));
        }
    }

    #[test]
    fn validate_rejects_non_http_base() {
        let mut config = QuizConfig::default();
        config.repo.base_url = "ftp://example.org".into();
        assert!(config.validate().is_err());
    }
}
