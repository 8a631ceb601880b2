use std::path::{Path, PathBuf};

use anyhow::Context;
use quiz_config::QuizConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration for the project directory named by
/// `--config-dir` (or the current directory).
///
/// Relative folders from the config are anchored at that project directory,
/// so a run behaves the same from any working directory.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<QuizConfig> {
    let project_dir = flags
        .config_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    if !project_dir.is_dir() {
        anyhow::bail!(
            "invalid --config-dir '{}': directory does not exist",
            project_dir.display()
        );
    }

    let mut config = QuizConfig::load_with_dotenv(Some(&project_dir))
        .with_context(|| format!("failed to load configuration from {}", project_dir.display()))?;
    anchor_paths(&mut config, &project_dir);

    if let Some(seed) = flags.seed {
        config.general.seed = Some(seed);
    }

    tracing::debug!(
        project = %project_dir.display(),
        language = %config.general.language,
        seed = ?config.general.seed,
        "configuration loaded"
    );
    Ok(config)
}

fn anchor_paths(config: &mut QuizConfig, project_dir: &Path) {
    if project_dir == Path::new(".") {
        return;
    }
    for path in [
        &mut config.paths.scripts_dir,
        &mut config.paths.assets_dir,
        &mut config.paths.questions_dir,
    ] {
        if path.is_relative() {
            *path = project_dir.join(&*path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_folders_follow_project_dir() {
        let mut config = QuizConfig::default();
        config.paths.questions_dir = PathBuf::from("/abs/questions");
        anchor_paths(&mut config, Path::new("/work/quiz"));

        assert_eq!(config.paths.scripts_dir, PathBuf::from("/work/quiz/scripts"));
        assert_eq!(config.paths.assets_dir, PathBuf::from("/work/quiz/."));
        assert_eq!(config.paths.questions_dir, PathBuf::from("/abs/questions"));
    }

    #[test]
    fn current_dir_leaves_paths_alone() {
        let mut config = QuizConfig::default();
        anchor_paths(&mut config, Path::new("."));
        assert_eq!(config.paths.scripts_dir, PathBuf::from("scripts"));
    }
}
