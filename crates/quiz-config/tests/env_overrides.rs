use std::path::Path;

use figment::Jail;
use quiz_config::QuizConfig;

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("QUIZGEN_REPO__BASE_URL", "https://assets.example.org/");
        jail.set_env("QUIZGEN_GENERAL__SEED", "42");
        jail.set_env("QUIZGEN_GROUPING__DEPTH_CONFLICT", "default_subgroup");

        let config = QuizConfig::load_from(Path::new(".")).expect("config loads");
        assert_eq!(config.repo.base_url, "https://assets.example.org/");
        assert_eq!(config.general.seed, Some(42));
        assert_eq!(
            config.grouping.depth_conflict.as_str(),
            "default_subgroup"
        );
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".quizgen")?;
        jail.create_file(
            ".quizgen/config.toml",
            r#"
[media]
webp_quality = 50
"#,
        )?;
        jail.set_env("QUIZGEN_MEDIA__WEBP_QUALITY", "95");

        let config = QuizConfig::load_from(Path::new(".")).expect("config loads");
        assert_eq!(config.media.webp_quality, 95);
        Ok(())
    });
}

#[test]
fn dotenv_file_in_project_dir_is_loaded() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "QUIZGEN_GENERAL__LANGUAGE=it\n")?;

        let config = QuizConfig::load_with_dotenv(Some(Path::new("."))).expect("config loads");
        assert_eq!(config.general.language, "it");
        Ok(())
    });
}
