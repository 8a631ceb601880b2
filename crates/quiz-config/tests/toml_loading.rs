//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed file and env var manipulation.

use std::path::{Path, PathBuf};

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use quiz_config::QuizConfig;
use quiz_core::enums::DepthConflictPolicy;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[paths]
scripts_dir = "raw"
assets_dir = "public"
questions_dir = "out/questions"

[repo]
base_url = "https://cdn.example.org/quiz/"

[media]
cwebp_bin = "/opt/libwebp/bin/cwebp"
webp_quality = 65
normalize = false

[grouping]
delimiter = "-"
depth_conflict = "default_subgroup"
default_subgroup = "misc"

[general]
language = "en"
seed = 7
"#,
        )?;

        let config: QuizConfig = Figment::from(Serialized::defaults(QuizConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.paths.scripts_dir, PathBuf::from("raw"));
        assert_eq!(config.paths.assets_dir, PathBuf::from("public"));
        assert_eq!(config.paths.questions_dir, PathBuf::from("out/questions"));
        assert_eq!(config.repo.base_url, "https://cdn.example.org/quiz/");
        assert_eq!(config.media.cwebp_bin, "/opt/libwebp/bin/cwebp");
        assert_eq!(config.media.webp_quality, 65);
        assert!(!config.media.normalize);
        assert_eq!(config.grouping.delimiter, "-");
        assert_eq!(
            config.grouping.depth_conflict,
            DepthConflictPolicy::DefaultSubgroup
        );
        assert_eq!(config.grouping.default_subgroup, "misc");
        assert_eq!(config.general.language, "en");
        assert_eq!(config.general.seed, Some(7));
        Ok(())
    });
}

#[test]
fn partial_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[media]
webp_quality = 90
"#,
        )?;

        let config: QuizConfig = Figment::from(Serialized::defaults(QuizConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.media.webp_quality, 90);
        assert_eq!(config.media.cwebp_bin, "cwebp");
        assert_eq!(config.grouping.delimiter, "_");
        assert_eq!(config.general.language, "fr");
        Ok(())
    });
}

#[test]
fn project_config_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".quizgen")?;
        jail.create_file(
            ".quizgen/config.toml",
            r#"
[general]
language = "de"
"#,
        )?;

        let config = QuizConfig::load_from(Path::new(".")).expect("config loads");
        assert_eq!(config.general.language, "de");
        Ok(())
    });
}

#[test]
fn invalid_project_values_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_dir(".quizgen")?;
        jail.create_file(
            ".quizgen/config.toml",
            r#"
[grouping]
delimiter = ""
"#,
        )?;

        let err = QuizConfig::load_from(Path::new(".")).expect_err("empty delimiter rejected");
        assert!(err.to_string().contains("grouping.delimiter"));
        Ok(())
    });
}

#[test]
fn malformed_toml_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_dir(".quizgen")?;
        jail.create_file(".quizgen/config.toml", "[media\nwebp_quality = ")?;

        assert!(QuizConfig::load_from(Path::new(".")).is_err());
        Ok(())
    });
}
