use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `quizgen` binary.
#[derive(Debug, Parser)]
#[command(
    name = "quizgen",
    version,
    about = "quizgen - multiple-choice question sets from asset folders"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Seed for distractor draws and question ids (overrides general.seed)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Project directory holding .quizgen/config.toml (defaults to the current directory)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            seed: self.seed,
            config_dir: self.config_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use super::root_commands::MediaKind;
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "quizgen",
            "--format",
            "table",
            "--seed",
            "42",
            "--verbose",
            "schema",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.seed, Some(42));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Schema(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["quizgen", "convert", "pictures", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Convert(_)));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["quizgen", "--format", "xml", "schema"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn generate_parses_job_identity() {
        let cli = Cli::try_parse_from([
            "quizgen",
            "generate",
            "--type",
            "picture",
            "--theme",
            "pokemon",
            "--subtheme",
            "gen1",
            "--name",
            "gen1",
            "--sentence",
            "Quel est ce pokemon ?",
            "--grouped",
            "--descriptors",
            "descriptors/pokemon.json",
        ])
        .expect("cli should parse");

        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.kind, MediaKind::Picture);
        assert_eq!(args.theme, "pokemon");
        assert_eq!(args.subtheme, "gen1");
        assert!(args.grouped);
        assert_eq!(args.descriptors.as_deref(), Some(Path::new("descriptors/pokemon.json")));
        assert!(args.language.is_none());
    }

    #[test]
    fn generate_rejects_text_type() {
        let parsed = Cli::try_parse_from([
            "quizgen", "generate", "--type", "text", "--theme", "t", "--name", "n", "--sentence", "s",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn text_requires_id_and_template() {
        let parsed = Cli::try_parse_from(["quizgen", "text", "--theme", "capitals", "--sentence", "s"]);
        assert!(parsed.is_err());

        let cli = Cli::try_parse_from([
            "quizgen",
            "text",
            "--theme",
            "capitals",
            "--sentence",
            "Capitale ?",
            "--id",
            "country",
            "--template",
            "Quelle est la capitale de {{country}} ?",
        ])
        .expect("cli should parse");
        let Commands::Text(args) = cli.command else {
            panic!("expected text");
        };
        assert_eq!(args.id, "country");
        assert!(args.rows.is_none());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["quizgen", "--config-dir", "/tmp/demo", "schema"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.config_dir.as_deref(), Some(Path::new("/tmp/demo")));
        assert_eq!(flags.seed, None);
    }
}
