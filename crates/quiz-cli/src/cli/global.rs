use std::path::PathBuf;

use clap::ValueEnum;

/// Shared output mode for run reports.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Raw,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub seed: Option<u64>,
    pub config_dir: Option<PathBuf>,
}
