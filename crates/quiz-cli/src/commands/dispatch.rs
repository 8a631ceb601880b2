use quiz_config::QuizConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, config: &QuizConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Generate(args) => commands::generate::handle(&args, config, flags),
        Commands::Text(args) => commands::text::handle(&args, config, flags),
        Commands::Batch(args) => commands::batch::handle(&args, config, flags),
        Commands::Convert(args) => commands::convert::handle(&args, config, flags),
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
