use quiz_config::QuizConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GenerateArgs;
use crate::commands::shared::{MediaJobRequest, make_rng, run_media_job};
use crate::output::output;

/// Handle `quizgen generate`.
pub fn handle(args: &GenerateArgs, config: &QuizConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let request = MediaJobRequest {
        kind: args.kind.into(),
        language: args.language.clone(),
        theme: args.theme.clone(),
        subtheme: args.subtheme.clone(),
        set_name: args.name.clone(),
        sentence: args.sentence.clone(),
        grouped: args.grouped,
        descriptors: args.descriptors.clone(),
    };
    let mut rng = make_rng(config);
    let report = run_media_job(&request, config, &mut rng)?;
    output(&report, flags.format)
}
