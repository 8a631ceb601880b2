use quiz_config::QuizConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TextArgs;
use crate::commands::shared::{TextJobRequest, make_rng, run_text_job};
use crate::output::output;

/// Handle `quizgen text`.
pub fn handle(args: &TextArgs, config: &QuizConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let request = TextJobRequest {
        language: args.language.clone(),
        theme: args.theme.clone(),
        subtheme: args.subtheme.clone(),
        sentence: args.sentence.clone(),
        id_field: args.id.clone(),
        template: args.template.clone(),
        rows: args.rows.clone(),
    };
    let mut rng = make_rng(config);
    let report = run_text_job(&request, config, &mut rng)?;
    output(&report, flags.format)
}
