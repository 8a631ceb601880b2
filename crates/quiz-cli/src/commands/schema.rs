use quiz_core::entities::{Question, QuestionSet};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaDocument};
use crate::output::output;

/// Handle `quizgen schema`. Runs before config is loaded.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.document {
        SchemaDocument::QuestionSet => schemars::schema_for!(QuestionSet),
        SchemaDocument::Question => schemars::schema_for!(Question),
    };
    output(&schema, flags.format)
}
