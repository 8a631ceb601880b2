use quiz_config::QuizConfig;
use quiz_media::{CwebpNormalizer, convert_tree};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ConvertArgs;
use crate::output::output;
use crate::progress::Progress;

/// Handle `quizgen convert`.
///
/// Always converts, whatever `media.normalize` says; the report is printed
/// before a partial failure is turned into an error.
pub fn handle(args: &ConvertArgs, config: &QuizConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !args.dir.is_dir() {
        anyhow::bail!("cannot convert '{}': not a directory", args.dir.display());
    }

    let normalizer = CwebpNormalizer::new(config.media.cwebp_bin.clone(), config.media.webp_quality);
    let spinner = Progress::spinner(&format!("converting pictures in {}", args.dir.display()));
    let mut attempted = 0usize;
    let report = convert_tree(&args.dir, &normalizer, &mut |_| {
        attempted += 1;
        spinner.inc(1);
    });

    if report.is_clean() {
        spinner.finish_ok(&format!("{} converted", report.converted.len()));
    } else {
        spinner.finish_err(&format!("{} failed", report.failed.len()));
    }
    tracing::info!(
        attempted,
        converted = report.converted.len(),
        skipped = report.skipped,
        failed = report.failed.len(),
        "conversion finished"
    );

    output(&report, flags.format)?;
    if !report.is_clean() {
        anyhow::bail!(
            "{} of {attempted} pictures failed to convert",
            report.failed.len()
        );
    }
    Ok(())
}
