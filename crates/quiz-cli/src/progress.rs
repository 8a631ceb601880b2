use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";
const BAR_TEMPLATE: &str = "{msg:>16} {wide_bar:.cyan/blue} {pos}/{len}";

/// Terminal feedback for one job or conversion. Hidden when `ui::prefs`
/// turns progress off, so callers never branch on it.
pub struct Progress(ProgressBar);

impl Progress {
    /// Indeterminate progress for walks of unknown size.
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        let bar = Self::visible(ProgressBar::new_spinner(), SPINNER_TEMPLATE, message);
        bar.enable_steady_tick(Duration::from_millis(100));
        Self(bar)
    }

    /// One tick per question of a job.
    #[must_use]
    pub fn bar(total: u64, message: &str) -> Self {
        Self(Self::visible(ProgressBar::new(total), BAR_TEMPLATE, message))
    }

    fn visible(bar: ProgressBar, template: &str, message: &str) -> ProgressBar {
        if !ui::prefs().progress {
            return ProgressBar::hidden();
        }
        if let Ok(style) = ProgressStyle::with_template(template) {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar
    }

    pub fn inc(&self, delta: u64) {
        self.0.inc(delta);
    }

    pub fn finish_ok(&self, message: &str) {
        self.0.finish_with_message(message.to_string());
    }

    pub fn finish_err(&self, message: &str) {
        self.0.abandon_with_message(message.to_string());
    }
}
