//! Spinner shown while a search runs

use crate::io::configuration::{SPINNER_CHARS, SPINNER_TICK_MS};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg} [{elapsed_precise}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(SPINNER_CHARS)
});

/// Elapsed-time spinner for a running search
///
/// The spinner ticks on its own thread, so it keeps moving while the search blocks
/// the caller.
pub struct SearchProgress {
    spinner: ProgressBar,
}

impl SearchProgress {
    /// Start a spinner showing `message`
    pub fn start(message: impl Into<String>) -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(SPINNER_STYLE.clone());
        spinner.set_message(message.into());
        spinner.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        Self { spinner }
    }

    /// A spinner that draws nothing
    pub fn hidden() -> Self {
        Self {
            spinner: ProgressBar::hidden(),
        }
    }

    /// Stop ticking and remove the spinner from the terminal
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}
