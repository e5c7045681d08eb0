//! Stage spinner for interactive terminals.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK: Duration = Duration::from_millis(100);

/// Spinner that names the running stage. Cleared when dropped.
pub struct StageSpinner {
    bar: ProgressBar,
}

impl StageSpinner {
    /// Visible only when stderr is a terminal.
    pub fn new() -> Self {
        if io::stderr().is_terminal() {
            Self::visible()
        } else {
            Self::hidden()
        }
    }

    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    fn visible() -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}") {
            bar.set_style(style);
        }
        bar.enable_steady_tick(TICK);
        Self { bar }
    }

    pub fn stage(&self, message: &'static str) {
        self.bar.set_message(message);
    }

    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }
}

impl Default for StageSpinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StageSpinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_spinner_accepts_stages() {
        let spinner = StageSpinner::hidden();
        spinner.stage("reading");
        assert!(spinner.is_hidden());
    }
}
