//! Progress display for scrape runs
//!
//! Shows one bar per target group and a spinner for the summary step on stderr.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for the scrape workflow
pub struct Progress {
    /// Whether progress display is enabled (disabled in quiet and JSON modes)
    enabled: bool,
    /// Current bar or spinner
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Create a new progress reporter
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Create a disabled progress reporter
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Start a bar over the targets of one group
    pub fn start_group(&mut self, label: &str, targets: usize) {
        self.clear();
        if !self.enabled {
            return;
        }

        let bar = ProgressBar::new(targets as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{prefix}] {msg} [{bar:30.cyan/blue}] {pos}/{len}")
                .expect("Invalid template")
                .progress_chars("█▓▒░"),
        );
        bar.set_prefix(label.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// Show which target is being scraped
    pub fn target_started(&self, name: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(name.to_string());
        }
    }

    /// Count a finished target
    pub fn target_finished(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Show a spinner for an indeterminate step
    pub fn spinner(&mut self, message: &str) {
        self.clear();
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid template"),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(spinner);
    }

    /// Remove the current bar or spinner from the terminal
    pub fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_disabled() {
        let mut progress = Progress::disabled();
        progress.start_group("8.1", 10);
        progress.target_started("SIP Server");
        progress.target_finished();
        progress.spinner("Rebuilding summary...");
        progress.clear();
        assert!(progress.bar.is_none());
    }

    #[test]
    fn test_progress_enabled() {
        let mut progress = Progress::new(true);
        progress.start_group("8.5+", 2);
        progress.target_started("GAX");
        progress.target_finished();
        assert_eq!(progress.bar.as_ref().map(|b| b.position()), Some(1));
        progress.spinner("Rebuilding summary...");
        progress.clear();
        assert!(progress.bar.is_none());
    }
}
