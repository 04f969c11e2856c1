use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Stderr spinner for long waits. Disabled spinners ignore every call.
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    #[must_use]
    pub fn spinner(message: &str, enabled: bool) -> Self {
        if !enabled {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_spinner_ignores_updates() {
        let progress = Progress::spinner("aguardando", false);
        assert!(progress.bar.is_none());
        progress.set_message("processing");
        progress.finish_err("failed");
        progress.finish_clear();
    }

    #[test]
    fn enabled_spinner_finishes_cleanly() {
        let progress = Progress::spinner("aguardando", true);
        progress.set_message("Geração job-1: processing");
        progress.finish_clear();
        assert!(progress.bar.as_ref().is_some_and(ProgressBar::is_finished));
    }
}
