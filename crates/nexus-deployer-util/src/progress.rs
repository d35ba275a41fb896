//! Terminal feedback for a deployment run.
//!
//! All output goes to stderr so stdout stays free for listings such as the
//! dry-run plan.

use std::io::Write;
use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Status printer that honours the run's `quiet` setting.
///
/// Action and info lines are suppressed when quiet; error lines never are.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// `   Uploading http://repo/maven/com/acme/widget/maven-metadata.xml`
    /// with the label in bold green.
    pub fn action(&self, label: &str, message: &str) {
        if !self.quiet {
            write_line(Style::new().green().bold(), label, message);
        }
    }

    /// Bold cyan label, for results rather than actions.
    pub fn info(&self, label: &str, message: &str) {
        if !self.quiet {
            write_line(Style::new().cyan().bold(), label, message);
        }
    }

    /// Bold red label. Printed even when quiet.
    pub fn error(&self, label: &str, message: &str) {
        write_line(Style::new().red().bold(), label, message);
    }

    /// Ticking spinner for work of unknown length, hidden when quiet.
    /// Finish it with [`ProgressBar::finish_and_clear`].
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }
}

fn write_line(style: Style, label: &str, message: &str) {
    let _ = writeln!(std::io::stderr(), "{:>12} {message}", style.apply_to(label));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_reporter_hides_spinner() {
        assert!(Reporter::new(true).spinner("Hashing").is_hidden());
    }
}
