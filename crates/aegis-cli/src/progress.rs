use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{GlobalFlags, OutputFormat};

/// Progress bar wrapper that stays silent when output is piped, quiet, or
/// JSON (which must stay machine-parseable).
pub struct Progress {
    bar: Option<ProgressBar>,
}

fn enabled(flags: &GlobalFlags) -> bool {
    std::io::stderr().is_terminal() && !flags.quiet && flags.format != OutputFormat::Json
}

impl Progress {
    #[must_use]
    pub fn bar(total: u64, message: &str, flags: &GlobalFlags) -> Self {
        if !enabled(flags) {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    pub fn inc(&self, delta: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(delta);
        }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
