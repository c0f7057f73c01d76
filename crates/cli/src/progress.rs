//! Progress indicators for a search run.
//!
//! Responsibilities:
//! - Show job progress (percent done, scanned/matched/result counts and run time) while polling.
//! - Show a byte-count spinner while a result or export body streams in.
//! - Ensure ALL progress output is written to STDERR, never stdout.
//!
//! Non-responsibilities:
//! - This module does not decide *when* progress should be shown; callers do.
//! - Logging the same numbers (the executors log them at debug level).
//!
//! Invariants:
//! - A disabled indicator is a no-op.
//! - indicatif hides its stderr target when stderr is not a terminal.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use splunk_search_client::SearchJobStatus;
use std::time::Duration;

/// A percent-based progress bar for a search job (0-100%).
pub(crate) struct SearchProgress {
    pb: Option<ProgressBar>,
}

impl SearchProgress {
    /// Create a new search progress indicator.
    ///
    /// `enabled` should be `!quiet`.
    pub(crate) fn new(enabled: bool) -> Self {
        if !enabled {
            return Self { pb: None };
        }

        let pb = ProgressBar::new(100);
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30.cyan/blue}] {msg}")
                .expect("template is a compile-time constant with valid syntax")
                .progress_chars("=>-"),
        );
        pb.set_message("waiting for job");
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb: Some(pb) }
    }

    /// Update from a freshly fetched job status.
    pub(crate) fn update(&self, status: &SearchJobStatus) {
        let Some(pb) = &self.pb else {
            return;
        };

        pb.set_position(status.progress_percent().round() as u64);
        pb.set_message(status.progress_line());
    }

    /// Finish the bar, leaving the last status line visible.
    pub(crate) fn finish(&self) {
        let Some(pb) = &self.pb else {
            return;
        };

        pb.set_position(100);
        pb.finish();
    }
}

impl Drop for SearchProgress {
    fn drop(&mut self) {
        // Clear an unfinished bar so it does not interleave with error output.
        if let Some(pb) = &self.pb
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}

/// An indefinite spinner that reports how many bytes have been written.
pub(crate) struct Spinner {
    label: String,
    pb: Option<ProgressBar>,
}

impl Spinner {
    /// Create a new spinner.
    ///
    /// `enabled` should be `!quiet`.
    pub(crate) fn new(enabled: bool, label: impl Into<String>) -> Self {
        let label = label.into();

        if !enabled {
            return Self { label, pb: None };
        }

        let pb = ProgressBar::new_spinner();
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .expect("template is a compile-time constant with valid syntax"),
        );
        pb.set_message(label.clone());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            label,
            pb: Some(pb),
        }
    }

    /// Show the running byte total.
    pub(crate) fn set_bytes(&self, bytes: u64) {
        if let Some(pb) = &self.pb {
            pb.set_message(format!("{} ({} bytes)", self.label, bytes));
        }
    }

    /// Finish the spinner with a stable message (on STDERR).
    pub(crate) fn finish(&self) {
        let Some(pb) = &self.pb else {
            return;
        };

        pb.finish_with_message(format!("{} done", self.label));
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(pb) = &self.pb
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}
