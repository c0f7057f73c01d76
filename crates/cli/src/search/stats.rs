//! Counters and timestamps for one search run.

use chrono::{DateTime, Local, TimeDelta};

/// What a run wrote, and when it ran.
///
/// `byte_count` and `line_count` describe the chunks as they arrived from
/// the server, before any rewriting by the output writer.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStatistics {
    pub byte_count: u64,
    pub line_count: u64,
    pub chunk_count: u64,
    /// Export attempts that came back with a non-success status.
    pub export_retries: u64,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

impl RunStatistics {
    /// Start a run now with zeroed counters.
    pub fn start() -> Self {
        let now = Local::now();
        Self {
            byte_count: 0,
            line_count: 0,
            chunk_count: 0,
            export_retries: 0,
            started_at: now,
            finished_at: now,
        }
    }

    /// Account for one received chunk.
    pub fn record_chunk(&mut self, chunk: &[u8]) {
        self.chunk_count += 1;
        self.byte_count += chunk.len() as u64;
        self.line_count += chunk.iter().filter(|&&b| b == b'\n').count() as u64;
    }

    /// Stamp the end of the run.
    pub fn finish(&mut self) {
        self.finished_at = Local::now();
    }

    pub fn elapsed(&self) -> TimeDelta {
        self.finished_at - self.started_at
    }

    /// `search complete; N bytes and M physical lines output to PATH`
    pub fn summary_line(&self, destination: &str) -> String {
        format!(
            "search complete; {} bytes and {} physical lines output to {}",
            self.byte_count, self.line_count, destination
        )
    }

    /// `started: ...; ended: ...; runtime: H:MM:SS.ffffff`
    pub fn timing_line(&self) -> String {
        format!(
            "started: {}; ended: {}; runtime: {}",
            self.started_at.format("%Y-%m-%d %H:%M:%S%.6f"),
            self.finished_at.format("%Y-%m-%d %H:%M:%S%.6f"),
            format_runtime(self.elapsed())
        )
    }
}

/// Render a duration as `H:MM:SS.ffffff`.
pub fn format_runtime(delta: TimeDelta) -> String {
    let micros = delta.num_microseconds().unwrap_or(i64::MAX).max(0);
    let secs = micros / 1_000_000;
    format!(
        "{}:{:02}:{:02}.{:06}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        micros % 1_000_000
    )
}
