//! Local error telemetry for gifcrop
//!
//! Appends failed runs to a JSONL file for later analysis. Only the
//! command, input path and error details are recorded.

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::TelemetryConfig;

/// An error entry for the telemetry log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// ISO 8601 timestamp when the error occurred
    pub timestamp: String,
    /// The command that was running (e.g., "crop", "info")
    pub command: String,
    /// The file being processed (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Type of error (e.g., "invalid_region", "decode_error", "io_error")
    pub error_type: String,
    /// Index of the frame that failed (if known)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub frame: Option<usize>,
    /// Error context/message
    pub context: String,
    /// Suggested fix (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorEntry {
    /// Create a new error entry with the current timestamp
    pub fn new(
        command: impl Into<String>,
        error_type: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: utc_timestamp(SystemTime::now()),
            command: command.into(),
            file: None,
            error_type: error_type.into(),
            frame: None,
            context: context.into(),
            suggestion: None,
        }
    }

    /// Set the file that was being processed
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Set the index of the failing frame
    pub fn with_frame(mut self, frame: usize) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Build an entry from a pipeline error
    pub fn from_error(command: impl Into<String>, error: &crate::Error) -> Self {
        let entry = Self::new(command, error.kind(), error.to_string());
        match error.frame() {
            Some(frame) => entry.with_frame(frame),
            None => entry,
        }
    }

    /// Set a suggested fix
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Render `now` as an ISO 8601 UTC timestamp, second precision.
fn utc_timestamp(now: SystemTime) -> String {
    let secs = now.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
    let (year, month, day) = civil_from_days((secs / 86_400) as i64);
    let time = secs % 86_400;
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year,
        month,
        day,
        time / 3600,
        time % 3600 / 60,
        time % 60
    )
}

/// Gregorian `(year, month, day)` for a count of days since 1970-01-01.
///
/// Works on 400-year eras starting in March so leap days fall at the end
/// of each shifted year.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let shifted = days + 719_468;
    let era = shifted.div_euclid(146_097);
    let day_of_era = shifted.rem_euclid(146_097);
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_index = (5 * day_of_year + 2) / 153;
    let day = (day_of_year - (153 * month_index + 2) / 5 + 1) as u32;
    let month = (if month_index < 10 { month_index + 3 } else { month_index - 9 }) as u32;
    let year = era * 400 + year_of_era + i64::from(month <= 2);
    (year, month, day)
}

/// Appends [`ErrorEntry`] lines to a JSONL log, or drops them when disabled.
#[derive(Debug, Clone, Default)]
pub struct ErrorCollector {
    log_path: Option<PathBuf>,
}

impl ErrorCollector {
    /// A collector that records nothing.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// A collector appending to `path`.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self { log_path: Some(path.into()) }
    }

    /// Build the collector described by the `[telemetry]` config section.
    pub fn from_config(config: &TelemetryConfig) -> Self {
        if config.collect_errors {
            Self::to_file(&config.error_log)
        } else {
            Self::disabled()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.log_path.is_some()
    }

    /// Append `entry` as one JSON line.
    ///
    /// The line is written with a single call so concurrent runs sharing a
    /// log do not interleave within an entry.
    pub fn log(&self, entry: &ErrorEntry) -> io::Result<()> {
        let Some(path) = &self.log_path else {
            return Ok(());
        };
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');
        OpenOptions::new().create(true).append(true).open(path)?.write_all(&line)
    }
}
