//! Configuration schema types for `gifcrop.toml`
//!
//! Defines the structure and validation rules for gifcrop configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::crop::LookupPolicy;

/// Upper bound for `crop.jobs`.
pub const MAX_JOBS: usize = 512;

/// Cropping behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropConfig {
    /// Fallback for colors missing from a frame palette
    #[serde(default)]
    pub lookup: LookupPolicy,
    /// Worker threads (1 = sequential, 0 = one per core)
    #[serde(default = "default_jobs")]
    pub jobs: usize,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self { lookup: LookupPolicy::default(), jobs: default_jobs() }
    }
}

fn default_jobs() -> usize {
    1
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Output file used when `-o` is not given
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { path: default_output_path() }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("cropped.gif")
}

/// Local error telemetry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelemetryConfig {
    /// Append failures to `error_log` as JSONL
    #[serde(default)]
    pub collect_errors: bool,
    /// Path of the JSONL error log
    #[serde(default = "default_error_log")]
    pub error_log: PathBuf,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { collect_errors: false, error_log: default_error_log() }
    }
}

fn default_error_log() -> PathBuf {
    PathBuf::from(".gifcrop-errors.jsonl")
}

/// Root of `gifcrop.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GifcropConfig {
    /// Cropping behavior
    #[serde(default)]
    pub crop: CropConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
    /// Error telemetry
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "crop.jobs")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gifcrop.toml: '{}' {}", self.field, self.message)
    }
}

impl GifcropConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.crop.jobs > MAX_JOBS {
            errors.push(ConfigValidationError {
                field: "crop.jobs".to_string(),
                message: format!("must be at most {}", MAX_JOBS),
            });
        }

        if self.output.path.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "output.path".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        if self.telemetry.collect_errors && self.telemetry.error_log.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "telemetry.error_log".to_string(),
                message: "must be a non-empty path when collect_errors is enabled".to_string(),
            });
        }

        errors
    }
}
