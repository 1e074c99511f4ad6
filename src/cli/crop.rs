//! CLI dispatch for the `gifcrop crop` command.

use std::path::Path;
use std::process::ExitCode;

use crate::animation::CropOptions;
use crate::config::{load_config, merge_cli_overrides, CliOverrides};
use crate::crop::LookupPolicy;
use crate::error::{CropError, Error, RegionFault};
use crate::gif::CodecError;
use crate::models::CropRect;
use crate::pipeline::crop_gif_file;
use crate::telemetry::{ErrorCollector, ErrorEntry};

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the crop command.
pub fn run_crop(
    input: &Path,
    rect: CropRect,
    output: Option<&Path>,
    nearest: bool,
    jobs: Option<usize>,
    config_path: Option<&Path>,
    collect_errors: bool,
) -> ExitCode {
    let mut config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let overrides = CliOverrides {
        output: output.map(Path::to_path_buf),
        lookup: nearest.then_some(LookupPolicy::Nearest),
        jobs,
        collect_errors: collect_errors.then_some(true),
    };
    merge_cli_overrides(&mut config, &overrides);

    let errors = config.validate();
    if !errors.is_empty() {
        for e in errors {
            eprintln!("Error: {}", e);
        }
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let options = CropOptions::new().with_lookup(config.crop.lookup).with_jobs(config.crop.jobs);
    let output = config.output.path.as_path();

    match crop_gif_file(input, output, rect, &options) {
        Ok(()) => {
            println!("GIF processed and saved to {}", output.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error processing GIF: {}", e);
            let hint = suggestion(&e);
            if let Some(ref hint) = hint {
                eprintln!("Hint: {}", hint);
            }

            let mut entry =
                ErrorEntry::from_error("crop", &e).with_file(input.display().to_string());
            if let Some(hint) = hint {
                entry = entry.with_suggestion(hint);
            }
            let collector = ErrorCollector::from_config(&config.telemetry);
            if let Err(log_err) = collector.log(&entry) {
                eprintln!(
                    "Warning: could not write error log '{}': {}",
                    config.telemetry.error_log.display(),
                    log_err
                );
            }

            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// A short fix for failures the user can act on.
fn suggestion(error: &Error) -> Option<String> {
    match error {
        Error::Crop(CropError::InvalidRegion {
            fault: RegionFault::OutOfBounds { width, height },
            ..
        }) => Some(format!(
            "the source is {}x{}; keep x + width <= {} and y + height <= {}",
            width, height, width, height
        )),
        Error::Crop(CropError::PaletteLookupFailure { .. }) => {
            Some("pass --nearest to map missing colors to the closest palette entry".to_string())
        }
        Error::Codec(CodecError::PartialFrame { frame }) => Some(format!(
            "frame {} only covers part of the canvas and has no transparent color to fill the \
             rest; re-export the GIF with full frames (no frame optimization) and try again",
            frame
        )),
        _ => None,
    }
}
