//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod crop;
mod info;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::models::CropRect;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// gifcrop - Crop every frame of an animated GIF
#[derive(Parser)]
#[command(name = "gifcrop")]
#[command(about = "gifcrop - Crop every frame of an animated GIF, keeping palettes, timing and looping")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Crop all frames of a GIF to a rectangle
    Crop {
        /// Input GIF file
        input: PathBuf,

        /// Left edge of the crop region
        #[arg(short = 'x', long, default_value = "0")]
        x: u32,

        /// Top edge of the crop region
        #[arg(short = 'y', long, default_value = "0")]
        y: u32,

        /// Width of the crop region (at least 1)
        #[arg(long, default_value = "100", value_parser = clap::value_parser!(u32).range(1..))]
        width: u32,

        /// Height of the crop region (at least 1)
        #[arg(long, default_value = "100", value_parser = clap::value_parser!(u32).range(1..))]
        height: u32,

        /// Output file (default: output.path from gifcrop.toml, or cropped.gif)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Map colors missing from a frame palette to the closest entry instead of failing
        #[arg(long)]
        nearest: bool,

        /// Worker threads for cropping frames (1 = sequential, 0 = one per core)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Path to gifcrop.toml (default: searched upward from the current directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Append failures to the telemetry error log
        #[arg(long)]
        collect_errors: bool,
    },
    /// Show canvas, timing and palette details of a GIF
    Info {
        /// Input GIF file
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parse arguments and run the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crop {
            input,
            x,
            y,
            width,
            height,
            output,
            nearest,
            jobs,
            config,
            collect_errors,
        } => crop::run_crop(
            &input,
            CropRect::new(x, y, width, height),
            output.as_deref(),
            nearest,
            jobs,
            config.as_deref(),
            collect_errors,
        ),
        Commands::Info { input, json } => info::run_info(&input, json),
    }
}
