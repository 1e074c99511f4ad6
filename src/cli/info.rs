//! CLI dispatch for the `gifcrop info` command.
//!
//! Prints the canvas, looping and per-frame details of a GIF, which is
//! what a user needs to pick a crop rectangle.

use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use crate::gif::read_gif;
use crate::models::{Animation, DisposalMethod, LoopCount};

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Summary of one frame
#[derive(Debug, Serialize)]
struct FrameSummary {
    index: usize,
    width: u32,
    height: u32,
    delay_cs: u16,
    disposal: DisposalMethod,
    palette_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    transparent: Option<u8>,
}

/// Summary of a whole animation
#[derive(Debug, Serialize)]
struct AnimationSummary {
    width: u32,
    height: u32,
    frame_count: usize,
    loop_count: LoopCount,
    background_index: u8,
    total_delay_cs: u64,
    frames: Vec<FrameSummary>,
}

impl AnimationSummary {
    fn from_animation(anim: &Animation) -> Self {
        let timing = anim.delays().iter().zip(anim.disposal_methods());
        let frames = anim
            .frames()
            .iter()
            .zip(timing)
            .enumerate()
            .map(|(index, (frame, (&delay_cs, &disposal)))| FrameSummary {
                index,
                width: frame.width(),
                height: frame.height(),
                delay_cs,
                disposal,
                palette_size: frame.palette().len(),
                transparent: frame.transparent(),
            })
            .collect();

        Self {
            width: anim.width(),
            height: anim.height(),
            frame_count: anim.len(),
            loop_count: anim.loop_count(),
            background_index: anim.background_index(),
            total_delay_cs: anim.total_delay(),
            frames,
        }
    }
}

/// Execute the info command.
pub fn run_info(input: &Path, json: bool) -> ExitCode {
    let anim = match read_gif(input) {
        Ok(anim) => anim,
        Err(e) => {
            eprintln!("Error: Cannot read '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let summary = AnimationSummary::from_animation(&anim);
    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        print_summary_text(input, &summary);
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn print_summary_text(input: &Path, summary: &AnimationSummary) {
    println!(
        "{}: {}x{}, {} frames, loop {}, background {}, {:.2}s per pass",
        input.display(),
        summary.width,
        summary.height,
        summary.frame_count,
        summary.loop_count,
        summary.background_index,
        summary.total_delay_cs as f64 / 100.0
    );
    for frame in &summary.frames {
        let transparent =
            frame.transparent.map(|t| format!(", transparent {}", t)).unwrap_or_default();
        println!(
            "  frame {}: {}x{}, delay {}cs, dispose {}, {} colors{}",
            frame.index,
            frame.width,
            frame.height,
            frame.delay_cs,
            frame.disposal,
            frame.palette_size,
            transparent
        );
    }
}
