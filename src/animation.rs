//! Animation assembly - crop every frame of an animation
//!
//! Frames are cropped independently with the same rectangle and collected
//! back in their original order. Timing, disposal, looping and background
//! metadata are carried over unchanged; only the canvas size changes.

use rayon::prelude::*;

use crate::crop::{check_region, crop_frame, LookupPolicy};
use crate::error::CropError;
use crate::models::{Animation, CropRect, Frame};

/// How frames are scheduled while cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    /// One frame after another on the calling thread
    #[default]
    Sequential,
    /// Fan frames out over a rayon pool of `jobs` threads (0 = one per core)
    Parallel { jobs: usize },
}

/// Options for [`crop_animation_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CropOptions {
    /// Fallback for colors missing from a palette
    pub lookup: LookupPolicy,
    /// Frame scheduling
    pub parallelism: Parallelism,
}

impl CropOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the palette lookup policy.
    pub fn with_lookup(mut self, lookup: LookupPolicy) -> Self {
        self.lookup = lookup;
        self
    }

    /// Set the number of worker threads.
    ///
    /// `1` crops sequentially, `0` uses one thread per core.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.parallelism =
            if jobs == 1 { Parallelism::Sequential } else { Parallelism::Parallel { jobs } };
        self
    }
}

/// Crop every frame of `anim` to `rect` with default options.
pub fn crop_animation(anim: &Animation, rect: CropRect) -> Result<Animation, CropError> {
    crop_animation_with(anim, rect, &CropOptions::default())
}

/// Crop every frame of `anim` to `rect`.
///
/// The rectangle is checked against the declared canvas before any frame is
/// touched, then against each frame. The first failing frame (in frame
/// order) aborts the whole operation and is named in the error.
pub fn crop_animation_with(
    anim: &Animation,
    rect: CropRect,
    options: &CropOptions,
) -> Result<Animation, CropError> {
    check_region(rect, anim.width(), anim.height())?;

    let frames = match options.parallelism {
        Parallelism::Sequential => crop_frames_sequential(anim.frames(), rect, options.lookup)?,
        Parallelism::Parallel { jobs } => {
            crop_frames_parallel(anim.frames(), rect, options.lookup, jobs)?
        }
    };

    let mut cropped = Animation::new(rect.width, rect.height)
        .with_loop_count(anim.loop_count())
        .with_background_index(anim.background_index());
    let timing = anim.delays().iter().zip(anim.disposal_methods());
    for (frame, (&delay, &disposal)) in frames.into_iter().zip(timing) {
        cropped.push_frame(frame, delay, disposal);
    }
    Ok(cropped)
}

fn crop_frames_sequential(
    frames: &[Frame],
    rect: CropRect,
    lookup: LookupPolicy,
) -> Result<Vec<Frame>, CropError> {
    frames
        .iter()
        .enumerate()
        .map(|(i, frame)| crop_frame(frame, rect, lookup).map_err(|e| e.in_frame(i)))
        .collect()
}

fn crop_frames_parallel(
    frames: &[Frame],
    rect: CropRect,
    lookup: LookupPolicy,
    jobs: usize,
) -> Result<Vec<Frame>, CropError> {
    let run = || -> Vec<Result<Frame, CropError>> {
        frames
            .par_iter()
            .enumerate()
            .map(|(i, frame)| crop_frame(frame, rect, lookup).map_err(|e| e.in_frame(i)))
            .collect()
    };

    let results = if jobs == 0 {
        run()
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .map_err(|e| CropError::WorkerPool(e.to_string()))?;
        pool.install(run)
    };

    // Report the lowest failing frame, same as the sequential path
    results.into_iter().collect()
}
