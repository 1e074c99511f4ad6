//! Error types for cropping animations

use image::Rgba;
use std::fmt;
use thiserror::Error;

use crate::gif::CodecError;
use crate::models::{color_to_hex, CropRect};

/// Why a crop rectangle cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionFault {
    /// Width or height is zero
    Empty,
    /// Rectangle extends past a `width` x `height` raster
    OutOfBounds { width: u32, height: u32 },
}

impl fmt::Display for RegionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionFault::Empty => f.write_str("width and height must be positive"),
            RegionFault::OutOfBounds { width, height } => {
                write!(f, "extends outside the {}x{} source", width, height)
            }
        }
    }
}

/// Failure while cropping a frame or an animation.
///
/// Frame-level errors carry the index of the failing frame once the
/// animation assembler has seen them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    /// Crop rectangle is empty or does not fit the source
    #[error("{}Invalid crop region {rect}: {fault}", frame_prefix(.frame))]
    InvalidRegion { rect: CropRect, fault: RegionFault, frame: Option<usize> },
    /// A sampled color has no entry in the frame palette
    #[error("{}Color {} at ({x}, {y}) has no matching palette entry", frame_prefix(.frame), color_to_hex(.color))]
    PaletteLookupFailure { x: u32, y: u32, color: Rgba<u8>, frame: Option<usize> },
    /// The worker pool for parallel cropping could not be started
    #[error("Failed to start crop workers: {0}")]
    WorkerPool(String),
}

fn frame_prefix(frame: &Option<usize>) -> String {
    frame.map(|i| format!("Frame {}: ", i)).unwrap_or_default()
}

impl CropError {
    /// Index of the frame that failed, when known.
    pub fn frame(&self) -> Option<usize> {
        match self {
            CropError::InvalidRegion { frame, .. }
            | CropError::PaletteLookupFailure { frame, .. } => *frame,
            CropError::WorkerPool(_) => None,
        }
    }

    /// Attach the index of the frame this error came from.
    pub(crate) fn in_frame(mut self, index: usize) -> Self {
        match &mut self {
            CropError::InvalidRegion { frame, .. }
            | CropError::PaletteLookupFailure { frame, .. } => *frame = Some(index),
            CropError::WorkerPool(_) => {}
        }
        self
    }

    /// Short machine-readable name, used for telemetry.
    pub fn kind(&self) -> &'static str {
        match self {
            CropError::InvalidRegion { .. } => "invalid_region",
            CropError::PaletteLookupFailure { .. } => "palette_lookup_failure",
            CropError::WorkerPool(_) => "worker_pool",
        }
    }
}

/// Any failure of the decode, crop, encode pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Crop(#[from] CropError),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl Error {
    /// Short machine-readable name, used for telemetry.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Crop(e) => e.kind(),
            Error::Codec(e) => e.kind(),
        }
    }

    /// Index of the frame that failed, when known.
    pub fn frame(&self) -> Option<usize> {
        match self {
            Error::Crop(e) => e.frame(),
            Error::Codec(_) => None,
        }
    }
}
