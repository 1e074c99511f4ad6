//! gifcrop - Library for cropping animated GIFs
//!
//! This library provides functionality to:
//! - Decode an animated GIF into indexed frames with their own palettes
//! - Crop every frame to a rectangle, re-indexing into the original palette
//! - Re-encode the result with the original timing, disposal and looping

pub mod animation;
pub mod cli;
pub mod config;
pub mod crop;
pub mod error;
pub mod gif;
pub mod models;
pub mod pipeline;
pub mod telemetry;

pub use crate::animation::{crop_animation, crop_animation_with, CropOptions, Parallelism};
pub use crate::crop::{crop, crop_frame, LookupPolicy};
pub use crate::error::{CropError, Error, RegionFault};
pub use crate::gif::{decode_gif, encode_gif, read_gif, write_gif, CodecError};
pub use crate::models::{Animation, CropRect, DisposalMethod, Frame, LoopCount, ModelError, Palette};
pub use crate::pipeline::{crop_gif, crop_gif_file};
