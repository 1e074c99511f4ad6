//! Frame cropping with palette re-indexing
//!
//! A frame is cropped through a full-color round trip: the requested
//! rectangle is materialized as true colors through the frame's palette,
//! then every color is mapped back to an index of that same palette. The
//! palette itself is never rebuilt; the cropped frame shares it.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{CropError, RegionFault};
use crate::models::{CropRect, Frame, Palette};

/// What to do when a color has no exact entry in the palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupPolicy {
    /// Fail with `PaletteLookupFailure`
    #[default]
    Exact,
    /// Use the closest palette entry (squared RGBA distance, lowest index on ties)
    Nearest,
}

/// Color to index lookup for one palette, built once per frame.
pub struct PaletteIndex<'a> {
    palette: &'a Palette,
    exact: HashMap<Rgba<u8>, u8>,
}

impl<'a> PaletteIndex<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        let mut exact = HashMap::with_capacity(palette.len());
        // Duplicate colors resolve to their first index
        for (i, color) in palette.colors().iter().enumerate() {
            exact.entry(*color).or_insert(i as u8);
        }
        Self { palette, exact }
    }

    /// Index of `color`, exact match only.
    pub fn exact(&self, color: &Rgba<u8>) -> Option<u8> {
        self.exact.get(color).copied()
    }

    /// Index of the palette entry closest to `color`.
    pub fn nearest(&self, color: &Rgba<u8>) -> u8 {
        if let Some(index) = self.exact(color) {
            return index;
        }
        self.palette
            .colors()
            .iter()
            .enumerate()
            .min_by_key(|(_, candidate)| distance_sq(color, candidate))
            .map(|(i, _)| i as u8)
            .unwrap_or(0)
    }

    /// Resolve `color` according to `policy`.
    pub fn lookup(&self, color: &Rgba<u8>, policy: LookupPolicy) -> Option<u8> {
        match policy {
            LookupPolicy::Exact => self.exact(color),
            LookupPolicy::Nearest => Some(self.nearest(color)),
        }
    }
}

fn distance_sq(a: &Rgba<u8>, b: &Rgba<u8>) -> u32 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(&p, &q)| {
            let d = p as i32 - q as i32;
            (d * d) as u32
        })
        .sum()
}

/// Check that `rect` is non-empty and lies inside a `width` x `height` raster.
pub fn check_region(rect: CropRect, width: u32, height: u32) -> Result<(), CropError> {
    let fault = if rect.is_empty() {
        RegionFault::Empty
    } else if !rect.fits_within(width, height) {
        RegionFault::OutOfBounds { width, height }
    } else {
        return Ok(());
    };
    Err(CropError::InvalidRegion { rect, fault, frame: None })
}

/// Materialize the pixels of `rect` as true colors.
///
/// The caller must have checked that `rect` fits the frame.
pub fn materialize(frame: &Frame, rect: CropRect) -> RgbaImage {
    RgbaImage::from_fn(rect.width, rect.height, |dx, dy| frame.color_at(rect.x + dx, rect.y + dy))
}

/// Map every color of `colors` back to an index of `palette`.
///
/// `origin` is added to reported pixel coordinates so failures name the
/// source pixel.
pub fn remap_to_palette(
    colors: &RgbaImage,
    palette: &Palette,
    policy: LookupPolicy,
    origin: (u32, u32),
) -> Result<Vec<u8>, CropError> {
    let index = PaletteIndex::new(palette);
    colors
        .enumerate_pixels()
        .map(|(x, y, color)| {
            index.lookup(color, policy).ok_or(CropError::PaletteLookupFailure {
                x: origin.0 + x,
                y: origin.1 + y,
                color: *color,
                frame: None,
            })
        })
        .collect()
}

/// Crop `frame` to `rect`, requiring every color to be found exactly.
pub fn crop(frame: &Frame, rect: CropRect) -> Result<Frame, CropError> {
    crop_frame(frame, rect, LookupPolicy::Exact)
}

/// Crop `frame` to `rect`.
///
/// The result is exactly `rect.width` x `rect.height`, shares the source
/// palette and keeps the source transparent index. Rectangles that are
/// empty or reach outside the frame are rejected, never clamped.
pub fn crop_frame(frame: &Frame, rect: CropRect, policy: LookupPolicy) -> Result<Frame, CropError> {
    check_region(rect, frame.width(), frame.height())?;
    let colors = materialize(frame, rect);
    let pixels = remap_to_palette(&colors, frame.palette(), policy, (rect.x, rect.y))?;
    Ok(frame.with_pixels(rect.width, rect.height, pixels))
}
