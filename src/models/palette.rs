//! Palette of an indexed-color frame.

use image::Rgba;
use std::ops::Index;

use super::ModelError;

/// Largest palette an indexed frame can address with `u8` pixels.
pub const MAX_PALETTE_LEN: usize = 256;

/// Ordered list of colors an indexed frame draws from.
///
/// Index `i` of the palette is the color of every pixel storing `i`. The
/// transparent entry of a frame (if any) carries alpha 0; every other entry
/// is opaque. Palettes are immutable once built and are shared between a
/// frame and its crops.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Palette {
    colors: Vec<Rgba<u8>>,
}

impl Palette {
    /// Build a palette from explicit colors (1 to 256 entries).
    pub fn new(colors: Vec<Rgba<u8>>) -> Result<Self, ModelError> {
        if colors.is_empty() || colors.len() > MAX_PALETTE_LEN {
            return Err(ModelError::PaletteSize(colors.len()));
        }
        Ok(Self { colors })
    }

    /// Build a palette from packed `RGBRGB...` bytes as stored in a GIF
    /// color table.
    ///
    /// The entry at `transparent` (when in range) gets alpha 0.
    pub fn from_rgb(rgb: &[u8], transparent: Option<u8>) -> Result<Self, ModelError> {
        if rgb.len() % 3 != 0 {
            return Err(ModelError::PaletteBytes(rgb.len()));
        }
        let colors = rgb
            .chunks_exact(3)
            .enumerate()
            .map(|(i, c)| {
                let is_transparent = i < MAX_PALETTE_LEN && transparent == Some(i as u8);
                let alpha = if is_transparent { 0 } else { 255 };
                Rgba([c[0], c[1], c[2], alpha])
            })
            .collect();
        Self::new(colors)
    }

    /// Packed `RGBRGB...` bytes, alpha dropped.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| [c[0], c[1], c[2]]).collect()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false: construction rejects empty palettes.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgba<u8>] {
        &self.colors
    }
}

impl Index<u8> for Palette {
    type Output = Rgba<u8>;

    fn index(&self, index: u8) -> &Self::Output {
        &self.colors[index as usize]
    }
}

/// Format a color as `#RRGGBB`, or `#RRGGBBAA` when not opaque.
pub fn color_to_hex(color: &Rgba<u8>) -> String {
    if color[3] == 255 {
        format!("#{:02X}{:02X}{:02X}", color[0], color[1], color[2])
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", color[0], color[1], color[2], color[3])
    }
}
