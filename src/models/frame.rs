//! Indexed-color frame.

use image::Rgba;
use std::sync::Arc;

use super::{ModelError, Palette};

/// A `width` x `height` raster of palette indices.
///
/// Pixels are stored row-major. Every index is guaranteed to address an
/// entry of the frame's own palette.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    palette: Arc<Palette>,
    transparent: Option<u8>,
}

impl Frame {
    /// Build a frame, checking the buffer size and every pixel index.
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        palette: Arc<Palette>,
        transparent: Option<u8>,
    ) -> Result<Self, ModelError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(ModelError::BufferSize { expected, actual: pixels.len() });
        }
        if let Some(pos) = pixels.iter().position(|&i| i as usize >= palette.len()) {
            return Err(ModelError::IndexOutOfRange {
                index: pixels[pos],
                x: (pos % width as usize) as u32,
                y: (pos / width as usize) as u32,
                palette_len: palette.len(),
            });
        }
        Ok(Self { width, height, pixels, palette, transparent })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major palette indices.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    /// Palette index drawn as transparent, if the frame has one.
    pub fn transparent(&self) -> Option<u8> {
        self.transparent
    }

    /// A new raster sharing this frame's palette and transparent index.
    ///
    /// Indices are trusted to be in range; the cropper only produces
    /// indices it found in the palette.
    pub(crate) fn with_pixels(&self, width: u32, height: u32, pixels: Vec<u8>) -> Frame {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        debug_assert!(pixels.iter().all(|&i| (i as usize) < self.palette.len()));
        Frame {
            width,
            height,
            pixels,
            palette: Arc::clone(&self.palette),
            transparent: self.transparent,
        }
    }

    /// Palette index at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the frame.
    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) outside frame", x, y);
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// True color at `(x, y)`, resolved through the palette.
    pub fn color_at(&self, x: u32, y: u32) -> Rgba<u8> {
        self.palette[self.index_at(x, y)]
    }
}
