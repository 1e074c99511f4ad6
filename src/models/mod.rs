//! Data models for indexed-color animations (frames, palettes, crop regions)

mod animation;
mod frame;
mod palette;
mod region;

// Re-export all public types
pub use animation::{Animation, DisposalMethod, LoopCount};
pub use frame::Frame;
pub use palette::{color_to_hex, Palette, MAX_PALETTE_LEN};
pub use region::CropRect;

use thiserror::Error;

/// A model value was built in violation of its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Palette must hold between 1 and 256 colors
    #[error("Palette must have 1 to {} colors, got {0}", MAX_PALETTE_LEN)]
    PaletteSize(usize),
    /// Packed color table length is not a multiple of 3
    #[error("Color table of {0} bytes is not a whole number of RGB triples")]
    PaletteBytes(usize),
    /// Pixel buffer does not match the frame dimensions
    #[error("Pixel buffer has {actual} entries, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    /// A pixel refers past the end of the palette
    #[error("Pixel ({x}, {y}) uses index {index} but the palette has {palette_len} colors")]
    IndexOutOfRange { index: u8, x: u32, y: u32, palette_len: usize },
    /// Frame, delay and disposal sequences disagree in length
    #[error("Animation has {frames} frames but {delays} delays and {disposal_methods} disposal methods")]
    SequenceLength { frames: usize, delays: usize, disposal_methods: usize },
}
