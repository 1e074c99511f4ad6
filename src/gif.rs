//! GIF decoding and encoding
//!
//! Adapts the `gif` crate to the indexed [`Animation`] model. Decoding keeps
//! pixels as palette indices; encoding writes every frame at the canvas
//! origin with the first frame's palette as the global color table.

use ::gif::{ColorOutput, DecodeOptions, Encoder, Repeat};
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{Animation, DisposalMethod, Frame, LoopCount, ModelError, Palette};

/// Byte offset of the background color index in a GIF89a header.
const BACKGROUND_OFFSET: usize = 11;

/// Error type for GIF decode/encode operations
#[derive(Debug, Error)]
pub enum CodecError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The `gif` crate rejected the input
    #[error("Error decoding GIF: {0}")]
    Decode(#[from] ::gif::DecodingError),
    /// The `gif` crate rejected the output
    #[error("Error encoding GIF: {0}")]
    Encode(#[from] ::gif::EncodingError),
    /// Decoded data violates a model invariant
    #[error("Invalid GIF data: {0}")]
    Model(#[from] ModelError),
    /// Frame has no local palette and the file has no global one
    #[error("Frame {frame} has no color table and the file has no global palette")]
    MissingPalette { frame: usize },
    /// Frame sub-rectangle reaches past the logical screen
    #[error("Frame {frame} ({width}x{height} at {left},{top}) lies outside the {screen_width}x{screen_height} canvas")]
    FrameOutOfBounds {
        frame: usize,
        left: u32,
        top: u32,
        width: u32,
        height: u32,
        screen_width: u32,
        screen_height: u32,
    },
    /// Frame covers part of the canvas and has nothing to fill the rest with
    #[error("Frame {frame} covers only part of the canvas and has no transparent color")]
    PartialFrame { frame: usize },
    /// Dimensions do not fit the 16-bit GIF fields
    #[error("{width}x{height} exceeds the GIF size limit of 65535x65535")]
    TooLarge { width: u32, height: u32 },
    /// Frame is bigger than the canvas it is drawn on
    #[error("Frame {frame} ({width}x{height}) is larger than the {canvas_width}x{canvas_height} canvas")]
    FrameLargerThanCanvas {
        frame: usize,
        width: u32,
        height: u32,
        canvas_width: u32,
        canvas_height: u32,
    },
}

impl CodecError {
    /// Short machine-readable name, used for telemetry.
    pub fn kind(&self) -> &'static str {
        match self {
            CodecError::Io(_) => "io_error",
            CodecError::Decode(_) => "decode_error",
            CodecError::Encode(_) => "encode_error",
            CodecError::Model(_) => "invalid_data",
            CodecError::MissingPalette { .. } => "missing_palette",
            CodecError::FrameOutOfBounds { .. } => "frame_out_of_bounds",
            CodecError::PartialFrame { .. } => "partial_frame",
            CodecError::TooLarge { .. } | CodecError::FrameLargerThanCanvas { .. } => "too_large",
        }
    }
}

fn disposal_from_gif(dispose: ::gif::DisposalMethod) -> DisposalMethod {
    match dispose {
        ::gif::DisposalMethod::Any => DisposalMethod::Any,
        ::gif::DisposalMethod::Keep => DisposalMethod::Keep,
        ::gif::DisposalMethod::Background => DisposalMethod::Background,
        ::gif::DisposalMethod::Previous => DisposalMethod::Previous,
    }
}

fn disposal_to_gif(dispose: DisposalMethod) -> ::gif::DisposalMethod {
    match dispose {
        DisposalMethod::Any => ::gif::DisposalMethod::Any,
        DisposalMethod::Keep => ::gif::DisposalMethod::Keep,
        DisposalMethod::Background => ::gif::DisposalMethod::Background,
        DisposalMethod::Previous => ::gif::DisposalMethod::Previous,
    }
}

fn loop_from_gif(repeat: Repeat) -> LoopCount {
    match repeat {
        Repeat::Infinite => LoopCount::Infinite,
        Repeat::Finite(n) => LoopCount::Finite(n),
    }
}

/// Decode a complete animated GIF into memory.
///
/// Frames that cover only part of the logical screen are placed on a
/// screen-sized raster filled with their transparent index, so every
/// decoded frame has the canvas dimensions.
pub fn decode_gif<R: Read>(reader: R) -> Result<Animation, CodecError> {
    let mut options = DecodeOptions::new();
    options.set_color_output(ColorOutput::Indexed);
    let mut decoder = options.read_info(reader)?;

    let screen = (decoder.width() as u32, decoder.height() as u32);
    let global_palette = decoder.global_palette().map(|p| p.to_vec());
    let background = decoder.bg_color().unwrap_or(0).min(u8::MAX as usize) as u8;

    let mut frames = Vec::new();
    let mut delays = Vec::new();
    let mut disposal_methods = Vec::new();
    while let Some(frame) = decoder.read_next_frame()? {
        let index = frames.len();
        let rgb = frame
            .palette
            .as_deref()
            .or(global_palette.as_deref())
            .ok_or(CodecError::MissingPalette { frame: index })?;
        let palette = Arc::new(Palette::from_rgb(rgb, frame.transparent)?);
        let pixels = flatten_frame(index, frame, screen)?;
        let decoded = Frame::new(screen.0, screen.1, pixels, palette, frame.transparent)?;
        frames.push(decoded);
        delays.push(frame.delay);
        disposal_methods.push(disposal_from_gif(frame.dispose));
    }

    let anim = Animation::new(screen.0, screen.1)
        .with_background_index(background)
        .with_loop_count(loop_from_gif(decoder.repeat()))
        .with_frames(frames, delays, disposal_methods)?;
    Ok(anim)
}

/// Place a frame's sub-rectangle on a full screen raster.
fn flatten_frame(
    index: usize,
    frame: &::gif::Frame<'_>,
    screen: (u32, u32),
) -> Result<Vec<u8>, CodecError> {
    let (left, top) = (frame.left as u32, frame.top as u32);
    let (width, height) = (frame.width as u32, frame.height as u32);

    if left + width > screen.0 || top + height > screen.1 {
        return Err(CodecError::FrameOutOfBounds {
            frame: index,
            left,
            top,
            width,
            height,
            screen_width: screen.0,
            screen_height: screen.1,
        });
    }
    let expected = width as usize * height as usize;
    if frame.buffer.len() != expected {
        return Err(ModelError::BufferSize { expected, actual: frame.buffer.len() }.into());
    }
    if (left, top, width, height) == (0, 0, screen.0, screen.1) {
        return Ok(frame.buffer.to_vec());
    }

    let fill = frame.transparent.ok_or(CodecError::PartialFrame { frame: index })?;
    let stride = screen.0 as usize;
    let mut pixels = vec![fill; stride * screen.1 as usize];
    if width > 0 {
        for (row, line) in frame.buffer.chunks_exact(width as usize).enumerate() {
            let start = (top as usize + row) * stride + left as usize;
            pixels[start..start + line.len()].copy_from_slice(line);
        }
    }
    Ok(pixels)
}

fn gif_dimensions(width: u32, height: u32) -> Result<(u16, u16), CodecError> {
    match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(CodecError::TooLarge { width, height }),
    }
}

/// Encode an animation into an in-memory GIF.
pub fn encode_to_vec(anim: &Animation) -> Result<Vec<u8>, CodecError> {
    let (width, height) = gif_dimensions(anim.width(), anim.height())?;
    let global_palette = anim.frames().first().map(|f| f.palette().clone());
    let global_rgb = global_palette.as_ref().map(|p| p.to_rgb()).unwrap_or_default();

    let mut bytes = Vec::new();
    let mut encoder = Encoder::new(&mut bytes, width, height, &global_rgb)?;
    // A finite count of 0 is expressed by leaving the extension out
    match anim.loop_count() {
        LoopCount::Finite(0) => {}
        LoopCount::Finite(n) => encoder.set_repeat(Repeat::Finite(n))?,
        LoopCount::Infinite => encoder.set_repeat(Repeat::Infinite)?,
    }

    let timing = anim.delays().iter().zip(anim.disposal_methods());
    for (index, (frame, (&delay, &disposal))) in anim.frames().iter().zip(timing).enumerate() {
        if frame.width() > anim.width() || frame.height() > anim.height() {
            return Err(CodecError::FrameLargerThanCanvas {
                frame: index,
                width: frame.width(),
                height: frame.height(),
                canvas_width: anim.width(),
                canvas_height: anim.height(),
            });
        }
        let (frame_width, frame_height) = gif_dimensions(frame.width(), frame.height())?;
        let uses_global = global_palette.as_ref().is_some_and(|g| **g == **frame.palette());

        let out = ::gif::Frame {
            width: frame_width,
            height: frame_height,
            delay,
            dispose: disposal_to_gif(disposal),
            transparent: frame.transparent(),
            palette: if uses_global { None } else { Some(frame.palette().to_rgb()) },
            buffer: Cow::Borrowed(frame.pixels()),
            ..::gif::Frame::default()
        };
        encoder.write_frame(&out)?;
    }
    // Dropping the encoder writes the trailer
    drop(encoder);

    if let Some(byte) = bytes.get_mut(BACKGROUND_OFFSET) {
        *byte = anim.background_index();
    }
    Ok(bytes)
}

/// Encode an animation to `writer`.
///
/// Nothing is written unless the whole animation encodes successfully.
pub fn encode_gif<W: Write>(anim: &Animation, mut writer: W) -> Result<(), CodecError> {
    let bytes = encode_to_vec(anim)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read and decode a GIF file.
pub fn read_gif(path: &Path) -> Result<Animation, CodecError> {
    let file = File::open(path)?;
    decode_gif(BufReader::new(file))
}

/// Encode an animation and save it to `path`.
///
/// The file is only created once encoding has succeeded, so a failed
/// encode leaves no partial output behind.
pub fn write_gif(anim: &Animation, path: &Path) -> Result<(), CodecError> {
    let bytes = encode_to_vec(anim)?;

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn palette(rgb: &[u8], transparent: Option<u8>) -> Arc<Palette> {
        Arc::new(Palette::from_rgb(rgb, transparent).unwrap())
    }

    const FOUR: [u8; 12] = [0, 0, 0, 255, 0, 0, 0, 255, 0, 0, 0, 255];

    fn sample_animation() -> Animation {
        let shared = palette(&FOUR, None);
        let mut anim = Animation::new(4, 3)
            .with_loop_count(LoopCount::Finite(2))
            .with_background_index(3);
        let a: Vec<u8> = (0..12).map(|i| (i % 4) as u8).collect();
        let b: Vec<u8> = (0..12).map(|i| (3 - i % 4) as u8).collect();
        let first = Frame::new(4, 3, a, shared.clone(), None).unwrap();
        anim.push_frame(first, 7, DisposalMethod::Keep);
        anim.push_frame(
            Frame::new(4, 3, b, palette(&[9, 9, 9, 1, 2, 3, 4, 5, 6, 7, 8, 9], Some(0)), Some(0))
                .unwrap(),
            12,
            DisposalMethod::Background,
        );
        anim
    }

    #[test]
    fn test_encode_decode_preserves_animation() {
        let anim = sample_animation();
        let bytes = encode_to_vec(&anim).unwrap();
        let decoded = decode_gif(Cursor::new(bytes)).unwrap();

        assert_eq!((decoded.width(), decoded.height()), (4, 3));
        assert_eq!(decoded.delays(), &[7, 12]);
        assert_eq!(decoded.disposal_methods(), &[DisposalMethod::Keep, DisposalMethod::Background]);
        assert_eq!(decoded.loop_count(), LoopCount::Finite(2));
        assert_eq!(decoded.background_index(), 3);
        for (src, out) in anim.frames().iter().zip(decoded.frames()) {
            assert_eq!(out.pixels(), src.pixels());
            assert_eq!(out.palette(), src.palette());
            assert_eq!(out.transparent(), src.transparent());
        }
    }

    #[test]
    fn test_background_index_written_to_header() {
        let bytes = encode_to_vec(&sample_animation()).unwrap();
        assert_eq!(&bytes[..6], b"GIF89a");
        assert_eq!(bytes[BACKGROUND_OFFSET], 3);
    }

    #[test]
    fn test_loop_count_round_trip() {
        for loop_count in [LoopCount::Infinite, LoopCount::Finite(0), LoopCount::Finite(5)] {
            let anim = sample_animation().with_loop_count(loop_count);
            let decoded = decode_gif(Cursor::new(encode_to_vec(&anim).unwrap())).unwrap();
            assert_eq!(decoded.loop_count(), loop_count);
        }
    }

    #[test]
    fn test_decode_flattens_partial_frame() {
        let mut bytes = Vec::new();
        {
            let mut encoder = Encoder::new(&mut bytes, 4, 4, &FOUR).unwrap();
            let frame = ::gif::Frame {
                left: 1,
                top: 2,
                width: 2,
                height: 1,
                transparent: Some(0),
                buffer: Cow::Owned(vec![1, 2]),
                ..::gif::Frame::default()
            };
            encoder.write_frame(&frame).unwrap();
        }

        let anim = decode_gif(Cursor::new(bytes)).unwrap();
        let frame = &anim.frames()[0];
        assert_eq!(frame.dimensions(), (4, 4));
        assert_eq!(frame.index_at(1, 2), 1);
        assert_eq!(frame.index_at(2, 2), 2);
        assert_eq!(frame.index_at(0, 0), 0);
        assert_eq!(frame.index_at(3, 3), 0);
    }

    #[test]
    fn test_decode_rejects_partial_frame_without_transparency() {
        let mut bytes = Vec::new();
        {
            let mut encoder = Encoder::new(&mut bytes, 4, 4, &FOUR).unwrap();
            let frame = ::gif::Frame {
                width: 2,
                height: 2,
                buffer: Cow::Owned(vec![1, 2, 3, 1]),
                ..::gif::Frame::default()
            };
            encoder.write_frame(&frame).unwrap();
        }

        let err = decode_gif(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, CodecError::PartialFrame { frame: 0 }));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_gif(Cursor::new(b"not a gif".to_vec())).unwrap_err();
        assert_eq!(err.kind(), "decode_error");
    }

    #[test]
    fn test_encode_rejects_oversized_canvas() {
        let anim = Animation::new(70_000, 1);
        let err = encode_to_vec(&anim).unwrap_err();
        assert!(matches!(err, CodecError::TooLarge { width: 70_000, height: 1 }));
    }

    #[test]
    fn test_write_gif_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dirs/out.gif");

        write_gif(&sample_animation(), &path).unwrap();
        let decoded = read_gif(&path).unwrap();
        assert_eq!(decoded.len(), 2);
    }

    #[test]
    fn test_write_gif_failure_leaves_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.gif");

        let err = write_gif(&Animation::new(1, 70_000), &path).unwrap_err();
        assert_eq!(err.kind(), "too_large");
        assert!(!path.exists());
    }

    #[test]
    fn test_read_gif_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_gif(&dir.path().join("missing.gif")).unwrap_err();
        assert!(matches!(err, CodecError::Io(_)));
    }
}
