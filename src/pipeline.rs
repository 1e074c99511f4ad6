//! Decode, crop and encode in one call

use std::io::{Read, Write};
use std::path::Path;

use crate::animation::{crop_animation_with, CropOptions};
use crate::error::Error;
use crate::gif::{decode_gif, encode_gif, read_gif, write_gif};
use crate::models::CropRect;

/// Crop a GIF read from `reader` and write the result to `writer`.
///
/// Nothing reaches `writer` unless decoding, every frame crop and the
/// encode all succeed.
pub fn crop_gif<R: Read, W: Write>(
    reader: R,
    writer: W,
    rect: CropRect,
    options: &CropOptions,
) -> Result<(), Error> {
    let anim = decode_gif(reader)?;
    let cropped = crop_animation_with(&anim, rect, options)?;
    encode_gif(&cropped, writer)?;
    Ok(())
}

/// Crop the GIF at `input` and save it to `output`.
///
/// On failure no output file is created.
pub fn crop_gif_file(
    input: &Path,
    output: &Path,
    rect: CropRect,
    options: &CropOptions,
) -> Result<(), Error> {
    let anim = read_gif(input)?;
    let cropped = crop_animation_with(&anim, rect, options)?;
    write_gif(&cropped, output)?;
    Ok(())
}
