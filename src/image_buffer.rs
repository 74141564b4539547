// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::Context as _;
use image::io::Reader;
use image::{ImageFormat, Rgba, RgbaImage};
use tracing::trace;

use std::path::Path;

/// A decoded image, with each channel stored as an independent 8-bit value.
pub type RasterImage = RgbaImage;

/// A single pixel of a [`RasterImage`].
pub type RasterPixel = Rgba<u8>;

/// Read an image file from disk, converting it to 8-bit RGBA.
///
/// Any format enabled in the `image` crate is accepted, but only PNG is enabled.
pub fn decode(path: &Path) -> anyhow::Result<RasterImage> {
    trace!(path = %path.display(), "decoding image");
    // Sniff the format from the contents, scratch files don't always keep their extension.
    let image = Reader::open(path)
        .and_then(Reader::with_guessed_format)
        .with_context(|| format!("Unable to read {}", path.display()))?
        .decode()
        .with_context(|| format!("Unable to decode {}", path.display()))?;
    Ok(image.to_rgba8())
}

/// Write an image to disk as a PNG, regardless of the file's extension.
pub fn encode_png(image: &RasterImage, path: &Path) -> anyhow::Result<()> {
    trace!(path = %path.display(), "encoding PNG image");
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Unable to write {}", path.display()))
}
