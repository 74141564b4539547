// SPDX-License-Identifier: GPL-3.0-or-later
use tracing::trace;

use std::cmp::max;

use crate::image_buffer::{RasterImage, RasterPixel};

pub mod color;
mod settings;

pub use settings::Palette;

/// How a single position in the diff compares across the two images.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Verdict {
    /// Both images have a pixel here, and they are exactly equal.
    Same(RasterPixel),

    /// Both images have a pixel here, but they differ.
    Different,

    /// Only the first image has a pixel here.
    OnlyFirst,

    /// Only the second image has a pixel here.
    OnlySecond,

    /// Neither image has a pixel here.
    Neither,
}

impl Verdict {
    fn color(self, palette: &Palette) -> RasterPixel {
        match self {
            Self::Same(pixel) => pixel,
            Self::Different => palette.mismatch.into(),
            Self::OnlyFirst => palette.only_first.into(),
            Self::OnlySecond => palette.only_second.into(),
            Self::Neither => palette.neither.into(),
        }
    }
}

fn pixel_at(image: &RasterImage, x: u32, y: u32) -> Option<&RasterPixel> {
    if x < image.width() && y < image.height() {
        Some(image.get_pixel(x, y))
    } else {
        None
    }
}

/// The dimensions of the diff image for two images of the given dimensions.
pub fn diff_dimensions(first: (u32, u32), second: (u32, u32)) -> (u32, u32) {
    (max(first.0, second.0) * 3, max(first.1, second.1))
}

/// Render a diff of two images using the default [`Palette`].
pub fn render(first: &RasterImage, second: &RasterImage) -> RasterImage {
    render_with(first, second, &Palette::default())
}

/// Render a diff of two images.
///
/// The diff is three panels wide, each panel as large as the bounding box of the two images. The
/// left panel is the first image, the middle panel is the second image, and the right panel shows
/// where they differ. Positions outside of an image are filled with the background color in that
/// image's panel. Every position is examined, unlike [`crate::compare::compare`].
pub fn render_with(
    first: &RasterImage,
    second: &RasterImage,
    palette: &Palette,
) -> RasterImage {
    let (diff_width, height) = diff_dimensions(first.dimensions(), second.dimensions());
    let width = diff_width / 3;
    trace!(width, height, "rendering diff image");
    let background = RasterPixel::from(palette.background);
    let mut diff = RasterImage::new(diff_width, height);
    for y in 0..height {
        for x in 0..width {
            let first_pixel = pixel_at(first, x, y);
            let second_pixel = pixel_at(second, x, y);
            let verdict = match (first_pixel, second_pixel) {
                (Some(a), Some(b)) if a == b => Verdict::Same(*a),
                (Some(_), Some(_)) => Verdict::Different,
                (Some(_), None) => Verdict::OnlyFirst,
                (None, Some(_)) => Verdict::OnlySecond,
                (None, None) => Verdict::Neither,
            };
            diff.put_pixel(x, y, *first_pixel.unwrap_or(&background));
            diff.put_pixel(x + width, y, *second_pixel.unwrap_or(&background));
            diff.put_pixel(x + width * 2, y, verdict.color(palette));
        }
    }
    diff
}

#[cfg(test)]
mod test {
    use super::{diff_dimensions, render, render_with, Palette, Verdict};
    use crate::image_buffer::RasterImage;
    use crate::render::color::Color;
    use image::Rgba;

    const GREY: Rgba<u8> = Rgba([0x80, 0x80, 0x80, 0xFF]);
    const WHITE: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);
    const RED: Rgba<u8> = Rgba([0xFF, 0, 0, 0xFF]);
    const GREEN: Rgba<u8> = Rgba([0, 0xFF, 0, 0xFF]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 0xFF, 0xFF]);

    fn solid(width: u32, height: u32) -> RasterImage {
        RasterImage::from_pixel(width, height, GREY)
    }

    #[test]
    fn dimensions() {
        assert_eq!(diff_dimensions((2, 2), (2, 2)), (6, 2));
        assert_eq!(diff_dimensions((2, 5), (4, 1)), (12, 5));
        assert_eq!(diff_dimensions((0, 0), (0, 0)), (0, 0));
        let diff = render(&solid(3, 1), &solid(1, 4));
        assert_eq!(diff.dimensions(), (9, 4));
    }

    #[test]
    fn single_mismatch() {
        let first = solid(2, 2);
        let mut second = first.clone();
        second.get_pixel_mut(1, 1).0[0] += 5;
        let diff = render(&first, &second);
        assert_eq!(diff.dimensions(), (6, 2));
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(diff.get_pixel(x, y), first.get_pixel(x, y));
                assert_eq!(diff.get_pixel(x + 2, y), second.get_pixel(x, y));
                let expected = if (x, y) == (1, 1) { RED } else { GREY };
                assert_eq!(*diff.get_pixel(x + 4, y), expected, "at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn wider_second() {
        let first = solid(2, 2);
        let second = solid(3, 2);
        let diff = render(&first, &second);
        assert_eq!(diff.dimensions(), (9, 2));
        for y in 0..2 {
            // Reference panel
            assert_eq!(*diff.get_pixel(0, y), GREY);
            assert_eq!(*diff.get_pixel(1, y), GREY);
            assert_eq!(*diff.get_pixel(2, y), WHITE);
            // Candidate panel
            for x in 3..6 {
                assert_eq!(*diff.get_pixel(x, y), GREY);
            }
            // Verdict panel
            assert_eq!(*diff.get_pixel(6, y), GREY);
            assert_eq!(*diff.get_pixel(7, y), GREY);
            assert_eq!(*diff.get_pixel(8, y), GREEN);
        }
    }

    #[test]
    fn taller_first() {
        let first = solid(1, 2);
        let second = solid(1, 1);
        let diff = render(&first, &second);
        assert_eq!(diff.dimensions(), (3, 2));
        assert_eq!(*diff.get_pixel(0, 1), GREY);
        assert_eq!(*diff.get_pixel(1, 1), WHITE);
        assert_eq!(*diff.get_pixel(2, 1), BLUE);
    }

    #[test]
    fn outside_both() {
        // A 2x1 and a 1x2 image leave the bottom right corner uncovered.
        let diff = render(&solid(2, 1), &solid(1, 2));
        assert_eq!(diff.dimensions(), (6, 2));
        assert_eq!(*diff.get_pixel(1, 1), WHITE);
        assert_eq!(*diff.get_pixel(3, 1), WHITE);
        assert_eq!(*diff.get_pixel(5, 1), Rgba([0xFF, 0, 0xFF, 0xFF]));
    }

    #[test]
    fn exact_equality_only() {
        // Differences within any comparison threshold are still marked.
        let first = solid(1, 1);
        let second = RasterImage::from_pixel(1, 1, Rgba([0x80, 0x80, 0x80, 0xFE]));
        let diff = render(&first, &second);
        assert_eq!(*diff.get_pixel(2, 0), RED);
    }

    #[test]
    fn custom_palette() {
        let palette = Palette {
            background: Color::with_alpha(0, 0, 0, 0),
            only_second: Color::new(1, 2, 3),
            ..Palette::default()
        };
        let diff = render_with(&solid(1, 1), &solid(2, 1), &palette);
        assert_eq!(*diff.get_pixel(1, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*diff.get_pixel(5, 0), Rgba([1, 2, 3, 0xFF]));
    }

    #[test]
    fn verdict_colors() {
        let palette = Palette::default();
        assert_eq!(Verdict::Same(GREY).color(&palette), GREY);
        assert_eq!(Verdict::Different.color(&palette), RED);
        assert_eq!(Verdict::OnlyFirst.color(&palette), BLUE);
        assert_eq!(Verdict::OnlySecond.color(&palette), GREEN);
    }
}
