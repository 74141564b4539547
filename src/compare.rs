// SPDX-License-Identifier: GPL-3.0-or-later
use crate::image_buffer::{RasterImage, RasterPixel};

/// The largest per-channel difference tolerated when no other threshold is configured.
pub const DEFAULT_THRESHOLD: u32 = 2;

/// Signed difference between two 8-bit channel values.
///
/// Both channels are widened before subtracting, so the full -255..=255 range is representable.
pub fn channel_difference(first: u8, second: u8) -> i16 {
    i16::from(first) - i16::from(second)
}

/// Check that every channel (including alpha) of two pixels is within `threshold` of each other.
///
/// Any threshold of 255 or more accepts every pair of pixels.
pub fn pixels_within(first: &RasterPixel, second: &RasterPixel, threshold: u32) -> bool {
    first
        .0
        .iter()
        .zip(second.0.iter())
        .all(|(&a, &b)| u32::from(channel_difference(a, b).unsigned_abs()) <= threshold)
}

/// Compare a candidate image against a reference image.
///
/// The images match when they have the same dimensions and every pair of pixels at the same
/// position is within `threshold` on every channel. Images with different dimensions never match,
/// and their pixels are not looked at. Comparison stops at the first pixel that is out of
/// tolerance.
pub fn compare(reference: &RasterImage, candidate: &RasterImage, threshold: u32) -> bool {
    if reference.dimensions() != candidate.dimensions() {
        return false;
    }
    reference
        .pixels()
        .zip(candidate.pixels())
        .all(|(r, c)| pixels_within(r, c, threshold))
}

#[cfg(test)]
mod test {
    use super::{channel_difference, compare, pixels_within, DEFAULT_THRESHOLD};
    use crate::image_buffer::RasterImage;
    use image::Rgba;

    const GREY: Rgba<u8> = Rgba([0x80, 0x80, 0x80, 0xFF]);

    fn solid(width: u32, height: u32) -> RasterImage {
        RasterImage::from_pixel(width, height, GREY)
    }

    /// A copy of `image` with a single channel of one pixel shifted by `delta`.
    fn nudged(image: &RasterImage, x: u32, y: u32, channel: usize, delta: i16) -> RasterImage {
        let mut copy = image.clone();
        let pixel = copy.get_pixel_mut(x, y);
        pixel.0[channel] = (i16::from(pixel.0[channel]) + delta) as u8;
        copy
    }

    #[test]
    fn channel_difference_is_signed() {
        assert_eq!(channel_difference(0, 255), -255);
        assert_eq!(channel_difference(255, 0), 255);
        assert_eq!(channel_difference(7, 7), 0);
    }

    #[test]
    fn identical_images_match() {
        let image = RasterImage::from_fn(4, 3, |x, y| Rgba([x as u8, y as u8, 7, 255]));
        for threshold in [0, 1, DEFAULT_THRESHOLD, 255, u32::MAX].iter() {
            assert!(compare(&image, &image.clone(), *threshold));
        }
    }

    #[test]
    fn dimension_mismatch_never_matches() {
        // Same pixel content where they overlap, and the most lenient threshold possible.
        assert!(!compare(&solid(2, 2), &solid(3, 2), u32::MAX));
        assert!(!compare(&solid(2, 2), &solid(2, 3), u32::MAX));
        assert!(!compare(&solid(0, 0), &solid(1, 1), u32::MAX));
    }

    #[test]
    fn threshold_is_inclusive() {
        let reference = solid(2, 2);
        for channel in 0..4 {
            let at_limit = nudged(&reference, 1, 1, channel, -(DEFAULT_THRESHOLD as i16));
            assert!(compare(&reference, &at_limit, DEFAULT_THRESHOLD));
            let over_limit = nudged(&reference, 1, 1, channel, -(DEFAULT_THRESHOLD as i16) - 1);
            assert!(
                !compare(&reference, &over_limit, DEFAULT_THRESHOLD),
                "channel {} over the limit was accepted",
                channel
            );
        }
    }

    #[test]
    fn symmetric() {
        let reference = solid(3, 3);
        let candidate = nudged(&reference, 2, 0, 1, 3);
        for threshold in 0..5 {
            assert_eq!(
                compare(&reference, &candidate, threshold),
                compare(&candidate, &reference, threshold)
            );
        }
    }

    #[test]
    fn alpha_extremes() {
        // An alpha change from fully opaque to fully transparent is the largest possible
        // difference, not a wrapped-around small one.
        let opaque = Rgba([1, 2, 3, 0xFF]);
        let clear = Rgba([1, 2, 3, 0x00]);
        assert!(!pixels_within(&opaque, &clear, 254));
        assert!(pixels_within(&opaque, &clear, 255));
    }

    #[test]
    fn wide_thresholds() {
        let reference = RasterImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        let candidate = RasterImage::from_pixel(2, 2, Rgba([0xFF, 0xFF, 0xFF, 0xFF]));
        assert!(!compare(&reference, &candidate, 254));
        assert!(compare(&reference, &candidate, 255));
        assert!(compare(&reference, &candidate, 300));
        assert!(compare(&reference, &candidate, u32::MAX));
        // Size still wins over any threshold.
        assert!(!compare(&reference, &solid(2, 3), u32::MAX));
    }

    #[test]
    fn identical_small_images() {
        let reference = solid(2, 2);
        assert!(compare(&reference, &solid(2, 2), DEFAULT_THRESHOLD));
    }

    #[test]
    fn red_off_by_five() {
        let reference = solid(2, 2);
        let candidate = nudged(&reference, 1, 1, 0, 5);
        assert!(!compare(&reference, &candidate, DEFAULT_THRESHOLD));
    }

    #[test]
    fn zero_threshold_is_exact() {
        let reference = solid(5, 4);
        let candidate = nudged(&reference, 3, 2, 2, 1);
        assert!(!compare(&reference, &candidate, 0));
        assert!(compare(&reference, &candidate, 1));
    }
}
