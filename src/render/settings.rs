// SPDX-License-Identifier: GPL-3.0-or-later
use serde::Deserialize;

use super::color::Color;

/// The colors used when drawing a diff image.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Palette {
    /// Fills the reference or candidate panel where that image has no pixel.
    #[serde(default = "Palette::default_background")]
    pub background: Color,

    /// Marks pixels present in both images that aren't exactly equal.
    #[serde(default = "Palette::default_mismatch")]
    pub mismatch: Color,

    /// Marks pixels only present in the reference image.
    #[serde(default = "Palette::default_only_first")]
    pub only_first: Color,

    /// Marks pixels only present in the candidate image.
    #[serde(default = "Palette::default_only_second")]
    pub only_second: Color,

    /// Marks pixels outside of both images.
    #[serde(default = "Palette::default_neither")]
    pub neither: Color,
}

impl Palette {
    fn default_background() -> Color {
        Color::WHITE
    }

    fn default_mismatch() -> Color {
        Color::RED
    }

    fn default_only_first() -> Color {
        Color::BLUE
    }

    fn default_only_second() -> Color {
        Color::GREEN
    }

    fn default_neither() -> Color {
        Color::MAGENTA
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Self::default_background(),
            mismatch: Self::default_mismatch(),
            only_first: Self::default_only_first(),
            only_second: Self::default_only_second(),
            neither: Self::default_neither(),
        }
    }
}
