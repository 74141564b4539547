// SPDX-License-Identifier: GPL-3.0-or-later
use serde::Deserialize;

use std::convert::{From, TryFrom};
use std::fmt;
use std::str::FromStr;

use crate::image_buffer::RasterPixel;

/// An 8-bit RGBA color, used for the fixed marker colors in diff images.
///
/// Colors can be parsed from (and formatted as) hex codes with a leading '#'. Both the six digit
/// `#rrggbb` and eight digit `#rrggbbaa` forms are accepted, the six digit form is fully opaque.
/// Formatting only includes the alpha digits when the color isn't opaque.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "String")]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
    alpha: u8,
}

impl From<Color> for RasterPixel {
    fn from(color: Color) -> Self {
        image::Rgba(color.as_array())
    }
}

impl fmt::LowerHex for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)?;
        if self.alpha != u8::MAX {
            write!(f, "{:02x}", self.alpha)?;
        }
        Ok(())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

/// The error returned when a string isn't a valid hex color code.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a color, expected '#rrggbb' or '#rrggbbaa'",
            self.0
        )
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseColorError(s.to_string());
        let digits = s.strip_prefix('#').ok_or_else(invalid)?;
        let channels = hex::decode(digits).map_err(|_| invalid())?;
        match channels.as_slice() {
            &[red, green, blue] => Ok(Self::new(red, green, blue)),
            &[red, green, blue, alpha] => Ok(Self::with_alpha(red, green, blue, alpha)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Color {
    pub const WHITE: Self = Self::new(u8::MAX, u8::MAX, u8::MAX);

    pub const RED: Self = Self::new(u8::MAX, u8::MIN, u8::MIN);

    pub const GREEN: Self = Self::new(u8::MIN, u8::MAX, u8::MIN);

    pub const BLUE: Self = Self::new(u8::MIN, u8::MIN, u8::MAX);

    pub const MAGENTA: Self = Self::new(u8::MAX, u8::MIN, u8::MAX);

    /// Create a new, fully opaque [Color] with the given 8-bit color values.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self::with_alpha(red, green, blue, u8::MAX)
    }

    /// Create a new [Color] with the given 8-bit color and alpha values.
    pub const fn with_alpha(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// The red, green, blue, and alpha components as a 4 element array.
    pub fn as_array(&self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}
