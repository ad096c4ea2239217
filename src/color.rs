//! Colors and brushes for text painting.
//!
//! A [`Color`] is a linear RGBA value with `f32` components in `0.0..=1.0`.
//! [`Color::UNSPECIFIED`] is a distinguished sentinel meaning "inherit",
//! distinct from any real color (including fully transparent black).
//!
//! # Examples
//!
//! ```
//! use rich_layout::color::Color;
//!
//! let orange = Color::parse("#ff8800").unwrap();
//! let teal: Color = "#008080".parse().unwrap();
//! let halfway = Color::lerp(orange, teal, 0.5);
//! assert!(halfway.is_specified());
//! assert!(!Color::UNSPECIFIED.is_specified());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::geometry::{Offset, lerp_discrete, lerp_f32};

/// RGB color triplet with values 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorTriplet {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColorTriplet {
    /// Create a new color triplet from RGB components.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns CSS-style hex format `#rrggbb`.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl From<(u8, u8, u8)> for ColorTriplet {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

/// An RGBA color, or the unspecified sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    red: f32,
    green: f32,
    blue: f32,
    alpha: f32,
    specified: bool,
}

impl Color {
    /// "No color set"; merging and defaulting fall through it.
    pub const UNSPECIFIED: Self = Self {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 0.0,
        specified: false,
    };
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a color from float components.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
            specified: true,
        }
    }

    /// Create an opaque color from 8-bit components.
    #[must_use]
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::from_rgba(red, green, blue, 255)
    }

    /// Create a color from 8-bit components.
    #[must_use]
    pub fn from_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self::new(
            f32::from(red) / 255.0,
            f32::from(green) / 255.0,
            f32::from(blue) / 255.0,
            f32::from(alpha) / 255.0,
        )
    }

    /// Create an opaque color from a triplet.
    #[must_use]
    pub fn from_triplet(triplet: ColorTriplet) -> Self {
        Self::from_rgb(triplet.red, triplet.green, triplet.blue)
    }

    #[must_use]
    pub const fn is_specified(&self) -> bool {
        self.specified
    }

    #[must_use]
    pub const fn red(&self) -> f32 {
        self.red
    }

    #[must_use]
    pub const fn green(&self) -> f32 {
        self.green
    }

    #[must_use]
    pub const fn blue(&self) -> f32 {
        self.blue
    }

    #[must_use]
    pub const fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Return this color if specified, otherwise the result of `fallback`.
    #[must_use]
    pub fn take_or_else(self, fallback: impl FnOnce() -> Self) -> Self {
        if self.specified { self } else { fallback() }
    }

    /// Copy of this color with a different alpha.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        if !self.specified {
            return self;
        }
        Self { alpha, ..self }
    }

    /// Nearest 8-bit triplet, ignoring alpha.
    #[must_use]
    pub fn triplet(&self) -> ColorTriplet {
        ColorTriplet::new(
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        )
    }

    /// Interpolate component-wise. An unspecified endpoint switches
    /// discretely at the midpoint instead.
    #[must_use]
    pub fn lerp(start: Self, stop: Self, fraction: f32) -> Self {
        if !start.specified || !stop.specified {
            return lerp_discrete(start, stop, fraction);
        }
        Self::new(
            lerp_f32(start.red, stop.red, fraction),
            lerp_f32(start.green, stop.green, fraction),
            lerp_f32(start.blue, stop.blue, fraction),
            lerp_f32(start.alpha, stop.alpha, fraction),
        )
    }

    /// Parse a hex color: `#rgb`, `#rrggbb` or `#rrggbbaa`. The word
    /// `unspecified` gives [`Color::UNSPECIFIED`], matching [`Display`].
    ///
    /// [`Display`]: fmt::Display
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError`] if the string is empty, is not valid hex
    /// or has no leading `#`.
    pub fn parse(color: &str) -> Result<Self, ColorParseError> {
        let color = color.trim().to_lowercase();
        if color.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if color == "unspecified" {
            return Ok(Self::UNSPECIFIED);
        }
        match color.strip_prefix('#') {
            Some(hex) => parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(color.clone())),
            None => Err(ColorParseError::UnknownColor(color)),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::UNSPECIFIED
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.specified.hash(state);
        for channel in [self.red, self.green, self.blue, self.alpha] {
            hash_f32(channel, state);
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.specified {
            return write!(f, "unspecified");
        }
        let triplet = self.triplet();
        write!(
            f,
            "{}{:02x}",
            triplet.hex(),
            channel_to_u8(self.alpha)
        )
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ColorTriplet> for Color {
    fn from(triplet: ColorTriplet) -> Self {
        Self::from_triplet(triplet)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::from_rgb(red, green, blue)
    }
}

/// Paint source for text: a flat color or a gradient.
#[derive(Debug, Clone, PartialEq)]
pub enum Brush {
    /// A single color.
    Solid(Color),
    /// A two-point linear gradient with evenly spaced stops.
    LinearGradient {
        colors: Vec<Color>,
        start: Offset,
        end: Offset,
    },
}

impl Brush {
    /// The flat color of a solid brush.
    #[must_use]
    pub fn solid_color(&self) -> Option<Color> {
        match self {
            Self::Solid(color) => Some(*color),
            Self::LinearGradient { .. } => None,
        }
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    InvalidHex(String),
    UnknownColor(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color string"),
            Self::InvalidHex(s) => write!(f, "Invalid hex color: {s}"),
            Self::UnknownColor(s) => write!(f, "Unknown color: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            parse_hex(&expanded)
        }
        6 => Some(Color::from_rgb(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
        )),
        8 => Some(Color::from_rgba(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            byte(&hex[6..8])?,
        )),
        _ => None,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "channel is clamped to 0..=255 before the cast"
)]
fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Hash a float by bit pattern, folding `-0.0` onto `0.0` so values that
/// compare equal hash equally.
pub(crate) fn hash_f32<H: Hasher>(value: f32, state: &mut H) {
    let normalized = if value == 0.0 { 0.0_f32 } else { value };
    normalized.to_bits().hash(state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_triplet_hex() {
        let c = ColorTriplet::new(255, 0, 128);
        assert_eq!(c.hex(), "#ff0080");
    }

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse("#ff0000").unwrap(), Color::from_rgb(255, 0, 0));
        assert_eq!(Color::parse("#f00").unwrap(), Color::from_rgb(255, 0, 0));
        let translucent = Color::parse("#00000080").unwrap();
        assert!((translucent.alpha() - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_display_parses_back() {
        let color = Color::from_rgb(10, 20, 30).with_alpha(0.0);
        assert_eq!(color.to_string().parse::<Color>(), Ok(color));
        assert_eq!(Color::UNSPECIFIED.to_string().parse::<Color>(), Ok(Color::UNSPECIFIED));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Color::parse("  "), Err(ColorParseError::Empty));
        assert!(matches!(Color::parse("#12"), Err(ColorParseError::InvalidHex(_))));
        assert!(matches!(
            Color::parse("rgb(0, 128, 255)"),
            Err(ColorParseError::UnknownColor(_))
        ));
    }

    #[test]
    fn test_unspecified_is_distinct_from_transparent() {
        assert_ne!(Color::UNSPECIFIED, Color::TRANSPARENT);
        assert!(!Color::UNSPECIFIED.is_specified());
        assert_eq!(
            Color::UNSPECIFIED.take_or_else(|| Color::BLACK),
            Color::BLACK
        );
        assert_eq!(Color::RED.take_or_else(|| Color::BLACK), Color::RED);
    }

    #[test]
    fn test_lerp_componentwise() {
        let mid = Color::lerp(Color::BLACK, Color::WHITE, 0.5);
        assert_eq!(mid, Color::new(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn test_lerp_with_unspecified_is_discrete() {
        assert_eq!(Color::lerp(Color::UNSPECIFIED, Color::RED, 0.2), Color::UNSPECIFIED);
        assert_eq!(Color::lerp(Color::UNSPECIFIED, Color::RED, 0.7), Color::RED);
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::RED.to_string(), "#ff0000ff");
        assert_eq!(Color::UNSPECIFIED.to_string(), "unspecified");
    }
}
