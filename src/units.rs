//! Typographic units and the environment they resolve against.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::color::hash_f32;
use crate::geometry::{lerp_discrete, lerp_f32};

/// A length in scale-independent pixels (`Sp`) or relative to the font
/// size (`Em`). `Unspecified` is the "inherit" sentinel and is distinct
/// from a zero length.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TextUnit {
    #[default]
    Unspecified,
    Sp(f32),
    Em(f32),
}

impl TextUnit {
    #[must_use]
    pub const fn is_specified(&self) -> bool {
        !matches!(self, Self::Unspecified)
    }

    /// The numeric value, if specified.
    #[must_use]
    pub const fn value(&self) -> Option<f32> {
        match self {
            Self::Unspecified => None,
            Self::Sp(v) | Self::Em(v) => Some(*v),
        }
    }

    /// Return this unit if specified, otherwise the result of `fallback`.
    #[must_use]
    pub fn take_or_else(self, fallback: impl FnOnce() -> Self) -> Self {
        if self.is_specified() { self } else { fallback() }
    }

    /// Resolve to pixels. `Em` is relative to `font_size_px`.
    #[must_use]
    pub fn to_px(&self, density: Density, font_size_px: f32) -> Option<f32> {
        match self {
            Self::Unspecified => None,
            Self::Sp(v) => Some(density.sp_to_px(*v)),
            Self::Em(v) => Some(v * font_size_px),
        }
    }

    /// Interpolate two units of the same kind. Mixed kinds and unspecified
    /// endpoints switch discretely at the midpoint.
    #[must_use]
    pub fn lerp(start: Self, stop: Self, fraction: f32) -> Self {
        match (start, stop) {
            (Self::Sp(a), Self::Sp(b)) => Self::Sp(lerp_f32(a, b, fraction)),
            (Self::Em(a), Self::Em(b)) => Self::Em(lerp_f32(a, b, fraction)),
            _ => lerp_discrete(start, stop, fraction),
        }
    }
}

impl Eq for TextUnit {}

impl Hash for TextUnit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        if let Some(v) = self.value() {
            hash_f32(v, state);
        }
    }
}

impl fmt::Display for TextUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unspecified => write!(f, "unspecified"),
            Self::Sp(v) => write!(f, "{v}sp"),
            Self::Em(v) => write!(f, "{v}em"),
        }
    }
}

/// Screen density: pixels per dp and the user's font scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density {
    pub density: f32,
    pub font_scale: f32,
}

impl Density {
    #[must_use]
    pub const fn new(density: f32, font_scale: f32) -> Self {
        Self {
            density,
            font_scale,
        }
    }

    /// Convert scale-independent pixels to pixels.
    #[must_use]
    pub fn sp_to_px(&self, sp: f32) -> f32 {
        sp * self.font_scale * self.density
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Eq for Density {}

impl Hash for Density {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f32(self.density, state);
        hash_f32(self.font_scale, state);
    }
}

/// Direction of the surrounding layout, used to resolve `Start`/`End`
/// alignment and unset text directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}
