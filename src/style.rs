//! Character-level style attributes.
//!
//! This module provides [`SpanStyle`], the set of attributes applied to a
//! range of characters: font selection, size, spacing, colors, decoration
//! and shadow. Every attribute can be left unspecified, in which case it is
//! inherited from whatever style it is merged onto.
//!
//! Styles are combined with [`SpanStyle::merge`] (or `+`), where the
//! right-hand style wins for every attribute it specifies.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Add;

use bitflags::bitflags;

use crate::color::{Brush, Color, hash_f32};
use crate::geometry::{Offset, lerp_discrete, lerp_f32};
use crate::units::TextUnit;

/// Alias used where the character/paragraph distinction matters.
pub type CharacterStyle = SpanStyle;

/// Font weight on the 1..=1000 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const THIN: Self = Self(100);
    pub const LIGHT: Self = Self(300);
    pub const NORMAL: Self = Self(400);
    pub const MEDIUM: Self = Self(500);
    pub const BOLD: Self = Self(700);
    pub const BLACK: Self = Self(900);

    /// Interpolate numerically, clamped to the valid weight range.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "result is clamped into 1..=1000"
    )]
    pub fn lerp(start: Self, stop: Self, fraction: f32) -> Self {
        let weight = lerp_f32(f32::from(start.0), f32::from(stop.0), fraction).round();
        Self(weight.clamp(1.0, 1000.0) as u16)
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Upright or slanted glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

bitflags! {
    /// Which font attributes may be synthesized when the family lacks them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FontSynthesis: u8 {
        /// Fake bold by stroking.
        const WEIGHT = 1 << 0;
        /// Fake italic by skewing.
        const STYLE  = 1 << 1;
    }
}

bitflags! {
    /// Lines drawn with the text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextDecoration: u8 {
        const UNDERLINE    = 1 << 0;
        const LINE_THROUGH = 1 << 1;
    }
}

/// Generic or named font family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    Default,
    SansSerif,
    Serif,
    Monospace,
    Cursive,
    Named(String),
}

/// Vertical shift of the baseline, as a fraction of the ascent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BaselineShift(pub f32);

impl BaselineShift {
    pub const NONE: Self = Self(0.0);
    pub const SUPERSCRIPT: Self = Self(0.5);
    pub const SUBSCRIPT: Self = Self(-0.5);
}

/// Horizontal scale and skew applied to glyphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextGeometricTransform {
    pub scale_x: f32,
    pub skew_x: f32,
}

impl TextGeometricTransform {
    pub const NONE: Self = Self {
        scale_x: 1.0,
        skew_x: 0.0,
    };

    #[must_use]
    pub fn lerp(start: Self, stop: Self, fraction: f32) -> Self {
        Self {
            scale_x: lerp_f32(start.scale_x, stop.scale_x, fraction),
            skew_x: lerp_f32(start.skew_x, stop.skew_x, fraction),
        }
    }
}

impl Default for TextGeometricTransform {
    fn default() -> Self {
        Self::NONE
    }
}

/// Ordered list of BCP-47 language tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LocaleList(pub Vec<String>);

impl LocaleList {
    #[must_use]
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }
}

/// Drop shadow painted under the glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Shadow {
    pub color: Color,
    pub offset: Offset,
    pub blur_radius: f32,
}

impl Shadow {
    pub const NONE: Self = Self {
        color: Color::TRANSPARENT,
        offset: Offset::ZERO,
        blur_radius: 0.0,
    };

    #[must_use]
    pub fn lerp(start: Self, stop: Self, fraction: f32) -> Self {
        Self {
            color: Color::lerp(start.color, stop.color, fraction),
            offset: Offset::lerp(start.offset, stop.offset, fraction),
            blur_radius: lerp_f32(start.blur_radius, stop.blur_radius, fraction),
        }
    }
}

/// Character-level style.
///
/// `color` and `brush` together form the paint source: setting one clears
/// the other. Color, brush, decoration and shadow only affect painting;
/// every other attribute can change line breaks or glyph positions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpanStyle {
    pub color: Color,
    pub brush: Option<Brush>,
    pub font_size: TextUnit,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub font_synthesis: Option<FontSynthesis>,
    pub font_family: Option<FontFamily>,
    pub font_feature_settings: Option<String>,
    pub letter_spacing: TextUnit,
    pub baseline_shift: Option<BaselineShift>,
    pub text_geometric_transform: Option<TextGeometricTransform>,
    pub locale_list: Option<LocaleList>,
    pub background: Color,
    pub text_decoration: Option<TextDecoration>,
    pub shadow: Option<Shadow>,
}

impl SpanStyle {
    /// Create a style with every attribute unspecified.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text color, clearing any brush.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self.brush = None;
        self
    }

    /// Set a brush, clearing the flat color.
    #[must_use]
    pub fn brush(mut self, brush: Brush) -> Self {
        self.brush = Some(brush);
        self.color = Color::UNSPECIFIED;
        self
    }

    #[must_use]
    pub fn font_size(mut self, size: TextUnit) -> Self {
        self.font_size = size;
        self
    }

    #[must_use]
    pub fn font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = Some(weight);
        self
    }

    /// Shorthand for a bold weight.
    #[must_use]
    pub fn bold(self) -> Self {
        self.font_weight(FontWeight::BOLD)
    }

    /// Shorthand for an italic font style.
    #[must_use]
    pub fn italic(mut self) -> Self {
        self.font_style = Some(FontStyle::Italic);
        self
    }

    #[must_use]
    pub fn font_synthesis(mut self, synthesis: FontSynthesis) -> Self {
        self.font_synthesis = Some(synthesis);
        self
    }

    #[must_use]
    pub fn font_family(mut self, family: FontFamily) -> Self {
        self.font_family = Some(family);
        self
    }

    #[must_use]
    pub fn font_feature_settings(mut self, settings: impl Into<String>) -> Self {
        self.font_feature_settings = Some(settings.into());
        self
    }

    #[must_use]
    pub fn letter_spacing(mut self, spacing: TextUnit) -> Self {
        self.letter_spacing = spacing;
        self
    }

    #[must_use]
    pub fn baseline_shift(mut self, shift: BaselineShift) -> Self {
        self.baseline_shift = Some(shift);
        self
    }

    #[must_use]
    pub fn text_geometric_transform(mut self, transform: TextGeometricTransform) -> Self {
        self.text_geometric_transform = Some(transform);
        self
    }

    #[must_use]
    pub fn locale_list(mut self, locales: LocaleList) -> Self {
        self.locale_list = Some(locales);
        self
    }

    #[must_use]
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    #[must_use]
    pub fn text_decoration(mut self, decoration: TextDecoration) -> Self {
        self.text_decoration = Some(decoration);
        self
    }

    #[must_use]
    pub fn underline(self) -> Self {
        let decoration = self.text_decoration.unwrap_or_default() | TextDecoration::UNDERLINE;
        self.text_decoration(decoration)
    }

    #[must_use]
    pub fn shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    /// Returns true if no attribute is specified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge `other` onto this style. Every attribute `other` specifies
    /// wins; everything else is kept from `self`. Merging `None` returns a
    /// copy of `self`.
    #[must_use]
    pub fn merge(&self, other: Option<&Self>) -> Self {
        let Some(other) = other else {
            return self.clone();
        };

        let (color, brush) = if other.brush.is_some() {
            (other.color, other.brush.clone())
        } else if other.color.is_specified() {
            (other.color, None)
        } else {
            (self.color, self.brush.clone())
        };

        Self {
            color,
            brush,
            font_size: other.font_size.take_or_else(|| self.font_size),
            font_weight: other.font_weight.or(self.font_weight),
            font_style: other.font_style.or(self.font_style),
            font_synthesis: other.font_synthesis.or(self.font_synthesis),
            font_family: other
                .font_family
                .clone()
                .or_else(|| self.font_family.clone()),
            font_feature_settings: other
                .font_feature_settings
                .clone()
                .or_else(|| self.font_feature_settings.clone()),
            letter_spacing: other.letter_spacing.take_or_else(|| self.letter_spacing),
            baseline_shift: other.baseline_shift.or(self.baseline_shift),
            text_geometric_transform: other
                .text_geometric_transform
                .or(self.text_geometric_transform),
            locale_list: other
                .locale_list
                .clone()
                .or_else(|| self.locale_list.clone()),
            background: other.background.take_or_else(|| self.background),
            text_decoration: other.text_decoration.or(self.text_decoration),
            shadow: other.shadow.or(self.shadow),
        }
    }

    /// Interpolate between two styles for animation.
    ///
    /// Sizes, weight, spacing, baseline shift, transform, colors and shadow
    /// interpolate numerically (unset weight counts as normal, unset shift
    /// and transform as none); everything else switches at the midpoint.
    /// `fraction` is not clamped.
    #[must_use]
    pub fn lerp(start: &Self, stop: &Self, fraction: f32) -> Self {
        let (color, brush) = if start.brush.is_none() && stop.brush.is_none() {
            (Color::lerp(start.color, stop.color, fraction), None)
        } else {
            lerp_discrete(
                (start.color, start.brush.clone()),
                (stop.color, stop.brush.clone()),
                fraction,
            )
        };

        Self {
            color,
            brush,
            font_size: TextUnit::lerp(start.font_size, stop.font_size, fraction),
            font_weight: Some(FontWeight::lerp(
                start.font_weight.unwrap_or_default(),
                stop.font_weight.unwrap_or_default(),
                fraction,
            )),
            font_style: lerp_discrete(start.font_style, stop.font_style, fraction),
            font_synthesis: lerp_discrete(start.font_synthesis, stop.font_synthesis, fraction),
            font_family: lerp_discrete(&start.font_family, &stop.font_family, fraction).clone(),
            font_feature_settings: lerp_discrete(
                &start.font_feature_settings,
                &stop.font_feature_settings,
                fraction,
            )
            .clone(),
            letter_spacing: TextUnit::lerp(start.letter_spacing, stop.letter_spacing, fraction),
            baseline_shift: Some(BaselineShift(lerp_f32(
                start.baseline_shift.unwrap_or_default().0,
                stop.baseline_shift.unwrap_or_default().0,
                fraction,
            ))),
            text_geometric_transform: Some(TextGeometricTransform::lerp(
                start.text_geometric_transform.unwrap_or_default(),
                stop.text_geometric_transform.unwrap_or_default(),
                fraction,
            )),
            locale_list: lerp_discrete(&start.locale_list, &stop.locale_list, fraction).clone(),
            background: Color::lerp(start.background, stop.background, fraction),
            text_decoration: lerp_discrete(start.text_decoration, stop.text_decoration, fraction),
            shadow: Some(Shadow::lerp(
                start.shadow.unwrap_or(Shadow::NONE),
                stop.shadow.unwrap_or(Shadow::NONE),
                fraction,
            )),
        }
    }

    /// Compare only the attributes that can change line breaks, sizes or
    /// positions. Color, brush, decoration and shadow are ignored.
    #[must_use]
    pub fn has_same_layout_affecting_attributes(&self, other: &Self) -> bool {
        self.font_size == other.font_size
            && self.font_weight == other.font_weight
            && self.font_style == other.font_style
            && self.font_synthesis == other.font_synthesis
            && self.font_family == other.font_family
            && self.font_feature_settings == other.font_feature_settings
            && self.letter_spacing == other.letter_spacing
            && self.baseline_shift == other.baseline_shift
            && self.text_geometric_transform == other.text_geometric_transform
            && self.locale_list == other.locale_list
            && self.background == other.background
    }

    /// Hash the attributes compared by
    /// [`has_same_layout_affecting_attributes`](Self::has_same_layout_affecting_attributes).
    pub fn hash_layout_affecting<H: Hasher>(&self, state: &mut H) {
        self.font_size.hash(state);
        self.font_weight.hash(state);
        self.font_style.hash(state);
        self.font_synthesis.hash(state);
        self.font_family.hash(state);
        self.font_feature_settings.hash(state);
        self.letter_spacing.hash(state);
        if let Some(shift) = self.baseline_shift {
            hash_f32(shift.0, state);
        }
        if let Some(transform) = self.text_geometric_transform {
            hash_f32(transform.scale_x, state);
            hash_f32(transform.skew_x, state);
        }
        self.locale_list.hash(state);
        self.background.hash(state);
    }
}

impl Add for SpanStyle {
    type Output = SpanStyle;

    fn add(self, rhs: Self) -> Self::Output {
        self.merge(Some(&rhs))
    }
}

impl Add<&SpanStyle> for SpanStyle {
    type Output = SpanStyle;

    fn add(self, rhs: &Self) -> Self::Output {
        self.merge(Some(rhs))
    }
}

impl Add<&SpanStyle> for &SpanStyle {
    type Output = SpanStyle;

    fn add(self, rhs: &SpanStyle) -> Self::Output {
        self.merge(Some(rhs))
    }
}

impl fmt::Display for SpanStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.color.is_specified() {
            parts.push(format!("color {}", self.color));
        }
        if self.brush.is_some() {
            parts.push("brush".to_string());
        }
        if self.font_size.is_specified() {
            parts.push(format!("size {}", self.font_size));
        }
        if let Some(weight) = self.font_weight {
            parts.push(format!("weight {}", weight.0));
        }
        if self.font_style == Some(FontStyle::Italic) {
            parts.push("italic".to_string());
        }
        if let Some(family) = &self.font_family {
            parts.push(format!("family {family:?}"));
        }
        if self.letter_spacing.is_specified() {
            parts.push(format!("spacing {}", self.letter_spacing));
        }
        if self.background.is_specified() {
            parts.push(format!("on {}", self.background));
        }
        if let Some(decoration) = self.text_decoration {
            if decoration.contains(TextDecoration::UNDERLINE) {
                parts.push("underline".to_string());
            }
            if decoration.contains(TextDecoration::LINE_THROUGH) {
                parts.push("line-through".to_string());
            }
        }
        if self.shadow.is_some() {
            parts.push("shadow".to_string());
        }

        if parts.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}
