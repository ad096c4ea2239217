//! Paragraph-level style attributes.
//!
//! A [`ParagraphStyle`] applies to whole paragraphs: alignment, direction,
//! line height, indentation and how extra line height is distributed.
//! Merge and interpolation follow the same rules as
//! [`SpanStyle`](crate::style::SpanStyle).

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Add;

use crate::color::hash_f32;
use crate::geometry::{lerp_discrete, lerp_f32};
use crate::units::TextUnit;

/// Horizontal alignment of lines within the paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAlign {
    Left,
    Right,
    Center,
    Justify,
    /// Left in LTR paragraphs, right in RTL ones.
    Start,
    /// Right in LTR paragraphs, left in RTL ones.
    End,
}

/// Paragraph base direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextDirection {
    Ltr,
    Rtl,
    /// Decided by the first strong character, falling back to the layout
    /// direction.
    Content,
    /// Decided by the first strong character, falling back to LTR.
    ContentOrLtr,
    /// Decided by the first strong character, falling back to RTL.
    ContentOrRtl,
}

/// First-line and remaining-line indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextIndent {
    pub first_line: TextUnit,
    pub rest_line: TextUnit,
}

impl TextIndent {
    pub const NONE: Self = Self {
        first_line: TextUnit::Sp(0.0),
        rest_line: TextUnit::Sp(0.0),
    };

    #[must_use]
    pub fn lerp(start: Self, stop: Self, fraction: f32) -> Self {
        Self {
            first_line: TextUnit::lerp(start.first_line, stop.first_line, fraction),
            rest_line: TextUnit::lerp(start.rest_line, stop.rest_line, fraction),
        }
    }
}

impl Default for TextIndent {
    fn default() -> Self {
        Self::NONE
    }
}

/// Where the glyphs sit inside a line taller than the font: 0.0 is top,
/// 1.0 is bottom, `-1.0` means proportional to ascent and descent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineHeightAlignment(pub f32);

impl LineHeightAlignment {
    pub const TOP: Self = Self(0.0);
    pub const CENTER: Self = Self(0.5);
    pub const PROPORTIONAL: Self = Self(-1.0);
    pub const BOTTOM: Self = Self(1.0);
}

/// Whether extra line height is trimmed from the first and last lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineHeightTrim {
    FirstLineTop,
    LastLineBottom,
    #[default]
    Both,
    None,
}

/// Distribution policy for extra line height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineHeightStyle {
    pub alignment: LineHeightAlignment,
    pub trim: LineHeightTrim,
}

impl Hash for LineHeightStyle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f32(self.alignment.0, state);
        self.trim.hash(state);
    }
}

impl Eq for LineHeightStyle {}

/// Backend-specific paragraph options, merged attribute by attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlatformParagraphStyle {
    pub include_font_padding: Option<bool>,
    pub emoji_support: Option<bool>,
}

impl PlatformParagraphStyle {
    #[must_use]
    pub fn merge(&self, other: Option<&Self>) -> Self {
        let Some(other) = other else {
            return *self;
        };
        Self {
            include_font_padding: other.include_font_padding.or(self.include_font_padding),
            emoji_support: other.emoji_support.or(self.emoji_support),
        }
    }
}

/// Paragraph-level style. Every attribute can be left unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParagraphStyle {
    pub text_align: Option<TextAlign>,
    pub text_direction: Option<TextDirection>,
    line_height: TextUnit,
    pub text_indent: Option<TextIndent>,
    pub line_height_style: Option<LineHeightStyle>,
    pub platform_style: Option<PlatformParagraphStyle>,
}

impl ParagraphStyle {
    /// Create a style with every attribute unspecified.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    #[must_use]
    pub fn text_direction(mut self, direction: TextDirection) -> Self {
        self.text_direction = Some(direction);
        self
    }

    /// Set the line height.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::NegativeLineHeight`] for a negative length.
    pub fn line_height(mut self, line_height: TextUnit) -> Result<Self, StyleError> {
        if let Some(value) = line_height.value()
            && value < 0.0
        {
            return Err(StyleError::NegativeLineHeight(value));
        }
        self.line_height = line_height;
        Ok(self)
    }

    /// The line height, or [`TextUnit::Unspecified`].
    #[must_use]
    pub const fn line_height_value(&self) -> TextUnit {
        self.line_height
    }

    #[must_use]
    pub fn text_indent(mut self, indent: TextIndent) -> Self {
        self.text_indent = Some(indent);
        self
    }

    #[must_use]
    pub fn line_height_style(mut self, style: LineHeightStyle) -> Self {
        self.line_height_style = Some(style);
        self
    }

    #[must_use]
    pub fn platform_style(mut self, style: PlatformParagraphStyle) -> Self {
        self.platform_style = Some(style);
        self
    }

    /// Merge `other` onto this style; specified attributes of `other` win.
    /// Platform sub-styles are merged recursively.
    #[must_use]
    pub fn merge(&self, other: Option<&Self>) -> Self {
        let Some(other) = other else {
            return *self;
        };
        Self {
            text_align: other.text_align.or(self.text_align),
            text_direction: other.text_direction.or(self.text_direction),
            line_height: other.line_height.take_or_else(|| self.line_height),
            text_indent: other.text_indent.or(self.text_indent),
            line_height_style: other.line_height_style.or(self.line_height_style),
            platform_style: match (self.platform_style, other.platform_style) {
                (None, theirs) => theirs,
                (Some(ours), theirs) => Some(ours.merge(theirs.as_ref())),
            },
        }
    }

    /// Interpolate for animation. Line height and indent interpolate;
    /// the rest switches at the midpoint. A negative interpolated line
    /// height is clamped to zero.
    #[must_use]
    pub fn lerp(start: &Self, stop: &Self, fraction: f32) -> Self {
        let line_height = match TextUnit::lerp(start.line_height, stop.line_height, fraction) {
            TextUnit::Sp(v) => TextUnit::Sp(v.max(0.0)),
            TextUnit::Em(v) => TextUnit::Em(v.max(0.0)),
            TextUnit::Unspecified => TextUnit::Unspecified,
        };
        let line_height_style = match (start.line_height_style, stop.line_height_style) {
            (Some(a), Some(b)) if a.trim == b.trim => Some(LineHeightStyle {
                alignment: LineHeightAlignment(lerp_f32(a.alignment.0, b.alignment.0, fraction)),
                trim: a.trim,
            }),
            (a, b) => lerp_discrete(a, b, fraction),
        };
        Self {
            text_align: lerp_discrete(start.text_align, stop.text_align, fraction),
            text_direction: lerp_discrete(start.text_direction, stop.text_direction, fraction),
            line_height,
            text_indent: Some(TextIndent::lerp(
                start.text_indent.unwrap_or_default(),
                stop.text_indent.unwrap_or_default(),
                fraction,
            )),
            line_height_style,
            platform_style: lerp_discrete(start.platform_style, stop.platform_style, fraction),
        }
    }
}

impl Add for ParagraphStyle {
    type Output = ParagraphStyle;

    fn add(self, rhs: Self) -> Self::Output {
        self.merge(Some(&rhs))
    }
}

impl fmt::Display for ParagraphStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(align) = self.text_align {
            parts.push(format!("align {align:?}"));
        }
        if let Some(direction) = self.text_direction {
            parts.push(format!("dir {direction:?}"));
        }
        if self.line_height.is_specified() {
            parts.push(format!("line-height {}", self.line_height));
        }
        if self.text_indent.is_some() {
            parts.push("indent".to_string());
        }
        if parts.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

/// Error type for style construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleError {
    NegativeLineHeight(f32),
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeLineHeight(v) => {
                write!(f, "line height can't be negative ({v})")
            }
        }
    }
}

impl std::error::Error for StyleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_line_height_rejected() {
        assert_eq!(
            ParagraphStyle::new().line_height(TextUnit::Sp(-1.0)),
            Err(StyleError::NegativeLineHeight(-1.0))
        );
        assert!(ParagraphStyle::new().line_height(TextUnit::Em(0.0)).is_ok());
    }

    #[test]
    fn test_merge_overlay_wins() {
        let base = ParagraphStyle::new()
            .text_align(TextAlign::Center)
            .line_height(TextUnit::Sp(20.0))
            .unwrap();
        let overlay = ParagraphStyle::new().text_direction(TextDirection::Rtl);

        let merged = base.merge(Some(&overlay));
        assert_eq!(merged.text_align, Some(TextAlign::Center));
        assert_eq!(merged.text_direction, Some(TextDirection::Rtl));
        assert_eq!(merged.line_height_value(), TextUnit::Sp(20.0));
        assert_eq!(base.merge(None), base);
    }

    #[test]
    fn test_merge_platform_style_recursively() {
        let base = ParagraphStyle::new().platform_style(PlatformParagraphStyle {
            include_font_padding: Some(true),
            emoji_support: None,
        });
        let overlay = ParagraphStyle::new().platform_style(PlatformParagraphStyle {
            include_font_padding: None,
            emoji_support: Some(false),
        });

        let merged = base + overlay;
        assert_eq!(
            merged.platform_style,
            Some(PlatformParagraphStyle {
                include_font_padding: Some(true),
                emoji_support: Some(false),
            })
        );
    }

    #[test]
    fn test_lerp_line_height_and_align() {
        let start = ParagraphStyle::new()
            .text_align(TextAlign::Left)
            .line_height(TextUnit::Sp(10.0))
            .unwrap();
        let stop = ParagraphStyle::new()
            .text_align(TextAlign::Right)
            .line_height(TextUnit::Sp(30.0))
            .unwrap();

        let quarter = ParagraphStyle::lerp(&start, &stop, 0.25);
        assert_eq!(quarter.line_height_value(), TextUnit::Sp(15.0));
        assert_eq!(quarter.text_align, Some(TextAlign::Left));

        let three_quarters = ParagraphStyle::lerp(&start, &stop, 0.75);
        assert_eq!(three_quarters.text_align, Some(TextAlign::Right));
    }
}
