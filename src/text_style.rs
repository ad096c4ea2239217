//! Combined character and paragraph style for a whole text.

use std::hash::{Hash, Hasher};
use std::ops::Add;

use crate::color::Color;
use crate::paragraph_style::{ParagraphStyle, TextAlign, TextDirection, TextIndent};
use crate::style::{
    BaselineShift, FontFamily, FontStyle, FontSynthesis, FontWeight, SpanStyle,
    TextGeometricTransform,
};
use crate::units::{LayoutDirection, TextUnit};

/// Font size used when nothing specifies one.
pub const DEFAULT_FONT_SIZE: TextUnit = TextUnit::Sp(14.0);
/// Letter spacing used when nothing specifies one.
pub const DEFAULT_LETTER_SPACING: TextUnit = TextUnit::Sp(0.0);

/// The style of a whole text: character attributes that apply everywhere
/// plus the default paragraph attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    span: SpanStyle,
    paragraph: ParagraphStyle,
}

impl TextStyle {
    /// Create a style with every attribute unspecified.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Combine a character style and a paragraph style.
    #[must_use]
    pub fn from_parts(span: SpanStyle, paragraph: ParagraphStyle) -> Self {
        Self { span, paragraph }
    }

    #[must_use]
    pub fn span_style(&self) -> &SpanStyle {
        &self.span
    }

    #[must_use]
    pub fn paragraph_style(&self) -> &ParagraphStyle {
        &self.paragraph
    }

    /// Text color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.span.color
    }

    /// Copy with a different text color; handy for color-only animations.
    #[must_use]
    pub fn with_color(&self, color: Color) -> Self {
        Self {
            span: self.span.clone().color(color),
            paragraph: self.paragraph,
        }
    }

    /// Merge another text style; specified attributes of `other` win.
    #[must_use]
    pub fn merge(&self, other: Option<&Self>) -> Self {
        let Some(other) = other else {
            return self.clone();
        };
        Self {
            span: self.span.merge(Some(&other.span)),
            paragraph: self.paragraph.merge(Some(&other.paragraph)),
        }
    }

    /// Merge a character style.
    #[must_use]
    pub fn merge_span(&self, other: &SpanStyle) -> Self {
        Self {
            span: self.span.merge(Some(other)),
            paragraph: self.paragraph,
        }
    }

    /// Merge a paragraph style.
    #[must_use]
    pub fn merge_paragraph(&self, other: &ParagraphStyle) -> Self {
        Self {
            span: self.span.clone(),
            paragraph: self.paragraph.merge(Some(other)),
        }
    }

    /// Interpolate both halves of the style.
    #[must_use]
    pub fn lerp(start: &Self, stop: &Self, fraction: f32) -> Self {
        Self {
            span: SpanStyle::lerp(&start.span, &stop.span, fraction),
            paragraph: ParagraphStyle::lerp(&start.paragraph, &stop.paragraph, fraction),
        }
    }

    /// Compare everything except paint-only attributes.
    #[must_use]
    pub fn has_same_layout_affecting_attributes(&self, other: &Self) -> bool {
        self.paragraph == other.paragraph
            && self.span.has_same_layout_affecting_attributes(&other.span)
    }

    /// Hash what [`has_same_layout_affecting_attributes`](Self::has_same_layout_affecting_attributes)
    /// compares.
    pub fn hash_layout_affecting<H: Hasher>(&self, state: &mut H) {
        self.span.hash_layout_affecting(state);
        self.paragraph.hash(state);
    }

    /// Fill every unspecified attribute with its default and resolve the
    /// text direction against `direction`.
    #[must_use]
    pub fn resolve_defaults(&self, direction: LayoutDirection) -> Self {
        let span = &self.span;
        let resolved_span = SpanStyle {
            color: span.color.take_or_else(|| {
                if span.brush.is_some() {
                    Color::UNSPECIFIED
                } else {
                    Color::BLACK
                }
            }),
            brush: span.brush.clone(),
            font_size: span.font_size.take_or_else(|| DEFAULT_FONT_SIZE),
            font_weight: Some(span.font_weight.unwrap_or(FontWeight::NORMAL)),
            font_style: Some(span.font_style.unwrap_or(FontStyle::Normal)),
            font_synthesis: Some(span.font_synthesis.unwrap_or(FontSynthesis::all())),
            font_family: Some(span.font_family.clone().unwrap_or(FontFamily::Default)),
            font_feature_settings: Some(span.font_feature_settings.clone().unwrap_or_default()),
            letter_spacing: span.letter_spacing.take_or_else(|| DEFAULT_LETTER_SPACING),
            baseline_shift: Some(span.baseline_shift.unwrap_or(BaselineShift::NONE)),
            text_geometric_transform: Some(
                span.text_geometric_transform
                    .unwrap_or(TextGeometricTransform::NONE),
            ),
            locale_list: span.locale_list.clone(),
            background: span.background.take_or_else(|| Color::TRANSPARENT),
            text_decoration: Some(span.text_decoration.unwrap_or_default()),
            shadow: span.shadow,
        };

        let mut paragraph = self.paragraph;
        paragraph.text_align = Some(paragraph.text_align.unwrap_or(TextAlign::Start));
        paragraph.text_direction = Some(resolve_text_direction(direction, paragraph.text_direction));
        paragraph.text_indent = Some(paragraph.text_indent.unwrap_or(TextIndent::NONE));

        Self {
            span: resolved_span,
            paragraph,
        }
    }
}

impl Add for TextStyle {
    type Output = TextStyle;

    fn add(self, rhs: Self) -> Self::Output {
        self.merge(Some(&rhs))
    }
}

impl Add<SpanStyle> for TextStyle {
    type Output = TextStyle;

    fn add(self, rhs: SpanStyle) -> Self::Output {
        self.merge_span(&rhs)
    }
}

impl Add<ParagraphStyle> for TextStyle {
    type Output = TextStyle;

    fn add(self, rhs: ParagraphStyle) -> Self::Output {
        self.merge_paragraph(&rhs)
    }
}

impl From<SpanStyle> for TextStyle {
    fn from(span: SpanStyle) -> Self {
        Self::from_parts(span, ParagraphStyle::default())
    }
}

impl From<ParagraphStyle> for TextStyle {
    fn from(paragraph: ParagraphStyle) -> Self {
        Self::from_parts(SpanStyle::default(), paragraph)
    }
}

/// Resolve an optional text direction against the layout direction.
/// `Content` falls back to the layout direction; unset follows it.
#[must_use]
pub fn resolve_text_direction(
    layout_direction: LayoutDirection,
    text_direction: Option<TextDirection>,
) -> TextDirection {
    match (text_direction, layout_direction) {
        (Some(TextDirection::Content), LayoutDirection::Ltr) => TextDirection::ContentOrLtr,
        (Some(TextDirection::Content), LayoutDirection::Rtl) => TextDirection::ContentOrRtl,
        (None, LayoutDirection::Ltr) => TextDirection::Ltr,
        (None, LayoutDirection::Rtl) => TextDirection::Rtl,
        (Some(direction), _) => direction,
    }
}
