//! Intrinsic width measurement across paragraphs.
//!
//! [`MultiParagraphIntrinsics`] splits a [`StyledText`] into paragraphs,
//! measures each one through the paragraph backend and combines the
//! results into one [`IntrinsicWidths`]. Paragraphs wrap independently, so
//! both widths are the maximum over paragraphs rather than a sum.

use std::sync::{Arc, OnceLock};

use crate::font::FontFamilyResolver;
use crate::multi_paragraph::LayoutError;
use crate::paragraph::{ParagraphBackend, ParagraphIntrinsics, Placeholder};
use crate::segment::segment;
use crate::text::{Range, StyledText, check_range, intersect};
use crate::text_style::TextStyle;
use crate::units::Density;

/// Width bounds of a piece of text.
///
/// `minimum` is the narrowest the text can be laid out at without breaking
/// inside a word, `maximum` is its width with no soft wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntrinsicWidths {
    pub minimum: f32,
    pub maximum: f32,
}

impl IntrinsicWidths {
    /// Create widths, swapping the bounds if they are reversed.
    #[must_use]
    pub fn new(minimum: f32, maximum: f32) -> Self {
        if minimum <= maximum {
            Self { minimum, maximum }
        } else {
            Self {
                minimum: maximum,
                maximum: minimum,
            }
        }
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self {
            minimum: 0.0,
            maximum: 0.0,
        }
    }

    /// Widths of text stacked vertically with `other`: the larger minimum
    /// and the larger maximum.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            minimum: self.minimum.max(other.minimum),
            maximum: self.maximum.max(other.maximum),
        }
    }

    /// Clamp both bounds to at most `width`.
    #[must_use]
    pub fn with_maximum(&self, width: f32) -> Self {
        Self {
            minimum: self.minimum.min(width),
            maximum: self.maximum.min(width),
        }
    }
}

/// Union of a list of widths, zero for an empty list.
#[must_use]
pub fn measure_union(widths: &[IntrinsicWidths]) -> IntrinsicWidths {
    widths
        .iter()
        .fold(IntrinsicWidths::zero(), |acc, w| acc.union(w))
}

/// One measured paragraph and the global character range it covers.
#[derive(Debug, Clone)]
pub struct ParagraphIntrinsicInfo {
    pub intrinsics: Arc<dyn ParagraphIntrinsics>,
    pub start: usize,
    pub end: usize,
}

/// Measurements of every paragraph of a text.
///
/// Built once per distinct text and style. Layout at any width reuses the
/// per-paragraph measurements held here.
#[derive(Debug)]
pub struct MultiParagraphIntrinsics {
    text: StyledText,
    placeholders: Vec<Range<Placeholder>>,
    infos: Vec<ParagraphIntrinsicInfo>,
    widths: OnceLock<IntrinsicWidths>,
}

impl MultiParagraphIntrinsics {
    /// Split `text` into paragraphs and measure each of them.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Text`] when a placeholder range is reversed or
    /// reaches past the text, and [`LayoutError::PlaceholderCrossesParagraph`]
    /// when a placeholder spans a paragraph boundary. No paragraph is
    /// measured in either case.
    pub fn new(
        text: &StyledText,
        style: &TextStyle,
        placeholders: &[Range<Placeholder>],
        density: Density,
        font_resolver: &Arc<dyn FontFamilyResolver>,
        backend: &dyn ParagraphBackend,
    ) -> Result<Self, LayoutError> {
        for placeholder in placeholders {
            check_range(placeholder.start, placeholder.end, text.len())?;
        }
        let segments = segment(text, style.paragraph_style());

        let local_placeholders = segments
            .iter()
            .map(|segment| local_placeholders(placeholders, segment.start, segment.end))
            .collect::<Result<Vec<_>, _>>()?;

        let infos = segments
            .iter()
            .zip(&local_placeholders)
            .map(|(segment, placeholders)| ParagraphIntrinsicInfo {
                intrinsics: backend.intrinsics(
                    &segment.text,
                    &style.merge_paragraph(&segment.style),
                    placeholders,
                    density,
                    font_resolver,
                ),
                start: segment.start,
                end: segment.end,
            })
            .collect();

        log::trace!(
            "measured {} paragraph(s) over {} chars",
            segments.len(),
            text.len()
        );

        Ok(Self {
            text: text.clone(),
            placeholders: placeholders.to_vec(),
            infos,
            widths: OnceLock::new(),
        })
    }

    #[must_use]
    pub fn text(&self) -> &StyledText {
        &self.text
    }

    /// Placeholders in global offsets.
    #[must_use]
    pub fn placeholders(&self) -> &[Range<Placeholder>] {
        &self.placeholders
    }

    /// Per-paragraph measurements in text order. Never empty.
    #[must_use]
    pub fn infos(&self) -> &[ParagraphIntrinsicInfo] {
        &self.infos
    }

    /// Combined widths, computed on first access.
    pub fn widths(&self) -> IntrinsicWidths {
        *self.widths.get_or_init(|| {
            let widths: Vec<IntrinsicWidths> = self
                .infos
                .iter()
                .map(|info| {
                    IntrinsicWidths::new(
                        info.intrinsics.min_intrinsic_width(),
                        info.intrinsics.max_intrinsic_width(),
                    )
                })
                .collect();
            measure_union(&widths)
        })
    }

    pub fn min_intrinsic_width(&self) -> f32 {
        self.widths().minimum
    }

    pub fn max_intrinsic_width(&self) -> f32 {
        self.widths().maximum
    }

    /// Whether any paragraph was measured with fonts that changed since.
    pub fn has_stale_resolved_fonts(&self) -> bool {
        self.infos
            .iter()
            .any(|info| info.intrinsics.has_stale_resolved_fonts())
    }
}

/// Placeholders touching `[start, end)`, rebased to the paragraph.
fn local_placeholders(
    placeholders: &[Range<Placeholder>],
    start: usize,
    end: usize,
) -> Result<Vec<Range<Placeholder>>, LayoutError> {
    placeholders
        .iter()
        .filter(|p| intersect(start, end, p.start, p.end))
        .map(|p| {
            if start <= p.start && p.end <= end {
                Ok(Range::tagged(p.item, p.start - start, p.end - start, p.tag.clone()))
            } else {
                Err(LayoutError::PlaceholderCrossesParagraph {
                    start: p.start,
                    end: p.end,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::DefaultFontResolver;
    use crate::paragraph::{MonospaceBackend, PlaceholderVerticalAlign};
    use crate::paragraph_style::{ParagraphStyle, TextAlign};
    use crate::text::TextError;
    use crate::units::TextUnit;

    fn resolver() -> Arc<dyn FontFamilyResolver> {
        Arc::new(DefaultFontResolver::new())
    }

    fn placeholder(start: usize, end: usize) -> Range<Placeholder> {
        Range::new(
            Placeholder::new(
                TextUnit::Sp(10.0),
                TextUnit::Sp(10.0),
                PlaceholderVerticalAlign::Center,
            ),
            start,
            end,
        )
    }

    fn two_paragraphs() -> StyledText {
        StyledText::new(
            "ab\nlonger line",
            vec![],
            vec![Range::new(
                ParagraphStyle::new().text_align(TextAlign::Center),
                0,
                3,
            )],
        )
        .unwrap()
    }

    #[test]
    fn test_intrinsic_widths_new_orders_bounds() {
        let widths = IntrinsicWidths::new(10.0, 5.0);
        assert_eq!(widths, IntrinsicWidths::new(5.0, 10.0));
        assert_eq!(widths.with_maximum(7.0), IntrinsicWidths::new(5.0, 7.0));
    }

    #[test]
    fn test_measure_union() {
        assert_eq!(measure_union(&[]), IntrinsicWidths::zero());
        let union = measure_union(&[IntrinsicWidths::new(3.0, 20.0), IntrinsicWidths::new(8.0, 9.0)]);
        assert_eq!(union, IntrinsicWidths::new(8.0, 20.0));
    }

    #[test]
    fn test_widths_are_max_over_paragraphs() {
        let intrinsics = MultiParagraphIntrinsics::new(
            &two_paragraphs(),
            &TextStyle::new(),
            &[],
            Density::default(),
            &resolver(),
            &MonospaceBackend,
        )
        .unwrap();
        assert_eq!(intrinsics.infos().len(), 2);
        // "longer line" is 11 cells of 7px, "longer" is the widest word.
        assert_eq!(intrinsics.max_intrinsic_width(), 77.0);
        assert_eq!(intrinsics.min_intrinsic_width(), 42.0);
        assert_eq!(intrinsics.infos()[1].start, 3);
        assert_eq!(intrinsics.infos()[1].end, 14);
    }

    #[test]
    fn test_empty_text_has_one_paragraph() {
        let intrinsics = MultiParagraphIntrinsics::new(
            &StyledText::default(),
            &TextStyle::new(),
            &[],
            Density::default(),
            &resolver(),
            &MonospaceBackend,
        )
        .unwrap();
        assert_eq!(intrinsics.infos().len(), 1);
        assert_eq!(intrinsics.widths(), IntrinsicWidths::zero());
    }

    #[test]
    fn test_placeholder_crossing_paragraphs_rejected() {
        let result = MultiParagraphIntrinsics::new(
            &two_paragraphs(),
            &TextStyle::new(),
            &[placeholder(2, 5)],
            Density::default(),
            &resolver(),
            &MonospaceBackend,
        );
        assert_eq!(
            result.unwrap_err(),
            LayoutError::PlaceholderCrossesParagraph { start: 2, end: 5 }
        );
    }

    #[test]
    fn test_malformed_placeholder_ranges_rejected() {
        let measure = |placeholders: &[Range<Placeholder>]| {
            MultiParagraphIntrinsics::new(
                &StyledText::from("hello"),
                &TextStyle::new(),
                placeholders,
                Density::default(),
                &resolver(),
                &MonospaceBackend,
            )
        };
        assert_eq!(
            measure(&[placeholder(3, 1)]).unwrap_err(),
            LayoutError::Text(TextError::InvalidRange { start: 3, end: 1 })
        );
        assert_eq!(
            measure(&[placeholder(4, 9)]).unwrap_err(),
            LayoutError::Text(TextError::OutOfBounds {
                start: 4,
                end: 9,
                len: 5
            })
        );
        assert!(measure(&[placeholder(4, 5)]).is_ok());
    }

    #[test]
    fn test_placeholders_rebased_to_paragraph() {
        let placeholders = local_placeholders(&[placeholder(1, 2), placeholder(4, 5)], 3, 14).unwrap();
        assert_eq!(placeholders.len(), 1);
        assert_eq!((placeholders[0].start, placeholders[0].end), (1, 2));
    }

    #[test]
    fn test_stale_fonts_reported() {
        let default_resolver = Arc::new(DefaultFontResolver::new());
        let shared: Arc<dyn FontFamilyResolver> = default_resolver.clone();
        let intrinsics = MultiParagraphIntrinsics::new(
            &two_paragraphs(),
            &TextStyle::new(),
            &[],
            Density::default(),
            &shared,
            &MonospaceBackend,
        )
        .unwrap();
        assert!(!intrinsics.has_stale_resolved_fonts());
        default_resolver.invalidate();
        assert!(intrinsics.has_stale_resolved_fonts());
    }
}
