//! Single-paragraph layout contract.
//!
//! Multi-paragraph layout never shapes glyphs itself. It hands each
//! paragraph to a [`ParagraphBackend`], which measures it
//! ([`ParagraphIntrinsics`]) and lays it out at a width
//! ([`Paragraph`]). Every query on a laid-out paragraph uses offsets and
//! coordinates local to that paragraph.
//!
//! [`monospace::MonospaceBackend`] is the reference backend: a fixed-grid
//! layout that is fully deterministic, which makes it useful for tests
//! and for text measured in cells.

pub mod monospace;

use std::fmt;
use std::sync::Arc;

use crate::canvas::Canvas;
use crate::color::{Brush, Color};
use crate::font::FontFamilyResolver;
use crate::geometry::{Constraints, Offset, Path, Rect, TextRange};
use crate::multi_paragraph::LayoutError;
use crate::style::{Shadow, TextDecoration};
use crate::text::{Range, StyledText};
use crate::text_style::TextStyle;
use crate::units::{Density, TextUnit};

pub use monospace::MonospaceBackend;

/// How a placeholder sits relative to the line it is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaceholderVerticalAlign {
    /// Bottom of the placeholder on the baseline.
    #[default]
    AboveBaseline,
    Top,
    Bottom,
    Center,
    /// Aligned with the top of the text.
    TextTop,
    /// Aligned with the bottom of the text.
    TextBottom,
    TextCenter,
}

/// Space reserved in the text flow for inline non-text content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placeholder {
    pub width: TextUnit,
    pub height: TextUnit,
    pub vertical_align: PlaceholderVerticalAlign,
}

impl Placeholder {
    #[must_use]
    pub fn new(width: TextUnit, height: TextUnit, vertical_align: PlaceholderVerticalAlign) -> Self {
        Self {
            width,
            height,
            vertical_align,
        }
    }
}

/// Direction of a paragraph or bidi run after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedTextDirection {
    Ltr,
    Rtl,
}

/// Creates paragraph measurements. Shared by every layout a measurer
/// performs.
pub trait ParagraphBackend: fmt::Debug + Send + Sync {
    /// Measure one paragraph.
    ///
    /// `style` is the text style with the paragraph's own style merged in.
    /// `placeholders` use offsets local to `text`.
    fn intrinsics(
        &self,
        text: &StyledText,
        style: &TextStyle,
        placeholders: &[Range<Placeholder>],
        density: Density,
        font_resolver: &Arc<dyn FontFamilyResolver>,
    ) -> Arc<dyn ParagraphIntrinsics>;
}

/// Width bounds of one paragraph, computed without full layout.
pub trait ParagraphIntrinsics: fmt::Debug + Send + Sync {
    /// Width of the widest unbreakable piece.
    fn min_intrinsic_width(&self) -> f32;

    /// Width without any soft wrapping.
    fn max_intrinsic_width(&self) -> f32;

    /// Whether the fonts this measurement used have changed since.
    fn has_stale_resolved_fonts(&self) -> bool;

    /// Lay the paragraph out within `constraints`, keeping at most
    /// `max_lines` lines.
    fn layout(
        self: Arc<Self>,
        constraints: Constraints,
        max_lines: usize,
        ellipsis: bool,
    ) -> Box<dyn Paragraph>;
}

/// A laid-out paragraph. Offsets are characters local to the paragraph;
/// coordinates are relative to its top-left corner.
///
/// Callers keep offsets within `0..=len` and line indices below
/// [`line_count`](Self::line_count); implementations clamp anything else.
pub trait Paragraph: fmt::Debug + Send + Sync {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn min_intrinsic_width(&self) -> f32;
    fn max_intrinsic_width(&self) -> f32;
    fn first_baseline(&self) -> f32;
    fn last_baseline(&self) -> f32;
    /// Whether lines were dropped to honor the line limit.
    fn did_exceed_max_lines(&self) -> bool;
    fn line_count(&self) -> usize;
    /// One entry per placeholder; `None` for placeholders on dropped lines.
    fn placeholder_rects(&self) -> Vec<Option<Rect>>;

    fn path_for_range(&self, start: usize, end: usize) -> Path;
    fn cursor_rect(&self, offset: usize) -> Rect;
    fn bounding_box(&self, offset: usize) -> Rect;
    fn word_boundary(&self, offset: usize) -> TextRange;
    fn horizontal_position(&self, offset: usize, use_primary_direction: bool) -> f32;
    fn paragraph_direction(&self, offset: usize) -> ResolvedTextDirection;
    fn bidi_run_direction(&self, offset: usize) -> ResolvedTextDirection;
    fn offset_for_position(&self, position: Offset) -> usize;

    fn line_for_offset(&self, offset: usize) -> usize;
    fn line_for_vertical_position(&self, vertical: f32) -> usize;
    fn line_left(&self, line: usize) -> f32;
    fn line_right(&self, line: usize) -> f32;
    fn line_top(&self, line: usize) -> f32;
    fn line_bottom(&self, line: usize) -> f32;
    fn line_baseline(&self, line: usize) -> f32;
    fn line_start(&self, line: usize) -> usize;
    /// End of the line, excluding trailing whitespace and the line break
    /// when `visible_end` is set.
    fn line_end(&self, line: usize, visible_end: bool) -> usize;
    fn is_line_ellipsized(&self, line: usize) -> bool;

    fn line_height(&self, line: usize) -> f32 {
        self.line_bottom(line) - self.line_top(line)
    }

    fn line_width(&self, line: usize) -> f32 {
        self.line_right(line) - self.line_left(line)
    }

    /// Draw the paragraph. A specified `color` replaces the base text
    /// color; `shadow` and `decoration` replace the style's when set.
    fn paint(
        &self,
        canvas: &mut dyn Canvas,
        color: Color,
        shadow: Option<Shadow>,
        decoration: Option<TextDecoration>,
    );

    /// Draw the paragraph with a brush.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Unsupported`] when the backend can't draw
    /// this kind of brush.
    fn paint_brush(
        &self,
        _canvas: &mut dyn Canvas,
        _brush: &Brush,
        _alpha: f32,
        _shadow: Option<Shadow>,
        _decoration: Option<TextDecoration>,
    ) -> Result<(), LayoutError> {
        Err(LayoutError::Unsupported("brush painting"))
    }
}
