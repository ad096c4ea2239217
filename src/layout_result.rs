//! Inputs and outputs of a text measurement.

use std::fmt;
use std::sync::Arc;

use crate::canvas::Canvas;
use crate::color::{Brush, Color};
use crate::font::FontFamilyResolver;
use crate::geometry::{Constraints, IntSize, Offset, Path, Rect, TextRange, ceil_to_px, px_bound};
use crate::multi_paragraph::{LayoutError, MultiParagraph};
use crate::paragraph::{Placeholder, ResolvedTextDirection};
use crate::style::{Shadow, TextDecoration};
use crate::text::{Range, StyledText};
use crate::text_style::TextStyle;
use crate::units::{Density, LayoutDirection};

/// What happens to text that doesn't fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextOverflow {
    /// Cut off at the bounds.
    #[default]
    Clip,
    /// Replace the end of the last line with an ellipsis.
    Ellipsis,
    /// Draw past the bounds.
    Visible,
}

impl fmt::Display for TextOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Clip => "clip",
            Self::Ellipsis => "ellipsis",
            Self::Visible => "visible",
        };
        f.write_str(name)
    }
}

/// Everything a measurement depends on.
#[derive(Debug, Clone)]
pub struct TextLayoutInput {
    pub text: StyledText,
    pub style: TextStyle,
    pub placeholders: Vec<Range<Placeholder>>,
    pub max_lines: usize,
    pub soft_wrap: bool,
    pub overflow: TextOverflow,
    pub density: Density,
    pub layout_direction: LayoutDirection,
    pub font_resolver: Arc<dyn FontFamilyResolver>,
    pub constraints: Constraints,
}

impl PartialEq for TextLayoutInput {
    /// Field-wise equality; resolvers compare by identity.
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.style == other.style
            && self.placeholders == other.placeholders
            && self.max_lines == other.max_lines
            && self.soft_wrap == other.soft_wrap
            && self.overflow == other.overflow
            && self.density == other.density
            && self.layout_direction == other.layout_direction
            && Arc::ptr_eq(&self.font_resolver, &other.font_resolver)
            && self.constraints == other.constraints
    }
}

/// A measured text: the input it was measured for, its paragraphs and the
/// size it occupies within the input constraints.
///
/// Cloning is cheap; the laid-out paragraphs are shared.
#[derive(Debug, Clone)]
pub struct TextLayoutResult {
    input: TextLayoutInput,
    multi_paragraph: Arc<MultiParagraph>,
    size: IntSize,
}

impl TextLayoutResult {
    /// Wrap a layout. The size is the layout's extent rounded up to whole
    /// pixels and clamped into the input constraints.
    #[must_use]
    pub fn new(input: TextLayoutInput, multi_paragraph: Arc<MultiParagraph>) -> Self {
        let size = input.constraints.constrain(IntSize::new(
            ceil_to_px(multi_paragraph.width()),
            ceil_to_px(multi_paragraph.height()),
        ));
        Self {
            input,
            multi_paragraph,
            size,
        }
    }

    /// The same layout for a different input, with the size recomputed
    /// against the new constraints.
    #[must_use]
    pub fn with_input(&self, input: TextLayoutInput) -> Self {
        Self::new(input, Arc::clone(&self.multi_paragraph))
    }

    #[must_use]
    pub fn input(&self) -> &TextLayoutInput {
        &self.input
    }

    #[must_use]
    pub fn multi_paragraph(&self) -> &Arc<MultiParagraph> {
        &self.multi_paragraph
    }

    #[must_use]
    pub fn size(&self) -> IntSize {
        self.size
    }

    #[must_use]
    pub fn first_baseline(&self) -> f32 {
        self.multi_paragraph.first_baseline()
    }

    #[must_use]
    pub fn last_baseline(&self) -> f32 {
        self.multi_paragraph.last_baseline()
    }

    /// Lines were dropped or the text is taller than its size.
    #[must_use]
    pub fn did_overflow_height(&self) -> bool {
        self.multi_paragraph.did_exceed_max_lines()
            || px_bound(self.size.height) < self.multi_paragraph.height()
    }

    /// The text is wider than its size.
    #[must_use]
    pub fn did_overflow_width(&self) -> bool {
        px_bound(self.size.width) < self.multi_paragraph.width()
    }

    #[must_use]
    pub fn has_visual_overflow(&self) -> bool {
        self.did_overflow_width() || self.did_overflow_height()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.multi_paragraph.line_count()
    }

    #[must_use]
    pub fn placeholder_rects(&self) -> &[Option<Rect>] {
        self.multi_paragraph.placeholder_rects()
    }

    /// Whether the fonts this layout used have changed since.
    pub fn has_stale_resolved_fonts(&self) -> bool {
        self.multi_paragraph.intrinsics().has_stale_resolved_fonts()
    }

    /// # Errors
    ///
    /// See [`MultiParagraph::path_for_range`].
    pub fn path_for_range(&self, start: usize, end: usize) -> Result<Path, LayoutError> {
        self.multi_paragraph.path_for_range(start, end)
    }

    /// # Errors
    ///
    /// See [`MultiParagraph::cursor_rect`].
    pub fn cursor_rect(&self, offset: usize) -> Result<Rect, LayoutError> {
        self.multi_paragraph.cursor_rect(offset)
    }

    /// # Errors
    ///
    /// See [`MultiParagraph::bounding_box`].
    pub fn bounding_box(&self, offset: usize) -> Result<Rect, LayoutError> {
        self.multi_paragraph.bounding_box(offset)
    }

    /// # Errors
    ///
    /// See [`MultiParagraph::word_boundary`].
    pub fn word_boundary(&self, offset: usize) -> Result<TextRange, LayoutError> {
        self.multi_paragraph.word_boundary(offset)
    }

    /// # Errors
    ///
    /// See [`MultiParagraph::horizontal_position`].
    pub fn horizontal_position(
        &self,
        offset: usize,
        use_primary_direction: bool,
    ) -> Result<f32, LayoutError> {
        self.multi_paragraph
            .horizontal_position(offset, use_primary_direction)
    }

    /// # Errors
    ///
    /// See [`MultiParagraph::paragraph_direction`].
    pub fn paragraph_direction(&self, offset: usize) -> Result<ResolvedTextDirection, LayoutError> {
        self.multi_paragraph.paragraph_direction(offset)
    }

    /// # Errors
    ///
    /// See [`MultiParagraph::bidi_run_direction`].
    pub fn bidi_run_direction(&self, offset: usize) -> Result<ResolvedTextDirection, LayoutError> {
        self.multi_paragraph.bidi_run_direction(offset)
    }

    #[must_use]
    pub fn offset_for_position(&self, position: Offset) -> usize {
        self.multi_paragraph.offset_for_position(position)
    }

    #[must_use]
    pub fn line_for_offset(&self, offset: usize) -> usize {
        self.multi_paragraph.line_for_offset(offset)
    }

    #[must_use]
    pub fn line_for_vertical_position(&self, vertical: f32) -> usize {
        self.multi_paragraph.line_for_vertical_position(vertical)
    }

    /// # Errors
    ///
    /// See [`MultiParagraph::line_left`].
    pub fn line_left(&self, line: usize) -> Result<f32, LayoutError> {
        self.multi_paragraph.line_left(line)
    }

    /// # Errors
    ///
    /// See [`MultiParagraph::line_right`].
    pub fn line_right(&self, line: usize) -> Result<f32, LayoutError> {
        self.multi_paragraph.line_right(line)
    }

    /// # Errors
    ///
    /// See [`MultiParagraph::line_top`].
    pub fn line_top(&self, line: usize) -> Result<f32, LayoutError> {
        self.multi_paragraph.line_top(line)
    }

    /// # Errors
    ///
    /// See [`MultiParagraph::line_bottom`].
    pub fn line_bottom(&self, line: usize) -> Result<f32, LayoutError> {
        self.multi_paragraph.line_bottom(line)
    }

    /// # Errors
    ///
    /// See [`MultiParagraph::line_baseline`].
    pub fn line_baseline(&self, line: usize) -> Result<f32, LayoutError> {
        self.multi_paragraph.line_baseline(line)
    }

    /// # Errors
    ///
    /// See [`MultiParagraph::line_start`].
    pub fn line_start(&self, line: usize) -> Result<usize, LayoutError> {
        self.multi_paragraph.line_start(line)
    }

    /// # Errors
    ///
    /// See [`MultiParagraph::line_end`].
    pub fn line_end(&self, line: usize, visible_end: bool) -> Result<usize, LayoutError> {
        self.multi_paragraph.line_end(line, visible_end)
    }

    /// # Errors
    ///
    /// See [`MultiParagraph::is_line_ellipsized`].
    pub fn is_line_ellipsized(&self, line: usize) -> Result<bool, LayoutError> {
        self.multi_paragraph.is_line_ellipsized(line)
    }

    /// Paint with the input style's color unless `color` is specified.
    pub fn paint(
        &self,
        canvas: &mut dyn Canvas,
        color: Color,
        shadow: Option<Shadow>,
        decoration: Option<TextDecoration>,
    ) {
        let color = color.take_or_else(|| self.input.style.color());
        self.multi_paragraph.paint(canvas, color, shadow, decoration);
    }

    /// # Errors
    ///
    /// See [`MultiParagraph::paint_brush`].
    pub fn paint_brush(
        &self,
        canvas: &mut dyn Canvas,
        brush: &Brush,
        alpha: f32,
        shadow: Option<Shadow>,
        decoration: Option<TextDecoration>,
    ) -> Result<(), LayoutError> {
        self.multi_paragraph
            .paint_brush(canvas, brush, alpha, shadow, decoration)
    }
}
