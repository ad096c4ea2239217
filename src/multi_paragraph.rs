//! Layout of text made of several paragraphs.
//!
//! [`MultiParagraph`] lays out each paragraph measured by
//! [`MultiParagraphIntrinsics`] at the same width and stacks them
//! vertically. Queries take global character offsets, line indices and
//! coordinates, find the paragraph that owns them, and translate into and
//! out of that paragraph's local space.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::canvas::Canvas;
use crate::color::{Brush, Color};
use crate::geometry::{Constraints, Offset, Path, Rect, TextRange, ceil_to_px, px_bound};
use crate::measure::MultiParagraphIntrinsics;
use crate::paragraph::{Paragraph, ResolvedTextDirection};
use crate::style::{Shadow, TextDecoration};
use crate::text::{StyledText, TextError};

// ============================================================================
// Errors
// ============================================================================

/// Errors from measuring, laying out or querying text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// Paragraph stacking cannot honor a minimum size.
    MinConstraintsUnsupported { min_width: u32, min_height: u32 },
    /// A placeholder spans more than one paragraph.
    PlaceholderCrossesParagraph { start: usize, end: usize },
    /// A character offset outside the text.
    OffsetOutOfBounds { offset: usize, len: usize },
    /// A line index at or past the line count.
    LineIndexOutOfBounds { line: usize, line_count: usize },
    /// A range with `start > end` or reaching past the text.
    InvalidRange { start: usize, end: usize, len: usize },
    /// A line limit of zero.
    InvalidMaxLines(usize),
    /// The paragraph backend can't perform the operation.
    Unsupported(&'static str),
    Text(TextError),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinConstraintsUnsupported {
                min_width,
                min_height,
            } => write!(
                f,
                "minimum width ({min_width}) and height ({min_height}) must be 0"
            ),
            Self::PlaceholderCrossesParagraph { start, end } => {
                write!(f, "placeholder [{start}, {end}) crosses a paragraph boundary")
            }
            Self::OffsetOutOfBounds { offset, len } => {
                write!(f, "offset {offset} is out of bounds for length {len}")
            }
            Self::LineIndexOutOfBounds { line, line_count } => {
                write!(f, "line {line} is out of bounds [0, {line_count})")
            }
            Self::InvalidRange { start, end, len } => {
                write!(f, "range [{start}, {end}) is invalid for length {len}")
            }
            Self::InvalidMaxLines(max_lines) => {
                write!(f, "max lines must be at least 1, got {max_lines}")
            }
            Self::Unsupported(what) => write!(f, "unsupported: {what}"),
            Self::Text(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Text(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TextError> for LayoutError {
    fn from(err: TextError) -> Self {
        Self::Text(err)
    }
}

// ============================================================================
// ParagraphInfo
// ============================================================================

/// One laid-out paragraph and where it sits in the whole text.
#[derive(Debug)]
pub struct ParagraphInfo {
    pub paragraph: Box<dyn Paragraph>,
    /// First character, inclusive.
    pub start_index: usize,
    /// Last character, exclusive.
    pub end_index: usize,
    pub start_line_index: usize,
    pub end_line_index: usize,
    pub top: f32,
    pub bottom: f32,
}

impl ParagraphInfo {
    #[must_use]
    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }

    /// Global offset to local, clamped into this paragraph.
    #[must_use]
    pub fn to_local_index(&self, index: usize) -> usize {
        index.clamp(self.start_index, self.end_index) - self.start_index
    }

    #[must_use]
    pub fn to_global_index(&self, index: usize) -> usize {
        index + self.start_index
    }

    #[must_use]
    pub fn to_local_line_index(&self, line: usize) -> usize {
        line.saturating_sub(self.start_line_index)
    }

    #[must_use]
    pub fn to_global_line_index(&self, line: usize) -> usize {
        line + self.start_line_index
    }

    #[must_use]
    pub fn to_local_y(&self, y: f32) -> f32 {
        y - self.top
    }

    #[must_use]
    pub fn to_global_y(&self, y: f32) -> f32 {
        y + self.top
    }

    #[must_use]
    pub fn to_local_offset(&self, position: Offset) -> Offset {
        Offset::new(position.x, position.y - self.top)
    }

    #[must_use]
    pub fn to_global_rect(&self, rect: Rect) -> Rect {
        rect.translate(Offset::new(0.0, self.top))
    }

    #[must_use]
    pub fn to_global_range(&self, range: TextRange) -> TextRange {
        TextRange::new(
            self.to_global_index(range.start),
            self.to_global_index(range.end),
        )
    }
}

/// Binary search over paragraphs ordered along one axis. `compare` reports
/// where a paragraph lies relative to the key. A key past every paragraph
/// resolves to the last one.
fn find_paragraph(
    infos: &[ParagraphInfo],
    compare: impl Fn(&ParagraphInfo) -> Ordering,
) -> usize {
    match infos.binary_search_by(compare) {
        Ok(index) => index,
        Err(index) => index.min(infos.len().saturating_sub(1)),
    }
}

fn find_paragraph_by_index(infos: &[ParagraphInfo], index: usize) -> usize {
    find_paragraph(infos, |info| {
        if info.start_index > index {
            Ordering::Greater
        } else if info.end_index <= index {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    })
}

fn find_paragraph_by_y(infos: &[ParagraphInfo], y: f32) -> usize {
    find_paragraph(infos, |info| {
        if info.top > y {
            Ordering::Greater
        } else if info.bottom <= y {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    })
}

fn find_paragraph_by_line(infos: &[ParagraphInfo], line: usize) -> usize {
    find_paragraph(infos, |info| {
        if info.start_line_index > line {
            Ordering::Greater
        } else if info.end_line_index <= line {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    })
}

// ============================================================================
// MultiParagraph
// ============================================================================

/// Paragraphs laid out at one width and stacked top to bottom.
///
/// Layout stops at the paragraph that reaches the line limit; later
/// paragraphs are never laid out and offsets inside them resolve to the
/// last laid-out paragraph.
#[derive(Debug)]
pub struct MultiParagraph {
    intrinsics: Arc<MultiParagraphIntrinsics>,
    infos: Vec<ParagraphInfo>,
    width: f32,
    height: f32,
    line_count: usize,
    did_exceed_max_lines: bool,
    max_lines: usize,
    placeholder_rects: Vec<Option<Rect>>,
}

impl MultiParagraph {
    /// Lay out every paragraph of `intrinsics` within `constraints`.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::MinConstraintsUnsupported`] if either minimum is
    ///   non-zero.
    /// - [`LayoutError::InvalidMaxLines`] if `max_lines` is 0.
    pub fn new(
        intrinsics: Arc<MultiParagraphIntrinsics>,
        constraints: Constraints,
        max_lines: usize,
        ellipsis: bool,
    ) -> Result<Self, LayoutError> {
        if constraints.min_width != 0 || constraints.min_height != 0 {
            return Err(LayoutError::MinConstraintsUnsupported {
                min_width: constraints.min_width,
                min_height: constraints.min_height,
            });
        }
        if max_lines == 0 {
            return Err(LayoutError::InvalidMaxLines(max_lines));
        }

        let mut current_height = 0.0f32;
        let mut current_line_count = 0usize;
        let mut did_exceed_max_lines = false;
        let mut infos = Vec::with_capacity(intrinsics.infos().len());
        let last_index = intrinsics.infos().len().saturating_sub(1);

        for (index, measured) in intrinsics.infos().iter().enumerate() {
            let max_height = if constraints.has_bounded_height() {
                constraints
                    .max_height
                    .saturating_sub(ceil_to_px(current_height))
            } else {
                constraints.max_height
            };
            let paragraph = Arc::clone(&measured.intrinsics).layout(
                Constraints::new(0, constraints.max_width, 0, max_height),
                max_lines.saturating_sub(current_line_count),
                ellipsis,
            );

            let top = current_height;
            let bottom = top + paragraph.height();
            current_height = bottom;

            let start_line_index = current_line_count;
            let end_line_index = start_line_index + paragraph.line_count();
            current_line_count = end_line_index;

            let exceeded = paragraph.did_exceed_max_lines();
            infos.push(ParagraphInfo {
                paragraph,
                start_index: measured.start,
                end_index: measured.end,
                start_line_index,
                end_line_index,
                top,
                bottom,
            });

            if exceeded || (end_line_index == max_lines && index != last_index) {
                did_exceed_max_lines = true;
                log::debug!(
                    "line limit {max_lines} reached in paragraph {index}, {} paragraph(s) not laid out",
                    last_index - index
                );
                break;
            }
        }

        let width = if constraints.has_bounded_width() {
            px_bound(constraints.max_width)
        } else {
            infos
                .iter()
                .map(|info| info.paragraph.width())
                .fold(0.0, f32::max)
        };

        let mut placeholder_rects: Vec<Option<Rect>> = infos
            .iter()
            .flat_map(|info| {
                info.paragraph
                    .placeholder_rects()
                    .into_iter()
                    .map(|rect| rect.map(|rect| info.to_global_rect(rect)))
            })
            .collect();
        if placeholder_rects.len() < intrinsics.placeholders().len() {
            placeholder_rects.resize(intrinsics.placeholders().len(), None);
        }

        Ok(Self {
            intrinsics,
            infos,
            width,
            height: current_height,
            line_count: current_line_count,
            did_exceed_max_lines,
            max_lines,
            placeholder_rects,
        })
    }

    #[must_use]
    pub fn intrinsics(&self) -> &Arc<MultiParagraphIntrinsics> {
        &self.intrinsics
    }

    #[must_use]
    pub fn text(&self) -> &StyledText {
        self.intrinsics.text()
    }

    /// Laid-out paragraphs in text order.
    #[must_use]
    pub fn paragraph_infos(&self) -> &[ParagraphInfo] {
        &self.infos
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    #[must_use]
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    #[must_use]
    pub fn did_exceed_max_lines(&self) -> bool {
        self.did_exceed_max_lines
    }

    pub fn min_intrinsic_width(&self) -> f32 {
        self.intrinsics.min_intrinsic_width()
    }

    pub fn max_intrinsic_width(&self) -> f32 {
        self.intrinsics.max_intrinsic_width()
    }

    /// Baseline of the first line, 0 with no lines.
    #[must_use]
    pub fn first_baseline(&self) -> f32 {
        self.infos
            .first()
            .map_or(0.0, |info| info.paragraph.first_baseline())
    }

    /// Baseline of the last line, in global coordinates.
    #[must_use]
    pub fn last_baseline(&self) -> f32 {
        self.infos
            .last()
            .map_or(0.0, |info| info.to_global_y(info.paragraph.last_baseline()))
    }

    /// One entry per placeholder, `None` where the placeholder was dropped.
    #[must_use]
    pub fn placeholder_rects(&self) -> &[Option<Rect>] {
        &self.placeholder_rects
    }

    fn len(&self) -> usize {
        self.intrinsics.text().len()
    }

    fn require_offset(&self, offset: usize) -> Result<(), LayoutError> {
        if offset < self.len() {
            Ok(())
        } else {
            Err(LayoutError::OffsetOutOfBounds {
                offset,
                len: self.len(),
            })
        }
    }

    fn require_offset_inclusive(&self, offset: usize) -> Result<(), LayoutError> {
        if offset <= self.len() {
            Ok(())
        } else {
            Err(LayoutError::OffsetOutOfBounds {
                offset,
                len: self.len(),
            })
        }
    }

    /// Paragraph for an offset in `0..=len`; the end maps to the last one.
    fn info_for_offset(&self, offset: usize) -> &ParagraphInfo {
        let index = if offset >= self.len() {
            self.infos.len() - 1
        } else {
            find_paragraph_by_index(&self.infos, offset)
        };
        &self.infos[index]
    }

    fn info_for_y(&self, y: f32) -> &ParagraphInfo {
        let index = if y <= 0.0 {
            0
        } else if y >= self.height {
            self.infos.len() - 1
        } else {
            find_paragraph_by_y(&self.infos, y)
        };
        &self.infos[index]
    }

    fn info_for_line(&self, line: usize) -> Result<&ParagraphInfo, LayoutError> {
        if line >= self.line_count {
            return Err(LayoutError::LineIndexOutOfBounds {
                line,
                line_count: self.line_count,
            });
        }
        Ok(&self.infos[find_paragraph_by_line(&self.infos, line)])
    }

    /// Outline of the characters in `[start, end)`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::InvalidRange`] unless `start <= end <= len`.
    pub fn path_for_range(&self, start: usize, end: usize) -> Result<Path, LayoutError> {
        if start > end || end > self.len() {
            return Err(LayoutError::InvalidRange {
                start,
                end,
                len: self.len(),
            });
        }
        let mut path = Path::new();
        if start == end {
            return Ok(path);
        }

        let first = find_paragraph_by_index(&self.infos, start);
        for info in &self.infos[first..] {
            if info.start_index >= end {
                break;
            }
            if info.is_empty() {
                continue;
            }
            let mut local = info
                .paragraph
                .path_for_range(info.to_local_index(start), info.to_local_index(end));
            local.translate(Offset::new(0.0, info.top));
            path.add_path(&local);
        }
        Ok(path)
    }

    /// Line containing the vertical position `vertical`, clamped to the
    /// first and last lines.
    ///
    /// An empty paragraph answers with the caret position before it,
    /// `start_index - 1`, kept within the laid-out lines.
    #[must_use]
    pub fn line_for_vertical_position(&self, vertical: f32) -> usize {
        let info = self.info_for_y(vertical);
        if info.is_empty() {
            info.start_index
                .saturating_sub(1)
                .min(self.line_count.saturating_sub(1))
        } else {
            info.to_global_line_index(
                info.paragraph
                    .line_for_vertical_position(info.to_local_y(vertical)),
            )
        }
    }

    /// Character offset closest to `position`.
    #[must_use]
    pub fn offset_for_position(&self, position: Offset) -> usize {
        let info = self.info_for_y(position.y);
        if info.is_empty() {
            info.start_index.saturating_sub(1)
        } else {
            info.to_global_index(
                info.paragraph
                    .offset_for_position(info.to_local_offset(position)),
            )
        }
    }

    /// Box around the character at `offset`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::OffsetOutOfBounds`] unless `offset < len`.
    pub fn bounding_box(&self, offset: usize) -> Result<Rect, LayoutError> {
        self.require_offset(offset)?;
        let info = &self.infos[find_paragraph_by_index(&self.infos, offset)];
        Ok(info.to_global_rect(info.paragraph.bounding_box(info.to_local_index(offset))))
    }

    /// Horizontal position of the caret at `offset`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::OffsetOutOfBounds`] unless `offset <= len`.
    pub fn horizontal_position(
        &self,
        offset: usize,
        use_primary_direction: bool,
    ) -> Result<f32, LayoutError> {
        self.require_offset_inclusive(offset)?;
        let info = self.info_for_offset(offset);
        Ok(info
            .paragraph
            .horizontal_position(info.to_local_index(offset), use_primary_direction))
    }

    /// Base direction of the paragraph containing `offset`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::OffsetOutOfBounds`] unless `offset <= len`.
    pub fn paragraph_direction(&self, offset: usize) -> Result<ResolvedTextDirection, LayoutError> {
        self.require_offset_inclusive(offset)?;
        let info = self.info_for_offset(offset);
        Ok(info.paragraph.paragraph_direction(info.to_local_index(offset)))
    }

    /// Direction of the bidi run containing `offset`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::OffsetOutOfBounds`] unless `offset <= len`.
    pub fn bidi_run_direction(&self, offset: usize) -> Result<ResolvedTextDirection, LayoutError> {
        self.require_offset_inclusive(offset)?;
        let info = self.info_for_offset(offset);
        Ok(info.paragraph.bidi_run_direction(info.to_local_index(offset)))
    }

    /// Word around `offset`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::OffsetOutOfBounds`] unless `offset <= len`.
    pub fn word_boundary(&self, offset: usize) -> Result<TextRange, LayoutError> {
        self.require_offset_inclusive(offset)?;
        let info = self.info_for_offset(offset);
        Ok(info.to_global_range(info.paragraph.word_boundary(info.to_local_index(offset))))
    }

    /// Zero-width caret rectangle at `offset`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::OffsetOutOfBounds`] unless `offset <= len`.
    pub fn cursor_rect(&self, offset: usize) -> Result<Rect, LayoutError> {
        self.require_offset_inclusive(offset)?;
        let info = self.info_for_offset(offset);
        Ok(info.to_global_rect(info.paragraph.cursor_rect(info.to_local_index(offset))))
    }

    /// Line containing `offset`. Offsets past the text map to the last line.
    #[must_use]
    pub fn line_for_offset(&self, offset: usize) -> usize {
        let info = self.info_for_offset(offset);
        info.to_global_line_index(info.paragraph.line_for_offset(info.to_local_index(offset)))
    }

    /// Left edge of `line`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::LineIndexOutOfBounds`] unless `line < line_count`.
    pub fn line_left(&self, line: usize) -> Result<f32, LayoutError> {
        let info = self.info_for_line(line)?;
        Ok(info.paragraph.line_left(info.to_local_line_index(line)))
    }

    /// Right edge of `line`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::LineIndexOutOfBounds`] unless `line < line_count`.
    pub fn line_right(&self, line: usize) -> Result<f32, LayoutError> {
        let info = self.info_for_line(line)?;
        Ok(info.paragraph.line_right(info.to_local_line_index(line)))
    }

    /// Top of `line`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::LineIndexOutOfBounds`] unless `line < line_count`.
    pub fn line_top(&self, line: usize) -> Result<f32, LayoutError> {
        let info = self.info_for_line(line)?;
        Ok(info.to_global_y(info.paragraph.line_top(info.to_local_line_index(line))))
    }

    /// Bottom of `line`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::LineIndexOutOfBounds`] unless `line < line_count`.
    pub fn line_bottom(&self, line: usize) -> Result<f32, LayoutError> {
        let info = self.info_for_line(line)?;
        Ok(info.to_global_y(info.paragraph.line_bottom(info.to_local_line_index(line))))
    }

    /// Baseline of `line`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::LineIndexOutOfBounds`] unless `line < line_count`.
    pub fn line_baseline(&self, line: usize) -> Result<f32, LayoutError> {
        let info = self.info_for_line(line)?;
        Ok(info.to_global_y(info.paragraph.line_baseline(info.to_local_line_index(line))))
    }

    /// # Errors
    ///
    /// [`LayoutError::LineIndexOutOfBounds`] unless `line < line_count`.
    pub fn line_height(&self, line: usize) -> Result<f32, LayoutError> {
        let info = self.info_for_line(line)?;
        Ok(info.paragraph.line_height(info.to_local_line_index(line)))
    }

    /// # Errors
    ///
    /// [`LayoutError::LineIndexOutOfBounds`] unless `line < line_count`.
    pub fn line_width(&self, line: usize) -> Result<f32, LayoutError> {
        let info = self.info_for_line(line)?;
        Ok(info.paragraph.line_width(info.to_local_line_index(line)))
    }

    /// First character of `line`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::LineIndexOutOfBounds`] unless `line < line_count`.
    pub fn line_start(&self, line: usize) -> Result<usize, LayoutError> {
        let info = self.info_for_line(line)?;
        Ok(info.to_global_index(info.paragraph.line_start(info.to_local_line_index(line))))
    }

    /// End of `line`, exclusive. With `visible_end`, trailing whitespace and
    /// the line break are left out.
    ///
    /// # Errors
    ///
    /// [`LayoutError::LineIndexOutOfBounds`] unless `line < line_count`.
    pub fn line_end(&self, line: usize, visible_end: bool) -> Result<usize, LayoutError> {
        let info = self.info_for_line(line)?;
        Ok(info.to_global_index(
            info.paragraph
                .line_end(info.to_local_line_index(line), visible_end),
        ))
    }

    /// # Errors
    ///
    /// [`LayoutError::LineIndexOutOfBounds`] unless `line < line_count`.
    pub fn is_line_ellipsized(&self, line: usize) -> Result<bool, LayoutError> {
        let info = self.info_for_line(line)?;
        Ok(info.paragraph.is_line_ellipsized(info.to_local_line_index(line)))
    }

    /// Draw every paragraph, moving down by each paragraph's height.
    pub fn paint(
        &self,
        canvas: &mut dyn Canvas,
        color: Color,
        shadow: Option<Shadow>,
        decoration: Option<TextDecoration>,
    ) {
        canvas.save();
        for info in &self.infos {
            info.paragraph.paint(canvas, color, shadow, decoration);
            canvas.translate(0.0, info.paragraph.height());
        }
        canvas.restore();
    }

    /// Draw every paragraph with `brush`. `alpha` of NaN keeps the brush's
    /// own opacity.
    ///
    /// # Errors
    ///
    /// [`LayoutError::Unsupported`] when the paragraph backend can't draw
    /// the brush. The canvas is restored either way.
    pub fn paint_brush(
        &self,
        canvas: &mut dyn Canvas,
        brush: &Brush,
        alpha: f32,
        shadow: Option<Shadow>,
        decoration: Option<TextDecoration>,
    ) -> Result<(), LayoutError> {
        canvas.save();
        let result = self.infos.iter().try_for_each(|info| {
            info.paragraph
                .paint_brush(canvas, brush, alpha, shadow, decoration)?;
            canvas.translate(0.0, info.paragraph.height());
            Ok(())
        });
        canvas.restore();
        result
    }
}
