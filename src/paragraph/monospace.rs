//! Fixed-grid reference backend.
//!
//! Characters advance by their Unicode cell width times half an em, plus
//! letter spacing. Lines are `1.25em` tall unless the paragraph sets a
//! line height, and break greedily at whitespace, falling back to a
//! mid-word break when a word alone is wider than the line. `\n` is a hard
//! break that belongs to the line it ends.
//!
//! The backend does no shaping and no bidi reordering: a paragraph is laid
//! out entirely in its resolved direction.

use std::sync::Arc;

use crate::canvas::{Canvas, TextPaint};
use crate::cells::char_advance;
use crate::color::{Brush, Color};
use crate::font::{FontFamilyResolver, Typeface};
use crate::geometry::{Constraints, Offset, Path, Rect, TextRange, px_bound};
use crate::multi_paragraph::LayoutError;
use crate::paragraph::{
    Paragraph, ParagraphBackend, ParagraphIntrinsics, Placeholder, PlaceholderVerticalAlign,
    ResolvedTextDirection,
};
use crate::paragraph_style::{TextAlign, TextDirection};
use crate::style::{FontFamily, FontSynthesis, Shadow, SpanStyle, TextDecoration};
use crate::text::{Range, StyledText};
use crate::text_style::{DEFAULT_FONT_SIZE, TextStyle};
use crate::units::Density;

/// Width of one cell, in ems.
const CELL_WIDTH_EM: f32 = 0.5;
/// Line height when the paragraph sets none, in ems.
const LINE_HEIGHT_EM: f32 = 1.25;
/// Baseline position as a fraction of the line height.
const ASCENT: f32 = 0.8;
const ELLIPSIS: &str = "\u{2026}";

/// Backend laying text out on a fixed grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceBackend;

impl MonospaceBackend {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ParagraphBackend for MonospaceBackend {
    fn intrinsics(
        &self,
        text: &StyledText,
        style: &TextStyle,
        placeholders: &[Range<Placeholder>],
        density: Density,
        font_resolver: &Arc<dyn FontFamilyResolver>,
    ) -> Arc<dyn ParagraphIntrinsics> {
        Arc::new(MonospaceIntrinsics::new(
            text,
            style,
            placeholders,
            density,
            font_resolver,
        ))
    }
}

/// A stretch of text with one merged character style.
#[derive(Debug, Clone)]
struct StyleRun {
    start: usize,
    end: usize,
    style: SpanStyle,
    /// Color set by the character style ranges, as opposed to the base style.
    span_color: Color,
    font_size: f32,
    typeface: Typeface,
}

#[derive(Debug, Clone, Copy)]
struct PlaceholderSlot {
    start: usize,
    width: f32,
    height: f32,
    align: PlaceholderVerticalAlign,
}

/// Measurements of one paragraph on the grid.
#[derive(Debug)]
pub struct MonospaceIntrinsics {
    chars: Vec<char>,
    advances: Vec<f32>,
    /// Line height each character asks for.
    heights: Vec<f32>,
    runs: Vec<StyleRun>,
    slots: Vec<PlaceholderSlot>,
    base_font_size: f32,
    base_line_height: f32,
    align: TextAlign,
    direction: ResolvedTextDirection,
    first_indent: f32,
    rest_indent: f32,
    min_width: f32,
    max_width: f32,
    resolver: Arc<dyn FontFamilyResolver>,
    generation: u64,
}

impl MonospaceIntrinsics {
    fn new(
        text: &StyledText,
        style: &TextStyle,
        placeholders: &[Range<Placeholder>],
        density: Density,
        resolver: &Arc<dyn FontFamilyResolver>,
    ) -> Self {
        let chars: Vec<char> = text.text().chars().collect();
        let len = chars.len();
        let paragraph = style.paragraph_style();

        let default_font_size = DEFAULT_FONT_SIZE
            .to_px(density, 0.0)
            .unwrap_or_default();
        let base_font_size = style
            .span_style()
            .font_size
            .to_px(density, default_font_size)
            .unwrap_or(default_font_size);
        let explicit_line_height = paragraph
            .line_height_value()
            .to_px(density, base_font_size);
        let base_line_height = explicit_line_height.unwrap_or(LINE_HEIGHT_EM * base_font_size);

        let runs = style_runs(text, style.span_style(), density, base_font_size, resolver.as_ref());
        let mut advances = Vec::with_capacity(len);
        let mut heights = Vec::with_capacity(len);
        for run in &runs {
            let scale_x = run.style.text_geometric_transform.map_or(1.0, |t| t.scale_x);
            let cell_width = CELL_WIDTH_EM * run.font_size * scale_x;
            let spacing = run
                .style
                .letter_spacing
                .to_px(density, run.font_size)
                .unwrap_or_default();
            let height = explicit_line_height.unwrap_or(LINE_HEIGHT_EM * run.font_size);
            for &c in &chars[run.start..run.end] {
                advances.push(char_advance(c, cell_width, spacing));
                heights.push(height);
            }
        }

        let slots: Vec<PlaceholderSlot> = placeholders
            .iter()
            .map(|placeholder| {
                let slot = PlaceholderSlot {
                    start: placeholder.start,
                    width: placeholder
                        .item
                        .width
                        .to_px(density, base_font_size)
                        .unwrap_or_default(),
                    height: placeholder
                        .item
                        .height
                        .to_px(density, base_font_size)
                        .unwrap_or_default(),
                    align: placeholder.item.vertical_align,
                };
                if placeholder.start < placeholder.end && placeholder.start < len {
                    advances[placeholder.start] = slot.width;
                    for advance in &mut advances[placeholder.start + 1..placeholder.end.min(len)] {
                        *advance = 0.0;
                    }
                    heights[placeholder.start] = heights[placeholder.start].max(slot.height);
                }
                slot
            })
            .collect();

        let direction = match paragraph.text_direction {
            Some(TextDirection::Ltr) => ResolvedTextDirection::Ltr,
            Some(TextDirection::Rtl) => ResolvedTextDirection::Rtl,
            Some(TextDirection::ContentOrRtl) => {
                first_strong_direction(&chars).unwrap_or(ResolvedTextDirection::Rtl)
            }
            _ => first_strong_direction(&chars).unwrap_or(ResolvedTextDirection::Ltr),
        };

        let indent = paragraph.text_indent.unwrap_or_default();
        let first_indent = indent
            .first_line
            .to_px(density, base_font_size)
            .unwrap_or_default();
        let rest_indent = indent
            .rest_line
            .to_px(density, base_font_size)
            .unwrap_or_default();

        let mut intrinsics = Self {
            chars,
            advances,
            heights,
            runs,
            slots,
            base_font_size,
            base_line_height,
            align: paragraph.text_align.unwrap_or(TextAlign::Start),
            direction,
            first_indent,
            rest_indent,
            min_width: 0.0,
            max_width: 0.0,
            resolver: Arc::clone(resolver),
            generation: resolver.generation(),
        };
        intrinsics.min_width = intrinsics.widest_word();
        intrinsics.max_width = intrinsics
            .hard_lines()
            .into_iter()
            .map(|(start, end, _)| intrinsics.first_indent + intrinsics.content_width(start, end))
            .fold(0.0, f32::max);

        log::trace!(
            "measured paragraph of {len} chars: min {:.1}, max {:.1}",
            intrinsics.min_width,
            intrinsics.max_width
        );
        intrinsics
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    fn advance_sum(&self, start: usize, end: usize) -> f32 {
        self.advances[start..end].iter().sum()
    }

    /// End of `[start, end)` with trailing whitespace removed.
    fn visible_end(&self, start: usize, end: usize) -> usize {
        let mut visible = end;
        while visible > start && self.chars[visible - 1].is_whitespace() {
            visible -= 1;
        }
        visible
    }

    fn content_width(&self, start: usize, end: usize) -> f32 {
        self.advance_sum(start, self.visible_end(start, end))
    }

    fn widest_word(&self) -> f32 {
        let mut widest = 0.0f32;
        let mut current = 0.0f32;
        for (c, advance) in self.chars.iter().zip(&self.advances) {
            if c.is_whitespace() {
                current = 0.0;
            } else {
                current += advance;
                widest = widest.max(current);
            }
        }
        widest
    }

    /// `(start, end, ends_with_newline)` for every hard line; `end`
    /// excludes the newline.
    fn hard_lines(&self) -> Vec<(usize, usize, bool)> {
        let mut lines = Vec::new();
        let mut start = 0;
        for (i, &c) in self.chars.iter().enumerate() {
            if c == '\n' {
                lines.push((start, i, true));
                start = i + 1;
            }
        }
        lines.push((start, self.len(), false));
        lines
    }

    /// Greedy line breaking. Returns `(start, end, first_of_hard_line)`.
    fn break_lines(&self, max_width: f32) -> Vec<(usize, usize, bool)> {
        let mut out = Vec::new();
        for (hard_start, hard_end, newline) in self.hard_lines() {
            let mut line_start = hard_start;
            let mut first = true;
            let mut width = self.first_indent;
            let mut last_break: Option<usize> = None;
            let mut j = hard_start;

            while j < hard_end {
                let advance = self.advances[j];
                if self.chars[j].is_whitespace() {
                    width += advance;
                    last_break = Some(j + 1);
                    j += 1;
                    continue;
                }
                if width + advance > max_width && j > line_start {
                    let break_at = match last_break {
                        Some(b) if b > line_start => b,
                        _ => j,
                    };
                    out.push((line_start, break_at, first));
                    first = false;
                    line_start = break_at;
                    width = self.rest_indent + self.advance_sum(break_at, j);
                    last_break = None;
                    continue;
                }
                width += advance;
                j += 1;
            }

            let end = if newline { hard_end + 1 } else { hard_end };
            out.push((line_start, end, first));
        }
        out
    }

    fn line_height_of(&self, start: usize, end: usize) -> f32 {
        self.heights[start..end]
            .iter()
            .copied()
            .reduce(f32::max)
            .unwrap_or(self.base_line_height)
    }
}

impl ParagraphIntrinsics for MonospaceIntrinsics {
    fn min_intrinsic_width(&self) -> f32 {
        self.min_width
    }

    fn max_intrinsic_width(&self) -> f32 {
        self.max_width
    }

    fn has_stale_resolved_fonts(&self) -> bool {
        self.resolver.generation() != self.generation
    }

    fn layout(
        self: Arc<Self>,
        constraints: Constraints,
        max_lines: usize,
        ellipsis: bool,
    ) -> Box<dyn Paragraph> {
        Box::new(MonospaceParagraph::new(self, constraints, max_lines, ellipsis))
    }
}

#[derive(Debug, Clone, Copy)]
struct Line {
    start: usize,
    end: usize,
    visible_end: usize,
    left: f32,
    width: f32,
    top: f32,
    bottom: f32,
    baseline: f32,
    ellipsized: bool,
}

/// A paragraph laid out on the grid.
#[derive(Debug)]
pub struct MonospaceParagraph {
    intrinsics: Arc<MonospaceIntrinsics>,
    lines: Vec<Line>,
    /// `prefix[i]` is the advance of the first `i` characters.
    prefix: Vec<f32>,
    width: f32,
    did_exceed_max_lines: bool,
}

impl MonospaceParagraph {
    fn new(
        intrinsics: Arc<MonospaceIntrinsics>,
        constraints: Constraints,
        max_lines: usize,
        ellipsis: bool,
    ) -> Self {
        let max_width = px_bound(constraints.max_width);
        let max_height = px_bound(constraints.max_height);
        let mut broken = intrinsics.break_lines(max_width);

        let heights: Vec<f32> = broken
            .iter()
            .map(|&(start, end, _)| intrinsics.line_height_of(start, end))
            .collect();

        let mut limit = max_lines.max(1);
        let total_height: f32 = heights.iter().sum();
        if ellipsis && max_height.is_finite() && limit > 1 && total_height > max_height {
            let mut bottom = 0.0;
            let fitting = heights
                .iter()
                .take_while(|&&h| {
                    bottom += h;
                    bottom <= max_height
                })
                .count();
            limit = limit.min(fitting.max(1));
        }

        let did_exceed_max_lines = broken.len() > limit;
        broken.truncate(limit);

        let width = if max_width.is_finite() {
            max_width
        } else {
            broken
                .iter()
                .map(|&(start, end, first)| {
                    let indent = if first {
                        intrinsics.first_indent
                    } else {
                        intrinsics.rest_indent
                    };
                    indent + intrinsics.content_width(start, end)
                })
                .fold(0.0, f32::max)
        };

        let ltr = intrinsics.direction == ResolvedTextDirection::Ltr;
        let mut top = 0.0;
        let last_index = broken.len().saturating_sub(1);
        let lines = broken
            .iter()
            .zip(&heights)
            .enumerate()
            .map(|(index, (&(start, end, first), &height))| {
                let visible_end = intrinsics.visible_end(start, end);
                let content = intrinsics.advance_sum(start, visible_end);
                let indent = if first {
                    intrinsics.first_indent
                } else {
                    intrinsics.rest_indent
                };
                let free = (width - indent - content).max(0.0);
                let shift = match intrinsics.align {
                    TextAlign::Left => 0.0,
                    TextAlign::Right => free,
                    TextAlign::Center => free / 2.0,
                    TextAlign::Start | TextAlign::Justify => {
                        if ltr {
                            0.0
                        } else {
                            free
                        }
                    }
                    TextAlign::End => {
                        if ltr {
                            free
                        } else {
                            0.0
                        }
                    }
                };
                let line = Line {
                    start,
                    end,
                    visible_end,
                    left: if ltr { indent + shift } else { shift },
                    width: content,
                    top,
                    bottom: top + height,
                    baseline: top + ASCENT * height,
                    ellipsized: ellipsis && did_exceed_max_lines && index == last_index,
                };
                top += height;
                line
            })
            .collect();

        let mut prefix = Vec::with_capacity(intrinsics.len() + 1);
        let mut sum = 0.0;
        prefix.push(sum);
        for advance in &intrinsics.advances {
            sum += advance;
            prefix.push(sum);
        }

        Self {
            intrinsics,
            lines,
            prefix,
            width,
            did_exceed_max_lines,
        }
    }

    fn line(&self, index: usize) -> &Line {
        &self.lines[index.min(self.lines.len() - 1)]
    }

    fn x_at(&self, line: &Line, offset: usize) -> f32 {
        let offset = offset.clamp(line.start, line.end);
        let advance = self.prefix[offset] - self.prefix[line.start];
        match self.intrinsics.direction {
            ResolvedTextDirection::Ltr => line.left + advance,
            ResolvedTextDirection::Rtl => line.left + line.width - advance,
        }
    }

    fn span_rect(&self, line: &Line, start: usize, end: usize) -> Rect {
        let a = self.x_at(line, start);
        let b = self.x_at(line, end);
        Rect::from_ltrb(a.min(b), line.top, a.max(b), line.bottom)
    }

    fn placeholder_rect(&self, slot: &PlaceholderSlot) -> Option<Rect> {
        let last = self.lines.last()?;
        if slot.start >= last.end || slot.start >= self.intrinsics.len() {
            return None;
        }
        let line = self.line(self.line_for_offset(slot.start));
        let x = self.x_at(line, slot.start);
        let left = match self.intrinsics.direction {
            ResolvedTextDirection::Ltr => x,
            ResolvedTextDirection::Rtl => x - slot.width,
        };
        let font = self.intrinsics.base_font_size;
        let text_top = line.baseline - ASCENT * font;
        let text_bottom = line.baseline + (1.0 - ASCENT) * font;
        let top = match slot.align {
            PlaceholderVerticalAlign::AboveBaseline => line.baseline - slot.height,
            PlaceholderVerticalAlign::Top => line.top,
            PlaceholderVerticalAlign::Bottom => line.bottom - slot.height,
            PlaceholderVerticalAlign::Center => (line.top + line.bottom - slot.height) / 2.0,
            PlaceholderVerticalAlign::TextTop => text_top,
            PlaceholderVerticalAlign::TextBottom => text_bottom - slot.height,
            PlaceholderVerticalAlign::TextCenter => (text_top + text_bottom - slot.height) / 2.0,
        };
        Some(Rect::from_ltrb(left, top, left + slot.width, top + slot.height))
    }

    fn paint_line(
        &self,
        canvas: &mut dyn Canvas,
        line: &Line,
        color: Color,
        shadow: Option<Shadow>,
        decoration: Option<TextDecoration>,
    ) {
        let chars = &self.intrinsics.chars;
        let mut last_paint = None;
        for run in &self.intrinsics.runs {
            let start = run.start.max(line.start);
            let end = run.end.min(line.visible_end);
            if start >= end {
                continue;
            }
            let rect = self.span_rect(line, start, end);
            let background = run.style.background;
            if background.is_specified() && background.alpha() > 0.0 {
                canvas.draw_rect(rect, background);
            }
            let paint = TextPaint {
                color: if run.span_color.is_specified() {
                    run.span_color
                } else if color.is_specified() {
                    color
                } else {
                    run.style.color.take_or_else(|| Color::BLACK)
                },
                font_size: run.font_size,
                typeface: run.typeface.clone(),
                shadow: shadow.or(run.style.shadow),
                decoration: decoration.or(run.style.text_decoration).unwrap_or_default(),
            };
            let text: String = chars[start..end].iter().collect();
            canvas.draw_text(&text, Offset::new(rect.left, line.baseline), &paint);
            last_paint = Some(paint);
        }

        if line.ellipsized
            && let Some(paint) = last_paint
        {
            let x = self.x_at(line, line.visible_end);
            canvas.draw_text(ELLIPSIS, Offset::new(x, line.baseline), &paint);
        }
    }
}

impl Paragraph for MonospaceParagraph {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.lines.last().map_or(0.0, |line| line.bottom)
    }

    fn min_intrinsic_width(&self) -> f32 {
        self.intrinsics.min_width
    }

    fn max_intrinsic_width(&self) -> f32 {
        self.intrinsics.max_width
    }

    fn first_baseline(&self) -> f32 {
        self.lines.first().map_or(0.0, |line| line.baseline)
    }

    fn last_baseline(&self) -> f32 {
        self.lines.last().map_or(0.0, |line| line.baseline)
    }

    fn did_exceed_max_lines(&self) -> bool {
        self.did_exceed_max_lines
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn placeholder_rects(&self) -> Vec<Option<Rect>> {
        self.intrinsics
            .slots
            .iter()
            .map(|slot| self.placeholder_rect(slot))
            .collect()
    }

    fn path_for_range(&self, start: usize, end: usize) -> Path {
        let mut path = Path::new();
        for line in &self.lines {
            let from = start.max(line.start);
            let to = end.min(line.end);
            if from < to {
                path.add_rect(self.span_rect(line, from, to));
            }
        }
        path
    }

    fn cursor_rect(&self, offset: usize) -> Rect {
        let line = self.line(self.line_for_offset(offset));
        let x = self.x_at(line, offset);
        Rect::from_ltrb(x, line.top, x, line.bottom)
    }

    fn bounding_box(&self, offset: usize) -> Rect {
        let line = self.line(self.line_for_offset(offset));
        self.span_rect(line, offset, offset + 1)
    }

    fn word_boundary(&self, offset: usize) -> TextRange {
        let chars = &self.intrinsics.chars;
        let is_word = |c: char| c.is_alphanumeric() || c == '_';
        let offset = offset.min(chars.len());
        let mut start = offset;
        while start > 0 && is_word(chars[start - 1]) {
            start -= 1;
        }
        let mut end = offset;
        while end < chars.len() && is_word(chars[end]) {
            end += 1;
        }
        TextRange::new(start, end)
    }

    fn horizontal_position(&self, offset: usize, _use_primary_direction: bool) -> f32 {
        let line = self.line(self.line_for_offset(offset));
        self.x_at(line, offset)
    }

    fn paragraph_direction(&self, _offset: usize) -> ResolvedTextDirection {
        self.intrinsics.direction
    }

    fn bidi_run_direction(&self, offset: usize) -> ResolvedTextDirection {
        self.intrinsics
            .chars
            .get(offset)
            .and_then(|&c| strong_direction(c))
            .unwrap_or(self.intrinsics.direction)
    }

    fn offset_for_position(&self, position: Offset) -> usize {
        let index = self.line_for_vertical_position(position.y);
        let line = self.line(index);
        let last = if index + 1 == self.lines.len() {
            line.end
        } else {
            line.end.saturating_sub(1).max(line.start)
        };
        let mut best = line.start;
        let mut best_distance = f32::INFINITY;
        for offset in line.start..=last {
            let distance = (self.x_at(line, offset) - position.x).abs();
            if distance < best_distance {
                best = offset;
                best_distance = distance;
            }
        }
        best
    }

    fn line_for_offset(&self, offset: usize) -> usize {
        self.lines
            .iter()
            .position(|line| offset < line.end)
            .unwrap_or(self.lines.len() - 1)
    }

    fn line_for_vertical_position(&self, vertical: f32) -> usize {
        self.lines
            .iter()
            .position(|line| vertical < line.bottom)
            .unwrap_or(self.lines.len() - 1)
    }

    fn line_left(&self, line: usize) -> f32 {
        self.line(line).left
    }

    fn line_right(&self, line: usize) -> f32 {
        let line = self.line(line);
        line.left + line.width
    }

    fn line_top(&self, line: usize) -> f32 {
        self.line(line).top
    }

    fn line_bottom(&self, line: usize) -> f32 {
        self.line(line).bottom
    }

    fn line_baseline(&self, line: usize) -> f32 {
        self.line(line).baseline
    }

    fn line_start(&self, line: usize) -> usize {
        self.line(line).start
    }

    fn line_end(&self, line: usize, visible_end: bool) -> usize {
        let line = self.line(line);
        if visible_end {
            line.visible_end
        } else {
            line.end
        }
    }

    fn is_line_ellipsized(&self, line: usize) -> bool {
        self.line(line).ellipsized
    }

    fn paint(
        &self,
        canvas: &mut dyn Canvas,
        color: Color,
        shadow: Option<Shadow>,
        decoration: Option<TextDecoration>,
    ) {
        for line in &self.lines {
            self.paint_line(canvas, line, color, shadow, decoration);
        }
    }

    fn paint_brush(
        &self,
        canvas: &mut dyn Canvas,
        brush: &Brush,
        alpha: f32,
        shadow: Option<Shadow>,
        decoration: Option<TextDecoration>,
    ) -> Result<(), LayoutError> {
        let color = brush
            .solid_color()
            .ok_or(LayoutError::Unsupported("gradient brush"))?;
        let color = if alpha.is_nan() {
            color
        } else {
            color.with_alpha(alpha)
        };
        self.paint(canvas, color, shadow, decoration);
        Ok(())
    }
}

/// Split `text` at every character style boundary and merge the styles
/// covering each piece onto `base`.
fn style_runs(
    text: &StyledText,
    base: &SpanStyle,
    density: Density,
    base_font_size: f32,
    resolver: &dyn FontFamilyResolver,
) -> Vec<StyleRun> {
    let len = text.len();
    let mut bounds = vec![0, len];
    for range in text.span_styles() {
        bounds.push(range.start.min(len));
        bounds.push(range.end.min(len));
    }
    bounds.sort_unstable();
    bounds.dedup();

    bounds
        .windows(2)
        .map(|pair| {
            let (start, end) = (pair[0], pair[1]);
            let overlay = text
                .span_styles()
                .iter()
                .filter(|r| r.start <= start && end <= r.end)
                .fold(SpanStyle::default(), |acc, r| acc.merge(Some(&r.item)));
            let font_size = overlay
                .font_size
                .to_px(density, base_font_size)
                .unwrap_or(base_font_size);
            let style = base.merge(Some(&overlay));
            let typeface = resolver.resolve(
                style.font_family.as_ref().unwrap_or(&FontFamily::Default),
                style.font_weight.unwrap_or_default(),
                style.font_style.unwrap_or_default(),
                style.font_synthesis.unwrap_or(FontSynthesis::all()),
            );
            StyleRun {
                start,
                end,
                span_color: overlay.color,
                style,
                font_size,
                typeface,
            }
        })
        .collect()
}

/// Direction of a strong character, `None` for neutral ones.
fn strong_direction(c: char) -> Option<ResolvedTextDirection> {
    let code = u32::from(c);
    if matches!(code, 0x0590..=0x08FF | 0xFB1D..=0xFDFF | 0xFE70..=0xFEFF) {
        Some(ResolvedTextDirection::Rtl)
    } else if c.is_alphabetic() {
        Some(ResolvedTextDirection::Ltr)
    } else {
        None
    }
}

fn first_strong_direction(chars: &[char]) -> Option<ResolvedTextDirection> {
    chars.iter().find_map(|&c| strong_direction(c))
}
