//! Paragraph segmentation.
//!
//! A [`ParagraphSegment`] is one paragraph's worth of text with its fully
//! merged paragraph style. [`segment`] splits a [`StyledText`] along its
//! paragraph style ranges so the segments tile the whole text.

use std::fmt;

use crate::paragraph_style::ParagraphStyle;
use crate::text::StyledText;

/// One paragraph of a styled text.
///
/// `text` holds only the character styles of the paragraph, rebased to
/// start at 0. `start` and `end` locate the paragraph in the original text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphSegment {
    pub text: StyledText,
    pub style: ParagraphStyle,
    pub start: usize,
    pub end: usize,
}

impl ParagraphSegment {
    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for ParagraphSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{} {:?} {}",
            self.start,
            self.end,
            self.text.text(),
            self.style
        )
    }
}

/// Split `text` into paragraph segments.
///
/// Gaps between paragraph style ranges get `default_style`; a range gets
/// `default_style` merged with its own style. The result always holds at
/// least one segment, even for empty text.
#[must_use]
pub fn segment(text: &StyledText, default_style: &ParagraphStyle) -> Vec<ParagraphSegment> {
    let length = text.len();
    let mut last_offset = 0;
    let mut bounds: Vec<(ParagraphStyle, usize, usize)> = Vec::new();

    for range in text.paragraph_styles() {
        if range.start != last_offset {
            bounds.push((*default_style, last_offset, range.start));
        }
        bounds.push((default_style.merge(Some(&range.item)), range.start, range.end));
        last_offset = range.end;
    }
    if last_offset != length {
        bounds.push((*default_style, last_offset, length));
    }
    if bounds.is_empty() {
        bounds.push((*default_style, 0, 0));
    }

    log::trace!(
        "segmented {} chars into {} paragraph(s)",
        length,
        bounds.len()
    );

    bounds
        .into_iter()
        .map(|(style, start, end)| ParagraphSegment {
            text: text.sub_sequence_span_styles(start, end),
            style,
            start,
            end,
        })
        .collect()
}
