//! Unicode character cell widths.
//!
//! The reference paragraph backend measures text on a fixed grid: every
//! character occupies zero, one or two cells (combining marks and control
//! characters take none, CJK and most emoji take two). This module counts
//! those cells.

use unicode_width::UnicodeWidthChar;

/// Cell width of a single character. Control characters, line breaks
/// included, have 0 width.
#[must_use]
pub fn char_cells(c: char) -> usize {
    if c.is_control() {
        0
    } else {
        c.width().unwrap_or(0)
    }
}

/// Total cell width of a string.
#[must_use]
pub fn cell_len(text: &str) -> usize {
    text.chars().map(char_cells).sum()
}

/// Horizontal advance of `c` when one cell is `cell_width` pixels wide.
/// `letter_spacing` is added after every visible character.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "cell counts are 0, 1 or 2")]
pub fn char_advance(c: char, cell_width: f32, letter_spacing: f32) -> f32 {
    match char_cells(c) {
        0 => 0.0,
        cells => cells as f32 * cell_width + letter_spacing,
    }
}
