//! Shared texts and measurers.
//!
//! With the default 14sp font at density 1 the monospace backend gives
//! every character a 7px advance and every line a height of 17.5px.

#![allow(dead_code)]

use rich_layout::prelude::*;

pub const CHAR_WIDTH: f32 = 7.0;
pub const LINE_HEIGHT: f32 = 17.5;

/// Three paragraphs of six characters each, the first one left aligned.
pub fn three_lines() -> StyledText {
    StyledText::new(
        "Line 1\nLine 2\nLine 3",
        vec![],
        vec![Range::new(
            ParagraphStyle::new().text_align(TextAlign::Left),
            0,
            6,
        )],
    )
    .expect("valid paragraph ranges")
}

/// "Hello World" with "World" in bold.
pub fn hello_world() -> StyledText {
    let mut builder = Builder::new();
    builder.append("Hello ");
    builder
        .with_style(SpanStyle::new().bold(), |b| b.append("World"))
        .expect("balanced style");
    builder.build().expect("balanced builder")
}

/// Measurer with no layout cache.
pub fn uncached_measurer() -> TextMeasurer {
    TextMeasurer::builder().cache_size(0).build()
}

pub fn measure(text: impl Into<StyledText>, constraints: Constraints) -> TextLayoutResult {
    uncached_measurer()
        .measure(MeasureRequest::new(text).constraints(constraints))
        .expect("layout succeeds")
}
