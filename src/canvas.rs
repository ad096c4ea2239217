//! Rendering surface.
//!
//! Layout results paint through the [`Canvas`] trait. [`RecordingCanvas`]
//! keeps every call as a [`DrawOp`] with coordinates already translated,
//! which is what tests and simple exporters need.

use crate::color::Color;
use crate::font::Typeface;
use crate::geometry::{Offset, Rect};
use crate::style::{Shadow, TextDecoration};

/// Attributes a run of text is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPaint {
    pub color: Color,
    pub font_size: f32,
    pub typeface: Typeface,
    pub shadow: Option<Shadow>,
    pub decoration: TextDecoration,
}

/// A drawing target with a translation stack.
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    /// Draw `text` with its baseline starting at `origin`.
    fn draw_text(&mut self, text: &str, origin: Offset, paint: &TextPaint);
    fn draw_rect(&mut self, rect: Rect, color: Color);
}

/// One recorded call, in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        origin: Offset,
        paint: TextPaint,
    },
    Rect {
        rect: Rect,
        color: Color,
    },
}

/// Canvas that records draw calls instead of rasterizing.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
    translation: Offset,
    saved: Vec<Offset>,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text of every recorded text op, in draw order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Rect { .. } => None,
            })
            .collect()
    }

    /// Current translation.
    #[must_use]
    pub fn translation(&self) -> Offset {
        self.translation
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.saved.push(self.translation);
    }

    fn restore(&mut self) {
        if let Some(translation) = self.saved.pop() {
            self.translation = translation;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.translation = self.translation + Offset::new(dx, dy);
    }

    fn draw_text(&mut self, text: &str, origin: Offset, paint: &TextPaint) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            origin: origin + self.translation,
            paint: paint.clone(),
        });
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::Rect {
            rect: rect.translate(self.translation),
            color,
        });
    }
}
