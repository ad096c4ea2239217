//! # rich_layout
//!
//! Styled text and multi-paragraph text layout.
//!
//! This library models text carrying layered character styles, paragraph
//! styles and annotations, splits it into paragraphs, lays the paragraphs
//! out through a pluggable single-paragraph backend and caches the results.
//!
//! ## Quick Start
//!
//! ```rust
//! use rich_layout::prelude::*;
//!
//! let mut builder = Builder::new();
//! builder.append("Hello ");
//! builder.with_style(SpanStyle::new().bold(), |b| b.append("World")).unwrap();
//! let text = builder.build().unwrap();
//!
//! let measurer = TextMeasurer::new();
//! let result = measurer
//!     .measure(MeasureRequest::new(text).constraints(Constraints::with_max_width(300)))
//!     .unwrap();
//! assert_eq!(result.line_count(), 1);
//! ```
//!
//! ## Core Concepts
//!
//! - **StyledText**: Immutable text with character style, paragraph style and
//!   annotation ranges
//! - **SpanStyle / ParagraphStyle / TextStyle**: Attributes where unset values
//!   fall back on merge
//! - **ParagraphSegment**: One paragraph of a text with its resolved style
//! - **MultiParagraph**: Paragraphs laid out at one width and stacked
//! - **TextMeasurer**: Entry point that measures text and caches layouts

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod canvas;
pub mod cells;
pub mod color;
pub mod font;
pub mod geometry;
pub mod layout_result;
pub mod logging;
pub mod measure;
pub mod measurer;
pub mod multi_paragraph;
pub mod paragraph;
pub mod paragraph_style;
pub mod segment;
pub mod style;
pub mod sync;
pub mod text;
pub mod text_style;
pub mod units;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::canvas::{Canvas, DrawOp, RecordingCanvas, TextPaint};
    pub use crate::color::{Brush, Color};
    pub use crate::font::{DefaultFontResolver, FontFamilyResolver, Typeface};
    pub use crate::geometry::{Constraints, IntSize, Offset, Path, Rect, Size, TextRange};
    pub use crate::layout_result::{TextLayoutInput, TextLayoutResult, TextOverflow};
    pub use crate::measure::{IntrinsicWidths, MultiParagraphIntrinsics};
    pub use crate::measurer::{MeasureRequest, TextMeasurer, TextMeasurerBuilder};
    pub use crate::multi_paragraph::{LayoutError, MultiParagraph, ParagraphInfo};
    pub use crate::paragraph::{
        MonospaceBackend, Paragraph, ParagraphBackend, ParagraphIntrinsics, Placeholder,
        PlaceholderVerticalAlign, ResolvedTextDirection,
    };
    pub use crate::paragraph_style::{ParagraphStyle, TextAlign, TextDirection, TextIndent};
    pub use crate::segment::{ParagraphSegment, segment};
    pub use crate::style::{
        FontFamily, FontStyle, FontSynthesis, FontWeight, Shadow, SpanStyle, TextDecoration,
    };
    pub use crate::text::{Annotation, Builder, Range, StyledText, TextError};
    pub use crate::text_style::TextStyle;
    pub use crate::units::{Density, LayoutDirection, TextUnit};
}

// Re-export key types at crate root
pub use color::Color;
pub use geometry::Constraints;
pub use layout_result::{TextLayoutResult, TextOverflow};
pub use measurer::{MeasureRequest, TextMeasurer};
pub use multi_paragraph::{LayoutError, MultiParagraph};
pub use style::SpanStyle;
pub use text::{Builder, StyledText};
pub use text_style::TextStyle;
