//! Text measurement entry point.
//!
//! A [`TextMeasurer`] turns a [`MeasureRequest`] into a
//! [`TextLayoutResult`], reusing cached layouts when only paint-time
//! attributes changed.
//!
//! ```rust
//! use rich_layout::prelude::*;
//!
//! let measurer = TextMeasurer::builder().cache_size(16).build();
//! let result = measurer
//!     .measure(MeasureRequest::new("Hello, World!").constraints(Constraints::with_max_width(200)))
//!     .unwrap();
//! assert_eq!(result.line_count(), 1);
//! ```

use std::sync::Arc;

use crate::cache::{CacheKey, TextLayoutCache};
use crate::font::{DefaultFontResolver, FontFamilyResolver};
use crate::geometry::{Constraints, ceil_to_px};
use crate::layout_result::{TextLayoutInput, TextLayoutResult, TextOverflow};
use crate::measure::MultiParagraphIntrinsics;
use crate::multi_paragraph::{LayoutError, MultiParagraph};
use crate::paragraph::{MonospaceBackend, ParagraphBackend, Placeholder};
use crate::text::{Range, StyledText};
use crate::text_style::TextStyle;
use crate::units::{Density, LayoutDirection};

/// Number of layouts a measurer keeps unless configured otherwise.
pub const DEFAULT_CACHE_SIZE: usize = 8;

/// One text to measure and how.
#[derive(Debug, Clone)]
pub struct MeasureRequest {
    text: StyledText,
    style: TextStyle,
    overflow: TextOverflow,
    soft_wrap: bool,
    max_lines: usize,
    placeholders: Vec<Range<Placeholder>>,
    constraints: Constraints,
    layout_direction: Option<LayoutDirection>,
    density: Option<Density>,
    font_resolver: Option<Arc<dyn FontFamilyResolver>>,
    skip_cache: bool,
}

impl MeasureRequest {
    /// Request with soft wrapping, no line limit, unbounded constraints and
    /// the measurer's own direction, density and font resolver.
    #[must_use]
    pub fn new(text: impl Into<StyledText>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
            overflow: TextOverflow::Clip,
            soft_wrap: true,
            max_lines: usize::MAX,
            placeholders: Vec::new(),
            constraints: Constraints::default(),
            layout_direction: None,
            density: None,
            font_resolver: None,
            skip_cache: false,
        }
    }

    #[must_use]
    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn overflow(mut self, overflow: TextOverflow) -> Self {
        self.overflow = overflow;
        self
    }

    #[must_use]
    pub fn soft_wrap(mut self, soft_wrap: bool) -> Self {
        self.soft_wrap = soft_wrap;
        self
    }

    /// Keep at most `max_lines` lines. Must be at least 1.
    #[must_use]
    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Placeholders in character offsets of the whole text.
    #[must_use]
    pub fn placeholders(mut self, placeholders: Vec<Range<Placeholder>>) -> Self {
        self.placeholders = placeholders;
        self
    }

    #[must_use]
    pub fn constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    #[must_use]
    pub fn layout_direction(mut self, direction: LayoutDirection) -> Self {
        self.layout_direction = Some(direction);
        self
    }

    #[must_use]
    pub fn density(mut self, density: Density) -> Self {
        self.density = Some(density);
        self
    }

    #[must_use]
    pub fn font_resolver(mut self, resolver: Arc<dyn FontFamilyResolver>) -> Self {
        self.font_resolver = Some(resolver);
        self
    }

    /// Lay out from scratch instead of reusing a cached layout. The fresh
    /// layout still replaces the cached one.
    #[must_use]
    pub fn skip_cache(mut self, skip: bool) -> Self {
        self.skip_cache = skip;
        self
    }
}

/// Measures text, caching recent layouts.
#[derive(Debug)]
pub struct TextMeasurer {
    cache: Option<TextLayoutCache>,
    density: Density,
    layout_direction: LayoutDirection,
    font_resolver: Arc<dyn FontFamilyResolver>,
    backend: Arc<dyn ParagraphBackend>,
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl TextMeasurer {
    /// Measurer with [`DEFAULT_CACHE_SIZE`] cached layouts, density 1, LTR
    /// layout and the monospace backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> TextMeasurerBuilder {
        TextMeasurerBuilder::default()
    }

    /// The layout cache, `None` when caching is disabled.
    #[must_use]
    pub fn cache(&self) -> Option<&TextLayoutCache> {
        self.cache.as_ref()
    }

    #[must_use]
    pub fn font_resolver(&self) -> &Arc<dyn FontFamilyResolver> {
        &self.font_resolver
    }

    /// Measure `request`.
    ///
    /// A cached layout for an input that differs only in paint-time
    /// attributes is reused; its size is recomputed against the requested
    /// constraints.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::InvalidMaxLines`] if `max_lines` is 0.
    /// - [`LayoutError::Text`] if a placeholder range is reversed or reaches
    ///   past the text.
    /// - [`LayoutError::PlaceholderCrossesParagraph`] if a placeholder spans
    ///   a paragraph boundary.
    pub fn measure(&self, request: MeasureRequest) -> Result<TextLayoutResult, LayoutError> {
        if request.max_lines == 0 {
            return Err(LayoutError::InvalidMaxLines(request.max_lines));
        }

        let input = TextLayoutInput {
            text: request.text,
            style: request.style,
            placeholders: request.placeholders,
            max_lines: request.max_lines,
            soft_wrap: request.soft_wrap,
            overflow: request.overflow,
            density: request.density.unwrap_or(self.density),
            layout_direction: request.layout_direction.unwrap_or(self.layout_direction),
            font_resolver: request
                .font_resolver
                .unwrap_or_else(|| Arc::clone(&self.font_resolver)),
            constraints: request.constraints,
        };

        let Some(cache) = &self.cache else {
            return self.layout(input);
        };

        let key = CacheKey::new(input);
        if request.skip_cache {
            log::trace!("layout cache skipped for {} chars", key.input().text.len());
        } else if let Some(cached) = cache.get(&key) {
            log::trace!("layout cache hit for {} chars", key.input().text.len());
            return Ok(cached.with_input(key.input().clone()));
        } else {
            log::trace!("layout cache miss for {} chars", key.input().text.len());
        }

        let result = self.layout(key.input().clone())?;
        cache.put(key, result.clone());
        Ok(result)
    }

    fn layout(&self, input: TextLayoutInput) -> Result<TextLayoutResult, LayoutError> {
        let intrinsics = MultiParagraphIntrinsics::new(
            &input.text,
            &input.style.resolve_defaults(input.layout_direction),
            &input.placeholders,
            input.density,
            &input.font_resolver,
            self.backend.as_ref(),
        )?;

        let constraints = input.constraints;
        let ellipsis = input.overflow == TextOverflow::Ellipsis;
        let width_matters = input.soft_wrap || ellipsis;
        let max_width = if width_matters && constraints.has_bounded_width() {
            constraints.max_width
        } else {
            Constraints::INFINITY
        };
        // Without soft wrap there is a single line to ellipsize, as long as
        // the text has no hard breaks.
        let max_lines = if !input.soft_wrap && ellipsis {
            1
        } else {
            input.max_lines
        };
        let width = if constraints.min_width == max_width {
            max_width
        } else {
            ceil_to_px(intrinsics.max_intrinsic_width())
                .max(constraints.min_width)
                .min(max_width)
        };
        log::debug!(
            "measuring {} chars at width {width} (max intrinsic {:.1}, max lines {max_lines})",
            input.text.len(),
            intrinsics.max_intrinsic_width()
        );

        let multi_paragraph = MultiParagraph::new(
            Arc::new(intrinsics),
            Constraints::new(0, width, 0, constraints.max_height),
            max_lines,
            ellipsis,
        )?;
        Ok(TextLayoutResult::new(input, Arc::new(multi_paragraph)))
    }
}

/// Configuration for a [`TextMeasurer`].
#[derive(Debug, Clone)]
pub struct TextMeasurerBuilder {
    cache_size: usize,
    density: Density,
    layout_direction: LayoutDirection,
    font_resolver: Option<Arc<dyn FontFamilyResolver>>,
    backend: Option<Arc<dyn ParagraphBackend>>,
}

impl Default for TextMeasurerBuilder {
    fn default() -> Self {
        Self {
            cache_size: DEFAULT_CACHE_SIZE,
            density: Density::default(),
            layout_direction: LayoutDirection::Ltr,
            font_resolver: None,
            backend: None,
        }
    }
}

impl TextMeasurerBuilder {
    /// Number of layouts to keep. 0 disables caching.
    #[must_use]
    pub fn cache_size(mut self, size: usize) -> Self {
        self.cache_size = size;
        self
    }

    /// Density used when a request doesn't set one.
    #[must_use]
    pub fn density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    /// Layout direction used when a request doesn't set one.
    #[must_use]
    pub fn layout_direction(mut self, direction: LayoutDirection) -> Self {
        self.layout_direction = direction;
        self
    }

    /// Font resolver used when a request doesn't set one.
    #[must_use]
    pub fn font_resolver(mut self, resolver: Arc<dyn FontFamilyResolver>) -> Self {
        self.font_resolver = Some(resolver);
        self
    }

    /// Backend laying out single paragraphs.
    #[must_use]
    pub fn backend(mut self, backend: Arc<dyn ParagraphBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    #[must_use]
    pub fn build(self) -> TextMeasurer {
        TextMeasurer {
            cache: TextLayoutCache::with_capacity(self.cache_size),
            density: self.density,
            layout_direction: self.layout_direction,
            font_resolver: self
                .font_resolver
                .unwrap_or_else(|| Arc::new(DefaultFontResolver::new())),
            backend: self
                .backend
                .unwrap_or_else(|| Arc::new(MonospaceBackend::new())),
        }
    }
}
