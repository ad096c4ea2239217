//! Geometric primitives shared by the layout layers.
//!
//! Positions and extents are `f32` pixels. [`Constraints`] and [`IntSize`]
//! use whole pixels, with [`Constraints::INFINITY`] standing in for an
//! unbounded dimension.

use std::fmt;
use std::ops::{Add, Sub};

use smallvec::SmallVec;

/// A point or displacement in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Offset {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new offset.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linearly interpolate between two offsets.
    #[must_use]
    pub fn lerp(start: Self, stop: Self, fraction: f32) -> Self {
        Self {
            x: lerp_f32(start.x, stop.x, fraction),
            y: lerp_f32(start.y, stop.y, fraction),
        }
    }
}

impl Add for Offset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Offset {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A floating point extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A whole-pixel extent, as reported to the caller after constraint clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntSize {
    pub width: u32,
    pub height: u32,
}

impl IntSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for IntSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// An axis-aligned rectangle given by its edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// An empty rectangle at the origin.
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// Create a rectangle from its left, top, right and bottom edges.
    #[must_use]
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size.
    #[must_use]
    pub fn from_origin_size(origin: Offset, size: Size) -> Self {
        Self::from_ltrb(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Returns true if the rectangle encloses no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Move the rectangle by `offset`.
    #[must_use]
    pub fn translate(&self, offset: Offset) -> Self {
        Self::from_ltrb(
            self.left + offset.x,
            self.top + offset.y,
            self.right + offset.x,
            self.bottom + offset.y,
        )
    }

    /// The smallest rectangle enclosing both rectangles.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_ltrb(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }
}

/// A path made of rectangular contours, as produced by range selection
/// queries. Contours are kept in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    contours: SmallVec<[Rect; 4]>,
}

impl Path {
    /// Create an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rectangular contour.
    pub fn add_rect(&mut self, rect: Rect) {
        self.contours.push(rect);
    }

    /// Append all contours of `other`.
    pub fn add_path(&mut self, other: &Self) {
        self.contours.extend_from_slice(&other.contours);
    }

    /// Move every contour by `offset`.
    pub fn translate(&mut self, offset: Offset) {
        for rect in &mut self.contours {
            *rect = rect.translate(offset);
        }
    }

    /// The contours of this path.
    #[must_use]
    pub fn contours(&self) -> &[Rect] {
        &self.contours
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// The bounding box of all contours, or [`Rect::ZERO`] for an empty path.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        let mut iter = self.contours.iter();
        match iter.next() {
            Some(first) => iter.fold(*first, |acc, rect| acc.union(rect)),
            None => Rect::ZERO,
        }
    }
}

/// A range of character offsets. `start` may be greater than `end` for
/// backwards selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The smaller of `start` and `end`.
    #[must_use]
    pub fn min(&self) -> usize {
        self.start.min(self.end)
    }

    /// The larger of `start` and `end`.
    #[must_use]
    pub fn max(&self) -> usize {
        self.start.max(self.end)
    }

    /// Returns true if the range is empty.
    #[must_use]
    pub fn collapsed(&self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.max() - self.min()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collapsed()
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextRange({}, {})", self.start, self.end)
    }
}

/// Minimum and maximum size constraints in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constraints {
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
}

impl Constraints {
    /// Marker for an unbounded dimension.
    pub const INFINITY: u32 = u32::MAX;

    /// Create constraints. Minimums larger than their maximum are lowered
    /// to the maximum.
    #[must_use]
    pub fn new(min_width: u32, max_width: u32, min_height: u32, max_height: u32) -> Self {
        Self {
            min_width: min_width.min(max_width),
            max_width,
            min_height: min_height.min(max_height),
            max_height,
        }
    }

    /// Constraints that only bound the width.
    #[must_use]
    pub fn with_max_width(max_width: u32) -> Self {
        Self::new(0, max_width, 0, Self::INFINITY)
    }

    /// Constraints that only bound width and height from above.
    #[must_use]
    pub fn with_max_size(max_width: u32, max_height: u32) -> Self {
        Self::new(0, max_width, 0, max_height)
    }

    /// Constraints that admit exactly one size.
    #[must_use]
    pub fn fixed(width: u32, height: u32) -> Self {
        Self::new(width, width, height, height)
    }

    #[must_use]
    pub const fn has_bounded_width(&self) -> bool {
        self.max_width != Self::INFINITY
    }

    #[must_use]
    pub const fn has_bounded_height(&self) -> bool {
        self.max_height != Self::INFINITY
    }

    /// Clamp `size` into these constraints.
    #[must_use]
    pub fn constrain(&self, size: IntSize) -> IntSize {
        IntSize::new(
            size.width.clamp(self.min_width, self.max_width),
            size.height.clamp(self.min_height, self.max_height),
        )
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::new(0, Self::INFINITY, 0, Self::INFINITY)
    }
}

/// Round a pixel extent up to whole pixels, saturating at
/// [`Constraints::INFINITY`].
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    reason = "value is clamped into the u32 range first"
)]
pub fn ceil_to_px(value: f32) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= Constraints::INFINITY as f32 {
        Constraints::INFINITY
    } else {
        value.ceil() as u32
    }
}

/// A constraint dimension as pixels, with [`Constraints::INFINITY`] mapped
/// to `f32::INFINITY`.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "pixel extents stay far below 2^24")]
pub fn px_bound(value: u32) -> f32 {
    if value == Constraints::INFINITY {
        f32::INFINITY
    } else {
        value as f32
    }
}

/// Linear interpolation without clamping, so fractions outside `0..=1`
/// extrapolate.
#[must_use]
pub fn lerp_f32(start: f32, stop: f32, fraction: f32) -> f32 {
    (1.0 - fraction) * start + fraction * stop
}

/// Pick `start` below the midpoint and `stop` from it onwards.
#[must_use]
pub fn lerp_discrete<T>(start: T, stop: T, fraction: f32) -> T {
    if fraction < 0.5 { start } else { stop }
}
