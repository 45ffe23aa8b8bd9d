//! Page-space geometry and interpolation helpers.
//!
//! Coordinates are CSS pixels as `f32`. Rectangles are half-open on their
//! far edges, matching how layout boxes are reported by the host.

/// A point in page or container space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point.
    #[must_use]
    pub fn distance_sq(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and height of a measured box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero, negative, or not a number.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// An axis-aligned rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle at the origin with the given size.
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if a point is inside this rectangle.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.y >= self.top && p.x < self.right() && p.y < self.bottom()
    }

    /// Convert a page-space point to coordinates relative to this rectangle.
    #[must_use]
    pub fn to_local(&self, p: Point) -> Point {
        Point::new(p.x - self.left, p.y - self.top)
    }

    /// Zero area or non-finite bounds.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.left.is_finite() && self.top.is_finite()) || self.size().is_degenerate()
    }

    /// Shrink by `inset` on every side. Never produces negative dimensions.
    #[must_use]
    pub fn inset(&self, inset: f32) -> Rect {
        let width = (self.width - 2.0 * inset).max(0.0);
        let height = (self.height - 2.0 * inset).max(0.0);
        Rect::new(self.left + inset, self.top + inset, width, height)
    }
}

/// Linear interpolation between `a` and `b`.
#[inline]
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp a percentage into `[0, 100]`.
#[inline]
#[must_use]
pub fn clamp_percent(value: f32) -> f32 {
    value.clamp(0.0, 100.0)
}

/// Position a span of `len` starting at `start` inside `[min, max]`.
///
/// When the span fits, the start is clamped so the whole span stays inside.
/// When it does not fit, the span is pinned to `min`, or to `max` when
/// `pin_end` is set.
#[must_use]
#[allow(clippy::neg_cmp_op_on_partial_ord)] // NaN room must take the pinned path
pub fn clamp_span(start: f32, len: f32, min: f32, max: f32, pin_end: bool) -> f32 {
    let room = max - min;
    if !(room >= len) {
        return if pin_end { max - len } else { min };
    }
    // max/min rather than clamp: rounding can leave max - len a hair below min
    start.min(max - len).max(min)
}
