//! Point/rectangle value types and intersection math for the desktop
//! coordinate space.
//!
//! Everything in this crate works in **container-relative** pixels; drag
//! gestures that report screen coordinates are converted at the boundary
//! with [`DesktopOffset`].

use serde::{Deserialize, Serialize};

use platform_backend::Position;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
/// A point in container-relative pixels.
pub struct Point {
    /// Horizontal offset from the container's left edge.
    pub x: f64,
    /// Vertical offset from the container's top edge.
    pub y: f64,
}

impl Point {
    /// Creates a point from raw coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point translated by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<Position> for Point {
    fn from(position: Position) -> Self {
        Self {
            x: position.x,
            y: position.y,
        }
    }
}

impl From<Point> for Position {
    fn from(point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
/// An axis-aligned rectangle in container-relative pixels.
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from raw components.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a square rectangle anchored at `origin`.
    pub const fn square(origin: Point, size: f64) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size,
            height: size,
        }
    }

    /// Top-left corner of the rectangle.
    pub const fn origin(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Area in square pixels.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True when the rectangle has no usable extent.
    ///
    /// Zones measured before layout completes report zero rects; callers
    /// treat such zones as absent.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Returns this rectangle grown by `pad` on all four sides.
    pub fn expanded(&self, pad: f64) -> Self {
        Self {
            x: self.x - pad,
            y: self.y - pad,
            width: self.width + 2.0 * pad,
            height: self.height + 2.0 * pad,
        }
    }

    /// Open-interval overlap test (touching edges do not intersect).
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Area of the overlap between two rectangles, zero when disjoint.
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let overlap_w = (self.right().min(other.right()) - self.x.max(other.x)).max(0.0);
        let overlap_h = (self.bottom().min(other.bottom()) - self.y.max(other.y)).max(0.0);
        overlap_w * overlap_h
    }
}

/// Fraction of `drag_box` covered by `target`, in `[0, 1]`.
///
/// The denominator is always the dragged item's own box, so the ratio
/// measures how committed the drop gesture is, independent of target size.
pub fn overlap_ratio(drag_box: &Rect, target: &Rect) -> f64 {
    let area = drag_box.area();
    if area <= 0.0 {
        return 0.0;
    }
    drag_box.intersection_area(target) / area
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
/// Screen-to-container translation for drag reports.
pub struct DesktopOffset {
    /// Screen x of the container's left edge.
    pub x: f64,
    /// Screen y of the container's top edge.
    pub y: f64,
}

impl DesktopOffset {
    /// Converts a screen-coordinate point into container space.
    pub fn to_container(&self, screen: Point) -> Point {
        Point {
            x: screen.x - self.x,
            y: screen.y - self.y,
        }
    }
}

/// Clamps `value` into `[min, max]`, favoring `min` when the range is empty.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}
