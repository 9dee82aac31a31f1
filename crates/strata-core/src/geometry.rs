//! Geometric primitives for diagram layout and positioning.
//!
//! This module provides the integer geometric types used throughout Strata
//! for calculating positions, sizes, and bounding boxes of diagram elements.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Insets`] - Padding/margin values for four sides
//!
//! # Coordinate System
//!
//! Strata uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward (positive to the right)
//! - **Y-axis**: Increases downward (positive downward)
//!
//! Every layout call places its canvas at the origin, so coordinates are never
//! negative and are stored as `u32`. A [`Point`] attached to a node always denotes
//! the top-left corner of that node's box. Arithmetic saturates at `u32::MAX`.

use serde::Serialize;

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use strata_core::geometry::Point;
/// let p1 = Point::new(10, 20);
/// let p2 = Point::new(5, 5);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15);
/// assert_eq!(sum.y(), 25);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    x: u32,
    y: u32,
}

impl Point {
    /// Creates a new point with the given coordinates
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of this point
    pub fn x(self) -> u32 {
        self.x
    }

    /// Returns the y-coordinate of this point
    pub fn y(self) -> u32 {
        self.y
    }

    /// Returns a new point with the given x-coordinate
    pub fn with_x(mut self, x: u32) -> Self {
        self.x = x;
        self
    }

    /// Returns a new point with the given y-coordinate
    pub fn with_y(mut self, y: u32) -> Self {
        self.y = y;
        self
    }

    /// Returns true if both coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x.saturating_add(other.x),
            y: self.y.saturating_add(other.y),
        }
    }

    /// Converts a top-left point and size into a bounds rectangle
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_top_left(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    width: u32,
    height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> u32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> u32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Returns a new Size with padding added to both width and height
    ///
    /// The padding is applied according to the specified Insets values
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width.saturating_add(insets.horizontal_sum()),
            height: self.height.saturating_add(insets.vertical_sum()),
        }
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0 && self.height == 0
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
}

impl Bounds {
    /// Creates a new bounds from the top-left corner and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x.saturating_add(size.width),
            max_y: top_left.y.saturating_add(size.height),
        }
    }

    /// Returns the minimum x-coordinate (left edge)
    pub fn min_x(self) -> u32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate (top edge)
    pub fn min_y(self) -> u32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate (right edge)
    pub fn max_x(self) -> u32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate (bottom edge)
    pub fn max_y(self) -> u32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> u32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> u32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds, rounded toward the top-left
    pub fn center(self) -> Point {
        Point {
            x: self.min_x + self.width() / 2,
            y: self.min_y + self.height() / 2,
        }
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use strata_core::geometry::{Bounds, Point, Size};
    /// let header = Bounds::new_from_top_left(Point::new(0, 0), Size::new(100, 30));
    /// let content = Bounds::new_from_top_left(Point::new(10, 40), Size::new(120, 80));
    ///
    /// let combined = header.merge(&content);
    /// assert_eq!(combined.min_x(), 0);
    /// assert_eq!(combined.width(), 130);
    /// assert_eq!(combined.height(), 120);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Moves the bounds by the specified offset.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x.saturating_add(offset.x),
            min_y: self.min_y.saturating_add(offset.y),
            max_x: self.max_x.saturating_add(offset.x),
            max_y: self.max_y.saturating_add(offset.y),
        }
    }

    /// Returns true if `other` lies entirely within these bounds (edges included).
    pub fn contains(&self, other: &Self) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    /// Returns true if the interiors of the two bounds overlap.
    ///
    /// Boxes that merely touch along an edge do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

/// Represents spacing around an element (padding, margin, etc.)
/// with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Insets {
    top: u32,
    right: u32,
    bottom: u32,
    left: u32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: u32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Returns the top inset value
    pub fn top(self) -> u32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> u32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> u32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> u32 {
        self.left
    }

    /// Returns the top-left offset these insets apply to inner content
    pub fn min_point(self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> u32 {
        self.top.saturating_add(self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_default() {
        let point = Point::default();
        assert_eq!(point.x(), 0);
        assert_eq!(point.y(), 0);
        assert!(point.is_zero());
    }

    #[test]
    fn test_point_with() {
        let point = Point::new(1, 2).with_x(7).with_y(9);
        assert_eq!(point, Point::new(7, 9));
    }

    #[test]
    fn test_size_add_padding() {
        let size = Size::new(100, 50).add_padding(Insets::new(10, 5, 20, 15));
        assert_eq!(size.width(), 120);
        assert_eq!(size.height(), 80);
    }

    #[test]
    fn test_bounds_from_top_left() {
        let bounds = Point::new(10, 20).to_bounds(Size::new(30, 40));
        assert_eq!(bounds.min_x(), 10);
        assert_eq!(bounds.min_y(), 20);
        assert_eq!(bounds.max_x(), 40);
        assert_eq!(bounds.max_y(), 60);
        assert_eq!(bounds.to_size(), Size::new(30, 40));
        assert_eq!(bounds.center(), Point::new(25, 40));
    }

    #[test]
    fn test_bounds_translate() {
        let bounds = Bounds::new_from_top_left(Point::new(10, 20), Size::new(50, 30));
        let moved = bounds.translate(Point::new(100, 50));
        assert_eq!(moved.min_point(), Point::new(110, 70));
        assert_eq!(moved.to_size(), bounds.to_size());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let far = Point::new(u32::MAX - 5, 10);
        let bounds = far.to_bounds(Size::new(10, 10));
        assert_eq!(bounds.max_x(), u32::MAX);
        assert_eq!(bounds.max_y(), 20);

        let moved = bounds.translate(Point::new(100, 0));
        assert_eq!(moved.min_x(), u32::MAX);
        assert_eq!(far.add_point(Point::new(u32::MAX, 1)), Point::new(u32::MAX, 11));
        assert_eq!(
            Size::new(u32::MAX, 1).add_padding(Insets::uniform(4)),
            Size::new(u32::MAX, 9)
        );
    }

    #[test]
    fn test_bounds_contains() {
        let outer = Bounds::new_from_top_left(Point::new(0, 0), Size::new(100, 100));
        let inner = Bounds::new_from_top_left(Point::new(10, 10), Size::new(90, 90));
        let outside = Bounds::new_from_top_left(Point::new(10, 10), Size::new(91, 10));

        assert!(outer.contains(&inner));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&outside));
    }

    #[test]
    fn test_bounds_intersects() {
        let a = Bounds::new_from_top_left(Point::new(0, 0), Size::new(10, 10));
        let touching = Bounds::new_from_top_left(Point::new(10, 0), Size::new(10, 10));
        let overlapping = Bounds::new_from_top_left(Point::new(5, 5), Size::new(10, 10));

        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
    }

    #[test]
    fn test_insets() {
        let insets = Insets::new(1, 2, 3, 4);
        assert_eq!(insets.horizontal_sum(), 6);
        assert_eq!(insets.vertical_sum(), 4);
        assert_eq!(insets.min_point(), Point::new(4, 1));
        assert_eq!(Insets::uniform(5), Insets::new(5, 5, 5, 5));
    }
}
