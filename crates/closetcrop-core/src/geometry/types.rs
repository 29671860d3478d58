//! Geometry primitives shared by the calculator, mapper and overlay.
//!
//! All values are `f64`. Screen-space values are in device-independent
//! points; source-space values are in upright (orientation-normalized)
//! source pixels.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero, negative or not finite.
    ///
    /// Derived geometry (fit, coverage, bounds) is undefined for degenerate
    /// sizes and must not be computed from them.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0)
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    pub fn shorter_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Both dimensions multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width as f64, height as f64)
    }
}

/// A 2D point, also used for offsets and translations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `size` whose center is `center`.
    pub fn from_center_size(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True when the rectangle has no positive, finite area.
    pub fn is_degenerate(&self) -> bool {
        !(self.x.is_finite() && self.y.is_finite()) || self.size().is_degenerate()
    }

    /// Whether `other` lies inside `self`, allowing `tolerance` of slack on
    /// every edge.
    pub fn contains_rect(&self, other: &Rect, tolerance: f64) -> bool {
        other.x >= self.x - tolerance
            && other.y >= self.y - tolerance
            && other.max_x() <= self.max_x() + tolerance
            && other.max_y() <= self.max_y() + tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_degenerate() {
        assert!(Size::new(0.0, 10.0).is_degenerate());
        assert!(Size::new(10.0, -1.0).is_degenerate());
        assert!(Size::new(f64::NAN, 10.0).is_degenerate());
        assert!(Size::new(f64::INFINITY, 10.0).is_degenerate());
        assert!(!Size::new(1.0, 1.0).is_degenerate());
    }

    #[test]
    fn test_size_helpers() {
        let size = Size::new(390.0, 600.0);
        assert_eq!(size.shorter_side(), 390.0);
        assert!((size.aspect() - 0.65).abs() < 1e-12);
        assert_eq!(size.scaled(2.0), Size::new(780.0, 1200.0));
        assert_eq!(Size::from((3000, 2000)), Size::new(3000.0, 2000.0));
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(0.5, -3.0);
        assert_eq!(a + b, Point::new(1.5, -1.0));
        assert_eq!(a - b, Point::new(0.5, 5.0));
    }

    #[test]
    fn test_rect_from_center() {
        let rect = Rect::from_center_size(Point::new(195.0, 300.0), Size::new(350.0, 350.0));
        assert_eq!(rect, Rect::new(20.0, 125.0, 350.0, 350.0));
        assert_eq!(rect.center(), Point::new(195.0, 300.0));
        assert_eq!(rect.max_x(), 370.0);
        assert_eq!(rect.max_y(), 475.0);
    }

    #[test]
    fn test_rect_contains() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(&Rect::new(10.0, 10.0, 50.0, 50.0), 0.0));
        assert!(outer.contains_rect(&outer, 0.0));
        assert!(!outer.contains_rect(&Rect::new(-1.0, 0.0, 50.0, 50.0), 0.0));
        assert!(outer.contains_rect(&Rect::new(-1e-9, 0.0, 50.0, 50.0), 1e-6));
    }

    #[test]
    fn test_rect_degenerate() {
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_degenerate());
        assert!(Rect::new(f64::NAN, 0.0, 10.0, 10.0).is_degenerate());
        assert!(!Rect::new(-5.0, -5.0, 10.0, 10.0).is_degenerate());
    }
}
