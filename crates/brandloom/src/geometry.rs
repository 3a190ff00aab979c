//! Core geometry types.

use serde::{Deserialize, Serialize};

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Move this point away from `anchor` by `factor` times its current
    /// offset. A factor of 1 leaves the point where it is.
    #[inline]
    pub fn scale_about(&self, anchor: Point, factor: f64) -> Point {
        Point::new(
            anchor.x + (self.x - anchor.x) * factor,
            anchor.y + (self.y - anchor.y) * factor,
        )
    }

    #[inline]
    pub fn translate(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Midpoint between this point and another.
    #[inline]
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl Rect {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Shrink by `amount` on every side. Negative sizes collapse to zero.
    pub fn inset(&self, amount: f64) -> Rect {
        Rect::new(
            self.x + amount,
            self.y + amount,
            (self.width - 2.0 * amount).max(0.0),
            (self.height - 2.0 * amount).max(0.0),
        )
    }

    /// Reflect left-right about the vertical line `x = axis`.
    #[inline]
    pub fn reflect_x(&self, axis: f64) -> Rect {
        Rect::new(2.0 * axis - self.right(), self.y, self.width, self.height)
    }

    /// Reflect top-bottom about the horizontal line `y = axis`.
    #[inline]
    pub fn reflect_y(&self, axis: f64) -> Rect {
        Rect::new(self.x, 2.0 * axis - self.bottom(), self.width, self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.distance(p2), 5.0); // 3-4-5 triangle
    }

    #[test]
    fn scale_about_keeps_anchor_fixed() {
        let anchor = Point::new(10.0, 10.0);
        assert_eq!(anchor.scale_about(anchor, 3.0), anchor);
        assert_eq!(Point::new(12.0, 6.0).scale_about(anchor, 2.0), Point::new(14.0, 2.0));
        assert_eq!(Point::new(12.0, 6.0).scale_about(anchor, 1.0), Point::new(12.0, 6.0));
    }

    #[test]
    fn reflection_preserves_size() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        let h = r.reflect_x(50.0);
        assert_eq!(h, Rect::new(60.0, 20.0, 30.0, 40.0));
        let v = r.reflect_y(50.0);
        assert_eq!(v, Rect::new(10.0, 40.0, 30.0, 40.0));
        assert_eq!(h.reflect_x(50.0), r);
    }

    #[test]
    fn inset_collapses_instead_of_inverting() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(r.inset(10.0), Rect::new(10.0, 10.0, 80.0, 30.0));
        assert!(r.inset(30.0).is_empty());
    }
}
