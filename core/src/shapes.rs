//! Immutable value shapes: Line, Triangle, Circle, Ellipse, Arc, RoundRect,
//! and the tagged `Shape` union used as a Path hint (spec.md §3 "Shape").

use crate::point::{point, Point};
use crate::rect::Rect;
use crate::scalar::Scalar;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line {
    pub p0: Point,
    pub p1: Point,
}

impl Line {
    pub fn new(p0: Point, p1: Point) -> Line {
        Line { p0, p1 }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_ltrb(
            self.p0.x.min(self.p1.x),
            self.p0.y.min(self.p1.y),
            self.p0.x.max(self.p1.x),
            self.p0.y.max(self.p1.y),
        )
    }

    #[inline]
    pub fn is_axis_aligned(&self) -> bool {
        use crate::scalar::Num;
        self.p0.x.near_eq(self.p1.x) || self.p0.y.near_eq(self.p1.y)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
}

impl Triangle {
    pub fn new(p0: Point, p1: Point, p2: Point) -> Triangle {
        Triangle { p0, p1, p2 }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_ltrb(
            self.p0.x.min(self.p1.x).min(self.p2.x),
            self.p0.y.min(self.p1.y).min(self.p2.y),
            self.p0.x.max(self.p1.x).max(self.p2.x),
            self.p0.y.max(self.p1.y).max(self.p2.y),
        )
    }

    /// Signed area, positive for counter-clockwise winding.
    pub fn signed_area(&self) -> Scalar {
        use crate::point::PointExt;
        (self.p1 - self.p0).cross(self.p2 - self.p0) * Scalar::HALF
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: Scalar,
}

impl Circle {
    pub fn new(center: Point, radius: Scalar) -> Circle {
        Circle { center, radius }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_ltrb(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub rx: Scalar,
    pub ry: Scalar,
}

impl Ellipse {
    pub fn new(center: Point, rx: Scalar, ry: Scalar) -> Ellipse {
        Ellipse { center, rx, ry }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_ltrb(
            self.center.x - self.rx,
            self.center.y - self.ry,
            self.center.x + self.rx,
            self.center.y + self.ry,
        )
    }
}

/// `(center, rx, ry, start-angle, sweep-angle)`, angles in radians.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub rx: Scalar,
    pub ry: Scalar,
    pub start_angle: Scalar,
    pub sweep_angle: Scalar,
}

impl Arc {
    pub fn new(center: Point, rx: Scalar, ry: Scalar, start_angle: Scalar, sweep_angle: Scalar) -> Arc {
        Arc {
            center,
            rx,
            ry,
            start_angle,
            sweep_angle,
        }
    }

    pub fn start_point(&self) -> Point {
        point(
            self.center.x + self.rx * self.start_angle.cos(),
            self.center.y + self.ry * self.start_angle.sin(),
        )
    }

    pub fn end_point(&self) -> Point {
        let end_angle = self.start_angle + self.sweep_angle;
        point(
            self.center.x + self.rx * end_angle.cos(),
            self.center.y + self.ry * end_angle.sin(),
        )
    }
}

/// Per-corner radii in top-left, top-right, bottom-right, bottom-left order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoundRect {
    pub bounds: Rect,
    pub radii: [(Scalar, Scalar); 4],
}

impl RoundRect {
    pub fn new(bounds: Rect, radii: [(Scalar, Scalar); 4]) -> RoundRect {
        RoundRect { bounds, radii }
    }

    pub fn uniform(bounds: Rect, rx: Scalar, ry: Scalar) -> RoundRect {
        RoundRect::new(bounds, [(rx, ry); 4])
    }

    #[inline]
    pub fn is_rect(&self) -> bool {
        self.radii.iter().all(|&(rx, ry)| rx <= Scalar::ZERO || ry <= Scalar::ZERO)
    }

    #[inline]
    pub fn is_ellipse(&self) -> bool {
        let half_w = self.bounds.w * Scalar::HALF;
        let half_h = self.bounds.h * Scalar::HALF;
        self.radii.iter().all(|&(rx, ry)| rx >= half_w && ry >= half_h)
    }
}

/// The tagged union a Path caches as its recognized "hint shape"
/// (spec.md §3 "Shape (tagged union)", widened per SPEC_FULL.md §3).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shape {
    None,
    Point(Point),
    Line(Line),
    Rect(Rect),
    RoundRect(RoundRect),
    Triangle(Triangle),
    Circle(Circle),
    Ellipse(Ellipse),
    Arc(Arc),
}

impl Default for Shape {
    fn default() -> Shape {
        Shape::None
    }
}

impl Shape {
    pub fn is_none(&self) -> bool {
        matches!(self, Shape::None)
    }

    /// Whether this hint describes a shape that is inherently convex, used
    /// by the Path convexity detector's fast path (spec.md §4.3).
    pub fn is_convex(&self) -> bool {
        match self {
            Shape::None => false,
            Shape::Point(_) | Shape::Line(_) => true,
            Shape::Rect(_) | Shape::Triangle(_) | Shape::Circle(_) | Shape::Ellipse(_) => true,
            Shape::RoundRect(_) => true,
            Shape::Arc(_) => false,
        }
    }

    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Shape::None => None,
            Shape::Point(p) => Some(Rect::new(p.x, p.y, Scalar::ZERO, Scalar::ZERO)),
            Shape::Line(l) => Some(l.bounds()),
            Shape::Rect(r) => Some(*r),
            Shape::RoundRect(rr) => Some(rr.bounds),
            Shape::Triangle(t) => Some(t.bounds()),
            Shape::Circle(c) => Some(c.bounds()),
            Shape::Ellipse(e) => Some(e.bounds()),
            Shape::Arc(a) => Some(Rect::from_ltrb(
                a.center.x - a.rx,
                a.center.y - a.ry,
                a.center.x + a.rx,
                a.center.y + a.ry,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_rect_zero_radii_is_rect() {
        let rr = RoundRect::uniform(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0, 0.0);
        assert!(rr.is_rect());
        assert!(!rr.is_ellipse());
    }

    #[test]
    fn round_rect_half_extent_radii_is_ellipse() {
        let rr = RoundRect::uniform(Rect::new(0.0, 0.0, 10.0, 10.0), 5.0, 5.0);
        assert!(rr.is_ellipse());
    }

    #[test]
    fn triangle_signed_area_ccw_positive() {
        let t = Triangle::new(point(0.0, 0.0), point(10.0, 0.0), point(0.0, 10.0));
        assert!(t.signed_area() > 0.0);
    }
}
