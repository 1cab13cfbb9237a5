//! Axis-aligned bounding rectangle.

use crate::point::{point, Point};
use crate::scalar::{Num, Scalar};

/// An axis-aligned rectangle stored as two corners, always normalized so
/// that `min.x <= max.x` and `min.y <= max.y`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: Scalar,
    pub y: Scalar,
    pub w: Scalar,
    pub h: Scalar,
}

impl Rect {
    #[inline]
    pub fn new(x: Scalar, y: Scalar, w: Scalar, h: Scalar) -> Rect {
        Rect { x, y, w, h }
    }

    #[inline]
    pub fn from_ltrb(left: Scalar, top: Scalar, right: Scalar, bottom: Scalar) -> Rect {
        let x = left.min(right);
        let y = top.min(bottom);
        Rect {
            x,
            y,
            w: (right - left).abs(),
            h: (bottom - top).abs(),
        }
    }

    #[inline]
    pub fn empty() -> Rect {
        Rect::new(Scalar::ZERO, Scalar::ZERO, Scalar::ZERO, Scalar::ZERO)
    }

    #[inline]
    pub fn left(&self) -> Scalar {
        self.x
    }
    #[inline]
    pub fn top(&self) -> Scalar {
        self.y
    }
    #[inline]
    pub fn right(&self) -> Scalar {
        self.x + self.w
    }
    #[inline]
    pub fn bottom(&self) -> Scalar {
        self.y + self.h
    }

    #[inline]
    pub fn top_left(&self) -> Point {
        point(self.left(), self.top())
    }
    #[inline]
    pub fn top_right(&self) -> Point {
        point(self.right(), self.top())
    }
    #[inline]
    pub fn bottom_right(&self) -> Point {
        point(self.right(), self.bottom())
    }
    #[inline]
    pub fn bottom_left(&self) -> Point {
        point(self.left(), self.bottom())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w.near_zero() || self.h.near_zero()
    }

    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Grows this rectangle (in place semantics expressed functionally) to
    /// also cover `p`. Used by the bounds accumulator (§4, "Bounds").
    #[inline]
    pub fn union_point(self, p: Point) -> Rect {
        let left = self.left().min(p.x);
        let top = self.top().min(p.y);
        let right = self.right().max(p.x);
        let bottom = self.bottom().max(p.y);
        Rect::from_ltrb(left, top, right, bottom)
    }

    #[inline]
    pub fn union(self, other: Rect) -> Rect {
        self.union_point(other.top_left()).union_point(other.bottom_right())
    }
}

/// Axis-aligned bounding box over a point array (§4.6 "Bounds").
///
/// Returns `None` for an empty slice (there is no bounds to report), rather
/// than the degenerate zero rectangle, so callers can distinguish "no
/// geometry" from "geometry at the origin".
pub fn bounds_of(points: &[Point]) -> Option<Rect> {
    let mut iter = points.iter();
    let first = *iter.next()?;
    let mut rect = Rect::new(first.x, first.y, Scalar::ZERO, Scalar::ZERO);
    for &p in iter {
        rect = rect.union_point(p);
    }
    Some(rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_point_grows_rect() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let grown = r.union_point(point(20.0, -5.0));
        assert_eq!(grown, Rect::from_ltrb(0.0, -5.0, 20.0, 10.0));
    }

    #[test]
    fn bounds_of_empty_is_none() {
        assert_eq!(bounds_of(&[]), None);
    }

    #[test]
    fn bounds_of_rectangle_scenario() {
        // Scenario 1 from spec.md §8.
        let pts = [
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(10.0, 10.0),
            point(0.0, 10.0),
            point(0.0, 0.0),
        ];
        let b = bounds_of(&pts).unwrap();
        assert_eq!(b, Rect::new(0.0, 0.0, 10.0, 10.0));
    }
}
