//! Point and vector value types.
//!
//! Built on top of `euclid`, aliased to the active [`Scalar`](crate::Scalar)
//! representation the way `lyon_path::math` aliases `euclid::default::*` to
//! `f32`.

use crate::scalar::{Num, Scalar};
use euclid::default::{Point2D, Vector2D};

/// A pair of scalars `(x, y)`. Value type, no identity.
pub type Point = Point2D<Scalar>;
/// A displacement `(dx, dy)`.
pub type Vector = Vector2D<Scalar>;

#[inline]
pub fn point(x: Scalar, y: Scalar) -> Point {
    Point::new(x, y)
}

#[inline]
pub fn vector(x: Scalar, y: Scalar) -> Vector {
    Vector::new(x, y)
}

/// Extra operations the geometry pipeline needs that plain `euclid` points
/// don't provide out of the box: the L1 (Manhattan) norm used by the
/// quadratic/cubic flattening error estimators, and the 2D cross product
/// used pervasively by convexity and winding computations.
pub trait PointExt {
    fn manhattan_len(self) -> Scalar;
    fn cross(self, other: Self) -> Scalar;
    fn dot(self, other: Self) -> Scalar;
    fn near_eq(self, other: Self) -> bool;
}

impl PointExt for Point {
    #[inline]
    fn manhattan_len(self) -> Scalar {
        self.x.abs() + self.y.abs()
    }

    #[inline]
    fn cross(self, other: Point) -> Scalar {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    fn dot(self, other: Point) -> Scalar {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    fn near_eq(self, other: Point) -> bool {
        self.x.near_eq(other.x) && self.y.near_eq(other.y)
    }
}

impl PointExt for Vector {
    #[inline]
    fn manhattan_len(self) -> Scalar {
        self.x.abs() + self.y.abs()
    }

    #[inline]
    fn cross(self, other: Vector) -> Scalar {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    fn dot(self, other: Vector) -> Scalar {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    fn near_eq(self, other: Vector) -> bool {
        self.x.near_eq(other.x) && self.y.near_eq(other.y)
    }
}

/// The three-way sign of a scalar, used by the convexity detector's
/// cross-product tie-breaker (`sign(cross) ∈ {−1, 0, +1}`, zero never
/// flips the running expected sign).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

#[inline]
pub fn sign(v: Scalar) -> Sign {
    if v.near_zero() {
        Sign::Zero
    } else if v > Scalar::ZERO {
        Sign::Positive
    } else {
        Sign::Negative
    }
}
