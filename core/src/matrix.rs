//! 3x3 affine transform, stored as six scalars `(sx, kx, ky, sy, tx, ty)`:
//!
//! ```text
//! [x' y' 1]^T = [[sx kx tx] [ky sy ty] [0 0 1]] . [x y 1]^T
//! ```

use crate::point::{point, Point, PointExt, Vector};
use crate::scalar::{pi, Num, Scalar};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    pub sx: Scalar,
    pub kx: Scalar,
    pub ky: Scalar,
    pub sy: Scalar,
    pub tx: Scalar,
    pub ty: Scalar,
}

impl Matrix {
    #[inline]
    pub fn new(sx: Scalar, kx: Scalar, ky: Scalar, sy: Scalar, tx: Scalar, ty: Scalar) -> Matrix {
        Matrix { sx, kx, ky, sy, tx, ty }
    }

    #[inline]
    pub fn identity() -> Matrix {
        Matrix::new(Scalar::ONE, Scalar::ZERO, Scalar::ZERO, Scalar::ONE, Scalar::ZERO, Scalar::ZERO)
    }

    pub fn translate(tx: Scalar, ty: Scalar) -> Matrix {
        Matrix::new(Scalar::ONE, Scalar::ZERO, Scalar::ZERO, Scalar::ONE, tx, ty)
    }

    pub fn scale(sx: Scalar, sy: Scalar) -> Matrix {
        Matrix::new(sx, Scalar::ZERO, Scalar::ZERO, sy, Scalar::ZERO, Scalar::ZERO)
    }

    pub fn scale_about(sx: Scalar, sy: Scalar, px: Scalar, py: Scalar) -> Matrix {
        Matrix::new(sx, Scalar::ZERO, Scalar::ZERO, sy, px - sx * px, py - sy * py)
    }

    pub fn skew(kx: Scalar, ky: Scalar) -> Matrix {
        Matrix::new(Scalar::ONE, kx, ky, Scalar::ONE, Scalar::ZERO, Scalar::ZERO)
    }

    pub fn skew_about(kx: Scalar, ky: Scalar, px: Scalar, py: Scalar) -> Matrix {
        Matrix::new(Scalar::ONE, kx, ky, Scalar::ONE, -kx * py, -ky * px)
    }

    /// Build from a precomputed `(sin, cos)` pair, avoiding a second trig
    /// call when the caller already has one (e.g. the arc flattener).
    pub fn from_sin_cos(s: Scalar, c: Scalar) -> Matrix {
        Matrix::new(c, -s, s, c, Scalar::ZERO, Scalar::ZERO)
    }

    pub fn from_sin_cos_about(s: Scalar, c: Scalar, px: Scalar, py: Scalar) -> Matrix {
        let one_minus_c = Scalar::ONE - c;
        Matrix::new(
            c,
            -s,
            s,
            c,
            s * py + one_minus_c * px,
            -s * px + one_minus_c * py,
        )
    }

    pub fn rotate_degrees(degrees: Scalar) -> Matrix {
        let radians = degrees * pi::<Scalar>() / Scalar::from_f32(180.0);
        Matrix::from_sin_cos(radians.sin(), radians.cos())
    }

    pub fn rotate_degrees_about(degrees: Scalar, px: Scalar, py: Scalar) -> Matrix {
        let radians = degrees * pi::<Scalar>() / Scalar::from_f32(180.0);
        Matrix::from_sin_cos_about(radians.sin(), radians.cos(), px, py)
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.sx == Scalar::ONE
            && self.sy == Scalar::ONE
            && self.kx == Scalar::ZERO
            && self.ky == Scalar::ZERO
            && self.tx == Scalar::ZERO
            && self.ty == Scalar::ZERO
    }

    #[inline]
    pub fn determinant(&self) -> Scalar {
        self.sx * self.sy - self.kx * self.ky
    }

    #[inline]
    pub fn is_invertible(&self) -> bool {
        let near0_cubed = Scalar::NEAR0 * Scalar::NEAR0 * Scalar::NEAR0;
        self.determinant().abs() > near0_cubed
    }

    /// `self.multiply(a)` post-multiplies: the result maps `p -> self . (a . p)`,
    /// i.e. `a` is applied first. Distinct from [`Matrix::multiply_lhs`]; see
    /// spec.md §4.1. Bitwise-identity-short-circuits when either factor is
    /// the identity.
    pub fn multiply(&self, a: &Matrix) -> Matrix {
        if a.is_identity() {
            return *self;
        }
        if self.is_identity() {
            return *a;
        }
        Matrix::new(
            self.sx * a.sx + self.kx * a.ky,
            self.sx * a.kx + self.kx * a.sy,
            self.ky * a.sx + self.sy * a.ky,
            self.ky * a.kx + self.sy * a.sy,
            self.sx * a.tx + self.kx * a.ty + self.tx,
            self.ky * a.tx + self.sy * a.ty + self.ty,
        )
    }

    /// `self.multiply_lhs(a)` pre-multiplies: the result maps `p -> a . (self . p)`.
    pub fn multiply_lhs(&self, a: &Matrix) -> Matrix {
        a.multiply(self)
    }

    /// Inverts this matrix, failing if `|det| <= NEAR0^3` (spec.md §4.1).
    pub fn invert(&self) -> Option<Matrix> {
        if self.is_identity() {
            return Some(*self);
        }
        if !self.is_invertible() {
            return None;
        }

        // Axis-aligned fast path: invert sx/sy independently.
        if self.kx == Scalar::ZERO && self.ky == Scalar::ZERO {
            let inv_sx = Scalar::ONE / self.sx;
            let inv_sy = Scalar::ONE / self.sy;
            return Some(Matrix::new(
                inv_sx,
                Scalar::ZERO,
                Scalar::ZERO,
                inv_sy,
                -self.tx * inv_sx,
                -self.ty * inv_sy,
            ));
        }

        // General path: classical 2x2 adjugate over the determinant.
        let inv_det = Scalar::ONE / self.determinant();
        let sx = self.sy * inv_det;
        let kx = -self.kx * inv_det;
        let ky = -self.ky * inv_det;
        let sy = self.sx * inv_det;
        let tx = (self.kx * self.ty - self.sy * self.tx) * inv_det;
        let ty = (self.ky * self.tx - self.sx * self.ty) * inv_det;
        Some(Matrix::new(sx, kx, ky, sy, tx, ty))
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        point(
            self.sx * p.x + self.kx * p.y + self.tx,
            self.ky * p.x + self.sy * p.y + self.ty,
        )
    }

    /// Transforms a vector (ignores translation).
    #[inline]
    pub fn apply_vector(&self, v: Vector) -> Vector {
        Vector::new(self.sx * v.x + self.kx * v.y, self.ky * v.x + self.sy * v.y)
    }

    pub fn apply_points(&self, points: &[Point]) -> Vec<Point> {
        if self.is_identity() {
            return points.to_vec();
        }
        points.iter().map(|&p| self.apply(p)).collect()
    }

    pub fn apply_points_in_place(&self, points: &mut [Point]) {
        if self.is_identity() {
            return;
        }
        for p in points.iter_mut() {
            *p = self.apply(*p);
        }
    }
}

impl Default for Matrix {
    fn default() -> Matrix {
        Matrix::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_identity() {
        assert!(Matrix::identity().is_identity());
        assert!(!Matrix::translate(1.0, 0.0).is_identity());
    }

    #[test]
    fn multiply_short_circuits_on_identity() {
        let m = Matrix::scale(2.0, 3.0);
        assert_eq!(m.multiply(&Matrix::identity()), m);
        assert_eq!(Matrix::identity().multiply(&m), m);
    }

    #[test]
    fn multiply_is_associative() {
        let a = Matrix::rotate_degrees(37.0);
        let b = Matrix::translate(3.0, -2.0);
        let c = Matrix::scale(1.5, 0.5);
        let p = point(4.0, -1.0);

        let lhs = a.multiply(&b).multiply(&c).apply(p);
        let rhs = a.multiply(&b.multiply(&c)).apply(p);
        assert!(lhs.near_eq(rhs));
    }

    #[test]
    fn invert_round_trips() {
        let m = Matrix::new(2.0, 0.3, -0.4, 1.5, 5.0, -7.0);
        let inv = m.invert().expect("invertible");
        let identity = m.multiply(&inv);
        assert!(identity.sx.near_eq(1.0));
        assert!(identity.sy.near_eq(1.0));
        assert!(identity.kx.near_eq(0.0));
        assert!(identity.ky.near_eq(0.0));
        assert!(identity.tx.near_eq(0.0));
        assert!(identity.ty.near_eq(0.0));

        let identity_lhs = inv.multiply(&m);
        assert!(identity_lhs.sx.near_eq(1.0));
        assert!(identity_lhs.sy.near_eq(1.0));
    }

    #[test]
    fn axis_aligned_fast_path_matches_general_path() {
        let m = Matrix::scale(4.0, 0.25);
        let inv = m.invert().unwrap();
        assert!(inv.sx.near_eq(0.25));
        assert!(inv.sy.near_eq(4.0));
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let m = Matrix::scale(0.0, 1.0);
        assert!(m.invert().is_none());
    }

    #[test]
    fn composition_scenario_from_spec() {
        // spec.md §8 scenario 4: A = rotate(90deg), B = translate(1,0);
        // (A . B) applied to (0,0) == (0,1).
        let a = Matrix::rotate_degrees(90.0);
        let b = Matrix::translate(1.0, 0.0);
        let result = a.multiply(&b).apply(point(0.0, 0.0));
        assert!(result.near_eq(point(0.0, 1.0)));
    }

    #[test]
    fn apply_points_short_circuits_on_identity() {
        let pts = vec![point(1.0, 2.0), point(3.0, 4.0)];
        let out = Matrix::identity().apply_points(&pts);
        assert_eq!(out, pts);
    }
}
