//! Adaptive midpoint flattening of cubic Bézier curves, plus the curvature
//! utilities the stroker and flattener share (spec.md §4.2 "Cubic utilities").

use crate::quadratic::DEFAULT_TOLERANCE;
use vex2d_core::{point, Num, Point, PointExt, Scalar};

const MAX_DEPTH: u32 = 24;

/// Flattens a cubic Bézier `(p0, c1, c2, p1)` into a polyline, feeding each
/// emitted endpoint (not `p0`) to `emit`.
pub fn flatten_cubic<F: FnMut(Point)>(p0: Point, c1: Point, c2: Point, p1: Point, tolerance: Scalar, emit: &mut F) {
    flatten_cubic_rec(p0, c1, c2, p1, tolerance, MAX_DEPTH, emit);
}

/// `e = min(|2(c1-p0) + (c1-p2)|, |2(c2-p3) + (c2-p1)|)` on axis sums (L1).
fn flatness_error(p0: Point, c1: Point, c2: Point, p1: Point) -> Scalar {
    let a = (c1 - p0) * Scalar::TWO + (c1 - p1);
    let b = (c2 - p1) * Scalar::TWO + (c2 - p0);
    a.manhattan_len().min(b.manhattan_len())
}

fn flatten_cubic_rec<F: FnMut(Point)>(
    p0: Point,
    c1: Point,
    c2: Point,
    p1: Point,
    tolerance: Scalar,
    depth: u32,
    emit: &mut F,
) {
    if depth == 0 || flatness_error(p0, c1, c2, p1) <= tolerance {
        emit(p1);
        return;
    }

    let (left, right) = chop_at_half_raw(p0, c1, c2, p1);
    flatten_cubic_rec(left.0, left.1, left.2, left.3, tolerance, depth - 1, emit);
    flatten_cubic_rec(right.0, right.1, right.2, right.3, tolerance, depth - 1, emit);
}

type CubicPoints = (Point, Point, Point, Point);

fn lerp(a: Point, b: Point, t: Scalar) -> Point {
    point(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

fn chop_at_raw(p0: Point, c1: Point, c2: Point, p1: Point, t: Scalar) -> (CubicPoints, CubicPoints) {
    let ab = lerp(p0, c1, t);
    let bc = lerp(c1, c2, t);
    let cd = lerp(c2, p1, t);
    let abc = lerp(ab, bc, t);
    let bcd = lerp(bc, cd, t);
    let abcd = lerp(abc, bcd, t);
    ((p0, ab, abc, abcd), (abcd, bcd, cd, p1))
}

fn chop_at_half_raw(p0: Point, c1: Point, c2: Point, p1: Point) -> (CubicPoints, CubicPoints) {
    chop_at_raw(p0, c1, c2, p1, Scalar::HALF)
}

/// A cubic Bézier segment plus the curvature/chopping utilities gbox keeps
/// in a dedicated `cubic.h` (see SPEC_FULL.md §4 supplement).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubicBezier {
    pub p0: Point,
    pub c1: Point,
    pub c2: Point,
    pub p1: Point,
}

impl CubicBezier {
    pub fn new(p0: Point, c1: Point, c2: Point, p1: Point) -> CubicBezier {
        CubicBezier { p0, c1, c2, p1 }
    }

    pub fn sample(&self, t: Scalar) -> Point {
        let one_t = Scalar::ONE - t;
        let a = one_t * one_t * one_t;
        let b = Scalar::from_f32(3.0) * one_t * one_t * t;
        let c = Scalar::from_f32(3.0) * one_t * t * t;
        let d = t * t * t;
        point(
            a * self.p0.x + b * self.c1.x + c * self.c2.x + d * self.p1.x,
            a * self.p0.y + b * self.c1.y + c * self.c2.y + d * self.p1.y,
        )
    }

    /// First derivative at `t` (tangent direction, unnormalized).
    pub fn derivative(&self, t: Scalar) -> Point {
        let one_t = Scalar::ONE - t;
        let three = Scalar::from_f32(3.0);
        let a = three * one_t * one_t;
        let b = Scalar::from_f32(6.0) * one_t * t;
        let c = three * t * t;
        point(
            a * (self.c1.x - self.p0.x) + b * (self.c2.x - self.c1.x) + c * (self.p1.x - self.c2.x),
            a * (self.c1.y - self.p0.y) + b * (self.c2.y - self.c1.y) + c * (self.p1.y - self.c2.y),
        )
    }

    fn second_derivative(&self, t: Scalar) -> Point {
        let six = Scalar::from_f32(6.0);
        let one_t = Scalar::ONE - t;
        let a = six * one_t;
        let b = six * t;
        point(
            a * (self.c2.x - Scalar::TWO * self.c1.x + self.p0.x)
                + b * (self.p1.x - Scalar::TWO * self.c2.x + self.c1.x),
            a * (self.c2.y - Scalar::TWO * self.c1.y + self.p0.y)
                + b * (self.p1.y - Scalar::TWO * self.c2.y + self.c1.y),
        )
    }

    /// Signed curvature at parameter `t`: `(x'y'' - y'x'') / (x'^2+y'^2)^1.5`.
    pub fn curvature_at(&self, t: Scalar) -> Scalar {
        use vex2d_core::PointExt;
        let d1 = self.derivative(t);
        let d2 = self.second_derivative(t);
        let speed_sq = d1.x * d1.x + d1.y * d1.y;
        if speed_sq.near_zero() {
            return Scalar::ZERO;
        }
        let cross = d1.to_vector().cross(d2.to_vector());
        let speed = speed_sq.sqrt();
        cross / (speed_sq * speed)
    }

    /// Splits at parameter `t` into two cubics.
    pub fn chop_at(&self, t: Scalar) -> (CubicBezier, CubicBezier) {
        let (left, right) = chop_at_raw(self.p0, self.c1, self.c2, self.p1, t);
        (
            CubicBezier::new(left.0, left.1, left.2, left.3),
            CubicBezier::new(right.0, right.1, right.2, right.3),
        )
    }

    pub fn chop_at_half(&self) -> (CubicBezier, CubicBezier) {
        self.chop_at(Scalar::HALF)
    }

    /// Splits at the point of maximum absolute curvature, if the curve has
    /// one interior extremum; returns `None` (and the curve unchanged as
    /// its own single "half") when curvature is monotonic, e.g. for a
    /// curve that is actually a straight line or a simple arc-like bow.
    pub fn chop_at_max_curvature(&self) -> (CubicBezier, CubicBezier, Option<Scalar>) {
        const SAMPLES: u32 = 16;
        let mut best_t = Scalar::HALF;
        let mut best_curvature = Scalar::ZERO;
        let mut found = false;
        for i in 1..SAMPLES {
            let t = Scalar::from_f32(i as f32) / Scalar::from_f32(SAMPLES as f32);
            let k = self.curvature_at(t).abs();
            if !found || k > best_curvature {
                best_curvature = k;
                best_t = t;
                found = true;
            }
        }
        let (left, right) = self.chop_at(best_t);
        (left, right, Some(best_t))
    }

    /// Estimates how many flattened segments this curve needs under
    /// `tolerance`, without performing the recursive subdivision. Used by
    /// the stroker to budget offset-curve buffers.
    pub fn divide_count_estimate(&self, tolerance: Scalar) -> u32 {
        let tolerance = if tolerance <= Scalar::ZERO { DEFAULT_TOLERANCE } else { tolerance };
        let error = flatness_error(self.p0, self.c1, self.c2, self.p1);
        if error <= tolerance {
            return 1;
        }
        // Each halving divides the L1 flatness error by ~4 (cubic error
        // term is O(h^2) in arc length for a fixed control polygon).
        let mut count = 1u32;
        let mut e = error;
        while e > tolerance && count < (1 << MAX_DEPTH) {
            e = e * Scalar::from_f32(0.25);
            count *= 2;
        }
        count
    }

    pub fn flatten<F: FnMut(Point)>(&self, tolerance: Scalar, emit: &mut F) {
        flatten_cubic(self.p0, self.c1, self.c2, self.p1, tolerance, emit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_cubic_emits_single_point() {
        let mut out = Vec::new();
        flatten_cubic(
            point(0.0, 0.0),
            point(3.0, 0.0),
            point(6.0, 0.0),
            point(9.0, 0.0),
            DEFAULT_TOLERANCE,
            &mut |p| out.push(p),
        );
        assert_eq!(out, vec![point(9.0, 0.0)]);
    }

    #[test]
    fn curved_cubic_subdivides_and_ends_correctly() {
        let c = CubicBezier::new(point(0.0, 0.0), point(0.0, 100.0), point(100.0, 100.0), point(100.0, 0.0));
        let mut out = Vec::new();
        c.flatten(DEFAULT_TOLERANCE, &mut |p| out.push(p));
        assert!(out.len() > 4);
        assert_eq!(*out.last().unwrap(), point(100.0, 0.0));
    }

    #[test]
    fn chop_at_half_reproduces_sample() {
        let c = CubicBezier::new(point(0.0, 0.0), point(10.0, 40.0), point(40.0, 40.0), point(50.0, 0.0));
        let (left, right) = c.chop_at_half();
        assert!((left.p1 - c.sample(0.5)).manhattan_len() < 1e-3);
        assert!((right.p0 - c.sample(0.5)).manhattan_len() < 1e-3);
    }

    #[test]
    fn divide_count_is_one_for_flat_curve() {
        let c = CubicBezier::new(point(0.0, 0.0), point(3.0, 0.0), point(6.0, 0.0), point(9.0, 0.0));
        assert_eq!(c.divide_count_estimate(DEFAULT_TOLERANCE), 1);
    }
}
