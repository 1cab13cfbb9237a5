//! Point-in-polygon testing via winding number (spec.md GLOSSARY "Winding
//! number"; grounded on lyon_algorithms's `hit_test.rs`, adapted from a
//! path-event iterator to this workspace's materialized `Polygon`).

use vex2d_core::{Num, Point, PointExt, Scalar};
use vex2d_path::{FillRule, Polygon};

/// Whether `p` lies inside `polygon` under `fill_rule`.
pub fn hit_test(p: Point, polygon: &Polygon, fill_rule: FillRule) -> bool {
    fill_rule.is_inside(winding_number(p, polygon))
}

/// The winding number of `p` with respect to every contour of `polygon`,
/// summed (spec.md GLOSSARY: "signed count of how many times a closed
/// curve winds around a point").
pub fn winding_number(p: Point, polygon: &Polygon) -> i32 {
    let mut total = 0;
    for contour in polygon.contours() {
        total += winding_number_single(p, contour);
    }
    total
}

fn winding_number_single(p: Point, pts: &[Point]) -> i32 {
    let n = pts.len();
    if n < 2 {
        return 0;
    }
    let mut wn = 0;
    for i in 0..n {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        if a.y <= p.y {
            if b.y > p.y && is_left(a, b, p) > Scalar::ZERO {
                wn += 1;
            }
        } else if b.y <= p.y && is_left(a, b, p) < Scalar::ZERO {
            wn -= 1;
        }
    }
    wn
}

fn is_left(a: Point, b: Point, p: Point) -> Scalar {
    (b - a).cross(p - a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vex2d_core::point;

    fn rect() -> Polygon {
        Polygon {
            points: vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0), point(0.0, 10.0)],
            counts: vec![4, 0],
            convex: true,
        }
    }

    #[test]
    fn center_of_rect_is_inside() {
        assert!(hit_test(point(5.0, 5.0), &rect(), FillRule::NonZero));
    }

    #[test]
    fn point_outside_rect_is_not_inside() {
        assert!(!hit_test(point(20.0, 20.0), &rect(), FillRule::NonZero));
    }
}
