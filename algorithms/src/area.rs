//! Signed area of a polygon contour (the shoelace formula), used by the
//! tessellation area-conservation tests and available to callers that
//! want a polygon's area without tessellating it.

use vex2d_core::{Num, Point, Scalar};
use vex2d_path::Polygon;

/// The sum of each contour's signed area (shoelace formula). Positive for
/// a counter-clockwise contour, negative for clockwise, by convention.
pub fn signed_area(polygon: &Polygon) -> Scalar {
    let mut total = Scalar::ZERO;
    for contour in polygon.contours() {
        total = total + contour_signed_area(contour);
    }
    total
}

fn contour_signed_area(pts: &[Point]) -> Scalar {
    let n = pts.len();
    if n < 3 {
        return Scalar::ZERO;
    }
    let mut sum = Scalar::ZERO;
    for i in 0..n {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        sum = sum + (a.x * b.y - b.x * a.y);
    }
    sum * Scalar::HALF
}

#[cfg(test)]
mod tests {
    use super::*;
    use vex2d_core::{point, Num};

    #[test]
    fn ten_by_ten_square_has_area_100() {
        let polygon = Polygon {
            points: vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0), point(0.0, 10.0)],
            counts: vec![4, 0],
            convex: true,
        };
        assert!((signed_area(&polygon).abs() - 100.0).abs() < 1e-3);
    }
}
