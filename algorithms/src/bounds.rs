//! Bounding rectangle computation over a polygon or raw point array
//! (spec.md §4 "Bounds"), grounded on lyon_algorithms's `aabb.rs`.

use vex2d_core::{bounds_of, Rect};
use vex2d_path::Polygon;

/// The axis-aligned bounding rectangle of every point in `polygon`, or
/// `None` if it has no contours.
pub fn polygon_bounds(polygon: &Polygon) -> Option<Rect> {
    bounds_of(&polygon.points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vex2d_core::point;

    #[test]
    fn empty_polygon_has_no_bounds() {
        assert_eq!(polygon_bounds(&Polygon::new()), None);
    }

    #[test]
    fn rect_polygon_bounds_matches_scenario_1() {
        // spec.md §8 scenario 1.
        let polygon = Polygon {
            points: vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0), point(0.0, 10.0), point(0.0, 0.0)],
            counts: vec![5, 0],
            convex: true,
        };
        let bounds = polygon_bounds(&polygon).unwrap();
        assert_eq!(bounds, Rect::new(0.0, 0.0, 10.0, 10.0));
    }
}
