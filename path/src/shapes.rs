//! Shape adders: convenience constructors that append a whole closed
//! contour in one call and set an exact hint, bypassing the generic
//! detector in `hint.rs` (spec.md §4.3, widened per SPEC_FULL.md §3).

use crate::hint::round_rect_hint;
use crate::path::Path;
use std::f32::consts::FRAC_PI_2;
use vex2d_core::{point, Arc, Circle, Ellipse, Line, Num, Rect, RoundRect, Scalar, Shape, Triangle};

/// Winding direction for a shape adder's generated contour.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Path {
    pub fn add_line(&mut self, p0: vex2d_core::Point, p1: vex2d_core::Point) {
        self.move_to(p0);
        self.line_to(p1);
        self.force_hint(Shape::Line(Line::new(p0, p1)));
    }

    pub fn add_triangle(&mut self, p0: vex2d_core::Point, p1: vex2d_core::Point, p2: vex2d_core::Point) {
        self.move_to(p0);
        self.line_to(p1);
        self.line_to(p2);
        self.close();
        self.force_hint(Shape::Triangle(Triangle::new(p0, p1, p2)));
    }

    pub fn add_rect(&mut self, rect: Rect, direction: Direction) {
        let (tl, tr, br, bl) = (rect.top_left(), rect.top_right(), rect.bottom_right(), rect.bottom_left());
        self.move_to(tl);
        match direction {
            Direction::Clockwise => {
                self.line_to(tr);
                self.line_to(br);
                self.line_to(bl);
            }
            Direction::CounterClockwise => {
                self.line_to(bl);
                self.line_to(br);
                self.line_to(tr);
            }
        }
        self.close();
        self.force_hint(Shape::Rect(rect));
    }

    pub fn add_circle(&mut self, center: vex2d_core::Point, radius: Scalar, direction: Direction) {
        self.add_arc_contour(center, radius, radius, direction);
        self.force_hint(Shape::Circle(Circle::new(center, radius)));
    }

    pub fn add_ellipse(&mut self, center: vex2d_core::Point, rx: Scalar, ry: Scalar, direction: Direction) {
        self.add_arc_contour(center, rx, ry, direction);
        self.force_hint(Shape::Ellipse(Ellipse::new(center, rx, ry)));
    }

    /// Four quarter-turn arcs forming a full closed ellipse/circle.
    fn add_arc_contour(&mut self, center: vex2d_core::Point, rx: Scalar, ry: Scalar, direction: Direction) {
        let quarter = Scalar::from_f32(FRAC_PI_2);
        let sweep = match direction {
            Direction::CounterClockwise => quarter,
            Direction::Clockwise => -quarter,
        };
        let start = vex2d_geom::arc_start_point(center, rx, ry, Scalar::ZERO);
        self.move_to(start);
        let mut angle = Scalar::ZERO;
        for _ in 0..4 {
            vex2d_geom::flatten_arc_quadratics(center, rx, ry, angle, sweep, &mut |ctrl, end| {
                self.quad_to(ctrl, end);
            });
            angle = angle + sweep;
        }
        self.close();
    }

    pub fn add_arc(&mut self, center: vex2d_core::Point, rx: Scalar, ry: Scalar, start_angle: Scalar, sweep_angle: Scalar) {
        self.arc_to(center, rx, ry, start_angle, sweep_angle);
        self.force_hint(Shape::Arc(Arc::new(center, rx, ry, start_angle, sweep_angle)));
    }

    pub fn add_round_rect(&mut self, rr: RoundRect, direction: Direction) {
        if rr.is_rect() {
            self.add_rect(rr.bounds, direction);
            return;
        }
        if rr.is_ellipse() {
            let cx = rr.bounds.x + rr.bounds.w * Scalar::HALF;
            let cy = rr.bounds.y + rr.bounds.h * Scalar::HALF;
            self.add_ellipse(point(cx, cy), rr.bounds.w * Scalar::HALF, rr.bounds.h * Scalar::HALF, direction);
            return;
        }

        let b = rr.bounds;
        let [(tl_x, tl_y), (tr_x, tr_y), (br_x, br_y), (bl_x, bl_y)] = rr.radii;
        let quarter = Scalar::from_f32(FRAC_PI_2);

        // Corner arc centers, clockwise starting at the top-left corner.
        let centers = [
            point(b.left() + tl_x, b.top() + tl_y),
            point(b.right() - tr_x, b.top() + tr_y),
            point(b.right() - br_x, b.bottom() - br_y),
            point(b.left() + bl_x, b.bottom() - bl_y),
        ];
        let radii = [(tl_x, tl_y), (tr_x, tr_y), (br_x, br_y), (bl_x, bl_y)];
        // Starting angle of each corner's quarter-turn, in the clockwise
        // (screen-space, y-down) traversal used here.
        let start_angles = [std::f32::consts::PI, -FRAC_PI_2, 0.0, FRAC_PI_2].map(Scalar::from_f32);

        let start = point(centers[0].x - radii[0].0, centers[0].y);
        self.move_to(start);
        for i in 0..4 {
            let (rx, ry) = radii[i];
            vex2d_geom::flatten_arc_quadratics(centers[i], rx, ry, start_angles[i], quarter, &mut |ctrl, end| {
                self.quad_to(ctrl, end);
            });
        }
        self.close();
        self.force_hint(round_rect_hint(rr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vex2d_core::{point, Rect};

    #[test]
    fn add_rect_sets_rect_hint() {
        let mut p = Path::new();
        let r = Rect::new(0.0, 0.0, 10.0, 5.0);
        p.add_rect(r, Direction::Clockwise);
        assert_eq!(p.hint(), Shape::Rect(r));
        assert!(p.convex());
    }

    #[test]
    fn add_round_rect_with_zero_radii_degenerates_to_rect() {
        let mut p = Path::new();
        let r = Rect::new(0.0, 0.0, 10.0, 5.0);
        p.add_round_rect(RoundRect::uniform(r, 0.0, 0.0), Direction::Clockwise);
        assert_eq!(p.hint(), Shape::Rect(r));
    }

    #[test]
    fn add_circle_produces_closed_convex_contour() {
        let mut p = Path::new();
        p.add_circle(point(0.0, 0.0), 5.0, Direction::CounterClockwise);
        assert!(matches!(p.hint(), Shape::Circle(_)));
        let bounds = p.bounds();
        assert!(bounds.w > 9.5 && bounds.w <= 10.01);
    }

    #[test]
    fn add_triangle_sets_triangle_hint() {
        let mut p = Path::new();
        p.add_triangle(point(0.0, 0.0), point(10.0, 0.0), point(0.0, 10.0));
        assert!(matches!(p.hint(), Shape::Triangle(_)));
        assert!(p.convex());
    }
}
