//! Hint-shape recognition and the convexity detector (spec.md §4.3).
//!
//! Both walk the raw opcode/point stream directly rather than going through
//! [`Path::polygon`], which would recurse back into these caches.

use crate::path::{Path, Verb};
use vex2d_core::{point, sign, Line, Rect, RoundRect, Shape, Sign, Triangle};
use vex2d_core::{Num, PointExt, Scalar};

/// Recognizes a handful of primitive single-contour shapes straight from
/// the opcode stream: a lone point, a single line, a closed triangle, or a
/// closed axis-aligned rectangle. Anything richer (round-rect, circle,
/// ellipse, arc) is set directly by the shape adders in `shapes.rs` via
/// `Path::force_hint`, since recovering it from a flattened quad/cubic
/// stream is not attempted here (SPEC_FULL.md §9, Open Question).
pub(crate) fn compute_hint(path: &Path) -> Shape {
    if path.move_count != 1 || path.curve_present {
        return Shape::None;
    }
    let verbs = path.verbs();
    let points = path.raw_points();

    // A lone MOVE: a degenerate point.
    if verbs == [Verb::Move] {
        return Shape::Point(points[0]);
    }

    // MOVE, LINE[, CLOSE]: a single line segment.
    let endpoints = match verbs {
        [Verb::Move, Verb::Line] => &points[..2],
        [Verb::Move, Verb::Line, Verb::Close] => &points[..2],
        _ => return classify_closed_polygon(verbs, points),
    };
    Shape::Line(Line::new(endpoints[0], endpoints[1]))
}

fn classify_closed_polygon(verbs: &[Verb], points: &[vex2d_core::Point]) -> Shape {
    // MOVE, LINE x (n-1), CLOSE with all-LINE body: a closed polygon.
    let is_closed_polygon = verbs.first() == Some(&Verb::Move)
        && verbs.last() == Some(&Verb::Close)
        && verbs[1..verbs.len() - 1].iter().all(|v| *v == Verb::Line);
    if !is_closed_polygon {
        return Shape::None;
    }

    match points.len() {
        3 => Shape::Triangle(Triangle::new(points[0], points[1], points[2])),
        4 => {
            if let Some(rect) = axis_aligned_rect(points) {
                Shape::Rect(rect)
            } else {
                Shape::None
            }
        }
        _ => Shape::None,
    }
}

fn axis_aligned_rect(points: &[vex2d_core::Point]) -> Option<Rect> {
    // Each consecutive edge (including the implicit closing edge) must be
    // purely horizontal or vertical, alternating.
    for i in 0..4 {
        let a = points[i];
        let b = points[(i + 1) % 4];
        if !(a.x.near_eq(b.x) || a.y.near_eq(b.y)) {
            return None;
        }
    }
    let xs: Vec<Scalar> = points.iter().map(|p| p.x).collect();
    let ys: Vec<Scalar> = points.iter().map(|p| p.y).collect();
    let min_x = xs.iter().copied().fold(xs[0], |a, b| a.min(b));
    let max_x = xs.iter().copied().fold(xs[0], |a, b| a.max(b));
    let min_y = ys.iter().copied().fold(ys[0], |a, b| a.min(b));
    let max_y = ys.iter().copied().fold(ys[0], |a, b| a.max(b));
    Some(Rect::from_ltrb(min_x, min_y, max_x, max_y))
}

/// True if the path describes a single convex contour, via the hint fast
/// path where available and a cross-product sign-consistency walk of the
/// endpoint-only contour otherwise (spec.md §4.3 "Convexity detector").
///
/// The running expected sign is only set by a strictly non-zero cross
/// product; a zero (collinear) turn never flips it, matching the
/// tie-break rule recorded in SPEC_FULL.md §9.
pub(crate) fn compute_convex(path: &Path) -> bool {
    let hint = path.hint();
    if !hint.is_none() {
        return hint.is_convex();
    }
    if path.move_count != 1 || !path.is_closed() {
        return false;
    }

    let endpoints = contour_endpoints(path);
    if endpoints.len() < 3 {
        return !endpoints.is_empty();
    }
    is_convex_polygon(&endpoints)
}

/// Collects each opcode's terminal point (control points are skipped),
/// which is sufficient for the sign-consistency convexity test.
fn contour_endpoints(path: &Path) -> Vec<vex2d_core::Point> {
    let mut endpoints = Vec::new();
    let mut cursor = 0usize;
    for &verb in path.verbs() {
        match verb {
            Verb::Move | Verb::Line => {
                endpoints.push(path.raw_points()[cursor]);
                cursor += 1;
            }
            Verb::Quad => {
                endpoints.push(path.raw_points()[cursor + 1]);
                cursor += 2;
            }
            Verb::Cubic => {
                endpoints.push(path.raw_points()[cursor + 2]);
                cursor += 3;
            }
            Verb::Close => {}
        }
    }
    // Drop a duplicated closing point equal to the head.
    if endpoints.len() > 1 && endpoints.first() == endpoints.last() {
        endpoints.pop();
    }
    endpoints
}

fn is_convex_polygon(pts: &[vex2d_core::Point]) -> bool {
    let n = pts.len();
    let mut expected: Option<Sign> = None;
    for i in 0..n {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        let c = pts[(i + 2) % n];
        let cross = (b - a).cross(c - b);
        match sign(cross) {
            Sign::Zero => continue,
            s => match expected {
                None => expected = Some(s),
                Some(e) if e == s => {}
                Some(_) => return false,
            },
        }
    }
    true
}

/// Widened round-rect/circle/ellipse hint construction, used by the shape
/// adders in `shapes.rs` (SPEC_FULL.md §3).
pub(crate) fn round_rect_hint(rr: RoundRect) -> Shape {
    if rr.is_rect() {
        Shape::Rect(rr.bounds)
    } else if rr.is_ellipse() {
        Shape::Ellipse(vex2d_core::Ellipse::new(
            point(rr.bounds.x + rr.bounds.w * Scalar::HALF, rr.bounds.y + rr.bounds.h * Scalar::HALF),
            rr.bounds.w * Scalar::HALF,
            rr.bounds.h * Scalar::HALF,
        ))
    } else {
        Shape::RoundRect(rr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;
    use vex2d_core::point;

    #[test]
    fn single_line_is_recognized() {
        let mut p = Path::new();
        p.move_to(point(0.0, 0.0));
        p.line_to(point(5.0, 5.0));
        assert_eq!(p.hint(), Shape::Line(Line::new(point(0.0, 0.0), point(5.0, 5.0))));
    }

    #[test]
    fn closed_axis_aligned_quad_is_rect() {
        let mut p = Path::new();
        p.move_to(point(0.0, 0.0));
        p.line_to(point(10.0, 0.0));
        p.line_to(point(10.0, 10.0));
        p.line_to(point(0.0, 10.0));
        p.close();
        assert_eq!(p.hint(), Shape::Rect(Rect::from_ltrb(0.0, 0.0, 10.0, 10.0)));
        assert!(p.convex());
    }

    #[test]
    fn concave_star_is_not_convex() {
        let mut p = Path::new();
        let pts = [
            point(0.0, -10.0),
            point(2.0, -2.0),
            point(10.0, 0.0),
            point(2.0, 2.0),
            point(0.0, 10.0),
            point(-2.0, 2.0),
            point(-10.0, 0.0),
            point(-2.0, -2.0),
        ];
        p.move_to(pts[0]);
        for &pt in &pts[1..] {
            p.line_to(pt);
        }
        p.close();
        assert!(!p.convex());
    }

    #[test]
    fn triangle_is_convex() {
        let mut p = Path::new();
        p.move_to(point(0.0, 0.0));
        p.line_to(point(10.0, 0.0));
        p.line_to(point(0.0, 10.0));
        p.close();
        assert!(p.convex());
    }
}
