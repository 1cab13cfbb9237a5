//! The append-only path command stream (spec.md §3 "Path", §4.3).

use crate::polygon::Polygon;
use std::cell::RefCell;
use vex2d_core::{bounds_of, point, Matrix, Num, Point, Rect, Scalar, Shape};
use vex2d_geom::{flatten_cubic, flatten_quadratic};

/// One opcode in the command stream. `step()` is how many new points it
/// contributes (spec.md §3): `Move`=1, `Close`=0, `Line`=1, `Quad`=2,
/// `Cubic`=3.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verb {
    Move,
    Close,
    Line,
    Quad,
    Cubic,
}

impl Verb {
    #[inline]
    pub fn step(self) -> usize {
        match self {
            Verb::Move => 1,
            Verb::Close => 0,
            Verb::Line => 1,
            Verb::Quad => 2,
            Verb::Cubic => 3,
        }
    }
}

#[derive(Default)]
pub(crate) struct Caches {
    pub(crate) bounds: Option<Rect>,
    pub(crate) hint: Option<Shape>,
    pub(crate) polygon: Option<Polygon>,
    pub(crate) convex: Option<bool>,
}

impl Caches {
    fn invalidate(&mut self) {
        self.bounds = None;
        self.hint = None;
        self.polygon = None;
        self.convex = None;
    }
}

/// An append-only stream of {MOVE,CLOSE,LINE,QUAD,CUBIC} opcodes and their
/// points, with lazily-computed bounds/hint/polygon/convexity caches.
#[derive(Default)]
pub struct Path {
    pub(crate) verbs: Vec<Verb>,
    pub(crate) points: Vec<Point>,
    /// The starting point of the current contour, for auto-closing.
    pub(crate) contour_head: Option<Point>,
    /// Whether the current contour has already seen a `close()`.
    pub(crate) contour_closed: bool,
    pub(crate) curve_present: bool,
    pub(crate) move_count: usize,
    pub(crate) convex_override: Option<bool>,
    pub(crate) cache: RefCell<Caches>,
}

impl Clone for Path {
    fn clone(&self) -> Path {
        Path {
            verbs: self.verbs.clone(),
            points: self.points.clone(),
            contour_head: self.contour_head,
            contour_closed: self.contour_closed,
            curve_present: self.curve_present,
            move_count: self.move_count,
            convex_override: self.convex_override,
            // Caches are derived data; recompute lazily in the clone
            // rather than paying to clone `Option<Polygon>` eagerly.
            cache: RefCell::new(Caches::default()),
        }
    }
}

impl std::fmt::Debug for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Path")
            .field("verbs", &self.verbs)
            .field("points", &self.points)
            .finish()
    }
}

impl Path {
    pub fn new() -> Path {
        Path::default()
    }

    /// Resets this path to empty, keeping its allocated buffers.
    pub fn clear(&mut self) {
        self.verbs.clear();
        self.points.clear();
        self.contour_head = None;
        self.contour_closed = false;
        self.curve_present = false;
        self.move_count = 0;
        self.convex_override = None;
        self.cache.get_mut().invalidate();
    }

    pub fn copy(&self) -> Path {
        self.clone()
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.verbs.is_empty()
    }

    #[inline]
    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    #[inline]
    pub fn raw_points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn has_curves(&self) -> bool {
        self.curve_present
    }

    #[inline]
    pub fn is_single_contour(&self) -> bool {
        self.move_count <= 1
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.contour_closed
    }

    fn invalidate(&mut self) {
        self.cache.get_mut().invalidate();
    }

    /// Bounding rectangle over every recorded point, including curve
    /// control points — a conservative but cheap bound, since a Bézier
    /// curve always lies within the convex hull of its control points.
    pub fn bounds(&self) -> Rect {
        if let Some(b) = self.cache.borrow().bounds {
            return b;
        }
        let b = bounds_of(&self.points).unwrap_or_else(Rect::empty);
        self.cache.borrow_mut().bounds = Some(b);
        b
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Overwrites the most recently appended point in place without
    /// appending a new opcode. Invalidates caches like any other mutation.
    pub fn set_last(&mut self, p: Point) {
        if let Some(last) = self.points.last_mut() {
            *last = p;
            if self.verbs.last() == Some(&Verb::Move) {
                self.contour_head = Some(p);
            }
            self.invalidate();
        }
    }

    pub fn convex(&self) -> bool {
        if let Some(v) = self.convex_override {
            return v;
        }
        if let Some(v) = self.cache.borrow().convex {
            return v;
        }
        let v = crate::hint::compute_convex(self);
        self.cache.borrow_mut().convex = Some(v);
        v
    }

    /// Explicitly asserts convexity, bypassing the computed detector.
    pub fn set_convex(&mut self, convex: bool) {
        self.convex_override = Some(convex);
    }

    pub fn hint(&self) -> Shape {
        if let Some(h) = self.cache.borrow().hint {
            return h;
        }
        let h = crate::hint::compute_hint(self);
        self.cache.borrow_mut().hint = Some(h);
        h
    }

    /// Sets an explicit hint, used by shape adders on an empty path
    /// (SPEC_FULL.md §3, widened hint detection).
    pub(crate) fn force_hint(&self, shape: Shape) {
        self.cache.borrow_mut().hint = Some(shape);
    }

    pub fn polygon(&self) -> Polygon {
        if let Some(p) = self.cache.borrow().polygon.clone() {
            return p;
        }
        let p = flatten::flatten_path(self);
        self.cache.borrow_mut().polygon = Some(p.clone());
        p
    }

    pub fn apply_matrix(&mut self, m: &Matrix) {
        if m.is_identity() {
            return;
        }
        m.apply_points_in_place(&mut self.points);
        if let Some(head) = self.contour_head {
            self.contour_head = Some(m.apply(head));
        }
        self.invalidate();
    }

    // -- Openers --------------------------------------------------------

    fn begin_contour_if_needed(&mut self) {
        if self.contour_head.is_none() {
            self.move_to(point(Scalar::ZERO, Scalar::ZERO));
        }
    }

    pub fn move_to(&mut self, p: Point) {
        if self.verbs.last() == Some(&Verb::Move) {
            // Consecutive MOVEs collapse: replace the last point.
            *self.points.last_mut().unwrap() = p;
        } else {
            self.verbs.push(Verb::Move);
            self.points.push(p);
            self.move_count += 1;
        }
        self.contour_head = Some(p);
        self.contour_closed = false;
        self.invalidate();
    }

    pub fn line_to(&mut self, p: Point) {
        self.auto_move_after_close();
        self.begin_contour_if_needed();
        self.verbs.push(Verb::Line);
        self.points.push(p);
        self.invalidate();
    }

    pub fn quad_to(&mut self, ctrl: Point, p: Point) {
        self.auto_move_after_close();
        self.begin_contour_if_needed();
        self.verbs.push(Verb::Quad);
        self.points.push(ctrl);
        self.points.push(p);
        self.curve_present = true;
        self.invalidate();
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.auto_move_after_close();
        self.begin_contour_if_needed();
        self.verbs.push(Verb::Cubic);
        self.points.push(c1);
        self.points.push(c2);
        self.points.push(p);
        self.curve_present = true;
        self.invalidate();
    }

    /// Flattens and appends an elliptical arc as quadratic segments
    /// (spec.md §4.2/§4.3 `arc_to`).
    pub fn arc_to(&mut self, center: Point, rx: Scalar, ry: Scalar, start_angle: Scalar, sweep_angle: Scalar) {
        self.auto_move_after_close();
        let start = vex2d_geom::arc_start_point(center, rx, ry, start_angle);
        if self.contour_head.is_none() {
            self.move_to(start);
        } else {
            self.line_to(start);
        }
        vex2d_geom::flatten_arc_quadratics(center, rx, ry, start_angle, sweep_angle, &mut |ctrl, end| {
            self.quad_to(ctrl, end);
        });
    }

    /// A LINE/QUAD/CUBIC appearing immediately after a CLOSE auto-inserts
    /// a MOVE to the last point (spec.md §3 invariants).
    fn auto_move_after_close(&mut self) {
        if self.contour_closed {
            if let Some(head) = self.contour_head {
                self.move_to(head);
            }
        }
    }

    /// Closes the current contour: emits a LINE back to `contour_head`
    /// first if the current point has drifted from it, then a CLOSE
    /// marker (which itself contributes zero points).
    pub fn close(&mut self) {
        if self.contour_closed || self.contour_head.is_none() {
            return;
        }
        let head = self.contour_head.unwrap();
        if let Some(last) = self.last() {
            use vex2d_core::PointExt;
            if !last.near_eq(head) {
                self.verbs.push(Verb::Line);
                self.points.push(head);
            }
        }
        self.verbs.push(Verb::Close);
        self.contour_closed = true;
        self.invalidate();
    }
}

pub(crate) mod flatten {
    use super::*;
    use crate::polygon::Polygon;

    pub fn flatten_path(path: &Path) -> Polygon {
        let mut points = Vec::with_capacity(path.points.len());
        let mut counts = Vec::new();
        let mut contour_len: u32 = 0;
        let mut cursor = 0usize;
        let mut current = point(Scalar::ZERO, Scalar::ZERO);

        for &verb in &path.verbs {
            match verb {
                Verb::Move => {
                    if contour_len > 0 {
                        counts.push(contour_len);
                    }
                    contour_len = 0;
                    current = path.points[cursor];
                    points.push(current);
                    contour_len += 1;
                    cursor += 1;
                }
                Verb::Line => {
                    current = path.points[cursor];
                    points.push(current);
                    contour_len += 1;
                    cursor += 1;
                }
                Verb::Quad => {
                    let ctrl = path.points[cursor];
                    let to = path.points[cursor + 1];
                    flatten_quadratic(current, ctrl, to, vex2d_geom::DEFAULT_TOLERANCE, &mut |p| {
                        points.push(p);
                        contour_len += 1;
                    });
                    current = to;
                    cursor += 2;
                }
                Verb::Cubic => {
                    let c1 = path.points[cursor];
                    let c2 = path.points[cursor + 1];
                    let to = path.points[cursor + 2];
                    flatten_cubic(current, c1, c2, to, vex2d_geom::DEFAULT_TOLERANCE, &mut |p| {
                        points.push(p);
                        contour_len += 1;
                    });
                    current = to;
                    cursor += 3;
                }
                Verb::Close => {
                    // Contributes no points; accounted for by the
                    // enclosing contour.
                }
            }
        }
        if contour_len > 0 {
            counts.push(contour_len);
        }
        counts.push(0);

        Polygon {
            points,
            counts,
            convex: path.convex(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vex2d_core::point;

    #[test]
    fn empty_path_is_null() {
        assert!(Path::new().is_null());
    }

    #[test]
    fn consecutive_moves_collapse() {
        let mut p = Path::new();
        p.move_to(point(0.0, 0.0));
        p.move_to(point(5.0, 5.0));
        assert_eq!(p.verbs().len(), 1);
        assert_eq!(p.raw_points(), &[point(5.0, 5.0)]);
    }

    #[test]
    fn line_after_close_auto_inserts_move() {
        let mut p = Path::new();
        p.move_to(point(0.0, 0.0));
        p.line_to(point(10.0, 0.0));
        p.close();
        p.line_to(point(3.0, 3.0));
        // verbs: Move, Line, Line(auto-close-back), Close, Move, Line
        assert_eq!(
            p.verbs(),
            &[Verb::Move, Verb::Line, Verb::Line, Verb::Close, Verb::Move, Verb::Line]
        );
    }

    #[test]
    fn close_inserts_line_back_to_head_when_needed() {
        let mut p = Path::new();
        p.move_to(point(0.0, 0.0));
        p.line_to(point(10.0, 0.0));
        p.line_to(point(10.0, 10.0));
        p.close();
        assert_eq!(p.verbs(), &[Verb::Move, Verb::Line, Verb::Line, Verb::Line, Verb::Close]);
        assert_eq!(*p.raw_points().last().unwrap(), point(0.0, 0.0));
    }

    #[test]
    fn close_is_idempotent_per_contour() {
        let mut p = Path::new();
        p.move_to(point(0.0, 0.0));
        p.line_to(point(1.0, 1.0));
        p.close();
        let verbs_after_first_close = p.verbs().to_vec();
        p.close();
        assert_eq!(p.verbs(), verbs_after_first_close.as_slice());
    }

    #[test]
    fn mutation_invalidates_bounds_cache() {
        let mut p = Path::new();
        p.move_to(point(0.0, 0.0));
        p.line_to(point(10.0, 0.0));
        let _ = p.bounds();
        p.line_to(point(0.0, 20.0));
        assert_eq!(p.bounds(), Rect::from_ltrb(0.0, 0.0, 10.0, 20.0));
    }

    #[test]
    fn round_trip_move_line_only_path() {
        // spec.md §8 "Path round-trip".
        let mut p = Path::new();
        let pts = [point(0.0, 0.0), point(3.0, 1.0), point(3.0, 4.0), point(-2.0, 4.0)];
        p.move_to(pts[0]);
        for &pt in &pts[1..] {
            p.line_to(pt);
        }
        let polygon = p.polygon();
        let contour: Vec<_> = polygon.contours().next().unwrap().to_vec();
        assert_eq!(contour, pts);
    }

    #[test]
    fn apply_identity_matrix_is_a_no_op() {
        let mut p = Path::new();
        p.move_to(point(1.0, 2.0));
        p.line_to(point(3.0, 4.0));
        let before = p.raw_points().to_vec();
        p.apply_matrix(&Matrix::identity());
        assert_eq!(p.raw_points(), before.as_slice());
    }
}
