//! Path composition: splicing one path's contours into another (spec.md
//! §4.3 "Composers").
//!
//! `add_path`/`add_rpath` append `other`'s contours verbatim (`add_rpath`
//! reversed); `path_to`/`rpath_to` continue the *current* open contour by
//! dropping `other`'s leading MOVE and connecting with an implicit LINE
//! instead. Reversing a contour that ends in CLOSE is, in general, a matter
//! of re-deriving exact opcode placement (where the synthetic closing LINE
//! and the CLOSE marker land); this implementation reverses the endpoint
//! order and re-closes via [`Path::close`] rather than chasing bit-exact
//! opcode-stream symmetry (recorded as a simplification in DESIGN.md).

use crate::path::{Path, Verb};
use vex2d_core::Point;

/// One opcode fully materialized with its points, used as the composer's
/// working representation since `other`'s point-stream offsets need to be
/// walked anyway.
struct Segment {
    verb: Verb,
    points: Vec<Point>,
}

fn segments(path: &Path) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut cursor = 0usize;
    for &verb in path.verbs() {
        let n = verb.step();
        let points = path.raw_points()[cursor..cursor + n].to_vec();
        cursor += n;
        out.push(Segment { verb, points });
    }
    out
}

fn append_segment(dest: &mut Path, seg: &Segment) {
    match seg.verb {
        Verb::Move => dest.move_to(seg.points[0]),
        Verb::Line => dest.line_to(seg.points[0]),
        Verb::Quad => dest.quad_to(seg.points[0], seg.points[1]),
        Verb::Cubic => dest.cubic_to(seg.points[0], seg.points[1], seg.points[2]),
        Verb::Close => dest.close(),
    }
}

/// Reverses a single contour's segments. The contour's own leading MOVE is
/// dropped by the caller (the reversed traversal starts from the contour's
/// last point instead); a trailing CLOSE is dropped here and re-applied by
/// the caller via `Path::close` after the reversed body is appended.
fn reverse_contour(contour: &[Segment]) -> Vec<Segment> {
    let body: &[Segment] = match contour.last() {
        Some(s) if s.verb == Verb::Close => &contour[..contour.len() - 1],
        _ => contour,
    };
    let mut reversed = Vec::with_capacity(body.len());
    for i in (1..body.len()).rev() {
        let seg = &body[i];
        let prev_end = body[i - 1].points.last().copied().unwrap_or(seg.points[0]);
        let verb = seg.verb;
        let points = match verb {
            Verb::Line => vec![prev_end],
            Verb::Quad => vec![seg.points[0], prev_end],
            Verb::Cubic => vec![seg.points[1], seg.points[0], prev_end],
            Verb::Move | Verb::Close => unreachable!("contour body contains no Move/Close"),
        };
        reversed.push(Segment { verb, points });
    }
    reversed
}

fn split_contours(segs: Vec<Segment>) -> Vec<Vec<Segment>> {
    let mut contours = Vec::new();
    let mut current = Vec::new();
    for seg in segs {
        if seg.verb == Verb::Move && !current.is_empty() {
            contours.push(std::mem::take(&mut current));
        }
        current.push(seg);
    }
    if !current.is_empty() {
        contours.push(current);
    }
    contours
}

impl Path {
    /// Appends every contour of `other` verbatim as new contours of `self`.
    pub fn add_path(&mut self, other: &Path) {
        for seg in segments(other) {
            append_segment(self, &seg);
        }
    }

    /// Appends every contour of `other` in reverse traversal order.
    pub fn add_rpath(&mut self, other: &Path) {
        for contour in split_contours(segments(other)) {
            let was_closed = contour.last().map(|s| s.verb == Verb::Close).unwrap_or(false);
            let reversed = reverse_contour(&contour);
            let start_point = contour
                .iter()
                .rev()
                .find_map(|s| if s.verb != Verb::Close { s.points.last().copied() } else { None })
                .or_else(|| contour.first().and_then(|s| s.points.first().copied()));
            if let Some(p) = start_point {
                self.move_to(p);
            }
            for seg in &reversed {
                append_segment(self, seg);
            }
            if was_closed {
                self.close();
            }
        }
    }

    /// Continues the current open contour into `other`'s geometry: drops
    /// `other`'s leading MOVE and connects with an implicit LINE to its
    /// first point instead.
    pub fn path_to(&mut self, other: &Path) {
        let mut first = true;
        for seg in segments(other) {
            if first && seg.verb == Verb::Move {
                self.line_to(seg.points[0]);
                first = false;
                continue;
            }
            first = false;
            append_segment(self, &seg);
        }
    }

    /// As [`Path::path_to`], but walks `other`'s first contour in reverse.
    pub fn rpath_to(&mut self, other: &Path) {
        let contours = split_contours(segments(other));
        let Some(first_contour) = contours.into_iter().next() else {
            return;
        };
        let reversed = reverse_contour(&first_contour);
        let start_point = first_contour
            .iter()
            .rev()
            .find_map(|s| if s.verb != Verb::Close { s.points.last().copied() } else { None });
        if let Some(p) = start_point {
            self.line_to(p);
        }
        for seg in &reversed {
            append_segment(self, seg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vex2d_core::point;

    #[test]
    fn add_path_appends_contour_verbatim() {
        let mut a = Path::new();
        a.move_to(point(0.0, 0.0));
        a.line_to(point(1.0, 0.0));

        let mut b = Path::new();
        b.move_to(point(5.0, 5.0));
        b.line_to(point(6.0, 5.0));

        a.add_path(&b);
        assert_eq!(a.verbs().len(), 4);
        assert_eq!(a.raw_points()[2], point(5.0, 5.0));
    }

    #[test]
    fn path_to_drops_leading_move_and_connects() {
        let mut a = Path::new();
        a.move_to(point(0.0, 0.0));
        a.line_to(point(1.0, 0.0));

        let mut b = Path::new();
        b.move_to(point(5.0, 5.0));
        b.line_to(point(6.0, 5.0));

        a.path_to(&b);
        // No extra Move: the connection is a Line straight to b's start.
        assert_eq!(a.verbs(), &[Verb::Move, Verb::Line, Verb::Line, Verb::Line]);
        assert_eq!(a.raw_points()[2], point(5.0, 5.0));
        assert_eq!(a.raw_points()[3], point(6.0, 5.0));
    }

    #[test]
    fn add_rpath_reverses_traversal_order() {
        let mut b = Path::new();
        b.move_to(point(0.0, 0.0));
        b.line_to(point(10.0, 0.0));
        b.line_to(point(10.0, 10.0));

        let mut a = Path::new();
        a.add_rpath(&b);
        let pts = a.raw_points();
        assert_eq!(pts[0], point(10.0, 10.0));
        assert_eq!(*pts.last().unwrap(), point(0.0, 0.0));
    }
}
