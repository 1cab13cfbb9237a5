//! Offset-curve stroking: widens a path into a filled outline (spec.md
//! §4.6 "Stroker").
//!
//! `done_path` flattens each contour via the path's own polygon cache,
//! offsets every segment by `width/2` along its normal into a left and a
//! right strip, joins consecutive offset segments per the paint's `Join`,
//! caps open contours per its `Cap`, and concatenates left strip + end
//! cap + reversed right strip + start cap into one closed contour handed
//! back as a fillable [`Path`].

use crate::error::StrokerError;
use arrayvec::ArrayVec;
use vex2d_core::{point, Num, Point, PointExt, Scalar};
use vex2d_geom::{flatten_arc_quadratics, flatten_quadratic, DEFAULT_TOLERANCE};
use vex2d_path::{Direction, Path};

/// Flattens an arc into actual polyline points (rather than the raw
/// quadratic control/end pairs `flatten_arc_quadratics` emits), by
/// re-flattening each quadratic sector against the running previous
/// point, and feeds each one to `emit`.
fn emit_arc(center: Point, r: Scalar, start_angle: Scalar, sweep: Scalar, start_point: Point, emit: &mut dyn FnMut(Point)) {
    let mut prev = start_point;
    flatten_arc_quadratics(center, r, r, start_angle, sweep, &mut |ctrl, end| {
        flatten_quadratic(prev, ctrl, end, DEFAULT_TOLERANCE, &mut |p| emit(p));
        prev = end;
    });
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cap {
    Butt,
    Round,
    Square,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Join {
    Miter,
    Round,
    Bevel,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StrokeOptions {
    pub width: Scalar,
    pub cap: Cap,
    pub join: Join,
    pub miter_limit: Scalar,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        StrokeOptions {
            width: Scalar::ONE,
            cap: Cap::Butt,
            join: Join::Miter,
            miter_limit: Scalar::from_f32(4.0),
        }
    }
}

impl StrokeOptions {
    pub fn validate(&self) -> Result<(), StrokerError> {
        if self.miter_limit < Scalar::ONE {
            return Err(StrokerError::InvalidMiterLimit);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct Stroker {
    left: Vec<Point>,
    right: Vec<Point>,
}

impl Stroker {
    pub fn new() -> Stroker {
        Stroker::default()
    }

    /// Strokes every contour of `path`, returning a new fillable path.
    /// Degenerate contours (fewer than 2 distinct points) contribute
    /// nothing, per spec.md §7 "Degenerate geometry".
    pub fn done_path(&mut self, options: &StrokeOptions, path: &Path) -> Result<Path, StrokerError> {
        options.validate()?;
        let polygon = path.polygon();
        let mut out = Path::new();
        for contour in polygon.contours() {
            let closed = is_closed_contour(contour);
            let pts = dedup_contour(contour);
            if pts.len() < 2 {
                continue;
            }
            self.stroke_contour(&pts, closed, options, &mut out);
        }
        Ok(out)
    }

    pub fn done_lines(&mut self, options: &StrokeOptions, points: &[Point]) -> Result<Path, StrokerError> {
        options.validate()?;
        let mut out = Path::new();
        for seg in points.chunks(2) {
            if seg.len() == 2 && !seg[0].near_eq(seg[1]) {
                self.stroke_contour(seg, false, options, &mut out);
            }
        }
        Ok(out)
    }

    pub fn done_points(&mut self, options: &StrokeOptions, points: &[Point]) -> Result<Path, StrokerError> {
        options.validate()?;
        let mut out = Path::new();
        let r = options.width * Scalar::HALF;
        for &p in points {
            out.add_circle(p, r, Direction::Clockwise);
        }
        Ok(out)
    }

    fn stroke_contour(&mut self, pts: &[Point], closed: bool, options: &StrokeOptions, out: &mut Path) {
        let half = options.width * Scalar::HALF;
        let n = pts.len();
        let segment_count = if closed { n } else { n - 1 };

        self.left = build_offset_strip(pts, n, segment_count, half, options);
        self.right = build_offset_strip(pts, n, segment_count, -half, options);

        if self.left.len() < 2 {
            return;
        }

        out.move_to(self.left[0]);
        for &p in &self.left[1..] {
            out.line_to(p);
        }

        if closed {
            out.close();
            out.move_to(self.right[0]);
            for &p in &self.right[1..] {
                out.line_to(p);
            }
            out.close();
        } else {
            emit_cap(out, pts[n - 1], pts[n - 2], half, options.cap);
            for &p in self.right.iter().rev() {
                out.line_to(p);
            }
            emit_cap(out, pts[0], pts[1], half, options.cap);
            out.close();
        }
    }
}

fn is_closed_contour(contour: &[Point]) -> bool {
    contour.len() > 2 && contour.first().unwrap().near_eq(*contour.last().unwrap())
}

fn dedup_contour(contour: &[Point]) -> Vec<Point> {
    let mut pts = contour.to_vec();
    if pts.len() > 1 && pts.first().unwrap().near_eq(*pts.last().unwrap()) {
        pts.pop();
    }
    pts
}

/// The normal to segment `a->b`, scaled to length `half` (sign flips the
/// side: positive is the "left" strip, negative the "right" strip).
fn unit_normal(a: Point, b: Point, half: Scalar) -> Point {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt().max(Scalar::NEAR0);
    point(-dy / len * half, dx / len * half)
}

/// Builds one offset strip (`side_half` positive for the left strip,
/// negative for the right) by walking the contour's segments in order,
/// inserting join geometry at every interior vertex. The wraparound
/// vertex of a closed contour (between its last and first segment) is
/// left as a plain concatenation rather than a joined seam — a
/// documented simplification, see DESIGN.md.
fn build_offset_strip(pts: &[Point], n: usize, segment_count: usize, side_half: Scalar, options: &StrokeOptions) -> Vec<Point> {
    let mut strip = Vec::new();
    for i in 0..segment_count {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        if a.near_eq(b) {
            continue;
        }
        let normal = unit_normal(a, b, side_half);
        let a_off = point(a.x + normal.x, a.y + normal.y);
        let b_off = point(b.x + normal.x, b.y + normal.y);
        if strip.is_empty() {
            strip.push(a_off);
        } else {
            let prev_a = pts[i - 1];
            insert_join(&mut strip, a, prev_a, b, side_half, options);
        }
        strip.push(b_off);
    }
    strip
}

/// Inserts join geometry into `strip` (already containing the incoming
/// offset segment's two endpoints) at the shared pivot `v`, before the
/// outgoing segment's offset points are appended by the next iteration.
fn insert_join(strip: &mut Vec<Point>, v: Point, prev: Point, next: Point, half: Scalar, options: &StrokeOptions) {
    // Offset endpoints: end of the incoming segment's offset, start of the
    // outgoing segment's offset (already the last two points in `strip`
    // before and after this call is wired around by the caller's push
    // order — here we just smooth the seam between them using the last
    // committed point and the immediately-following one).
    let incoming_end = *strip.last().unwrap();
    let outgoing_dir_normal = unit_normal(v, next, half);
    let outgoing_start = point(v.x + outgoing_dir_normal.x, v.y + outgoing_dir_normal.y);

    if incoming_end.near_eq(outgoing_start) {
        return;
    }

    let turn = (v - prev).cross(next - v);
    let is_outer = if half > Scalar::ZERO { turn < Scalar::ZERO } else { turn > Scalar::ZERO };

    if !is_outer {
        // Inner side of the turn: the two offsets overlap, a direct
        // connecting segment is enough (no join shape needed there).
        strip.push(outgoing_start);
        return;
    }

    match options.join {
        Join::Bevel => {
            strip.push(outgoing_start);
        }
        Join::Round => {
            let start_angle = (incoming_end.y - v.y).atan2(incoming_end.x - v.x);
            let sweep = angular_sweep(incoming_end, outgoing_start, v);
            emit_arc(v, half.abs(), start_angle, sweep, incoming_end, &mut |p| strip.push(p));
        }
        Join::Miter => {
            if let Some(tip) = miter_tip(incoming_end, v, outgoing_start) {
                let miter_len = (tip - v).manhattan_len();
                if miter_len <= half.abs() * options.miter_limit {
                    strip.push(tip);
                    strip.push(outgoing_start);
                    return;
                }
            }
            strip.push(outgoing_start);
        }
    }
}

fn angular_sweep(from: Point, to: Point, center: Point) -> Scalar {
    let a0 = (from.y - center.y).atan2(from.x - center.x);
    let a1 = (to.y - center.y).atan2(to.x - center.x);
    let mut sweep = a1 - a0;
    let two_pi = Scalar::from_f32(std::f32::consts::PI * 2.0);
    while sweep > Scalar::from_f32(std::f32::consts::PI) {
        sweep = sweep - two_pi;
    }
    while sweep < -Scalar::from_f32(std::f32::consts::PI) {
        sweep = sweep + two_pi;
    }
    sweep
}

/// Intersection of the two offset lines' directions extended from their
/// endpoints, i.e. the miter tip.
fn miter_tip(e0: Point, pivot: Point, e1: Point) -> Option<Point> {
    let d0 = e0 - pivot;
    let d1 = e1 - pivot;
    let denom = d0.cross(d1);
    if denom.near_zero() {
        return None;
    }
    // Solve e0 + t*d0 == e1 + s*d1 for the point on both offset lines.
    let rhs = e1 - e0;
    let t = rhs.cross(d1) / denom;
    Some(point(e0.x + d0.x * t, e0.y + d0.y * t))
}

fn emit_cap(out: &mut Path, tip: Point, inward: Point, half: Scalar, cap: Cap) {
    match cap {
        Cap::Butt => {}
        Cap::Square => {
            let dir = unit_direction(inward, tip);
            let ext = point(tip.x + dir.x * half, tip.y + dir.y * half);
            let normal = unit_normal(inward, tip, half);
            let mut quad: ArrayVec<Point, 3> = ArrayVec::new();
            quad.push(point(ext.x + normal.x, ext.y + normal.y));
            quad.push(point(ext.x - normal.x, ext.y - normal.y));
            quad.push(point(tip.x - normal.x, tip.y - normal.y));
            for p in quad {
                out.line_to(p);
            }
        }
        Cap::Round => {
            let normal = unit_normal(inward, tip, half);
            let from = point(tip.x + normal.x, tip.y + normal.y);
            let to = point(tip.x - normal.x, tip.y - normal.y);
            let start_angle = (from.y - tip.y).atan2(from.x - tip.x);
            let sweep = -Scalar::from_f32(std::f32::consts::PI);
            emit_arc(tip, half.abs(), start_angle, sweep, from, &mut |p| {
                out.line_to(p);
            });
            out.line_to(to);
        }
    }
}

fn unit_direction(from: Point, to: Point) -> Point {
    let d = to - from;
    let len = (d.x * d.x + d.y * d.y).sqrt().max(Scalar::NEAR0);
    point(d.x / len, d.y / len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vex2d_core::point;

    #[test]
    fn stroking_a_single_line_produces_a_closed_quad() {
        // spec.md §8 "stroke of a single line" scenario.
        let mut path = Path::new();
        path.move_to(point(0.0, 0.0));
        path.line_to(point(10.0, 0.0));

        let options = StrokeOptions {
            width: 2.0,
            cap: Cap::Butt,
            join: Join::Miter,
            miter_limit: 4.0,
        };
        let mut stroker = Stroker::new();
        let outline = stroker.done_path(&options, &path).unwrap();
        let polygon = outline.polygon();
        assert_eq!(polygon.contour_count(), 1);
        let bounds = outline.bounds();
        assert!((bounds.h.to_f32() - 2.0).abs() < 0.1);
        assert!((bounds.w.to_f32() - 10.0).abs() < 0.1);
    }

    #[test]
    fn zero_length_input_produces_empty_path() {
        let path = Path::new();
        let options = StrokeOptions::default();
        let mut stroker = Stroker::new();
        let outline = stroker.done_path(&options, &path).unwrap();
        assert!(outline.is_null());
    }

    #[test]
    fn invalid_miter_limit_is_rejected() {
        let options = StrokeOptions {
            miter_limit: 0.5,
            ..Default::default()
        };
        assert_eq!(options.validate(), Err(StrokerError::InvalidMiterLimit));
    }
}
