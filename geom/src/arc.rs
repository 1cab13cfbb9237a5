//! Arc-to-quadratics flattening: the unit circle is approximated by a
//! fixed 8-sector table of quadratic control/end pairs (spec.md §4.2
//! "Arc flattening").

use vex2d_core::{point, Matrix, Num, Point, Scalar};

/// `tan(π/8)`, the control-point offset factor for a 45° sector of the
/// unit circle.
pub const TAN_PI_8: Scalar = approx_tan_pi_8();
/// `√2/2`, the midpoint factor for the 45°/90°/... lattice points.
pub const SQRT2_OVER_2: Scalar = approx_sqrt2_over_2();

// `Scalar` arithmetic isn't `const fn` for the fixed-point representation,
// so these helpers go through `from_f32` at the (tiny, one-time) cost of
// not being true compile-time constants in that configuration.
#[cfg(not(feature = "fixed-point"))]
const fn approx_tan_pi_8() -> Scalar {
    0.414_213_56
}
#[cfg(feature = "fixed-point")]
fn approx_tan_pi_8() -> Scalar {
    Scalar::from_f32(0.414_213_56)
}

#[cfg(not(feature = "fixed-point"))]
const fn approx_sqrt2_over_2() -> Scalar {
    0.707_106_77
}
#[cfg(feature = "fixed-point")]
fn approx_sqrt2_over_2() -> Scalar {
    Scalar::from_f32(0.707_106_77)
}

/// One (control, end) pair of the 8-sector table, each sector spanning 45°
/// of the unit circle in the mathematically-positive (counter-clockwise)
/// direction starting at `(1, 0)`.
fn unit_circle_table() -> [(Point, Point); 8] {
    let k = TAN_PI_8;
    let s2 = SQRT2_OVER_2;
    let one = Scalar::ONE;
    let zero = Scalar::ZERO;
    [
        (point(one, k), point(s2, s2)),
        (point(s2 - s2 * k, s2 + s2 * k), point(zero, one)),
        (point(-k, one), point(-s2, s2)),
        (point(-s2 - s2 * k, s2 - s2 * k), point(-one, zero)),
        (point(-one, -k), point(-s2, -s2)),
        (point(-s2 + s2 * k, -s2 - s2 * k), point(zero, -one)),
        (point(k, -one), point(s2, -s2)),
        (point(s2 + s2 * k, -s2 + s2 * k), point(one, zero)),
    ]
}

const SECTOR_ANGLE_DEG: f32 = 45.0;

/// Flattens an elliptical arc `(center, rx, ry, start_angle, sweep_angle)`
/// (angles in radians) into a sequence of quadratic control/end pairs fed
/// to `emit(ctrl, end)`, per spec.md §4.2 steps 1-5. The caller is expected
/// to already have emitted the arc's start point.
pub fn flatten_arc_quadratics<F: FnMut(Point, Point)>(
    center: Point,
    rx: Scalar,
    ry: Scalar,
    start_angle: Scalar,
    sweep_angle: Scalar,
    emit: &mut F,
) {
    let two_pi = Scalar::from_f32(std::f32::consts::PI * 2.0);
    let sector = Scalar::from_f32(SECTOR_ANGLE_DEG.to_radians());

    let negative = sweep_angle < Scalar::ZERO;
    let flip_y: Scalar = if negative { -Scalar::ONE } else { Scalar::ONE };
    let abs_sweep = sweep_angle.abs().min(two_pi);

    let table = unit_circle_table();
    let mut full_sectors = 0usize;
    {
        let mut remaining = abs_sweep;
        while remaining >= sector && full_sectors < table.len() {
            remaining = remaining - sector;
            full_sectors += 1;
        }
    }
    let remaining = abs_sweep - Scalar::from_f32(full_sectors as f32) * sector;

    // Final affine map: translate(center) . scale(rx,ry) . rotate(start_angle).
    // The (1,-1) flip for the opposite traversal direction is applied to
    // each raw point *before* this map, matching the right-to-left order
    // in spec.md §4.2 step 5.
    let rotate = Matrix::from_sin_cos(start_angle.sin(), start_angle.cos());
    let final_map = Matrix::translate(center.x, center.y)
        .multiply(&Matrix::scale(rx, ry))
        .multiply(&rotate);

    let flip = |p: Point| point(p.x, p.y * flip_y);

    for entry in table.iter().take(full_sectors) {
        let ctrl = flip(entry.0);
        let end = flip(entry.1);
        emit(final_map.apply(ctrl), final_map.apply(end));
    }

    if remaining > Scalar::NEAR0 {
        let theta_start = Scalar::from_f32(full_sectors as f32) * sector;
        let s = theta_start.sin();
        let c = theta_start.cos();
        let half = remaining * Scalar::HALF;
        // tan(a/2) = sin(a) / (1 + cos(a))
        let tan_half = half.sin() / (Scalar::ONE + half.cos());

        // control = rotate(theta_start) . (1, tan_half)
        let ctrl = point(c - s * tan_half, s + c * tan_half);
        let end = point(abs_sweep.cos(), abs_sweep.sin());

        let ctrl = flip(ctrl);
        let end = flip(end);
        emit(final_map.apply(ctrl), final_map.apply(end));
    }
}

/// Convenience: the point on the arc at its very start, matching
/// `Arc::start_point` in `vex2d_core`, used by callers (Path's `add_arc`)
/// to emit the initial `move_to`/`line_to` before flattening begins.
pub fn arc_start_point(center: Point, rx: Scalar, ry: Scalar, start_angle: Scalar) -> Point {
    point(
        center.x + rx * start_angle.cos(),
        center.y + ry * start_angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use vex2d_core::PointExt;

    #[test]
    fn full_circle_closes() {
        // spec.md §8 "Arc closure": a 360 degree sweep closes on itself.
        let center = point(5.0, 5.0);
        let start = arc_start_point(center, 10.0, 10.0, 0.0);
        let mut last = start;
        flatten_arc_quadratics(center, 10.0, 10.0, 0.0, std::f32::consts::PI * 2.0, &mut |_ctrl, end| {
            last = end;
        });
        assert!((last - start).manhattan_len() < 0.05, "arc did not close: {:?} vs {:?}", last, start);
    }

    #[test]
    fn quarter_circle_ends_at_expected_point() {
        let center = point(0.0, 0.0);
        let mut last = point(0.0, 0.0);
        flatten_arc_quadratics(center, 1.0, 1.0, 0.0, std::f32::consts::FRAC_PI_2, &mut |_ctrl, end| {
            last = end;
        });
        assert!((last - point(0.0, 1.0)).manhattan_len() < 0.01);
    }

    #[test]
    fn negative_sweep_goes_the_other_way() {
        let center = point(0.0, 0.0);
        let mut last = point(0.0, 0.0);
        flatten_arc_quadratics(center, 1.0, 1.0, 0.0, -std::f32::consts::FRAC_PI_2, &mut |_ctrl, end| {
            last = end;
        });
        assert!((last - point(0.0, -1.0)).manhattan_len() < 0.01);
    }
}
