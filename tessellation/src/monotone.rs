//! Monotone decomposition and triangulation of a single simple polygon
//! (spec.md §4.5 "Monotone" output mode), plus a Hertel–Mehlhorn merge for
//! "Convex partition" mode.
//!
//! The sweep-line classification algorithm (start/end/split/merge/regular
//! vertices, a helper per active edge) is the textbook one (de Berg et
//! al., *Computational Geometry*, §3.2); the active-edge lookup here is a
//! linear scan rather than a balanced search tree, trading the textbook's
//! `O(n log n)` for a simpler `O(n²)` — acceptable since this tessellator
//! targets correctness on moderate-sized paths, not the asymptotics of a
//! GPU-scale rasterizer.

use vex2d_core::{Num, Point, PointExt, Scalar};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum VertexKind {
    Start,
    End,
    Split,
    Merge,
    RegularUp,
    RegularDown,
}

/// Sweep order: higher `y` first, then lower `x` breaks ties (matches the
/// tessellator's own event order, spec.md §4.5).
fn above(a: Point, b: Point) -> bool {
    a.y > b.y || (a.y.near_eq(b.y) && a.x < b.x)
}

fn classify(prev: Point, v: Point, next: Point) -> VertexKind {
    let v_above_prev = above(v, prev);
    let v_above_next = above(v, next);
    let turn = (v - prev).cross(next - v);
    let convex = turn < Scalar::ZERO; // clockwise turn, y-down convention below

    if v_above_prev && v_above_next {
        if convex {
            VertexKind::Start
        } else {
            VertexKind::Split
        }
    } else if !v_above_prev && !v_above_next {
        if convex {
            VertexKind::End
        } else {
            VertexKind::Merge
        }
    } else if v_above_prev {
        VertexKind::RegularDown
    } else {
        VertexKind::RegularUp
    }
}

struct ActiveEdge {
    lower: usize, // index of the edge's lower endpoint in the ring
    upper: usize,
    helper: usize,
    is_merge_helper: bool,
}

/// Decomposes one simple polygon (given as a closed, non-repeating point
/// ring in either winding direction) into y-monotone sub-polygons, each
/// returned as a point list.
pub fn monotone_decompose(ring: &[Point]) -> Vec<Vec<Point>> {
    let n = ring.len();
    if n < 4 {
        return vec![ring.to_vec()];
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        if above(ring[i], ring[j]) {
            std::cmp::Ordering::Less
        } else if above(ring[j], ring[i]) {
            std::cmp::Ordering::Greater
        } else {
            std::cmp::Ordering::Equal
        }
    });

    let prev = |i: usize| (i + n - 1) % n;
    let next = |i: usize| (i + 1) % n;

    // Diagonals to add, as (i, j) ring-index pairs.
    let mut diagonals: Vec<(usize, usize)> = Vec::new();
    let mut active: Vec<ActiveEdge> = Vec::new();

    // An "edge to the left of v" search: among active edges, the one with
    // the largest x at v's y that is still <= v.x (standard plane-sweep
    // query), scanned linearly.
    let edge_x_at_y = |lo: Point, hi: Point, y: Scalar| -> Scalar {
        if hi.y.near_eq(lo.y) {
            return lo.x.min(hi.x);
        }
        let t = (y - lo.y) / (hi.y - lo.y);
        lo.x + (hi.x - lo.x) * t
    };

    for &vi in &order {
        let kind = classify(ring[prev(vi)], ring[vi], ring[next(vi)]);
        match kind {
            VertexKind::Start => {
                active.push(ActiveEdge {
                    lower: next(vi),
                    upper: vi,
                    helper: vi,
                    is_merge_helper: false,
                });
            }
            VertexKind::End => {
                if let Some(pos) = active.iter().position(|e| e.upper == prev(vi) || e.lower == vi) {
                    if active[pos].is_merge_helper {
                        diagonals.push((vi, active[pos].helper));
                    }
                    active.remove(pos);
                }
            }
            VertexKind::Split => {
                if let Some(pos) = left_edge(&active, ring, vi, edge_x_at_y) {
                    diagonals.push((vi, active[pos].helper));
                    active[pos].helper = vi;
                    active[pos].is_merge_helper = false;
                }
                active.push(ActiveEdge {
                    lower: next(vi),
                    upper: vi,
                    helper: vi,
                    is_merge_helper: false,
                });
            }
            VertexKind::Merge => {
                if let Some(pos) = active.iter().position(|e| e.upper == prev(vi) || e.lower == vi) {
                    if active[pos].is_merge_helper {
                        diagonals.push((vi, active[pos].helper));
                    }
                    active.remove(pos);
                }
                if let Some(pos) = left_edge(&active, ring, vi, edge_x_at_y) {
                    if active[pos].is_merge_helper {
                        diagonals.push((vi, active[pos].helper));
                    }
                    active[pos].helper = vi;
                    active[pos].is_merge_helper = true;
                }
            }
            VertexKind::RegularDown => {
                // Interior is to the right of the edge ending at vi: the
                // edge (prev(vi), vi) leaves the active set, (vi, next(vi))
                // enters.
                if let Some(pos) = active.iter().position(|e| e.upper == prev(vi) || e.lower == vi) {
                    if active[pos].is_merge_helper {
                        diagonals.push((vi, active[pos].helper));
                    }
                    active[pos] = ActiveEdge {
                        lower: next(vi),
                        upper: vi,
                        helper: vi,
                        is_merge_helper: false,
                    };
                }
            }
            VertexKind::RegularUp => {
                if let Some(pos) = left_edge(&active, ring, vi, edge_x_at_y) {
                    if active[pos].is_merge_helper {
                        diagonals.push((vi, active[pos].helper));
                    }
                    active[pos].helper = vi;
                    active[pos].is_merge_helper = false;
                }
            }
        }
    }

    split_by_diagonals(ring, &diagonals)
}

fn left_edge(
    active: &[ActiveEdge],
    ring: &[Point],
    vi: usize,
    edge_x_at_y: impl Fn(Point, Point, Scalar) -> Scalar,
) -> Option<usize> {
    let v = ring[vi];
    let mut best: Option<(usize, Scalar)> = None;
    for (idx, e) in active.iter().enumerate() {
        let lo = ring[e.lower];
        let hi = ring[e.upper];
        let x = edge_x_at_y(lo, hi, v.y);
        if x <= v.x + Scalar::NEAR0 {
            if best.map(|(_, bx)| x > bx).unwrap_or(true) {
                best = Some((idx, x));
            }
        }
    }
    best.map(|(idx, _)| idx)
}

/// Splits `ring` by a set of (index, index) diagonals into simple
/// sub-polygons via a standard doubly-linked "next" splitting walk: each
/// diagonal doubles a pair of vertices and rewires `next` pointers so the
/// two resulting faces stay separately traversable.
fn split_by_diagonals(ring: &[Point], diagonals: &[(usize, usize)]) -> Vec<Vec<Point>> {
    let n = ring.len();
    if diagonals.is_empty() {
        return vec![ring.to_vec()];
    }

    // next_of[k] is a list of possible successors from ring-index k,
    // consumed (and thus traversed without repetition) one at a time.
    let mut next_of: Vec<Vec<usize>> = (0..n).map(|i| vec![(i + 1) % n]).collect();
    for &(a, b) in diagonals {
        next_of[a].push(b);
        next_of[b].push(a);
    }

    let mut visited_edges = std::collections::HashSet::new();
    let mut faces = Vec::new();

    for start in 0..n {
        for k in 0..next_of[start].len() {
            if visited_edges.contains(&(start, next_of[start][k])) {
                continue;
            }
            let mut face = Vec::new();
            let mut cur = start;
            let mut from = usize::MAX;
            loop {
                face.push(ring[cur]);
                // Pick the successor that forms the sharpest right turn
                // relative to the incoming direction, i.e. the
                // planar-graph face-tracing rule.
                let candidates = &next_of[cur];
                let pick = pick_next(ring, from, cur, candidates);
                let edge = (cur, pick);
                if visited_edges.contains(&edge) {
                    break;
                }
                visited_edges.insert(edge);
                from = cur;
                cur = pick;
                if cur == start && face.len() >= 3 {
                    break;
                }
                if face.len() > n + diagonals.len() * 2 + 4 {
                    break; // malformed graph guard
                }
            }
            if face.len() >= 3 {
                faces.push(face);
            }
        }
    }
    if faces.is_empty() {
        vec![ring.to_vec()]
    } else {
        faces
    }
}

fn pick_next(ring: &[Point], from: usize, cur: usize, candidates: &[usize]) -> usize {
    if from == usize::MAX || candidates.len() == 1 {
        return candidates[0];
    }
    let incoming = ring[cur] - ring[from];
    let mut best = candidates[0];
    let mut best_angle = None;
    for &cand in candidates {
        if cand == from {
            continue;
        }
        let outgoing = ring[cand] - ring[cur];
        let cross = incoming.cross(outgoing);
        let dot = incoming.dot(outgoing);
        let angle = cross.atan2(dot);
        if best_angle.map(|a| angle < a).unwrap_or(true) {
            best_angle = Some(angle);
            best = cand;
        }
    }
    best
}

/// Fan/ear-clip triangulation of a single y-monotone polygon, via the
/// classic linear-time stack algorithm (de Berg et al. §3.2).
pub fn triangulate_monotone(poly: &[Point]) -> Vec<[Point; 3]> {
    let n = poly.len();
    if n < 3 {
        return Vec::new();
    }
    if n == 3 {
        return vec![[poly[0], poly[1], poly[2]]];
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        if above(poly[i], poly[j]) {
            std::cmp::Ordering::Less
        } else {
            std::cmp::Ordering::Greater
        }
    });

    // Determine, for each vertex, whether it's on the "left" or "right"
    // chain relative to the topmost/bottommost vertices.
    let top = order[0];
    let bottom = order[n - 1];
    let mut on_left = vec![false; n];
    {
        let mut i = (top + 1) % n;
        while i != bottom {
            on_left[i] = true;
            i = (i + 1) % n;
        }
    }

    let mut triangles = Vec::new();
    let mut stack: Vec<usize> = vec![order[0], order[1]];
    for &vi in order.iter().skip(2).take(n - 3) {
        let same_chain = on_left[vi] == on_left[*stack.last().unwrap()];
        if !same_chain {
            while stack.len() > 1 {
                let a = stack.pop().unwrap();
                let b = *stack.last().unwrap();
                triangles.push(make_triangle(poly, vi, a, b, on_left[vi]));
            }
            stack.pop();
            stack.push(order[order.iter().position(|&x| x == vi).unwrap() - 1]);
            stack.push(vi);
        } else {
            let mut last_popped = stack.pop().unwrap();
            while let Some(&second) = stack.last() {
                if diagonal_is_inside(poly, vi, second, last_popped, on_left[vi]) {
                    triangles.push(make_triangle(poly, vi, second, last_popped, on_left[vi]));
                    last_popped = stack.pop().unwrap();
                } else {
                    break;
                }
            }
            stack.push(last_popped);
            stack.push(vi);
        }
    }
    let last = *order.last().unwrap();
    while stack.len() > 1 {
        let a = stack.pop().unwrap();
        let b = *stack.last().unwrap();
        triangles.push(make_triangle(poly, last, a, b, on_left[last]));
    }
    triangles
}

fn make_triangle(poly: &[Point], a: usize, b: usize, c: usize, flip: bool) -> [Point; 3] {
    if flip {
        [poly[a], poly[c], poly[b]]
    } else {
        [poly[a], poly[b], poly[c]]
    }
}

fn diagonal_is_inside(poly: &[Point], v: usize, a: usize, b: usize, left_chain: bool) -> bool {
    let turn = (poly[a] - poly[v]).cross(poly[b] - poly[v]);
    if left_chain {
        turn < Scalar::ZERO
    } else {
        turn > Scalar::ZERO
    }
}

/// Hertel–Mehlhorn merge: greedily unions adjacent triangles across a
/// shared edge when the union stays convex, yielding a partition into at
/// most 4x the optimal number of convex pieces (spec.md §4.5 "Convex
/// partition").
pub fn merge_to_convex(triangles: &[[Point; 3]]) -> Vec<Vec<Point>> {
    let mut polys: Vec<Vec<Point>> = triangles.iter().map(|t| t.to_vec()).collect();
    let mut changed = true;
    while changed {
        changed = false;
        'outer: for i in 0..polys.len() {
            for j in (i + 1)..polys.len() {
                if let Some(merged) = try_merge(&polys[i], &polys[j]) {
                    if is_convex(&merged) {
                        polys[i] = merged;
                        polys.remove(j);
                        changed = true;
                        break 'outer;
                    }
                }
            }
        }
    }
    polys
}

fn try_merge(a: &[Point], b: &[Point]) -> Option<Vec<Point>> {
    for i in 0..a.len() {
        let e0 = a[i];
        let e1 = a[(i + 1) % a.len()];
        for j in 0..b.len() {
            if b[j].near_eq(e1) && b[(j + 1) % b.len()].near_eq(e0) {
                let mut merged = Vec::with_capacity(a.len() + b.len() - 2);
                merged.extend_from_slice(&a[(i + 1) % a.len()..]);
                merged.extend_from_slice(&a[..=i]);
                merged.pop();
                let mut rest: Vec<Point> = b[(j + 1) % b.len()..].to_vec();
                rest.extend_from_slice(&b[..(j + 1) % b.len()]);
                if rest.len() >= 2 {
                    merged.extend_from_slice(&rest[1..rest.len() - 1]);
                }
                return Some(merged);
            }
        }
    }
    None
}

fn is_convex(poly: &[Point]) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }
    let mut expected: Option<bool> = None;
    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        let c = poly[(i + 2) % n];
        let turn = (b - a).cross(c - b);
        if turn.near_zero() {
            continue;
        }
        let positive = turn > Scalar::ZERO;
        match expected {
            None => expected = Some(positive),
            Some(e) if e == positive => {}
            Some(_) => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use vex2d_core::point;

    #[test]
    fn convex_square_triangulates_into_two_triangles() {
        let square = [point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0), point(0.0, 10.0)];
        let tris = triangulate_monotone(&square);
        assert_eq!(tris.len(), 2);
    }

    #[test]
    fn merge_recombines_split_square_into_one_convex_piece() {
        let square = [point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0), point(0.0, 10.0)];
        let tris = triangulate_monotone(&square);
        let merged = merge_to_convex(&tris);
        assert_eq!(merged.len(), 1);
    }
}
