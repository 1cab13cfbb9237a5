//! Quad-edge DCEL mesh (spec.md §3 "Mesh (quad-edge)", §4.4).
//!
//! Vertices, edges and faces live in element pools keyed by stable integer
//! handles (SPEC_FULL.md/design note: "element pool per entity kind plus
//! stable integer handles; `sym/onext/lnext` are handle-valued fields").
//! `onext` (ring around an edge's origin) and `lnext` (ring around an
//! edge's left face) are both stored directly and kept consistent by the
//! four Euler operators below, rather than derived through an explicit
//! dual/rotated edge as in the classical Guibas–Stolfi paper — this mesh
//! has no `rot`, only the primal half-edges.

use std::num::NonZeroU32;
use vex2d_core::Point;

use crate::error::InternalError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VertexId(NonZeroU32);
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(NonZeroU32);
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FaceId(NonZeroU32);

impl VertexId {
    fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
impl EdgeId {
    fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
    /// The two half-edges of a pair are allocated together at indices
    /// `2k`/`2k+1`; flipping the low bit of the 1-based id gets the twin
    /// without a stored pointer lookup.
    pub fn sym(self) -> EdgeId {
        let raw = self.0.get() - 1;
        EdgeId(NonZeroU32::new((raw ^ 1) + 1).unwrap())
    }
}
impl FaceId {
    fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

struct Vertex {
    point: Point,
    edge: EdgeId,
    live: bool,
}

struct EdgeRecord {
    org: VertexId,
    onext: EdgeId,
    lnext: EdgeId,
    lface: FaceId,
    live: bool,
}

struct Face {
    edge: Option<EdgeId>,
    live: bool,
}

/// A pooled, handle-based half-edge mesh.
#[derive(Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    edges: Vec<EdgeRecord>,
    faces: Vec<Face>,
    free_vertices: Vec<usize>,
    free_faces: Vec<usize>,
}

impl Mesh {
    pub fn new() -> Mesh {
        Mesh::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.live).count()
    }

    pub fn point(&self, v: VertexId) -> Point {
        self.vertices[v.index()].point
    }

    pub fn set_point(&mut self, v: VertexId, p: Point) {
        self.vertices[v.index()].point = p;
    }

    pub fn org(&self, e: EdgeId) -> VertexId {
        self.edges[e.index()].org
    }

    pub fn dst(&self, e: EdgeId) -> VertexId {
        self.org(e.sym())
    }

    pub fn onext(&self, e: EdgeId) -> EdgeId {
        self.edges[e.index()].onext
    }

    pub fn lnext(&self, e: EdgeId) -> EdgeId {
        self.edges[e.index()].lnext
    }

    pub fn lface(&self, e: EdgeId) -> FaceId {
        self.edges[e.index()].lface
    }

    pub fn rface(&self, e: EdgeId) -> FaceId {
        self.lface(e.sym())
    }

    /// Previous edge around `org(e)` (the edge whose `onext` is `e`),
    /// found by walking the ring; rings are small in practice (vertex
    /// degree), so a linear scan is acceptable.
    pub fn oprev_ring(&self, e: EdgeId) -> EdgeId {
        let mut cur = e;
        loop {
            let next = self.onext(cur);
            if next == e {
                return cur;
            }
            cur = next;
        }
    }

    fn alloc_vertex(&mut self, point: Point, edge: EdgeId) -> VertexId {
        if let Some(i) = self.free_vertices.pop() {
            self.vertices[i] = Vertex { point, edge, live: true };
            return VertexId(NonZeroU32::new((i + 1) as u32).unwrap());
        }
        self.vertices.push(Vertex { point, edge, live: true });
        VertexId(NonZeroU32::new(self.vertices.len() as u32).unwrap())
    }

    fn alloc_face(&mut self, edge: Option<EdgeId>) -> FaceId {
        if let Some(i) = self.free_faces.pop() {
            self.faces[i] = Face { edge, live: true };
            return FaceId(NonZeroU32::new((i + 1) as u32).unwrap());
        }
        self.faces.push(Face { edge, live: true });
        FaceId(NonZeroU32::new(self.faces.len() as u32).unwrap())
    }

    /// Creates an isolated edge `e` with two fresh vertices at `p0`/`p1`
    /// and one fresh face on both sides (a "digon": `lnext(e) = sym(e)`,
    /// `lnext(sym(e)) = e`), per spec.md §4.4 "`make_edge` creates an
    /// isolated loop".
    pub fn make_edge(&mut self, p0: Point, p1: Point) -> EdgeId {
        let base = self.edges.len() as u32;
        let e = EdgeId(NonZeroU32::new(base + 1).unwrap());
        let e_sym = e.sym();

        let face = self.alloc_face(Some(e));
        let v0 = self.alloc_vertex(p0, e);
        let v1 = self.alloc_vertex(p1, e_sym);

        self.edges.push(EdgeRecord {
            org: v0,
            onext: e,
            lnext: e_sym,
            lface: face,
            live: true,
        });
        self.edges.push(EdgeRecord {
            org: v1,
            onext: e_sym,
            lnext: e,
            lface: face,
            live: true,
        });
        e
    }

    /// Splices the `onext` rings of `org(a)` and `org(b)`: if they were
    /// already the same ring this cuts it in two; if they were different
    /// rings this merges them (spec.md §4.4).
    pub fn splice(&mut self, a: EdgeId, b: EdgeId) {
        let a_next = self.onext(a);
        let b_next = self.onext(b);
        self.edges[a.index()].onext = b_next;
        self.edges[b.index()].onext = a_next;

        // Keep each vertex's `edge` pointer valid and merge/split vertex
        // identity: after splicing, org(a) and org(b) sit on one ring iff
        // they were on different ones before, so we repoint every edge of
        // the (possibly merged) ring at a single vertex record.
        let v = self.org(a);
        self.vertices[v.index()].edge = a;
        let mut cur = self.onext(a);
        while cur != a {
            self.edges[cur.index()].org = v;
            cur = self.onext(cur);
        }
    }

    /// Creates a new edge from `dst(a)` to `org(b)`, splitting the shared
    /// left face of `a` and `b` into two (spec.md §4.4). `a` and `b` must
    /// currently bound the same face.
    pub fn connect(&mut self, a: EdgeId, b: EdgeId) -> EdgeId {
        let v1 = self.dst(a);
        let v2 = self.org(b);
        let old_face = self.lface(a);
        let b_prev = self.oprev_ring(b);
        // The face cycle today reads `a -> orig_a_next -> ... -> b_prev ->
        // b -> ... -> a`. Cutting in the chord `e` (v1->v2) / `e_sym`
        // (v2->v1) splits it into `a -> e -> b -> ... -> a` (kept as
        // `old_face`) and `e_sym -> orig_a_next -> ... -> b_prev -> e_sym`
        // (relabeled to a fresh face).
        let orig_a_next = self.lnext(a);

        let base = self.edges.len() as u32;
        let e = EdgeId(NonZeroU32::new(base + 1).unwrap());
        let e_sym = e.sym();

        self.edges.push(EdgeRecord {
            org: v1,
            onext: e,
            lnext: b,
            lface: old_face,
            live: true,
        });
        self.edges.push(EdgeRecord {
            org: v2,
            onext: e_sym,
            lnext: orig_a_next,
            lface: old_face,
            live: true,
        });

        // Merge `e`/`e_sym` into the existing vertex rings at v1/v2 via
        // the shared `splice` ring-merge, starting each as a singleton
        // ring so the merge behaves like joining two previously-separate
        // rings.
        self.splice(e, a.sym());
        self.splice(e_sym, b);

        self.edges[a.index()].lnext = e;
        self.edges[b_prev.index()].lnext = e_sym;

        // `a, e, b, ...` now bound one face (reuse `old_face`); `e_sym,
        // orig_a_next, ..., b_prev` bound a brand new face. Walk and
        // relabel that side.
        let new_face = self.alloc_face(Some(e_sym));
        self.faces[old_face.index()].edge = Some(e);
        self.edges[e_sym.index()].lface = new_face;
        let mut cur = orig_a_next;
        while cur != e_sym {
            self.edges[cur.index()].lface = new_face;
            cur = self.lnext(cur);
        }
        e
    }

    /// Removes `e`, merging the two faces it separated and splicing its
    /// endpoints' rings back together (spec.md §4.4; undoes `connect` or
    /// shrinks the mesh otherwise).
    pub fn delete_edge(&mut self, e: EdgeId) {
        let e_sym = e.sym();
        let a_prev = self.oprev_ring(e);
        let b_prev = self.oprev_ring(e_sym);
        self.splice(e, a_prev);
        self.splice(e_sym, b_prev);
        // `splice` just repointed both vertices' `edge` hint at `e`/`e_sym`,
        // which are about to die; repoint at a surviving ring member.
        let v1 = self.org(a_prev);
        self.vertices[v1.index()].edge = a_prev;
        let v2 = self.org(b_prev);
        self.vertices[v2.index()].edge = b_prev;

        let keep = self.lface(e);
        let drop = self.lface(e_sym);
        if keep != drop {
            let mut cur = e_sym;
            loop {
                self.edges[cur.index()].lface = keep;
                cur = self.lnext(cur);
                if cur == e_sym {
                    break;
                }
            }
            self.faces[drop.index()].live = false;
            self.free_faces.push(drop.index());
        }
        self.faces[keep.index()].edge = Some(a_prev);

        self.edges[e.index()].live = false;
        self.edges[e_sym.index()].live = false;
    }

    /// Walks the `lnext` cycle starting at `e`, collecting each edge's
    /// origin point — the face's boundary polygon.
    pub fn face_polygon(&self, e: EdgeId) -> Vec<Point> {
        let mut points = Vec::new();
        let mut cur = e;
        loop {
            points.push(self.point(self.org(cur)));
            cur = self.lnext(cur);
            if cur == e {
                break;
            }
        }
        points
    }

    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) -> Result<(), InternalError> {
        for (i, edge) in self.edges.iter().enumerate() {
            if !edge.live {
                continue;
            }
            let e = EdgeId(NonZeroU32::new((i + 1) as u32).unwrap());
            if e.sym().sym() != e {
                return Err(InternalError::BrokenMeshInvariant);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vex2d_core::point;

    #[test]
    fn make_edge_forms_a_digon() {
        let mut m = Mesh::new();
        let e = m.make_edge(point(0.0, 0.0), point(1.0, 0.0));
        assert_eq!(m.lnext(e), e.sym());
        assert_eq!(m.lnext(e.sym()), e);
        assert_eq!(m.org(e), m.org(m.onext(e)));
    }

    #[test]
    fn splice_merges_two_rings() {
        let mut m = Mesh::new();
        let e1 = m.make_edge(point(0.0, 0.0), point(1.0, 0.0));
        let e2 = m.make_edge(point(0.0, 0.0), point(0.0, 1.0));
        m.splice(e1, e2);
        // Walking onext from e1 should now reach e2 before returning.
        let mut cur = m.onext(e1);
        let mut saw_e2 = false;
        while cur != e1 {
            if cur == e2 {
                saw_e2 = true;
            }
            cur = m.onext(cur);
        }
        assert!(saw_e2);
    }

    #[test]
    fn connect_splits_a_face_into_two() {
        let mut m = Mesh::new();
        // Build a quad 0,0 -> 10,0 -> 10,10 -> 0,10 via three make_edge +
        // splice calls, then connect a diagonal and check two distinct
        // faces result.
        let e0 = m.make_edge(point(0.0, 0.0), point(10.0, 0.0));
        let e1 = m.make_edge(point(10.0, 0.0), point(10.0, 10.0));
        let e2 = m.make_edge(point(10.0, 10.0), point(0.0, 10.0));
        let e3 = m.make_edge(point(0.0, 10.0), point(0.0, 0.0));
        m.splice(e0.sym(), e1);
        m.splice(e1.sym(), e2);
        m.splice(e2.sym(), e3);
        m.splice(e3.sym(), e0);

        let diag = m.connect(e0, e2);
        assert_ne!(m.lface(diag), m.lface(diag.sym()));
    }
}
