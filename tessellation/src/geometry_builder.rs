//! The tessellator/stroker output interface (spec.md §4.5 "The callback
//! signature is `fn(points: &[Point], count: u16, user)`"), rendered as a
//! trait the way lyon's `GeometryBuilder` renders its own vertex/index
//! callback contract.

use crate::error::GeometryBuilderError;
use vex2d_core::Point;

/// Receives each emitted sub-polygon (a triangle, a monotone piece, or a
/// convex region, depending on the tessellator's output mode) as a plain
/// point slice in winding order.
pub trait GeometryBuilder {
    /// Called once before any `add_polygon` calls for one `tessellate`
    /// invocation.
    fn begin_geometry(&mut self) {}

    /// Called once after the last `add_polygon` call, on success.
    fn end_geometry(&mut self) {}

    /// One output sub-polygon. `points.len() <= u16::MAX as usize` is the
    /// caller's responsibility to enforce if it needs a `u16` index space;
    /// this trait itself does not constrain the count.
    fn add_polygon(&mut self, points: &[Point]) -> Result<(), GeometryBuilderError>;

    /// Called in place of `end_geometry` when tessellation fails partway
    /// through; implementors should discard any partially-written output.
    fn abort_geometry(&mut self) {}
}

/// A `GeometryBuilder` that simply collects every emitted polygon into a
/// `Vec<Vec<Point>>`, useful for tests and simple callers that don't need
/// a custom vertex format.
#[derive(Default)]
pub struct CollectPolygons {
    pub polygons: Vec<Vec<Point>>,
}

impl CollectPolygons {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GeometryBuilder for CollectPolygons {
    fn add_polygon(&mut self, points: &[Point]) -> Result<(), GeometryBuilderError> {
        self.polygons.push(points.to_vec());
        Ok(())
    }

    fn abort_geometry(&mut self) {
        self.polygons.clear();
    }
}
