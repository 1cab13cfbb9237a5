//! Sweep-line fill tessellation and path stroking (spec.md §4.5 "Tessellator",
//! §4.6 "Stroker"), built on the quad-edge [`mesh`] and the [`monotone`]
//! decomposition/triangulation machinery.

mod error;
mod geometry_builder;
mod logging;
mod mesh;
mod monotone;
mod stroker;
mod tessellator;

pub use error::{
    GeometryBuilderError, InternalError, InvalidInput, StrokerError, TessellationError, TessellationResult,
};
pub use geometry_builder::{CollectPolygons, GeometryBuilder};
pub use logging::{logging_enabled, set_logging};
pub use mesh::{EdgeId, FaceId, Mesh, VertexId};
pub use monotone::{merge_to_convex, monotone_decompose, triangulate_monotone};
pub use stroker::{Cap, Join, StrokeOptions, Stroker};
pub use tessellator::{FillOptions, Tessellator, TessellatorConfig};
pub use vex2d_path::FillRule;
