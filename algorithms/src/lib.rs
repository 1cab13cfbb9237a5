//! Polygon-level utilities — bounds, area, winding/point-containment —
//! that sit above the core pipeline (`vex2d_core`, `vex2d_path`) without
//! pulling in the tessellator, mirroring `lyon_algorithms`'s relationship
//! to `lyon_path`.

mod area;
mod bounds;
mod hit_test;

pub use area::signed_area;
pub use bounds::polygon_bounds;
pub use hit_test::{hit_test, winding_number};
pub use vex2d_path::FillRule;
