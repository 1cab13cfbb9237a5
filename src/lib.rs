//! Device-independent 2D vector geometry pipeline: path construction, curve
//! flattening, affine transforms, sweep-line polygon tessellation and path
//! stroking.
//!
//! This crate is a thin facade over a handful of focused crates:
//!
//! * `vex2d_core` - scalar/point/matrix/shape value types ([`core`]).
//! * `vex2d_geom` - adaptive Bézier flattening and arc approximation ([`geom`]).
//! * `vex2d_path` - the path command stream, hints and polygon flattening ([`path`]).
//! * `vex2d_tessellation` - the quad-edge mesh, sweep-line tessellator and
//!   stroker ([`tessellation`]).
//! * `vex2d_algorithms` - polygon-level utilities built on the above
//!   ([`algorithms`]).
//!
//! ```
//! use vex2d::core::point;
//! use vex2d::path::Path;
//! use vex2d::tessellation::{FillOptions, Tessellator, TessellatorConfig, CollectPolygons};
//!
//! let mut path = Path::new();
//! path.move_to(point(0.0, 0.0));
//! path.line_to(point(10.0, 0.0));
//! path.line_to(point(10.0, 10.0));
//! path.line_to(point(0.0, 10.0));
//! path.close();
//!
//! let polygon = path.polygon();
//! let mut output = CollectPolygons::new();
//! let mut tessellator = Tessellator::new();
//! tessellator
//!     .tessellate(&polygon, &FillOptions::default(), TessellatorConfig::default(), &mut output)
//!     .unwrap();
//! ```

pub use vex2d_algorithms as algorithms;
pub use vex2d_core as core;
pub use vex2d_geom as geom;
pub use vex2d_path as path;
pub use vex2d_tessellation as tessellation;
