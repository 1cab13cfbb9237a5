//! Adaptive curve flattening and arc approximation: quadratic/cubic Bézier
//! subdivision under an L1 error bound, and a fixed-table circular-arc
//! approximation (spec.md §4.2 "Geometry / Curve Flattening").

pub mod arc;
pub mod cubic;
pub mod quadratic;

pub use arc::{arc_start_point, flatten_arc_quadratics, SQRT2_OVER_2, TAN_PI_8};
pub use cubic::{flatten_cubic, CubicBezier};
pub use quadratic::{flatten_quadratic, sample_quadratic, DEFAULT_TOLERANCE};
