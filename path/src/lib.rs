//! The path command stream: construction, lazy caching, hint/convexity
//! detection, shape adders and path composition (spec.md §3 "Path", §4.3).

mod compose;
mod fill_rule;
mod hint;
mod path;
mod polygon;
mod shapes;

pub use fill_rule::FillRule;
pub use path::{Path, Verb};
pub use polygon::{ContourIter, Polygon};
pub use shapes::Direction;
