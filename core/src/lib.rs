//! Scalar, point, matrix and shape value types shared by the vex2d
//! geometry pipeline.
//!
//! Everything in this crate is a plain value: shapes have no identity,
//! matrices are `Copy`, and the scalar representation ([`Scalar`]) is
//! chosen once at compile time (see [`scalar`] module docs).

#[cfg(feature = "fixed-point")]
pub mod fixed;
pub mod matrix;
pub mod point;
pub mod rect;
pub mod scalar;
pub mod shapes;

pub use matrix::Matrix;
pub use point::{point, sign, vector, Point, PointExt, Sign, Vector};
pub use rect::{bounds_of, Rect};
pub use scalar::{Num, Scalar};
pub use shapes::{Arc, Circle, Ellipse, Line, RoundRect, Shape, Triangle};
