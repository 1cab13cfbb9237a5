//! The scalar abstraction and its two interchangeable representations.
//!
//! By default `Scalar` is an alias for `f32`. Building with `--features
//! fixed-point` swaps in [`Fixed`], a Q16.16 signed fixed-point type. Every
//! other crate in the workspace is written against the `Scalar` alias and
//! the [`Num`] trait below, never against `f32`/`Fixed` directly, so the
//! representation choice does not leak past this module.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};
use num_traits::Float;

/// Operations every scalar representation must provide.
///
/// This mirrors the arithmetic and transcendental surface the geometry
/// pipeline actually calls: composing matrices, measuring flattening
/// error, and evaluating trig for arcs and rotations.
pub trait Num:
    Copy
    + Clone
    + Debug
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;
    const TWO: Self;
    const HALF: Self;

    /// `≈ 1/4096`. Bounds "nearly zero" comparisons throughout the pipeline.
    const NEAR0: Self;

    fn from_f32(v: f32) -> Self;
    fn to_f32(self) -> f32;

    fn abs(self) -> Self;
    fn sqrt(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn atan2(self, x: Self) -> Self;
    fn tan(self) -> Self;

    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;

    #[inline]
    fn near_zero(self) -> bool {
        self.abs() <= Self::NEAR0
    }

    #[inline]
    fn near_eq(self, other: Self) -> bool {
        (self - other).abs() <= Self::NEAR0
    }
}

impl Num for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const HALF: Self = 0.5;
    const NEAR0: Self = 1.0 / 4096.0;

    #[inline]
    fn from_f32(v: f32) -> Self {
        v
    }
    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn abs(self) -> Self {
        Float::abs(self)
    }
    #[inline]
    fn sqrt(self) -> Self {
        Float::sqrt(self)
    }
    #[inline]
    fn sin(self) -> Self {
        Float::sin(self)
    }
    #[inline]
    fn cos(self) -> Self {
        Float::cos(self)
    }
    #[inline]
    fn atan2(self, x: Self) -> Self {
        Float::atan2(self, x)
    }
    #[inline]
    fn tan(self) -> Self {
        Float::tan(self)
    }
    #[inline]
    fn min(self, other: Self) -> Self {
        Float::min(self, other)
    }
    #[inline]
    fn max(self, other: Self) -> Self {
        Float::max(self, other)
    }
}

#[cfg(not(feature = "fixed-point"))]
pub type Scalar = f32;

#[cfg(feature = "fixed-point")]
pub type Scalar = crate::fixed::Fixed;

/// `π` in the active scalar representation.
#[inline]
pub fn pi<S: Num>() -> S {
    S::from_f32(core::f32::consts::PI)
}
