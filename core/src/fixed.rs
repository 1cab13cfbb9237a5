//! Q16.16 signed fixed-point scalar, selected via the `fixed-point` feature.
//!
//! Intermediate products are computed in `i64` and shifted back to the
//! 32-bit fixed representation, saturating on overflow, as required by
//! §3/§4.1 of the spec for matrix composition.

use crate::scalar::Num;
use core::ops::{Add, Div, Mul, Neg, Sub};

const FRAC_BITS: u32 = 16;
const ONE_RAW: i32 = 1 << FRAC_BITS;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Fixed(pub i32);

impl Fixed {
    #[inline]
    pub fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub fn from_raw(raw: i32) -> Self {
        Fixed(raw)
    }

    #[inline]
    pub fn from_i32(v: i32) -> Self {
        Fixed(v.saturating_mul(ONE_RAW))
    }
}

#[inline]
fn saturating_mul_shift(a: i32, b: i32) -> i32 {
    let product = (a as i64) * (b as i64);
    let shifted = product >> FRAC_BITS;
    if shifted > i32::MAX as i64 {
        i32::MAX
    } else if shifted < i32::MIN as i64 {
        i32::MIN
    } else {
        shifted as i32
    }
}

#[inline]
fn saturating_div_shift(a: i32, b: i32) -> i32 {
    if b == 0 {
        return if a >= 0 { i32::MAX } else { i32::MIN };
    }
    let numerator = (a as i64) << FRAC_BITS;
    let result = numerator / (b as i64);
    if result > i32::MAX as i64 {
        i32::MAX
    } else if result < i32::MIN as i64 {
        i32::MIN
    } else {
        result as i32
    }
}

impl Add for Fixed {
    type Output = Fixed;
    #[inline]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    #[inline]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_sub(rhs.0))
    }
}

impl Mul for Fixed {
    type Output = Fixed;
    #[inline]
    fn mul(self, rhs: Fixed) -> Fixed {
        Fixed(saturating_mul_shift(self.0, rhs.0))
    }
}

impl Div for Fixed {
    type Output = Fixed;
    #[inline]
    fn div(self, rhs: Fixed) -> Fixed {
        Fixed(saturating_div_shift(self.0, rhs.0))
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    #[inline]
    fn neg(self) -> Fixed {
        Fixed(self.0.saturating_neg())
    }
}

impl Num for Fixed {
    const ZERO: Fixed = Fixed(0);
    const ONE: Fixed = Fixed(ONE_RAW);
    const TWO: Fixed = Fixed(ONE_RAW * 2);
    const HALF: Fixed = Fixed(ONE_RAW / 2);
    // 1/4096 in Q16.16 is 16.
    const NEAR0: Fixed = Fixed(16);

    #[inline]
    fn from_f32(v: f32) -> Fixed {
        Fixed((v * ONE_RAW as f32) as i32)
    }

    #[inline]
    fn to_f32(self) -> f32 {
        self.0 as f32 / ONE_RAW as f32
    }

    #[inline]
    fn abs(self) -> Fixed {
        Fixed(self.0.saturating_abs())
    }

    // The remaining transcendental functions round-trip through f64: a
    // full fixed-point CORDIC table is not needed for spec fidelity, only
    // for the arithmetic operators above (see SPEC_FULL.md §3).
    #[inline]
    fn sqrt(self) -> Fixed {
        Fixed::from_f32((self.to_f32() as f64).sqrt() as f32)
    }
    #[inline]
    fn sin(self) -> Fixed {
        Fixed::from_f32((self.to_f32() as f64).sin() as f32)
    }
    #[inline]
    fn cos(self) -> Fixed {
        Fixed::from_f32((self.to_f32() as f64).cos() as f32)
    }
    #[inline]
    fn atan2(self, x: Fixed) -> Fixed {
        Fixed::from_f32((self.to_f32() as f64).atan2(x.to_f32() as f64) as f32)
    }
    #[inline]
    fn tan(self) -> Fixed {
        Fixed::from_f32((self.to_f32() as f64).tan() as f32)
    }

    #[inline]
    fn min(self, other: Fixed) -> Fixed {
        core::cmp::min(self, other)
    }
    #[inline]
    fn max(self, other: Fixed) -> Fixed {
        core::cmp::max(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_saturates() {
        let big = Fixed::from_i32(i16::MAX as i32);
        let product = big * big;
        assert_eq!(product.0, i32::MAX);
    }

    #[test]
    fn round_trips_through_f32() {
        let a = Fixed::from_f32(3.5);
        assert!((a.to_f32() - 3.5).abs() < 1e-3);
    }

    #[test]
    fn near0_matches_spec_constant() {
        assert!((Fixed::NEAR0.to_f32() - 1.0 / 4096.0).abs() < 1e-4);
    }
}
