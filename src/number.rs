// src/number.rs

//! Numeric traits shared by the controllers and plant models.
//!
//! Scalar models are generic over floating-point precision. The PID
//! controller sits on top of `piddiy`, so its scalar type must also satisfy
//! the `piddiy` number contract.

use core::fmt::Debug;
use num_traits::{Float, ToPrimitive};
use piddiy::Number as PiddiyNumber;

/// Scalar type accepted by [`Pid`](crate::controller::Pid).
pub trait Number: PiddiyNumber + ToPrimitive + Debug {}

impl<T: PiddiyNumber + ToPrimitive + Debug> Number for T {}

/// Floating-point scalar used by the scalar plant models.
pub trait Real: Float + Debug + Send + Sync + 'static {}

impl<T: Float + Debug + Send + Sync + 'static> Real for T {}

/// Converts an `f64` literal into the model precision.
///
/// Unrepresentable values become NaN and propagate like any other
/// out-of-domain result.
pub(crate) fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Lossy view of a scalar as `f64`, for error reports and log fields.
pub(crate) fn as_f64<T: ToPrimitive>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_keeps_f64_bits() {
        let pi: f64 = constant(core::f64::consts::PI);
        assert_eq!(pi.to_bits(), core::f64::consts::PI.to_bits());
    }

    #[test]
    fn constant_rounds_into_f32() {
        let g: f32 = constant(9.81);
        assert_eq!(g, 9.81_f32);
    }
}
