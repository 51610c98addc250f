// src/integrate.rs

//! # Explicit-Euler Integration
//!
//! Every plant in this crate advances its state with the same fixed-step
//! rule:
//!
//! ```text
//! x[n+1] = x[n] + dt * f(x[n], u[n])
//! ```
//!
//! There is no adaptive stepping and no implicit solve. The rule is first
//! order accurate; callers pick `dt` small enough for their plant.

use core::ops::{Add, Mul};
use nalgebra::{ClosedAdd, ClosedMul, DVector, Scalar};

/// Advances one scalar state component by one Euler step.
#[inline]
pub fn euler<T>(x: T, dx: T, dt: T) -> T
where
    T: Copy + Add<Output = T> + Mul<Output = T>,
{
    x + dt * dx
}

/// Advances a state vector in place by one Euler step.
///
/// Panics if `state` and `derivative` differ in length.
pub fn euler_step<T>(state: &mut DVector<T>, derivative: &DVector<T>, dt: T)
where
    T: Scalar + Copy + ClosedAdd + ClosedMul,
{
    *state += derivative * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn scalar_step_follows_the_derivative() {
        assert!(value_close(1.5, euler(1.0, 5.0, 0.1)));
        assert!(value_close(1.0, euler(1.0, 5.0, 0.0)));
    }

    #[test]
    fn vector_step_matches_scalar_step() {
        let mut state = DVector::from_vec(vec![1.0, -2.0, 0.5]);
        let derivative = DVector::from_vec(vec![4.0, 1.0, -10.0]);
        euler_step(&mut state, &derivative, 0.25);

        assert!(vector_close(
            &[euler(1.0, 4.0, 0.25), euler(-2.0, 1.0, 0.25), euler(0.5, -10.0, 0.25)],
            state.as_slice(),
        ));
    }

    #[test]
    #[should_panic]
    fn vector_step_rejects_mismatched_lengths() {
        let mut state = DVector::from_vec(vec![1.0, 2.0]);
        let derivative = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        euler_step(&mut state, &derivative, 0.1);
    }
}
