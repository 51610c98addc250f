// src/controller/state_feedback.rs

//! # Full-State Feedback Regulator
//!
//! Computes a scalar command from the complete state error,
//!
//! ```text
//! u = -K . (x - r)
//! ```
//!
//! The gain vector is fixed at construction. The four-gain constructor and
//! [`StateFeedback::set_angle_reference`] cover the usual cart/pendulum
//! setup, where only the pendulum angle (state index 2) has a nonzero
//! reference:
//!
//! ```text
//! u = -(k1 x0 + k2 x1 + k3 (x2 - r) + k4 x3)
//! ```

use super::Controller;
use nalgebra::{DVector, RealField, SVector};
use tracing::debug;

/// Index of the pendulum angle in the four-state cart/pendulum layout.
pub const ANGLE_INDEX: usize = 2;

/// Fixed-gain linear regulator over an `N`-dimensional state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateFeedback<T: RealField + Copy, const N: usize> {
    gains: SVector<T, N>,
    reference: SVector<T, N>,
}

impl<T: RealField + Copy, const N: usize> StateFeedback<T, N> {
    /// Creates a regulator with gain vector `gains` and a zero reference.
    pub fn new(gains: SVector<T, N>) -> Self {
        debug!(?gains, "created state feedback controller");
        Self {
            gains,
            reference: SVector::zeros(),
        }
    }

    /// The gain vector `K`.
    pub fn gains(&self) -> &SVector<T, N> {
        &self.gains
    }

    /// The current reference state `r`.
    pub fn reference(&self) -> &SVector<T, N> {
        &self.reference
    }

    /// Replaces the reference state.
    pub fn set_reference(&mut self, reference: SVector<T, N>) {
        self.reference = reference;
    }

    /// Computes `-K . (x - r)`.
    pub fn compute(&self, state: &SVector<T, N>) -> T {
        -self.gains.dot(&(state - self.reference))
    }
}

impl<T: RealField + Copy> StateFeedback<T, 4> {
    /// Creates a cart/pendulum regulator from four explicit gains.
    pub fn from_gains(k1: T, k2: T, k3: T, k4: T) -> Self {
        Self::new(SVector::<T, 4>::new(k1, k2, k3, k4))
    }

    /// Sets a scalar reference on the pendulum angle. The other reference
    /// components are zero.
    pub fn set_angle_reference(&mut self, angle: T) {
        let mut reference = SVector::<T, 4>::zeros();
        reference[ANGLE_INDEX] = angle;
        self.reference = reference;
    }
}

impl<T: RealField + Copy, const N: usize> Controller<T> for StateFeedback<T, N> {
    /// Panics if `state` does not have exactly `N` elements.
    fn control(&mut self, state: &DVector<T>) -> T {
        assert_eq!(state.len(), N, "state feedback expects {} states", N);
        self.compute(&SVector::from_column_slice(state.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector2;

    #[test]
    fn zero_reference_regulates_to_origin() {
        let controller = StateFeedback::new(Vector2::new(2.0, 3.0));
        assert_relative_eq!(-(2.0 * 1.0 + 3.0 * -0.5), controller.compute(&Vector2::new(1.0, -0.5)));
        assert_relative_eq!(0.0, controller.compute(&Vector2::zeros()));
    }

    #[test]
    fn vector_reference_shifts_the_equilibrium() {
        let mut controller = StateFeedback::new(Vector2::new(2.0, 3.0));
        controller.set_reference(Vector2::new(1.0, 1.0));
        assert_eq!(&Vector2::new(1.0, 1.0), controller.reference());
        assert_relative_eq!(0.0, controller.compute(&Vector2::new(1.0, 1.0)));
        assert_relative_eq!(-5.0, controller.compute(&Vector2::new(2.0, 2.0)));
    }

    #[test]
    fn angle_reference_matches_four_gain_law() {
        let (k1, k2, k3, k4) = (-1.0, -1.6567, 18.6854, 3.4594);
        let r = core::f64::consts::PI;
        let mut controller = StateFeedback::from_gains(k1, k2, k3, k4);
        controller.set_angle_reference(r);

        let x = SVector::<f64, 4>::new(1.5, 0.1, r + 0.01, 0.2);
        let expected = -(k1 * x[0] + k2 * x[1] + k3 * (x[2] - r) + k4 * x[3]);
        assert_relative_eq!(expected, controller.compute(&x), epsilon = 1e-12);
    }

    #[test]
    fn controller_trait_accepts_dynamic_state() {
        let mut controller = StateFeedback::from_gains(1.0, 0.0, 0.0, 0.0);
        let state = DVector::from_vec(vec![2.0, 0.0, 0.0, 0.0]);
        assert_relative_eq!(-2.0, controller.control(&state));
    }

    #[test]
    #[should_panic(expected = "state feedback expects 4 states")]
    fn controller_trait_rejects_wrong_dimension() {
        let mut controller = StateFeedback::from_gains(1.0, 0.0, 0.0, 0.0);
        controller.control(&DVector::from_vec(vec![1.0, 2.0]));
    }
}
