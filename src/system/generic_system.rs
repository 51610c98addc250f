// src/system/generic_system.rs

//! User-supplied plant dynamics.
//!
//! A [`GenericSystem`] integrates any [`Dynamics`] implementation with the
//! shared explicit-Euler rule, so a plant can be added without touching the
//! rest of the crate. Closures `Fn(&DVector<T>, &DVector<T>) -> DVector<T>`
//! implement [`Dynamics`] directly.

use crate::integrate::euler_step;
use crate::{DynamicsError, System};
use core::fmt;
use nalgebra::{DVector, RealField};
use tracing::{debug, trace, warn};

/// Continuous-time dynamics `dx/dt = f(x, u)`.
pub trait Dynamics<T: RealField> {
    /// Evaluates the state derivative at `state` under `input`.
    fn derivative(&self, state: &DVector<T>, input: &DVector<T>) -> DVector<T>;
}

impl<T, F> Dynamics<T> for F
where
    T: RealField,
    F: Fn(&DVector<T>, &DVector<T>) -> DVector<T>,
{
    fn derivative(&self, state: &DVector<T>, input: &DVector<T>) -> DVector<T> {
        self(state, input)
    }
}

/// Plant defined by injected dynamics and an owned state vector.
pub struct GenericSystem<T: RealField> {
    dynamics: Box<dyn Dynamics<T> + Send>,
    state: DVector<T>,
}

impl<T: RealField + Copy> GenericSystem<T> {
    /// Creates a system with dynamics `dynamics` starting at `initial`.
    pub fn new(dynamics: impl Dynamics<T> + Send + 'static, initial: DVector<T>) -> Self {
        debug!(dim = initial.len(), "created generic system");
        Self {
            dynamics: Box::new(dynamics),
            state: initial,
        }
    }

    /// Reassigns the state.
    pub fn reset(&mut self, initial: DVector<T>) {
        self.state = initial;
        debug!(dim = self.state.len(), "reset generic system");
    }

    /// Snapshot of the current state. Later updates do not affect it.
    pub fn state(&self) -> DVector<T> {
        self.state.clone()
    }

    /// Advances one explicit-Euler step, `x <- x + dt f(x, u)`.
    ///
    /// Panics if the derivative length differs from the state length.
    pub fn update(&mut self, input: &DVector<T>, dt: T) {
        let derivative = self.dynamics.derivative(&self.state, input);
        euler_step(&mut self.state, &derivative, dt);
        trace!(state = ?self.state.as_slice(), "stepped generic system");
    }

    /// [`GenericSystem::update`] that rejects a non-positive `dt`, a
    /// derivative of the wrong length, or a non-finite derivative, leaving
    /// the state untouched.
    pub fn try_update(&mut self, input: &DVector<T>, dt: T) -> Result<(), DynamicsError> {
        let derivative = self.checked_derivative(input, dt).map_err(|err| {
            warn!(%err, "rejected generic system step");
            err
        })?;
        euler_step(&mut self.state, &derivative, dt);
        trace!(state = ?self.state.as_slice(), "stepped generic system");
        Ok(())
    }

    fn checked_derivative(&self, input: &DVector<T>, dt: T) -> Result<DVector<T>, DynamicsError> {
        if !(dt > T::zero()) {
            return Err(DynamicsError::NonPositiveTimestep {
                dt: nalgebra::try_convert(dt).unwrap_or(f64::NAN),
            });
        }
        let derivative = self.dynamics.derivative(&self.state, input);
        DynamicsError::check_len(self.state.len(), derivative.len())?;
        if derivative.iter().any(|value| !value.is_finite()) {
            return Err(DynamicsError::NonFinite { what: "state derivative" });
        }
        Ok(derivative)
    }
}

impl<T: RealField + Copy> System<T> for GenericSystem<T> {
    fn state(&self) -> DVector<T> {
        self.state.clone()
    }

    fn step(&mut self, input: &DVector<T>, dt: T) {
        self.update(input, dt);
    }
}

impl<T: RealField> fmt::Debug for GenericSystem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericSystem")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn double_integrator() -> GenericSystem<f64> {
        GenericSystem::new(
            |x: &DVector<f64>, u: &DVector<f64>| DVector::from_vec(vec![x[1], u[0]]),
            DVector::from_vec(vec![0.0, 1.0]),
        )
    }

    #[test]
    fn update_applies_one_euler_step() {
        let mut system = double_integrator();
        system.update(&DVector::from_vec(vec![2.0]), 0.5);
        assert!(vector_close(&[0.5, 2.0], system.state().as_slice()));
    }

    #[test]
    fn state_is_a_snapshot() {
        let mut system = double_integrator();
        let before = system.state();
        system.update(&DVector::from_vec(vec![2.0]), 0.5);
        assert!(vector_close(&[0.0, 1.0], before.as_slice()));
    }

    #[test]
    fn reset_reassigns_state() {
        let mut system = double_integrator();
        system.update(&DVector::from_vec(vec![2.0]), 0.5);
        system.reset(DVector::from_vec(vec![3.0, 0.0]));
        system.update(&DVector::from_vec(vec![0.0]), 0.5);
        assert!(vector_close(&[3.0, 0.0], system.state().as_slice()));
    }

    struct Decay {
        rate: f32,
    }

    impl Dynamics<f32> for Decay {
        fn derivative(&self, state: &DVector<f32>, _input: &DVector<f32>) -> DVector<f32> {
            state * -self.rate
        }
    }

    #[test]
    fn accepts_named_dynamics_in_single_precision() {
        let mut system = GenericSystem::new(Decay { rate: 2.0 }, DVector::from_vec(vec![1.0_f32]));
        system.update(&DVector::from_vec(vec![]), 0.25);
        assert_eq!(0.5_f32, system.state()[0]);
    }

    #[test]
    #[should_panic]
    fn update_panics_on_derivative_dimension_mismatch() {
        let mut system = GenericSystem::new(
            |_: &DVector<f64>, _: &DVector<f64>| DVector::from_vec(vec![1.0]),
            DVector::from_vec(vec![0.0, 0.0]),
        );
        system.update(&DVector::from_vec(vec![]), 0.1);
    }

    #[test]
    fn try_update_reports_out_of_domain_steps() {
        let mut system = GenericSystem::new(
            |_: &DVector<f64>, _: &DVector<f64>| DVector::from_vec(vec![1.0]),
            DVector::from_vec(vec![0.0, 0.0]),
        );
        assert_eq!(
            Err(DynamicsError::DimensionMismatch {
                expected: 2,
                actual: 1
            }),
            system.try_update(&DVector::from_vec(vec![]), 0.1)
        );

        let mut system = double_integrator();
        assert_eq!(
            Err(DynamicsError::NonPositiveTimestep { dt: 0.0 }),
            system.try_update(&DVector::from_vec(vec![1.0]), 0.0)
        );
        assert!(matches!(
            system.try_update(&DVector::from_vec(vec![f64::NAN]), 0.1),
            Err(DynamicsError::NonFinite { .. })
        ));
        assert!(vector_close(&[0.0, 1.0], system.state().as_slice()));

        system.try_update(&DVector::from_vec(vec![2.0]), 0.5).unwrap();
        assert!(vector_close(&[0.5, 2.0], system.state().as_slice()));
    }
}
