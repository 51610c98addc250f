// src/controller/generic_controller.rs

//! User-supplied control laws.
//!
//! A [`GenericController`] holds any [`ControlLaw`] together with a
//! reference vector, so a control law written elsewhere (a closure, or a
//! host-language callable wrapped by a binding layer) can drive any plant in
//! this crate.

use super::Controller;
use core::fmt;
use nalgebra::{DVector, Scalar};
use tracing::debug;

/// A control law `u = f(x, r)`.
pub trait ControlLaw<T: Scalar> {
    /// Computes the command for `state` given `reference`.
    fn control(&self, state: &DVector<T>, reference: &DVector<T>) -> T;
}

impl<T, F> ControlLaw<T> for F
where
    T: Scalar,
    F: Fn(&DVector<T>, &DVector<T>) -> T,
{
    fn control(&self, state: &DVector<T>, reference: &DVector<T>) -> T {
        self(state, reference)
    }
}

/// Controller evaluating an injected [`ControlLaw`] against a stored
/// reference.
pub struct GenericController<T: Scalar> {
    control_law: Box<dyn ControlLaw<T> + Send>,
    reference: DVector<T>,
}

impl<T: Scalar> GenericController<T> {
    /// Wraps `control_law`. The reference starts out empty.
    pub fn new(control_law: impl ControlLaw<T> + Send + 'static) -> Self {
        debug!("created generic controller");
        Self {
            control_law: Box::new(control_law),
            reference: DVector::from_vec(Vec::new()),
        }
    }

    /// Replaces the reference passed to the control law.
    pub fn set_reference(&mut self, reference: DVector<T>) {
        self.reference = reference;
    }

    /// The current reference.
    pub fn reference(&self) -> &DVector<T> {
        &self.reference
    }

    /// Evaluates the control law at `state`.
    pub fn compute(&self, state: &DVector<T>) -> T {
        self.control_law.control(state, &self.reference)
    }
}

impl<T: Scalar> Controller<T> for GenericController<T> {
    fn control(&mut self, state: &DVector<T>) -> T {
        self.compute(state)
    }
}

impl<T: Scalar> fmt::Debug for GenericController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericController")
            .field("reference", &self.reference)
            .finish_non_exhaustive()
    }
}
