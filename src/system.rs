// src/system.rs

//! # Plant Models
//!
//! Continuous-time plants advanced with the explicit-Euler rule from
//! [`integrate`](crate::integrate): a linear mass-spring-damper, a
//! nonlinear pendulum on a cart, a 13-state quaternion rigid body, and a
//! system whose dynamics are supplied by the caller.
//!
//! Physical parameters are fixed at construction. Each model owns its
//! state and mutates it only through `update`, `reset` and explicit
//! setters.

pub mod generic_system;
pub use generic_system::*;
pub mod mass_spring_damper;
pub use mass_spring_damper::*;
pub mod missile_6dof_quat;
pub use missile_6dof_quat::*;
pub mod pendulum_cart;
pub use pendulum_cart::*;

use nalgebra::{DVector, Scalar};

/// Vector view shared by every plant model.
///
/// The per-tick loop `state -> controller -> input -> step` can be written
/// once against this trait and [`Controller`](crate::Controller).
pub trait System<T: Scalar> {
    /// Snapshot of the current state.
    fn state(&self) -> DVector<T>;

    /// Advances the state by one step of length `dt` under `input`.
    ///
    /// Panics if `input` is shorter than the model's control vector.
    fn step(&mut self, input: &DVector<T>, dt: T);
}
