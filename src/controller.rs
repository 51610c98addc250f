// src/controller.rs

//! # Controllers
//!
//! This module provides the closed-loop control laws: the PID controller
//! in direct and recursive discrete forms, a fixed-gain full-state
//! regulator, and a controller that evaluates a user-supplied law.

pub mod generic_controller;
pub use generic_controller::*;
pub mod pid;
pub use pid::*;
pub mod state_feedback;
pub use state_feedback::*;

use nalgebra::{DVector, Scalar};

/// A controller that maps a full state vector to a scalar command.
///
/// Together with [`System`](crate::System) this lets one caller-written
/// loop pair any vector controller with any plant of matching dimension.
pub trait Controller<T: Scalar> {
    /// Computes the command for the current `state`.
    fn control(&mut self, state: &DVector<T>) -> T;
}
