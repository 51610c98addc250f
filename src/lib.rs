// src/lib.rs

//! # Plant Models and Closed-Loop Controllers
//!
//! This crate provides continuous-time plant models and discrete
//! controllers for validating a control law in simulation before it runs
//! on hardware.
//!
//! - [`controller`]: PID in direct and recursive form, full-state feedback,
//!   and a controller evaluating a user-supplied law.
//! - [`system`]: mass-spring-damper, pendulum on a cart, a 6-DOF
//!   quaternion rigid body, and a plant with user-supplied dynamics.
//! - [`integrate`]: the explicit-Euler step shared by every plant.
//!
//! The simulation loop belongs to the caller. Each tick reads the plant
//! state, asks a controller for a command and advances the plant:
//!
//! ```
//! use plant_control_sim::{MassSpringDamper, Pid};
//!
//! let mut pid = Pid::new(100.0, 1.0, 20.0);
//! let mut plant = MassSpringDamper::<f64>::new(1.0, 0.5, 5.0);
//! let dt = 0.01;
//!
//! for _ in 0..1000 {
//!     let force = pid.compute(1.0, plant.position(), dt);
//!     plant.update(force, dt);
//! }
//! assert!((plant.position() - 1.0).abs() < 0.06);
//! ```
//!
//! Every operation is a synchronous numeric computation. Instances own
//! their state; independent instances may run on separate threads, while
//! sharing one instance across threads needs external synchronization.

#![deny(missing_docs)]

pub mod controller;
pub mod error;
pub mod integrate;
pub mod number;
pub mod system;

#[doc(inline)]
pub use controller::*;
#[doc(inline)]
pub use error::DynamicsError;
#[doc(inline)]
pub use number::{Number, Real};
#[doc(inline)]
pub use system::*;

#[cfg(test)]
mod test_utils;
