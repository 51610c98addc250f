// src/controller/pid.rs

//! # PID Controller
//!
//! Two interchangeable discrete realizations of the continuous PID law
//!
//! ```text
//! u(t) = kp e(t) + ki \int e dt + kd de/dt
//! ```
//!
//! - [`Pid::compute`] is the direct form. It keeps an explicit integral and
//!   the previous error, and is evaluated through a `piddiy` controller.
//! - [`Pid::compute_recursive`] is the velocity (incremental) form. It
//!   keeps the last two errors and the last output and applies
//!
//! ```text
//! u[k] = u[k-1] + (kp + ki dt + kd/dt) e[k] + (-2 kd/dt - kp) e[k-1] + (kd/dt) e[k-2]
//! ```
//!
//! For a constant `dt` both forms produce the same output sequence up to
//! rounding. The two histories are independent, so one instance should be
//! driven through a single form between resets.

pub mod direct;
pub use direct::*;

use crate::number::as_f64;
use crate::{DynamicsError, Number};
use core::fmt;
use piddiy::PidController;
use tracing::{debug, warn};

/// PID controller with fixed gains and resettable history.
pub struct Pid<T: Number> {
    kp: T,
    ki: T,
    kd: T,
    direct: PidController<T, DirectControlData<T>>,
    // e[k-1], e[k-2] and u[k-1] of the recursive form
    prev_error: T,
    prev_error2: T,
    prev_output: T,
}

impl<T: Number> Pid<T> {
    /// Creates a controller with the given gains and zeroed history.
    pub fn new(kp: T, ki: T, kd: T) -> Self {
        debug!(kp = ?kp, ki = ?ki, kd = ?kd, "created PID controller");
        Pid {
            kp,
            ki,
            kd,
            direct: Self::direct_controller(kp, ki, kd),
            prev_error: T::zero(),
            prev_error2: T::zero(),
            prev_output: T::zero(),
        }
    }

    fn direct_controller(kp: T, ki: T, kd: T) -> PidController<T, DirectControlData<T>> {
        let mut pid = PidController::new();
        pid.compute_fn(compute_direct).kp(kp).ki(ki).kd(kd);
        pid
    }

    /// Proportional gain.
    pub fn kp(&self) -> T {
        self.kp
    }

    /// Integral gain.
    pub fn ki(&self) -> T {
        self.ki
    }

    /// Derivative gain.
    pub fn kd(&self) -> T {
        self.kd
    }

    /// Clears the history of both forms. Gains are kept.
    pub fn reset(&mut self) {
        self.direct = Self::direct_controller(self.kp, self.ki, self.kd);
        self.prev_error = T::zero();
        self.prev_error2 = T::zero();
        self.prev_output = T::zero();
        debug!("reset PID controller");
    }

    /// Direct-form PID step.
    ///
    /// `dt` must be positive; a zero step divides the derivative term by
    /// zero and the result propagates as Inf/NaN.
    pub fn compute(&mut self, setpoint: T, measurement: T, dt: T) -> T {
        self.direct.set_point(setpoint);
        self.direct.compute(DirectControlData { measurement, dt })
    }

    /// Recursive-form PID step. Same `dt` contract as [`Pid::compute`].
    pub fn compute_recursive(&mut self, setpoint: T, measurement: T, dt: T) -> T {
        let two = T::one() + T::one();
        let error = setpoint - measurement;
        let output = self.prev_output
            + (self.kp + self.ki * dt + self.kd / dt) * error
            + (-two * self.kd / dt - self.kp) * self.prev_error
            + (self.kd / dt) * self.prev_error2;

        self.prev_output = output;
        self.prev_error2 = self.prev_error;
        self.prev_error = error;

        output
    }

    /// [`Pid::compute`] that rejects a non-positive `dt` without touching
    /// the history.
    pub fn try_compute(&mut self, setpoint: T, measurement: T, dt: T) -> Result<T, DynamicsError> {
        self.check_dt(dt)?;
        Ok(self.compute(setpoint, measurement, dt))
    }

    /// [`Pid::compute_recursive`] that rejects a non-positive `dt` without
    /// touching the history.
    pub fn try_compute_recursive(
        &mut self,
        setpoint: T,
        measurement: T,
        dt: T,
    ) -> Result<T, DynamicsError> {
        self.check_dt(dt)?;
        Ok(self.compute_recursive(setpoint, measurement, dt))
    }

    fn check_dt(&self, dt: T) -> Result<(), DynamicsError> {
        let checked = DynamicsError::check_dt(as_f64(dt));
        if let Err(err) = &checked {
            warn!(%err, "rejected PID step");
        }
        checked
    }
}

impl<T: Number> fmt::Debug for Pid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pid")
            .field("kp", &self.kp)
            .field("ki", &self.ki)
            .field("kd", &self.kd)
            .field("prev_error", &self.prev_error)
            .field("prev_error2", &self.prev_error2)
            .field("prev_output", &self.prev_output)
            .finish_non_exhaustive()
    }
}
