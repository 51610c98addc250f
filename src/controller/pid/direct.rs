// src/controller/pid/direct.rs

//! # Direct-Form PID Compute Callback
//!
//! This module provides the `piddiy` compute callback and control data
//! structure for the direct (positional) PID form: the integral term is
//! accumulated explicitly and the derivative is a backward difference of
//! the error.

use crate::Number;
use piddiy::PidController;

/// Control data for the direct-form PID compute callback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DirectControlData<T> {
    /// The current measurement of the controlled quantity.
    pub measurement: T,
    /// The time delta since the last computation.
    pub dt: T,
}

/// Direct-form PID compute callback.
///
/// Returns `(error, integral, derivative)`; `piddiy` stores them on the
/// controller and weights them with `kp`, `ki` and `kd`.
pub fn compute_direct<T: Number>(
    pid: &mut PidController<T, DirectControlData<T>>,
    data: DirectControlData<T>,
) -> (T, T, T) {
    let error = pid.set_point - data.measurement;
    let integral = pid.integral + error * data.dt;
    let derivative = (error - pid.error) / data.dt;

    (error, integral, derivative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn controller(set_point: f64, kp: f64, ki: f64, kd: f64) -> PidController<f64, DirectControlData<f64>> {
        let mut pid = PidController::new();
        pid.compute_fn(compute_direct)
            .set_point(set_point)
            .kp(kp)
            .ki(ki)
            .kd(kd);
        pid
    }

    /// A set point step shows up as a one-tick derivative kick.
    #[test]
    fn test_pid_direct_set_point_kick() {
        let mut pid = controller(0.0, 0.0, 0.0, 1.0);
        let data = DirectControlData {
            measurement: 0.0,
            dt: 0.1,
        };
        assert!(value_close(0.0, pid.compute(data)));

        pid.set_point = 2.0;
        let (error, _, derivative) = compute_direct(&mut pid, data);
        assert!(value_close(2.0, error));
        assert!(value_close(20.0, derivative));
        assert!(value_close(20.0, pid.compute(data)));

        // Error is steady again, so the kick is gone.
        assert!(value_close(0.0, pid.compute(data)));
    }

    /// The integral is scaled by the time step, the derivative divided by it.
    #[test]
    fn test_pid_direct_time_step_scaling() {
        let mut pid = controller(4.0, 0.0, 1.0, 1.0);
        let data = DirectControlData {
            measurement: 1.0,
            dt: 0.5,
        };

        let (error, integral, derivative) = compute_direct(&mut pid, data);
        assert!(value_close(3.0, error));
        assert!(value_close(1.5, integral));
        assert!(value_close(6.0, derivative));
        assert!(value_close(7.5, pid.compute(data)));
    }

    /// Each tick weights the integral and derivative by its own time step.
    #[test]
    fn test_pid_direct_varying_time_step() {
        let mut pid = controller(1.0, 0.0, 1.0, 0.0);
        let short = DirectControlData {
            measurement: 0.0,
            dt: 0.1,
        };
        let long = DirectControlData {
            measurement: 0.0,
            dt: 0.4,
        };
        assert!(value_close(0.1, pid.compute(short)));
        assert!(value_close(0.5, pid.compute(long)));

        let mut pid = controller(1.0, 0.0, 0.0, 1.0);
        pid.compute(short);
        let settled = DirectControlData {
            measurement: 1.0,
            dt: 0.25,
        };
        let (error, _, derivative) = compute_direct(&mut pid, settled);
        assert!(value_close(0.0, error));
        assert!(value_close(-4.0, derivative));
    }
}
