// src/system/missile_6dof_quat.rs

//! # Six-Degree-of-Freedom Rigid Body
//!
//! Thirteen-state rigid-body model with quaternion attitude, driven by a
//! body-frame force and torque. State layout:
//!
//! | index   | quantity                              |
//! |---------|---------------------------------------|
//! | 0..3    | position in the world frame           |
//! | 3..6    | velocity in the world frame           |
//! | 6..10   | attitude quaternion `[w, x, y, z]`    |
//! | 10..13  | body angular velocity                 |
//!
//! Control layout: body force `[Fx, Fy, Fz]` followed by body torque
//! `[Tx, Ty, Tz]`.
//!
//! ```text
//! accel     = R(q) F / mass - [0, 0, g]
//! q_dot     = 0.5 q (x) [0, omega]
//! omega_dot = J^-1 (T - omega x (J omega))
//! ```
//!
//! The quaternion is normalized when it is read to build the rotation, but
//! the stored quaternion is never renormalized after a step. Over long runs
//! its norm drifts from one.

use crate::integrate::euler_step;
use crate::{DynamicsError, System};
use nalgebra::{DVector, Matrix3, Quaternion, Vector3};
use tracing::{debug, trace, warn};

/// Number of state components.
pub const STATE_DIM: usize = 13;

/// Number of control components.
pub const CONTROL_DIM: usize = 6;

/// Physical parameters of a [`Missile6DofQuat`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Missile6DofQuatConfig {
    /// Vehicle mass in kg.
    pub mass: f64,
    /// Gravitational acceleration along world -Z.
    pub gravity: f64,
    /// Principal moments of inertia `[Ix, Iy, Iz]`.
    pub inertia: [f64; 3],
}

impl Missile6DofQuatConfig {
    /// Creates the reference airframe configuration.
    pub fn new() -> Self {
        Self {
            mass: 2513.74,
            gravity: 9.81,
            inertia: [451000.61, 171000.0, 171000.0],
        }
    }
}

impl Default for Missile6DofQuatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Quaternion rigid body with diagonal inertia.
#[derive(Debug, Clone, PartialEq)]
pub struct Missile6DofQuat {
    config: Missile6DofQuatConfig,
    inertia: Matrix3<f64>,
    inertia_inverse: Option<Matrix3<f64>>,
    state: DVector<f64>,
}

impl Missile6DofQuat {
    /// Creates the reference airframe at rest with identity attitude.
    pub fn new() -> Self {
        Self::with_config(Missile6DofQuatConfig::new())
    }

    /// Creates a body at rest with identity attitude using the provided
    /// configuration.
    pub fn with_config(config: Missile6DofQuatConfig) -> Self {
        let inertia = Matrix3::from_diagonal(&Vector3::from(config.inertia));
        debug!(?config, "created 6-DOF rigid body");
        Self {
            config,
            inertia,
            inertia_inverse: inertia.try_inverse(),
            state: Self::initial_state(),
        }
    }

    fn initial_state() -> DVector<f64> {
        let mut state = DVector::zeros(STATE_DIM);
        state[6] = 1.0;
        state
    }

    /// The physical parameters.
    pub fn config(&self) -> &Missile6DofQuatConfig {
        &self.config
    }

    /// Zeroes position, velocity and angular velocity and sets the identity
    /// attitude.
    pub fn reset_state(&mut self) {
        self.state = Self::initial_state();
        debug!("reset 6-DOF rigid body");
    }

    /// Snapshot of the 13-element state.
    pub fn state(&self) -> DVector<f64> {
        self.state.clone()
    }

    /// Replaces the state without validation.
    pub fn set_state(&mut self, state: DVector<f64>) {
        self.state = state;
    }

    /// State derivative at `state` under the body force/torque `control`.
    ///
    /// Panics if `state` has fewer than 13 or `control` fewer than 6
    /// elements.
    pub fn dynamics(&self, state: &DVector<f64>, control: &DVector<f64>) -> DVector<f64> {
        let velocity = Vector3::new(state[3], state[4], state[5]);
        let attitude = normalized(Quaternion::new(state[6], state[7], state[8], state[9]));
        let omega = Vector3::new(state[10], state[11], state[12]);

        let force = Vector3::new(control[0], control[1], control[2]);
        let torque = Vector3::new(control[3], control[4], control[5]);

        let mut acceleration = rotation_matrix(&attitude) * force / self.config.mass;
        acceleration.z -= self.config.gravity;

        let attitude_rate = attitude * Quaternion::from_imag(omega) * 0.5;

        let moment = torque - omega.cross(&(self.inertia * omega));
        let omega_rate = match self.inertia_inverse {
            Some(inverse) => inverse * moment,
            None => Vector3::repeat(f64::NAN),
        };

        let mut derivative = DVector::zeros(STATE_DIM);
        derivative.fixed_rows_mut::<3>(0).copy_from(&velocity);
        derivative.fixed_rows_mut::<3>(3).copy_from(&acceleration);
        derivative[6] = attitude_rate.scalar();
        derivative.fixed_rows_mut::<3>(7).copy_from(&attitude_rate.imag());
        derivative.fixed_rows_mut::<3>(10).copy_from(&omega_rate);
        derivative
    }

    /// Advances the stored state by one explicit-Euler step.
    pub fn update(&mut self, control: &DVector<f64>, dt: f64) {
        let derivative = self.dynamics(&self.state, control);
        euler_step(&mut self.state, &derivative, dt);
        trace!(state = ?self.state.as_slice(), "stepped 6-DOF rigid body");
    }

    /// [`Missile6DofQuat::update`] that rejects a non-positive `dt`, wrong
    /// vector lengths, a zero mass or singular inertia, or a non-finite
    /// derivative, leaving the state untouched.
    pub fn try_update(&mut self, control: &DVector<f64>, dt: f64) -> Result<(), DynamicsError> {
        let derivative = self.checked_dynamics(control, dt).map_err(|err| {
            warn!(%err, "rejected 6-DOF rigid body step");
            err
        })?;
        euler_step(&mut self.state, &derivative, dt);
        trace!(state = ?self.state.as_slice(), "stepped 6-DOF rigid body");
        Ok(())
    }

    fn checked_dynamics(&self, control: &DVector<f64>, dt: f64) -> Result<DVector<f64>, DynamicsError> {
        DynamicsError::check_dt(dt)?;
        DynamicsError::check_len(STATE_DIM, self.state.len())?;
        DynamicsError::check_len(CONTROL_DIM, control.len())?;
        if self.config.mass == 0.0 {
            return Err(DynamicsError::SingularDenominator {
                term: "mass",
                value: 0.0,
            });
        }
        if self.inertia_inverse.is_none() {
            return Err(DynamicsError::SingularDenominator {
                term: "inertia",
                value: self.inertia.determinant(),
            });
        }
        let derivative = self.dynamics(&self.state, control);
        if derivative.iter().any(|value| !value.is_finite()) {
            return Err(DynamicsError::NonFinite { what: "rigid body state derivative" });
        }
        Ok(derivative)
    }
}

/// Scales `q` to unit norm. Quaternions whose norm is zero or NaN are
/// returned unchanged.
fn normalized(q: Quaternion<f64>) -> Quaternion<f64> {
    let norm = q.norm();
    if norm > 0.0 {
        q / norm
    } else {
        q
    }
}

/// Rotation matrix of a unit quaternion, expanded so that the zero
/// quaternion maps to the identity.
fn rotation_matrix(q: &Quaternion<f64>) -> Matrix3<f64> {
    let (w, x, y, z) = (q.w, q.i, q.j, q.k);
    Matrix3::new(
        1.0 - 2.0 * (y * y + z * z),
        2.0 * (x * y - w * z),
        2.0 * (x * z + w * y),
        2.0 * (x * y + w * z),
        1.0 - 2.0 * (x * x + z * z),
        2.0 * (y * z - w * x),
        2.0 * (x * z - w * y),
        2.0 * (y * z + w * x),
        1.0 - 2.0 * (x * x + y * y),
    )
}

impl Default for Missile6DofQuat {
    fn default() -> Self {
        Self::new()
    }
}

impl System<f64> for Missile6DofQuat {
    fn state(&self) -> DVector<f64> {
        self.state.clone()
    }

    fn step(&mut self, input: &DVector<f64>, dt: f64) {
        self.update(input, dt);
    }
}
