// src/system/mass_spring_damper.rs

//! # Mass-Spring-Damper
//!
//! Two-state linear oscillator driven by an external force:
//!
//! ```text
//! a = (F - c v - k x) / m
//! v <- v + a dt
//! x <- x + v dt
//! ```
//!
//! The position update uses the freshly updated velocity.

use crate::integrate::euler;
use crate::number::{as_f64, constant};
use crate::{DynamicsError, Real, System};
use nalgebra::DVector;
use tracing::{debug, trace, warn};

/// Physical parameters of a [`MassSpringDamper`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MassSpringDamperConfig<T> {
    /// Moving mass `m`. Must be non-zero.
    pub mass: T,
    /// Viscous damping coefficient `c`.
    pub damping: T,
    /// Spring stiffness `k`.
    pub stiffness: T,
}

impl<T: Real> MassSpringDamperConfig<T> {
    /// Creates a configuration for a 1 kg mass on a 5 N/m spring with
    /// 0.5 N s/m of damping.
    pub fn new() -> Self {
        Self {
            mass: T::one(),
            damping: constant(0.5),
            stiffness: constant(5.0),
        }
    }
}

impl<T: Real> Default for MassSpringDamperConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Forced mass-spring-damper with position/velocity state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassSpringDamper<T> {
    config: MassSpringDamperConfig<T>,
    position: T,
    velocity: T,
}

impl<T: Real> MassSpringDamper<T> {
    /// Creates a system at rest at the origin.
    pub fn new(mass: T, damping: T, stiffness: T) -> Self {
        Self::with_config(MassSpringDamperConfig {
            mass,
            damping,
            stiffness,
        })
    }

    /// Creates a system at rest at the origin using the provided
    /// configuration.
    pub fn with_config(config: MassSpringDamperConfig<T>) -> Self {
        debug!(?config, "created mass-spring-damper");
        Self {
            config,
            position: T::zero(),
            velocity: T::zero(),
        }
    }

    /// The physical parameters.
    pub fn config(&self) -> &MassSpringDamperConfig<T> {
        &self.config
    }

    /// Moves the mass to `position` with `velocity`.
    pub fn reset(&mut self, position: T, velocity: T) {
        self.position = position;
        self.velocity = velocity;
        debug!(?position, ?velocity, "reset mass-spring-damper");
    }

    /// Current position.
    pub fn position(&self) -> T {
        self.position
    }

    /// Current velocity.
    pub fn velocity(&self) -> T {
        self.velocity
    }

    /// Stored mechanical energy `m v^2 / 2 + k x^2 / 2`.
    pub fn energy(&self) -> T {
        let half = constant::<T>(0.5);
        half * self.config.mass * self.velocity * self.velocity
            + half * self.config.stiffness * self.position * self.position
    }

    /// Advances one step under `force`.
    pub fn update(&mut self, force: T, dt: T) {
        (self.position, self.velocity) = self.advance(force, dt);
        trace!(position = ?self.position, velocity = ?self.velocity, "stepped mass-spring-damper");
    }

    /// [`MassSpringDamper::update`] that rejects a non-positive `dt`, a zero
    /// mass, or a non-finite result, leaving the state untouched.
    pub fn try_update(&mut self, force: T, dt: T) -> Result<(), DynamicsError> {
        self.checked_advance(force, dt)
            .map(|(position, velocity)| {
                self.position = position;
                self.velocity = velocity;
            })
            .map_err(|err| {
                warn!(%err, "rejected mass-spring-damper step");
                err
            })
    }

    fn checked_advance(&self, force: T, dt: T) -> Result<(T, T), DynamicsError> {
        DynamicsError::check_dt(as_f64(dt))?;
        if self.config.mass == T::zero() {
            return Err(DynamicsError::SingularDenominator {
                term: "mass",
                value: 0.0,
            });
        }
        let (position, velocity) = self.advance(force, dt);
        if !(position.is_finite() && velocity.is_finite()) {
            return Err(DynamicsError::NonFinite { what: "mass-spring-damper state" });
        }
        Ok((position, velocity))
    }

    fn advance(&self, force: T, dt: T) -> (T, T) {
        let MassSpringDamperConfig {
            mass,
            damping,
            stiffness,
        } = self.config;
        let acceleration = (force - damping * self.velocity - stiffness * self.position) / mass;
        let velocity = euler(self.velocity, acceleration, dt);
        let position = euler(self.position, velocity, dt);
        (position, velocity)
    }
}

impl<T: Real> System<T> for MassSpringDamper<T> {
    fn state(&self) -> DVector<T> {
        DVector::from_vec(vec![self.position, self.velocity])
    }

    fn step(&mut self, input: &DVector<T>, dt: T) {
        self.update(input[0], dt);
    }
}
