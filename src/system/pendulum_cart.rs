// src/system/pendulum_cart.rs

//! # Pendulum on a Cart
//!
//! Four-state nonlinear model of a rigid pendulum hinged on a cart that
//! moves along a line with viscous friction. The angle is measured from the
//! hanging position, so `theta = pi` is the upright equilibrium.
//!
//! Cart acceleration `a` and angular acceleration `alpha` follow from the
//! Lagrangian equations of motion:
//!
//! ```text
//! d     = (I + m l^2)(m + M) - m^2 l^2 cos^2(theta)
//! a     = ((F - b v)(I + m l^2) + m l sin(theta) (omega^2 (I + m l^2) + g m l cos(theta))) / d
//! alpha = 2 l m (g (M + m) sin(theta) + cos(theta) (F - b v + omega^2 l m sin(theta)))
//!         / (-2 I (m + M) - l^2 m (m + 2 M) + l^2 m^2 cos(2 theta))
//! ```
//!
//! Both denominators can vanish for degenerate parameters. [`update`]
//! propagates the resulting Inf/NaN; [`try_update`] reports it.
//!
//! [`update`]: PendulumOnCart::update
//! [`try_update`]: PendulumOnCart::try_update

use crate::integrate::euler;
use crate::number::{as_f64, constant};
use crate::{DynamicsError, Real, System};
use nalgebra::DVector;
use tracing::{debug, trace, warn};

/// Standard gravity in m/s^2.
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Default initial pendulum angle: just past upright.
pub const INITIAL_ANGLE: f64 = core::f64::consts::PI + 0.01;

/// Physical parameters of a [`PendulumOnCart`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendulumOnCartConfig<T> {
    /// Cart mass `M`.
    pub mass_cart: T,
    /// Pendulum mass `m`.
    pub mass_pendulum: T,
    /// Distance `l` from the hinge to the pendulum's center of mass.
    pub length: T,
    /// Viscous friction coefficient `b` of the cart.
    pub friction_cart: T,
    /// Pendulum moment of inertia `I` about its center of mass.
    pub inertia: T,
    /// Gravitational acceleration `g`.
    pub gravity: T,
}

impl<T: Real> PendulumOnCartConfig<T> {
    /// Creates the benchtop rig configuration: 0.5 kg cart, 0.2 kg pendulum
    /// with its center of mass 0.3 m from the hinge.
    ///
    /// Example Usage
    /// ```
    /// use plant_control_sim::{PendulumOnCart, PendulumOnCartConfig};
    ///
    /// let mut config = PendulumOnCartConfig::<f64>::new();
    /// config.friction_cart = 0.0;
    ///
    /// let pendulum = PendulumOnCart::with_config(config);
    /// assert_eq!(0.0, pendulum.config().friction_cart);
    /// ```
    pub fn new() -> Self {
        Self {
            mass_cart: constant(0.5),
            mass_pendulum: constant(0.2),
            length: constant(0.3),
            friction_cart: constant(0.1),
            inertia: constant(0.006),
            gravity: constant(STANDARD_GRAVITY),
        }
    }
}

impl<T: Real> Default for PendulumOnCartConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
struct Accelerations<T> {
    cart: T,
    angular: T,
    cart_denominator: T,
    angular_denominator: T,
}

/// Cart/pendulum plant with state `[x, v, theta, omega]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumOnCart<T> {
    config: PendulumOnCartConfig<T>,
    position: T,
    velocity: T,
    angle: T,
    angular_velocity: T,
}

impl<T: Real> PendulumOnCart<T> {
    /// Creates a cart at rest at the origin with the pendulum just past
    /// upright, under standard gravity.
    pub fn new(mass_cart: T, mass_pendulum: T, length: T, friction_cart: T, inertia: T) -> Self {
        Self::with_config(PendulumOnCartConfig {
            mass_cart,
            mass_pendulum,
            length,
            friction_cart,
            inertia,
            gravity: constant(STANDARD_GRAVITY),
        })
    }

    /// Creates a cart at rest at the origin with the pendulum just past
    /// upright using the provided configuration.
    pub fn with_config(config: PendulumOnCartConfig<T>) -> Self {
        debug!(?config, "created pendulum on cart");
        Self {
            config,
            position: T::zero(),
            velocity: T::zero(),
            angle: constant(INITIAL_ANGLE),
            angular_velocity: T::zero(),
        }
    }

    /// The physical parameters.
    pub fn config(&self) -> &PendulumOnCartConfig<T> {
        &self.config
    }

    /// Reassigns the full state. Parameters are kept.
    pub fn reset(&mut self, position: T, velocity: T, angle: T, angular_velocity: T) {
        self.position = position;
        self.velocity = velocity;
        self.angle = angle;
        self.angular_velocity = angular_velocity;
        debug!(?position, ?velocity, ?angle, ?angular_velocity, "reset pendulum on cart");
    }

    /// Puts the cart back at rest at the origin with the pendulum at
    /// [`INITIAL_ANGLE`].
    pub fn reset_default(&mut self) {
        self.reset(T::zero(), T::zero(), constant(INITIAL_ANGLE), T::zero());
    }

    /// Cart position `x`.
    pub fn position(&self) -> T {
        self.position
    }

    /// Cart velocity `v`.
    pub fn velocity(&self) -> T {
        self.velocity
    }

    /// Pendulum angle `theta`, zero when hanging.
    pub fn angle(&self) -> T {
        self.angle
    }

    /// Pendulum angular velocity `omega`.
    pub fn angular_velocity(&self) -> T {
        self.angular_velocity
    }

    /// State as `[x, v, theta, omega]`.
    pub fn state(&self) -> [T; 4] {
        [self.position, self.velocity, self.angle, self.angular_velocity]
    }

    /// Total mechanical energy, with the potential referenced to the hinge
    /// height.
    pub fn energy(&self) -> T {
        let PendulumOnCartConfig {
            mass_cart: big_m,
            mass_pendulum: m,
            length: l,
            inertia: i,
            gravity: g,
            ..
        } = self.config;
        let half = constant::<T>(0.5);
        let (v, omega) = (self.velocity, self.angular_velocity);
        let cos_theta = self.angle.cos();

        half * (big_m + m) * v * v
            + m * l * v * omega * cos_theta
            + half * (i + m * l * l) * omega * omega
            - m * g * l * cos_theta
    }

    /// State derivative `[v, a, omega, alpha]` at `state` under `force`.
    pub fn dynamics(&self, state: [T; 4], force: T) -> [T; 4] {
        let [_, velocity, angle, angular_velocity] = state;
        let acc = self.accelerations(velocity, angle, angular_velocity, force);
        [velocity, acc.cart, angular_velocity, acc.angular]
    }

    /// Advances one explicit-Euler step under the horizontal `force`.
    pub fn update(&mut self, force: T, dt: T) {
        let acc = self.accelerations(self.velocity, self.angle, self.angular_velocity, force);
        self.apply(acc, dt);
    }

    /// [`PendulumOnCart::update`] that rejects a non-positive `dt`, a
    /// vanishing denominator, or non-finite accelerations, leaving the state
    /// untouched.
    pub fn try_update(&mut self, force: T, dt: T) -> Result<(), DynamicsError> {
        let acc = self
            .checked_accelerations(force, dt)
            .map_err(|err| {
                warn!(%err, "rejected pendulum on cart step");
                err
            })?;
        self.apply(acc, dt);
        Ok(())
    }

    fn checked_accelerations(&self, force: T, dt: T) -> Result<Accelerations<T>, DynamicsError> {
        DynamicsError::check_dt(as_f64(dt))?;
        let acc = self.accelerations(self.velocity, self.angle, self.angular_velocity, force);
        if acc.cart_denominator == T::zero() {
            return Err(DynamicsError::SingularDenominator {
                term: "cart acceleration",
                value: as_f64(acc.cart_denominator),
            });
        }
        if acc.angular_denominator == T::zero() {
            return Err(DynamicsError::SingularDenominator {
                term: "angular acceleration",
                value: as_f64(acc.angular_denominator),
            });
        }
        if !(acc.cart.is_finite() && acc.angular.is_finite()) {
            return Err(DynamicsError::NonFinite { what: "pendulum on cart acceleration" });
        }
        Ok(acc)
    }

    fn apply(&mut self, acc: Accelerations<T>, dt: T) {
        self.position = euler(self.position, self.velocity, dt);
        self.velocity = euler(self.velocity, acc.cart, dt);
        self.angle = euler(self.angle, self.angular_velocity, dt);
        self.angular_velocity = euler(self.angular_velocity, acc.angular, dt);
        trace!(
            position = ?self.position,
            velocity = ?self.velocity,
            angle = ?self.angle,
            angular_velocity = ?self.angular_velocity,
            "stepped pendulum on cart"
        );
    }

    fn accelerations(&self, v: T, theta: T, omega: T, force: T) -> Accelerations<T> {
        let PendulumOnCartConfig {
            mass_cart: big_m,
            mass_pendulum: m,
            length: l,
            friction_cart: b,
            inertia: i,
            gravity: g,
        } = self.config;
        let two = T::one() + T::one();
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        let cart_denominator = (i + m * l * l) * (m + big_m) - m * m * l * l * cos_theta * cos_theta;
        let cart = ((-b * v + force) * (i + m * l * l)
            + m * l * sin_theta * (omega * omega * (i + m * l * l) + g * m * l * cos_theta))
            / cart_denominator;

        let angular_denominator = -two * i * (m + big_m) - l * l * m * (m + two * big_m)
            + l * l * m * m * (two * theta).cos();
        let angular = (two
            * l
            * m
            * (g * (big_m + m) * sin_theta
                + cos_theta * (-b * v + force + omega * omega * l * m * sin_theta)))
            / angular_denominator;

        Accelerations {
            cart,
            angular,
            cart_denominator,
            angular_denominator,
        }
    }
}

impl<T: Real> System<T> for PendulumOnCart<T> {
    fn state(&self) -> DVector<T> {
        DVector::from_row_slice(&PendulumOnCart::state(self))
    }

    fn step(&mut self, input: &DVector<T>, dt: T) {
        self.update(input[0], dt);
    }
}
