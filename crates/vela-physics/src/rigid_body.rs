// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rigid-body state: mass, velocity, accumulated acceleration, and material.
//!
//! The body only stores state and performs the per-body integration; the
//! contact scan and resolution live in [`crate::step`] because they need the
//! whole scene.

use vela_math::Vec3;

use crate::error::{SceneError, SceneResult};
use crate::settings::PhysicsSettings;

/// Linear rigid body (no angular state).
///
/// Invariants:
/// - `mass` is finite and strictly positive.
/// - `friction` and `restitution` lie in `[0, 1]`.
/// - `linear_damping` is finite and non-negative.
/// - `acceleration` only accumulates `force / mass` between steps and is zero
///   after every step.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    mass: f32,
    velocity: Vec3,
    acceleration: Vec3,
    use_gravity: bool,
    gravity: Vec3,
    friction: f32,
    restitution: f32,
    linear_damping: f32,
}

fn check_unit(name: &'static str, value: f32) -> SceneResult<f32> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SceneError::InvalidCoefficient { name, value })
    }
}

fn check_finite(what: &'static str, value: Vec3) -> SceneResult<Vec3> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SceneError::NonFinite {
            what,
            value: value.to_array(),
        })
    }
}

impl RigidBody {
    /// Body at rest with default gravity, no friction, no bounce, and no
    /// damping.
    ///
    /// # Errors
    /// [`SceneError::InvalidMass`] unless `mass` is finite and `> 0`.
    pub fn new(mass: f32) -> SceneResult<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SceneError::InvalidMass(mass));
        }
        Ok(Self {
            mass,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            use_gravity: true,
            gravity: PhysicsSettings::default().gravity(),
            friction: 0.0,
            restitution: 0.0,
            linear_damping: 0.0,
        })
    }

    /// Sets friction (builder form).
    pub fn with_friction(mut self, friction: f32) -> SceneResult<Self> {
        self.set_friction(friction)?;
        Ok(self)
    }

    /// Sets restitution (builder form).
    pub fn with_restitution(mut self, restitution: f32) -> SceneResult<Self> {
        self.set_restitution(restitution)?;
        Ok(self)
    }

    /// Sets linear damping (builder form).
    pub fn with_linear_damping(mut self, damping: f32) -> SceneResult<Self> {
        self.set_linear_damping(damping)?;
        Ok(self)
    }

    /// Sets the gravity vector (builder form).
    pub fn with_gravity(mut self, gravity: Vec3) -> SceneResult<Self> {
        self.set_gravity(gravity)?;
        Ok(self)
    }

    /// Sets the initial velocity (builder form).
    pub fn with_velocity(mut self, velocity: Vec3) -> SceneResult<Self> {
        self.set_velocity(velocity)?;
        Ok(self)
    }

    /// Enables or disables gravity (builder form).
    #[must_use]
    pub fn with_use_gravity(mut self, use_gravity: bool) -> Self {
        self.use_gravity = use_gravity;
        self
    }

    /// Mass in kilograms.
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Current linear velocity.
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Overwrites the velocity.
    pub fn set_velocity(&mut self, velocity: Vec3) -> SceneResult<()> {
        self.velocity = check_finite("velocity", velocity)?;
        Ok(())
    }

    /// Acceleration accumulated since the last step.
    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    /// Whether gravity is applied each step.
    pub fn use_gravity(&self) -> bool {
        self.use_gravity
    }

    /// Enables or disables gravity.
    pub fn set_use_gravity(&mut self, use_gravity: bool) {
        self.use_gravity = use_gravity;
    }

    /// Gravity acceleration applied when enabled.
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Replaces the gravity vector.
    pub fn set_gravity(&mut self, gravity: Vec3) -> SceneResult<()> {
        self.gravity = check_finite("gravity", gravity)?;
        Ok(())
    }

    /// Friction coefficient applied on floor/ceiling contacts.
    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Sets the friction coefficient.
    ///
    /// # Errors
    /// [`SceneError::InvalidCoefficient`] outside `[0, 1]`.
    pub fn set_friction(&mut self, friction: f32) -> SceneResult<()> {
        self.friction = check_unit("friction", friction)?;
        Ok(())
    }

    /// Restitution (bounciness).
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    /// Sets restitution.
    ///
    /// # Errors
    /// [`SceneError::InvalidCoefficient`] outside `[0, 1]`.
    pub fn set_restitution(&mut self, restitution: f32) -> SceneResult<()> {
        self.restitution = check_unit("restitution", restitution)?;
        Ok(())
    }

    /// Linear damping per second.
    pub fn linear_damping(&self) -> f32 {
        self.linear_damping
    }

    /// Sets linear damping.
    ///
    /// # Errors
    /// [`SceneError::InvalidDamping`] if negative or not finite.
    pub fn set_linear_damping(&mut self, damping: f32) -> SceneResult<()> {
        if !(damping.is_finite() && damping >= 0.0) {
            return Err(SceneError::InvalidDamping(damping));
        }
        self.linear_damping = damping;
        Ok(())
    }

    /// Accumulates `force / mass` into the acceleration for the next step.
    ///
    /// # Errors
    /// [`SceneError::NonFinite`] if `force` carries NaN or infinity.
    pub fn apply_force(&mut self, force: Vec3) -> SceneResult<()> {
        let force = check_finite("force", force)?;
        self.acceleration += force.scale(1.0 / self.mass);
        Ok(())
    }

    /// Adds an acceleration directly, independent of mass.
    pub(crate) fn accelerate(&mut self, acceleration: Vec3) {
        self.acceleration += acceleration;
    }

    /// `velocity += acceleration * dt`, then damping.
    pub(crate) fn integrate(&mut self, dt: f32) {
        self.velocity += self.acceleration.scale(dt);
        let keep = (1.0 - self.linear_damping * dt).max(0.0);
        self.velocity = self.velocity.scale(keep);
    }

    pub(crate) fn set_velocity_unchecked(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Zeroes velocity and acceleration if both are below `epsilon`.
    pub(crate) fn try_sleep(&mut self, epsilon: f32) -> bool {
        if self.velocity.length() < epsilon && self.acceleration.length() < epsilon {
            self.velocity = Vec3::ZERO;
            self.acceleration = Vec3::ZERO;
            return true;
        }
        false
    }

    pub(crate) fn clear_acceleration(&mut self) {
        self.acceleration = Vec3::ZERO;
    }
}
