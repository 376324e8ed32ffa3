// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Rigid bodies
//!
//! A [`RigidBody`] carries pose, velocities, mass, a force accumulator and a
//! shared reference to its [`Collider`]. Bodies whose mass is zero, negative
//! or non-finite are static: their inverse mass is zero and the engine never
//! changes their state.

use crate::collider::{Bounds, Collider, WorldShape};
use crate::material::PhysicsMaterial;
use crate::math::{try_normalize_quat, Pose};
use glam::{DQuat, DVec3};
use std::sync::Arc;
use tracing::warn;

/// Mass with precomputed inverse
///
/// Represents the mass of a body in kilograms. Zero, negative and
/// non-finite values describe an immovable body with zero inverse mass, so
/// no code path ever divides by mass. A positive mass so small that its
/// inverse overflows (subnormal values) is immovable too.
///
/// # Examples
///
/// ```
/// use rigid_physics::body::Mass;
///
/// let mass = Mass::new(2.0);
/// assert_eq!(mass.inverse(), 0.5);
///
/// let floor = Mass::new(0.0);
/// assert!(floor.is_immovable());
/// assert_eq!(floor.inverse(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mass {
    value: f64,
    inverse: f64,
}

impl Mass {
    /// Derive a mass from a raw value; never fails
    pub fn new(value: f64) -> Self {
        let inverse = 1.0 / value;
        if value.is_finite() && value > 0.0 && inverse.is_finite() {
            Mass { value, inverse }
        } else {
            Self::immovable()
        }
    }

    /// Create an immovable mass (treated as infinite mass)
    pub fn immovable() -> Self {
        Mass {
            value: 0.0,
            inverse: 0.0,
        }
    }

    /// Get the mass value; `0` for immovable bodies
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Check if this is an immovable body
    pub fn is_immovable(&self) -> bool {
        self.inverse == 0.0
    }

    /// Get the inverse mass (1/m), `0` for immovable bodies
    pub fn inverse(&self) -> f64 {
        self.inverse
    }
}

/// A simulated body
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use glam::DVec3;
/// use rigid_physics::body::RigidBody;
/// use rigid_physics::collider::Collider;
/// use rigid_physics::material::PhysicsMaterial;
///
/// let shape = Arc::new(Collider::sphere(1.0).unwrap());
/// let mut ball = RigidBody::new(
///     shape,
///     1.0,
///     PhysicsMaterial::default(),
///     0,
///     DVec3::new(0.0, 5.0, 0.0),
///     DVec3::ZERO,
///     DVec3::ZERO,
/// );
/// ball.apply_force(DVec3::new(0.0, 10.0, 0.0));
/// assert_eq!(ball.force(), DVec3::new(0.0, 10.0, 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct RigidBody {
    pose: Pose,
    linear_velocity: DVec3,
    angular_velocity: DVec3,
    mass: Mass,
    force: DVec3,
    collider: Arc<Collider>,
    material: PhysicsMaterial,
    layer: u32,
}

impl RigidBody {
    /// Create a body at `position` with identity orientation
    ///
    /// A mass `<= 0` makes the body static; its velocities are zeroed.
    ///
    /// An AABB collider only translates with the body. Its orientation still
    /// integrates from `angular_velocity` and is reported to renderers, so a
    /// spinning AABB body draws rotated while colliding axis-aligned; use
    /// [`Collider::obb`] for boxes that rotate.
    pub fn new(
        collider: Arc<Collider>,
        mass: f64,
        material: PhysicsMaterial,
        layer: u32,
        position: DVec3,
        linear_velocity: DVec3,
        angular_velocity: DVec3,
    ) -> Self {
        let mass = Mass::new(mass);
        let (linear_velocity, angular_velocity) = if mass.is_immovable() {
            (DVec3::ZERO, DVec3::ZERO)
        } else {
            (linear_velocity, angular_velocity)
        };
        if angular_velocity != DVec3::ZERO && matches!(*collider, Collider::Aabb { .. }) {
            warn!(?angular_velocity, "spinning body with an AABB collider collides axis-aligned");
        }

        RigidBody {
            pose: Pose::from_position(position),
            linear_velocity,
            angular_velocity,
            mass,
            force: DVec3::ZERO,
            collider,
            material,
            layer,
        }
    }

    /// Static body at `position`
    pub fn fixed(collider: Arc<Collider>, material: PhysicsMaterial, layer: u32, position: DVec3) -> Self {
        RigidBody::new(collider, 0.0, material, layer, position, DVec3::ZERO, DVec3::ZERO)
    }

    /// Set the initial orientation; non-normalizable input is ignored
    pub fn with_orientation(mut self, orientation: DQuat) -> Self {
        self.set_orientation(orientation);
        self
    }

    /// World-space position
    pub fn position(&self) -> DVec3 {
        self.pose.position
    }

    /// World-space orientation
    pub fn orientation(&self) -> DQuat {
        self.pose.orientation
    }

    /// Position and orientation together
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Linear velocity
    pub fn linear_velocity(&self) -> DVec3 {
        self.linear_velocity
    }

    /// Angular velocity in radians per second
    pub fn angular_velocity(&self) -> DVec3 {
        self.angular_velocity
    }

    /// Mass and inverse mass
    pub fn mass(&self) -> Mass {
        self.mass
    }

    /// Inverse mass, `0` for static bodies
    pub fn inverse_mass(&self) -> f64 {
        self.mass.inverse()
    }

    /// Whether the body is static
    pub fn is_static(&self) -> bool {
        self.mass.is_immovable()
    }

    /// Whether the body is simulated
    pub fn is_dynamic(&self) -> bool {
        !self.is_static()
    }

    /// Force accumulated for the next tick
    pub fn force(&self) -> DVec3 {
        self.force
    }

    /// Shape shared with the caller
    pub fn collider(&self) -> &Arc<Collider> {
        &self.collider
    }

    /// Surface material
    pub fn material(&self) -> &PhysicsMaterial {
        &self.material
    }

    /// Collision layer
    pub fn layer(&self) -> u32 {
        self.layer
    }

    /// Collider placed at the current pose
    pub fn world_shape(&self) -> WorldShape {
        self.collider.at(&self.pose)
    }

    /// World-space bounds of the collider
    pub fn bounds(&self) -> Bounds {
        self.collider.bounds(&self.pose)
    }

    /// Accumulate a force for the next tick
    ///
    /// No-op for static bodies. Non-finite forces are dropped with a warning.
    pub fn apply_force(&mut self, force: DVec3) {
        if self.is_static() {
            return;
        }
        if !force.is_finite() {
            warn!(?force, "ignoring non-finite force");
            return;
        }
        self.force += force;
    }

    /// Change velocity by `impulse / mass`; no-op for static bodies
    pub fn apply_impulse(&mut self, impulse: DVec3) {
        if self.is_static() || !impulse.is_finite() {
            return;
        }
        self.linear_velocity += impulse * self.mass.inverse();
    }

    /// Move the body; teleports without affecting velocity
    pub fn set_position(&mut self, position: DVec3) {
        if position.is_finite() {
            self.pose.position = position;
        }
    }

    /// Rotate the body; the quaternion is normalized, unusable input is ignored
    pub fn set_orientation(&mut self, orientation: DQuat) {
        if let Some(q) = try_normalize_quat(orientation) {
            self.pose.orientation = q;
        }
    }

    /// Set linear velocity; no-op for static bodies
    pub fn set_linear_velocity(&mut self, velocity: DVec3) {
        if self.is_dynamic() && velocity.is_finite() {
            self.linear_velocity = velocity;
        }
    }

    /// Set angular velocity; no-op for static bodies
    ///
    /// Rotation does not affect an AABB collider, see [`RigidBody::new`].
    pub fn set_angular_velocity(&mut self, velocity: DVec3) {
        if self.is_dynamic() && velocity.is_finite() {
            self.angular_velocity = velocity;
        }
    }

    /// Scale the accumulated force down to `max_magnitude` if it exceeds it
    ///
    /// Returns `true` if the force was clamped.
    pub(crate) fn clamp_force(&mut self, max_magnitude: f64) -> bool {
        let magnitude = self.force.length();
        if magnitude > max_magnitude {
            self.force *= max_magnitude / magnitude;
            true
        } else {
            false
        }
    }

    pub(crate) fn clear_force(&mut self) {
        self.force = DVec3::ZERO;
    }

    pub(crate) fn set_state(&mut self, pose: Pose, linear_velocity: DVec3, angular_velocity: DVec3) {
        self.pose = pose;
        self.linear_velocity = linear_velocity;
        self.angular_velocity = angular_velocity;
    }

    /// Direct position offset used by penetration correction
    pub(crate) fn translate(&mut self, offset: DVec3) {
        self.pose.position += offset;
    }
}
