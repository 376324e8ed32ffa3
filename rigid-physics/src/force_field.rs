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
//! Force fields
//!
//! A [`ForceField`] pairs a [`ForceLaw`] with a [`FieldScope`]. Fields are
//! evaluated at each dynamic body's position before integration and the
//! results are accumulated into the body's force buffer.
//!
//! # Point Falloff
//!
//! The point law falls off linearly: at distance `d` from the center the
//! magnitude is `|strength| * (1 - d / falloff_radius)` for `d < falloff_radius`
//! and zero beyond. Magnitude therefore decreases strictly with distance
//! inside the radius. Exactly at the center the direction is undefined and
//! the force is zero.
//!
//! # Safety Limits
//!
//! Non-finite field outputs are skipped with a warning. After all fields have
//! been applied, the accumulated force is clamped to the engine's
//! `max_force_magnitude`.

use crate::body::RigidBody;
use crate::collider::Collider;
use crate::handle::{Arena, Handle};
use crate::math::{Pose, GEOMETRY_EPSILON};
use glam::DVec3;
use std::sync::Arc;
use tracing::warn;

/// Handle to a force field registered with an engine
pub type FieldHandle = Handle<ForceField>;

/// Function of position producing a force
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForceLaw {
    /// Same force everywhere
    Uniform(DVec3),
    /// Radial force around a center
    Point {
        /// Field center in world space
        center: DVec3,
        /// Positive attracts toward the center, negative repels
        strength: f64,
        /// Distance at which the force reaches zero
        falloff_radius: f64,
    },
}

impl ForceLaw {
    /// Force produced at `position`
    pub fn force_at(&self, position: DVec3) -> DVec3 {
        match *self {
            ForceLaw::Uniform(force) => force,
            ForceLaw::Point {
                center,
                strength,
                falloff_radius,
            } => {
                let to_center = center - position;
                let distance = to_center.length();
                if distance <= GEOMETRY_EPSILON || !(distance < falloff_radius) {
                    return DVec3::ZERO;
                }
                let magnitude = strength * (1.0 - distance / falloff_radius);
                to_center / distance * magnitude
            }
        }
    }
}

/// Where a field applies
#[derive(Debug, Clone, PartialEq)]
pub enum FieldScope {
    /// Every dynamic body
    Global,
    /// Only bodies whose position lies inside the collider at `pose`
    Bound {
        /// Region shape
        collider: Arc<Collider>,
        /// Region placement
        pose: Pose,
    },
}

impl FieldScope {
    /// Whether a world-space position is in scope
    pub fn contains(&self, position: DVec3) -> bool {
        match self {
            FieldScope::Global => true,
            FieldScope::Bound { collider, pose } => collider.contains_point(pose, position),
        }
    }
}

/// A force generator
///
/// # Examples
///
/// ```
/// use glam::DVec3;
/// use rigid_physics::force_field::{ForceField, ForceLaw};
///
/// let wind = ForceField::global(ForceLaw::Uniform(DVec3::new(2.0, 0.0, 0.0)));
/// assert_eq!(wind.force_on(DVec3::new(100.0, 0.0, 0.0)), Some(DVec3::new(2.0, 0.0, 0.0)));
///
/// let well = ForceField::global(ForceLaw::Point {
///     center: DVec3::ZERO,
///     strength: 10.0,
///     falloff_radius: 4.0,
/// });
/// let pull = well.force_on(DVec3::new(2.0, 0.0, 0.0)).unwrap();
/// assert_eq!(pull, DVec3::new(-5.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ForceField {
    law: ForceLaw,
    scope: FieldScope,
}

impl ForceField {
    /// Create a field with an explicit scope
    pub fn new(law: ForceLaw, scope: FieldScope) -> Self {
        ForceField { law, scope }
    }

    /// Field that applies to every dynamic body
    pub fn global(law: ForceLaw) -> Self {
        ForceField::new(law, FieldScope::Global)
    }

    /// Field restricted to a region
    pub fn bound(law: ForceLaw, collider: Arc<Collider>, pose: Pose) -> Self {
        ForceField::new(law, FieldScope::Bound { collider, pose })
    }

    /// Force law
    pub fn law(&self) -> &ForceLaw {
        &self.law
    }

    /// Scope
    pub fn scope(&self) -> &FieldScope {
        &self.scope
    }

    /// Force on a body at `position`, or `None` when out of scope
    pub fn force_on(&self, position: DVec3) -> Option<DVec3> {
        if self.scope.contains(position) {
            Some(self.law.force_at(position))
        } else {
            None
        }
    }
}

/// Accumulate every field's force on one body, then clamp the total
///
/// Returns the number of fields that contributed a force.
pub fn apply_fields(fields: &Arena<ForceField>, handle: Handle<RigidBody>, body: &mut RigidBody, max_force: f64) -> usize {
    if body.is_static() {
        return 0;
    }

    let position = body.position();
    let mut applied = 0;
    for (field_handle, field) in fields.iter() {
        let Some(force) = field.force_on(position) else {
            continue;
        };
        if !force.is_finite() {
            warn!(field = %field_handle, body = %handle, ?force, "force field produced invalid force, skipping");
            continue;
        }
        body.apply_force(force);
        applied += 1;
    }

    let before = body.force().length();
    if body.clamp_force(max_force) {
        warn!(
            body = %handle,
            magnitude = before,
            limit = max_force,
            "total force exceeds limit, clamping"
        );
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::PhysicsMaterial;
    use approx::assert_abs_diff_eq;

    fn body_at(position: DVec3, mass: f64) -> RigidBody {
        RigidBody::new(
            Arc::new(Collider::sphere(0.5).unwrap()),
            mass,
            PhysicsMaterial::default(),
            0,
            position,
            DVec3::ZERO,
            DVec3::ZERO,
        )
    }

    fn point(strength: f64) -> ForceLaw {
        ForceLaw::Point {
            center: DVec3::ZERO,
            strength,
            falloff_radius: 10.0,
        }
    }

    #[test]
    fn test_point_law_direction() {
        let p = DVec3::new(0.0, 4.0, 0.0);
        assert!(point(5.0).force_at(p).y < 0.0);
        assert!(point(-5.0).force_at(p).y > 0.0);
    }

    #[test]
    fn test_point_law_falloff_is_monotonic() {
        let law = point(10.0);
        let mut last = f64::INFINITY;
        for i in 1..10 {
            let magnitude = law.force_at(DVec3::new(i as f64, 0.0, 0.0)).length();
            assert!(magnitude < last);
            last = magnitude;
        }
        assert_eq!(law.force_at(DVec3::new(10.0, 0.0, 0.0)), DVec3::ZERO);
        assert_eq!(law.force_at(DVec3::new(25.0, 0.0, 0.0)), DVec3::ZERO);
        assert_eq!(law.force_at(DVec3::ZERO), DVec3::ZERO);
        assert_abs_diff_eq!(law.force_at(DVec3::new(5.0, 0.0, 0.0)).x, -5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bound_scope() {
        let region = Arc::new(Collider::aabb(DVec3::splat(-1.0), DVec3::splat(1.0)).unwrap());
        let field = ForceField::bound(
            ForceLaw::Uniform(DVec3::Y),
            region,
            Pose::from_position(DVec3::new(10.0, 0.0, 0.0)),
        );
        assert_eq!(field.force_on(DVec3::new(10.5, 0.0, 0.0)), Some(DVec3::Y));
        assert_eq!(field.force_on(DVec3::ZERO), None);
    }

    #[test]
    fn test_apply_fields_accumulates_and_skips_static() {
        let mut fields = Arena::new();
        fields.insert(ForceField::global(ForceLaw::Uniform(DVec3::new(1.0, 0.0, 0.0))));
        fields.insert(ForceField::global(ForceLaw::Uniform(DVec3::new(0.0, 2.0, 0.0))));
        let mut bodies = Arena::new();
        let h = bodies.insert(body_at(DVec3::ZERO, 1.0));
        let s = bodies.insert(body_at(DVec3::ZERO, 0.0));

        let body = bodies.get_mut(h).unwrap();
        assert_eq!(apply_fields(&fields, h, body, 1e10), 2);
        assert_eq!(body.force(), DVec3::new(1.0, 2.0, 0.0));

        let floor = bodies.get_mut(s).unwrap();
        assert_eq!(apply_fields(&fields, s, floor, 1e10), 0);
        assert_eq!(floor.force(), DVec3::ZERO);
    }

    #[test]
    fn test_apply_fields_skips_invalid_and_clamps() {
        let mut fields = Arena::new();
        fields.insert(ForceField::global(ForceLaw::Uniform(DVec3::new(f64::NAN, 0.0, 0.0))));
        fields.insert(ForceField::global(ForceLaw::Uniform(DVec3::new(0.0, 1000.0, 0.0))));
        let mut bodies = Arena::new();
        let h = bodies.insert(body_at(DVec3::ZERO, 1.0));

        let body = bodies.get_mut(h).unwrap();
        assert_eq!(apply_fields(&fields, h, body, 100.0), 1);
        assert_abs_diff_eq!(body.force().y, 100.0, epsilon = 1e-9);
    }
}
