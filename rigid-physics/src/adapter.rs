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
//! Render-side adapter
//!
//! A renderer owns its transforms; physics only writes position and
//! orientation into them after each tick. Scale belongs to the renderer and
//! is never touched.

use crate::engine::PhysicsEngine;
use crate::trigger::BodyHandle;
use glam::{DQuat, DVec3};

/// Anything that can receive a body's pose
pub trait RenderTransform {
    /// Write the world-space position
    fn set_position(&mut self, position: DVec3);
    /// Write the world-space orientation
    fn set_orientation(&mut self, orientation: DQuat);
}

/// Minimal transform with position, orientation and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position
    pub position: DVec3,
    /// Orientation
    pub orientation: DQuat,
    /// Scale, owned by the renderer
    pub scale: DVec3,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
            scale: DVec3::ONE,
        }
    }
}

impl RenderTransform for Transform {
    fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    fn set_orientation(&mut self, orientation: DQuat) {
        self.orientation = orientation;
    }
}

/// A render transform optionally bound to a body
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use glam::DVec3;
/// use rigid_physics::adapter::{GameObject, Transform};
/// use rigid_physics::{Collider, PhysicsEngine, PhysicsMaterial, RigidBody};
///
/// let mut engine = PhysicsEngine::new();
/// let shape = Arc::new(Collider::sphere(1.0).unwrap());
/// let h = engine.add_rigid_body(RigidBody::new(
///     shape, 1.0, PhysicsMaterial::default(), 0, DVec3::new(0.0, 5.0, 0.0), DVec3::ZERO, DVec3::ZERO,
/// ));
///
/// let mut object = GameObject::new(Transform::default()).with_body(h);
/// engine.tick(1.0 / 60.0).unwrap();
/// assert!(object.update(&engine));
/// assert_eq!(object.transform().position, engine.body(h).unwrap().position());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject<T: RenderTransform> {
    transform: T,
    body: Option<BodyHandle>,
}

impl<T: RenderTransform> GameObject<T> {
    /// Unbound object
    pub fn new(transform: T) -> Self {
        GameObject { transform, body: None }
    }

    /// Bind to a body
    pub fn with_body(mut self, body: BodyHandle) -> Self {
        self.body = Some(body);
        self
    }

    /// Change or clear the bound body
    pub fn bind(&mut self, body: Option<BodyHandle>) {
        self.body = body;
    }

    /// Bound body, if any
    pub fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    /// Render transform
    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Render transform, mutably
    pub fn transform_mut(&mut self) -> &mut T {
        &mut self.transform
    }

    /// Copy the bound body's pose into the transform
    ///
    /// Returns `false` and leaves the transform alone when no body is bound
    /// or the handle no longer resolves.
    pub fn update(&mut self, engine: &PhysicsEngine) -> bool {
        let Some(body) = self.body.and_then(|h| engine.body(h)) else {
            return false;
        };
        self.transform.set_position(body.position());
        self.transform.set_orientation(body.orientation());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::RigidBody;
    use crate::collider::Collider;
    use crate::material::PhysicsMaterial;
    use std::sync::Arc;

    fn engine_with_body() -> (PhysicsEngine, BodyHandle) {
        let mut engine = PhysicsEngine::new();
        let h = engine.add_rigid_body(RigidBody::new(
            Arc::new(Collider::sphere(1.0).unwrap()),
            1.0,
            PhysicsMaterial::default(),
            0,
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::ZERO,
            DVec3::ZERO,
        ));
        (engine, h)
    }

    #[test]
    fn test_unbound_is_noop() {
        let (engine, _) = engine_with_body();
        let mut object = GameObject::new(Transform::default());
        assert!(!object.update(&engine));
        assert_eq!(*object.transform(), Transform::default());
    }

    #[test]
    fn test_update_preserves_scale() {
        let (engine, h) = engine_with_body();
        let mut object = GameObject::new(Transform {
            scale: DVec3::splat(2.0),
            ..Transform::default()
        })
        .with_body(h);
        assert!(object.update(&engine));
        assert_eq!(object.transform().position, DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(object.transform().scale, DVec3::splat(2.0));
    }

    #[test]
    fn test_stale_handle_is_noop() {
        let (mut engine, h) = engine_with_body();
        let mut object = GameObject::new(Transform::default()).with_body(h);
        engine.remove_rigid_body(h);
        assert!(!object.update(&engine));
        assert_eq!(object.transform().position, DVec3::ZERO);
    }
}
