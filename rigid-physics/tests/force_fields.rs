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
//! Force field behavior inside a running engine

use approx::assert_abs_diff_eq;
use glam::DVec3;
use rigid_physics::math::Pose;
use rigid_physics::{
    BodyHandle, Collider, EngineConfig, ForceField, ForceLaw, PhysicsEngine, PhysicsMaterial, RigidBody,
};
use std::sync::Arc;

const DT: f64 = 1.0 / 60.0;

fn engine() -> PhysicsEngine {
    PhysicsEngine::with_config(EngineConfig::new().without_gravity()).unwrap()
}

fn body_at(engine: &mut PhysicsEngine, position: DVec3, mass: f64) -> BodyHandle {
    engine.add_rigid_body(RigidBody::new(
        Arc::new(Collider::sphere(0.1).unwrap()),
        mass,
        PhysicsMaterial::default(),
        0,
        position,
        DVec3::ZERO,
        DVec3::ZERO,
    ))
}

fn point_field(strength: f64) -> ForceField {
    ForceField::global(ForceLaw::Point {
        center: DVec3::ZERO,
        strength,
        falloff_radius: 10.0,
    })
}

#[test]
fn test_point_field_attracts_monotonically() {
    let mut engine = engine();
    engine.add_force_field(point_field(10.0));
    let h = body_at(&mut engine, DVec3::new(5.0, 0.0, 0.0), 1.0);

    let mut last = 5.0;
    for _ in 0..30 {
        engine.tick(DT).unwrap();
        let distance = engine.body(h).unwrap().position().length();
        assert!(distance < last, "distance {} did not shrink from {}", distance, last);
        last = distance;
    }
}

#[test]
fn test_point_field_repels() {
    let mut engine = engine();
    engine.add_force_field(point_field(-10.0));
    let h = body_at(&mut engine, DVec3::new(0.0, 0.0, 3.0), 1.0);

    let mut last = 3.0;
    for _ in 0..30 {
        engine.tick(DT).unwrap();
        let distance = engine.body(h).unwrap().position().length();
        assert!(distance > last);
        last = distance;
    }
}

#[test]
fn test_body_outside_falloff_is_untouched() {
    let mut engine = engine();
    engine.add_force_field(point_field(10.0));
    let h = body_at(&mut engine, DVec3::new(0.0, 12.0, 0.0), 1.0);
    for _ in 0..10 {
        engine.tick(DT).unwrap();
    }
    assert_eq!(engine.body(h).unwrap().position(), DVec3::new(0.0, 12.0, 0.0));
}

#[test]
fn test_bound_field_only_affects_bodies_inside() {
    let mut engine = engine();
    let region = Arc::new(Collider::aabb(DVec3::splat(-2.0), DVec3::splat(2.0)).unwrap());
    engine.add_force_field(ForceField::bound(
        ForceLaw::Uniform(DVec3::new(0.0, 6.0, 0.0)),
        region,
        Pose::from_position(DVec3::new(10.0, 0.0, 0.0)),
    ));
    let inside = body_at(&mut engine, DVec3::new(10.0, 0.0, 0.0), 2.0);
    let outside = body_at(&mut engine, DVec3::ZERO, 2.0);

    engine.tick(0.5).unwrap();
    assert_abs_diff_eq!(engine.body(inside).unwrap().linear_velocity().y, 1.5);
    assert_eq!(engine.body(outside).unwrap().linear_velocity(), DVec3::ZERO);
}

#[test]
fn test_fields_combine_with_gravity() {
    let mut engine = PhysicsEngine::new();
    // cancels gravity for a unit mass
    engine.add_force_field(ForceField::global(ForceLaw::Uniform(DVec3::new(0.0, 9.81, 0.0))));
    let h = body_at(&mut engine, DVec3::new(0.0, 1.0, 0.0), 1.0);
    for _ in 0..60 {
        engine.tick(DT).unwrap();
    }
    assert_abs_diff_eq!(engine.body(h).unwrap().position().y, 1.0, epsilon = 1e-9);
}

#[test]
fn test_huge_force_is_clamped() {
    let config = EngineConfig::new().without_gravity().with_max_force_magnitude(100.0);
    let mut engine = PhysicsEngine::with_config(config).unwrap();
    engine.add_force_field(ForceField::global(ForceLaw::Uniform(DVec3::new(1e12, 0.0, 0.0))));
    let h = body_at(&mut engine, DVec3::ZERO, 1.0);
    engine.tick(0.1).unwrap();
    assert_abs_diff_eq!(engine.body(h).unwrap().linear_velocity().x, 10.0, epsilon = 1e-9);
}

#[test]
fn test_static_bodies_ignore_fields() {
    let mut engine = engine();
    engine.add_force_field(point_field(50.0));
    let h = body_at(&mut engine, DVec3::new(3.0, 0.0, 0.0), 0.0);
    for _ in 0..10 {
        engine.tick(DT).unwrap();
    }
    assert_eq!(engine.body(h).unwrap().position(), DVec3::new(3.0, 0.0, 0.0));
}
