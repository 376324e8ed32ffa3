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
//! Reproducibility under identical input

use glam::{DQuat, DVec3};
use rigid_physics::clock::StepController;
use rigid_physics::math::Pose;
use rigid_physics::{
    Collider, ForceField, ForceLaw, PhysicsEngine, PhysicsMaterial, RigidBody, TickReport, Trigger,
};
use std::sync::Arc;

fn cube_points(half: f64) -> Vec<DVec3> {
    let mut points = Vec::new();
    for x in [-half, half] {
        for y in [-half, half] {
            for z in [-half, half] {
                points.push(DVec3::new(x, y, z));
            }
        }
    }
    points
}

fn build_scene() -> PhysicsEngine {
    let mut engine = PhysicsEngine::new();
    let floor = Arc::new(Collider::aabb(DVec3::new(-20.0, -1.0, -20.0), DVec3::new(20.0, 0.0, 20.0)).unwrap());
    engine.add_rigid_body(RigidBody::fixed(floor, PhysicsMaterial::default(), 0, DVec3::ZERO));

    let shapes = [
        Arc::new(Collider::sphere(0.5).unwrap()),
        Arc::new(Collider::aabb(DVec3::splat(-0.5), DVec3::splat(0.5)).unwrap()),
        Arc::new(Collider::obb(DVec3::new(0.6, 0.3, 0.4), DQuat::from_rotation_y(0.7)).unwrap()),
        Arc::new(Collider::convex(cube_points(0.4)).unwrap()),
    ];
    for i in 0..16 {
        let shape = shapes[i % shapes.len()].clone();
        let material = PhysicsMaterial::new(0.1 * (i % 5) as f64, 0.6, 0.4, 0.0);
        engine.add_rigid_body(RigidBody::new(
            shape,
            1.0 + (i % 3) as f64,
            material,
            (i % 2) as u32,
            DVec3::new((i % 4) as f64 * 0.9 - 1.5, 2.0 + i as f64 * 0.8, (i / 4) as f64 * 0.9 - 1.5),
            DVec3::new(0.3 * (i % 3) as f64, 0.0, -0.2 * (i % 2) as f64),
            DVec3::new(0.0, 0.5 * (i % 4) as f64, 0.0),
        ));
    }

    engine.add_force_field(ForceField::global(ForceLaw::Point {
        center: DVec3::new(0.0, 1.0, 0.0),
        strength: 4.0,
        falloff_radius: 6.0,
    }));
    let zone = Arc::new(Collider::aabb(DVec3::new(-20.0, -50.0, -20.0), DVec3::new(20.0, -5.0, 20.0)).unwrap());
    engine.add_trigger(Trigger::new(zone, Pose::IDENTITY, |_, body, _| {
        body.set_position(DVec3::new(0.0, 10.0, 0.0));
        Ok(())
    }));
    engine
}

type Snapshot = Vec<(DVec3, DQuat, DVec3, DVec3)>;

fn run(ticks: usize) -> (Snapshot, Vec<TickReport>) {
    let mut engine = build_scene();
    let mut clock = StepController::from_config(engine.config());
    let mut reports = Vec::new();
    for i in 0..ticks {
        // uneven frame times, including a spike and a skipped frame
        let raw = match i % 7 {
            0 => 0.2,
            3 => 0.0,
            _ => 1.0 / 60.0 + (i % 3) as f64 * 0.001,
        };
        if let Some(report) = clock.advance(&mut engine, raw).unwrap() {
            reports.push(report);
        }
    }
    let snapshot = engine
        .bodies()
        .map(|(_, b)| (b.position(), b.orientation(), b.linear_velocity(), b.angular_velocity()))
        .collect();
    (snapshot, reports)
}

#[test]
fn test_identical_runs_are_bit_identical() {
    let (state_a, reports_a) = run(400);
    let (state_b, reports_b) = run(400);
    assert_eq!(state_a, state_b);
    assert_eq!(reports_a, reports_b);
    assert!(reports_a.iter().any(|r| r.contacts > 0));
}

#[test]
fn test_skipped_frames_do_not_tick() {
    let (_, reports) = run(70);
    assert_eq!(reports.len(), 60);
    assert_eq!(reports.last().map(|r| r.tick), Some(60));
}
