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
//! Benchmarks for the simulation tick and the narrow phase
//!
//! These benchmarks measure:
//! - Full tick throughput for growing body counts resting on a floor
//! - Cost of each narrow-phase pair routine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glam::{DQuat, DVec3};
use rigid_physics::collision::intersect;
use rigid_physics::math::Pose;
use rigid_physics::{Collider, PhysicsEngine, PhysicsMaterial, RigidBody};
use std::sync::Arc;

// Grid of spheres and boxes stacked over a static floor
fn setup_pile(body_count: usize) -> PhysicsEngine {
    let mut engine = PhysicsEngine::new();
    let floor = Arc::new(Collider::aabb(DVec3::new(-100.0, -1.0, -100.0), DVec3::new(100.0, 0.0, 100.0)).unwrap());
    engine.add_rigid_body(RigidBody::fixed(floor, PhysicsMaterial::default(), 0, DVec3::ZERO));

    let sphere = Arc::new(Collider::sphere(0.5).unwrap());
    let cube = Arc::new(Collider::aabb(DVec3::splat(-0.5), DVec3::splat(0.5)).unwrap());
    let side = (body_count as f64).sqrt().ceil() as usize;
    for i in 0..body_count {
        let shape = if i % 2 == 0 { sphere.clone() } else { cube.clone() };
        let position = DVec3::new((i % side) as f64 * 1.1, 0.5 + (i / side) as f64 * 0.05, (i / side) as f64 * 1.1);
        engine.add_rigid_body(RigidBody::new(
            shape,
            1.0,
            PhysicsMaterial::default(),
            0,
            position,
            DVec3::ZERO,
            DVec3::ZERO,
        ));
    }

    // settle so the benchmark measures resting contacts
    for _ in 0..60 {
        let _ = engine.tick(1.0 / 60.0);
    }
    engine
}

fn bench_tick_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_throughput");

    for body_count in [16, 64, 256, 1024].iter() {
        group.throughput(Throughput::Elements(*body_count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(body_count), body_count, |b, &count| {
            let mut engine = setup_pile(count);
            b.iter(|| engine.tick(black_box(1.0 / 60.0)));
        });
    }

    group.finish();
}

fn bench_narrow_phase(c: &mut Criterion) {
    let mut group = c.benchmark_group("narrow_phase");

    let box_shape = Collider::aabb(DVec3::splat(-1.0), DVec3::splat(1.0)).unwrap();
    let ball = Collider::sphere(1.0).unwrap();
    let obb = Collider::obb(DVec3::ONE, DQuat::from_rotation_z(0.3)).unwrap();
    let mut points = Vec::new();
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                points.push(DVec3::new(x, y, z));
            }
        }
    }
    let hull = Collider::convex(points).unwrap();

    let near = Pose::from_position(DVec3::new(1.5, 0.2, 0.0));
    let cases = [
        ("aabb_aabb", box_shape.at(&Pose::IDENTITY), box_shape.at(&near)),
        ("sphere_sphere", ball.at(&Pose::IDENTITY), ball.at(&near)),
        ("aabb_sphere", box_shape.at(&Pose::IDENTITY), ball.at(&near)),
        ("obb_obb", obb.at(&Pose::IDENTITY), obb.at(&near)),
        ("convex_convex", hull.at(&Pose::IDENTITY), hull.at(&near)),
        ("convex_sphere", hull.at(&Pose::IDENTITY), ball.at(&near)),
    ];

    for (name, a, b) in cases.iter() {
        group.bench_function(*name, |bench| bench.iter(|| intersect(black_box(a), black_box(b))));
    }

    group.finish();
}

criterion_group!(benches, bench_tick_throughput, bench_narrow_phase);
criterion_main!(benches);
