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
//! Point force field pulling bodies into a cluster
//!
//! Several spheres start on a ring inside an attracting point field with
//! gravity disabled. They collide at the center and settle into a clump.

use glam::DVec3;
use rigid_physics::{Collider, EngineConfig, ForceField, ForceLaw, PhysicsEngine, PhysicsMaterial, RigidBody};
use std::error::Error;
use std::f64::consts::TAU;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Rigid Physics - Attractor Example");
    println!("=================================\n");

    let mut engine = PhysicsEngine::with_config(EngineConfig::new().without_gravity())?;
    engine.add_force_field(ForceField::global(ForceLaw::Point {
        center: DVec3::ZERO,
        strength: 20.0,
        falloff_radius: 15.0,
    }));

    let shape = Arc::new(Collider::sphere(0.5)?);
    let material = PhysicsMaterial::new(0.2, 0.4, 0.2, 0.0);
    let count = 8;
    let handles: Vec<_> = (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64;
            let position = DVec3::new(angle.cos(), 0.0, angle.sin()) * 8.0;
            engine.add_rigid_body(RigidBody::new(
                shape.clone(),
                1.0,
                material,
                0,
                position,
                DVec3::ZERO,
                DVec3::ZERO,
            ))
        })
        .collect();

    let dt = 1.0 / 60.0;
    for step in 0..=600 {
        let report = engine.tick(dt)?;
        if step % 100 == 0 {
            let mean_distance = handles
                .iter()
                .filter_map(|h| engine.body(*h))
                .map(|b| b.position().length())
                .sum::<f64>()
                / count as f64;
            println!(
                "t = {:5.2}s  mean distance = {:6.3}  contacts = {:2}  KE = {:8.3} J",
                step as f64 * dt,
                mean_distance,
                report.contacts,
                rigid_physics::total_kinetic_energy(&engine)
            );
        }
    }

    Ok(())
}
