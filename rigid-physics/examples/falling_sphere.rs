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
//! Falling cube with a fall-through trigger
//!
//! A cube drops onto a floor block; a second body misses the floor, falls
//! into a trigger zone below the level and is teleported back up. The game
//! loop is driven through a `StepController` with a pause in the middle.
//!
//! Run with `RUST_LOG=rigid_physics=debug` to see per-tick summaries.

use glam::DVec3;
use rigid_physics::adapter::{GameObject, Transform};
use rigid_physics::clock::StepController;
use rigid_physics::math::Pose;
use rigid_physics::{Collider, EngineConfig, PhysicsEngine, PhysicsMaterial, RigidBody, Trigger};
use std::error::Error;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Rigid Physics - Falling Cube Example");
    println!("====================================\n");

    let config = EngineConfig::from_env()?;
    let mut engine = PhysicsEngine::with_config(config)?;
    let mut clock = StepController::from_config(engine.config());

    let floor_shape = Arc::new(Collider::aabb(DVec3::new(-2.0, -2.0, -2.0), DVec3::new(2.0, 2.0, 2.0))?);
    let cube_shape = Arc::new(Collider::aabb(DVec3::new(-1.0, -1.0, -1.0), DVec3::new(1.0, 1.0, 1.0))?);
    let ball_shape = Arc::new(Collider::sphere(0.5)?);

    let floor = engine.add_rigid_body(RigidBody::fixed(floor_shape, PhysicsMaterial::default(), 0, DVec3::ZERO));
    let cube = engine.add_rigid_body(RigidBody::new(
        cube_shape,
        1.0,
        PhysicsMaterial::default(),
        0,
        DVec3::new(0.0, 5.0, 0.0),
        DVec3::ZERO,
        DVec3::ZERO,
    ));
    let ball = engine.add_rigid_body(RigidBody::new(
        ball_shape,
        1.0,
        PhysicsMaterial::default(),
        0,
        DVec3::new(6.0, 5.0, 0.0),
        DVec3::ZERO,
        DVec3::ZERO,
    ));

    let pit = Arc::new(Collider::aabb(
        DVec3::new(-1000.0, -1000.0, -1000.0),
        DVec3::new(1000.0, -28.0, 1000.0),
    )?);
    engine.add_trigger(Trigger::new(pit, Pose::IDENTITY, |_, body, _| {
        let p = body.position();
        body.set_position(DVec3::new(p.x, 45.0, p.z));
        body.set_linear_velocity(body.linear_velocity() * 0.1);
        Ok(())
    }));

    let mut floor_object = GameObject::new(Transform::default()).with_body(floor);
    let mut cube_object = GameObject::new(Transform::default()).with_body(cube);
    let mut ball_object = GameObject::new(Transform::default()).with_body(ball);

    // 10 seconds of 60 FPS frames with a stutter every 97th frame
    for frame in 0..600 {
        let raw_delta = if frame % 97 == 96 { 0.25 } else { 1.0 / 60.0 };

        match frame {
            200 => clock.toggle_pause(),
            210 => clock.request_step(),
            240 => clock.toggle_pause(),
            _ => {}
        }

        if let Some(report) = clock.advance(&mut engine, raw_delta)? {
            floor_object.update(&engine);
            cube_object.update(&engine);
            ball_object.update(&engine);

            for event in &report.trigger_events {
                println!("tick {:4}: body {} fell through and was teleported", report.tick, event.body);
            }
        }

        if frame % 60 == 0 {
            println!(
                "frame {:3}: cube y = {:7.3}, ball y = {:7.3}",
                frame,
                cube_object.transform().position.y,
                ball_object.transform().position.y
            );
        }
    }

    println!("\nTicks simulated: {}", engine.tick_count());
    println!("Kinetic energy:  {:.4} J", rigid_physics::total_kinetic_energy(&engine));

    Ok(())
}
