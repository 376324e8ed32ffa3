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
//! # Rigid Physics
//!
//! A small, deterministic rigid-body physics core for games.
//!
//! ## Features
//!
//! - **Shapes**: AABB, sphere, oriented box and convex hull colliders, validated at construction
//! - **Collisions**: sort-and-sweep broad phase, a fixed pairwise narrow-phase table, impulse
//!   resolution with restitution, Coulomb friction and positional correction
//! - **Force Fields**: uniform and point laws, global or bound to a region
//! - **Triggers**: enter-only zone events with isolated handlers
//! - **Determinism**: every stage iterates in a stable order
//! - **Parallelization**: optional Rayon contact generation (`parallel` feature)
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use glam::DVec3;
//! use rigid_physics::{Collider, PhysicsEngine, PhysicsMaterial, RigidBody};
//!
//! let mut engine = PhysicsEngine::new();
//! let floor = Arc::new(Collider::aabb(DVec3::new(-50.0, -1.0, -50.0), DVec3::new(50.0, 0.0, 50.0)).unwrap());
//! let ball = Arc::new(Collider::sphere(1.0).unwrap());
//!
//! engine.add_rigid_body(RigidBody::fixed(floor, PhysicsMaterial::inelastic(), 0, DVec3::ZERO));
//! let h = engine.add_rigid_body(RigidBody::new(
//!     ball,
//!     1.0,
//!     PhysicsMaterial::inelastic(),
//!     0,
//!     DVec3::new(0.0, 5.0, 0.0),
//!     DVec3::ZERO,
//!     DVec3::ZERO,
//! ));
//!
//! for _ in 0..300 {
//!     engine.tick(1.0 / 60.0).unwrap();
//! }
//! assert!((engine.body(h).unwrap().position().y - 1.0).abs() < 0.01);
//! ```

#![warn(missing_docs)]

/// Render-side adapter
pub mod adapter;

/// Rigid bodies and mass
pub mod body;

/// Broad-phase pair generation
pub mod broad_phase;

/// Frame-to-tick step control
pub mod clock;

/// Collision shapes
pub mod collider;

/// Narrow-phase contact generation
pub mod collision;

/// Engine configuration
pub mod config;

/// Physics engine and tick orchestration
pub mod engine;

/// Error types
pub mod error;

/// Force fields
pub mod force_field;

/// Generational handles and slot storage
pub mod handle;

/// Numerical integration methods
pub mod integration;

/// Collision layer filtering
pub mod layers;

/// Surface materials
pub mod material;

/// Pose and vector helpers
pub mod math;

/// Contact resolution
pub mod solver;

/// Trigger zones
pub mod trigger;

pub use body::RigidBody;
pub use collider::Collider;
pub use config::EngineConfig;
pub use engine::{PhysicsEngine, TickReport};
pub use error::{ColliderError, ConfigError, EngineError, TriggerError};
pub use force_field::{FieldHandle, ForceField, ForceLaw};
pub use material::PhysicsMaterial;
pub use trigger::{BodyHandle, Trigger, TriggerHandle};

/// Total kinetic energy of every body in an engine
pub fn total_kinetic_energy(engine: &PhysicsEngine) -> f64 {
    integration::total_kinetic_energy(engine.bodies().map(|(_, body)| body))
}
