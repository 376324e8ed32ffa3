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
//! Numerical integration for rigid bodies
//!
//! Integrators advance a body's velocity, position and orientation over one
//! tick from its accumulated force and the engine's gravity.
//!
//! # Integrators
//!
//! - **Semi-implicit Euler** ([`SymplecticEuler`]): the engine default
//!
//! # Timestep Guidelines
//!
//! - The engine integrates with whatever delta `tick` receives
//! - Large deltas let fast bodies tunnel through thin colliders; keep frame
//!   deltas under the configured `max_delta` (0.05 s by default)
//! - Recommended: dt = 1/60 (60 FPS)

use crate::body::RigidBody;
use crate::handle::Handle;
use glam::DVec3;

mod euler;

pub use euler::SymplecticEuler;

/// Calculate kinetic energy for a single body
///
/// KE = 0.5 * m * v². Static bodies have none.
pub fn kinetic_energy(body: &RigidBody) -> f64 {
    if body.is_static() {
        return 0.0;
    }
    0.5 * body.mass().value() * body.linear_velocity().length_squared()
}

/// Calculate total kinetic energy for a collection of bodies
pub fn total_kinetic_energy<'a, I>(bodies: I) -> f64
where
    I: IntoIterator<Item = &'a RigidBody>,
{
    bodies.into_iter().map(kinetic_energy).sum()
}

/// Trait for numerical integration methods
///
/// Integrators update one dynamic body at a time. Returns `true` if the body
/// was advanced; static bodies and steps that would produce non-finite state
/// are left untouched.
pub trait Integrator: Send + Sync {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Advance `body` by `delta` seconds under `gravity`
    fn integrate(&self, handle: Handle<RigidBody>, body: &mut RigidBody, gravity: DVec3, delta: f64) -> bool;
}
