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
//! Contact resolution
//!
//! One contact is resolved in three parts:
//!
//! 1. **Normal impulse**: `j = -(1 + e) * vRel / (iA + iB)` where
//!    `vRel = (vB - vA) · n`. Skipped when `vRel >= 0` (separating).
//! 2. **Coulomb friction**: the tangential impulse that would stop sliding is
//!    used as-is while it stays within `μs * j`; otherwise a sliding impulse
//!    of `μd * j` opposes the tangential velocity.
//! 3. **Positional correction**: bodies are moved apart along `n` by
//!    `fraction * max(depth - slop, 0)`, split by inverse-mass share.
//!
//! Static bodies have zero inverse mass and are never written.

use crate::body::RigidBody;
use crate::collision::Contact;
use crate::math::GEOMETRY_EPSILON;
use glam::DVec3;

/// Tuning for positional correction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectionParams {
    /// Fraction of the remaining penetration removed per contact, in (0, 1]
    pub fraction: f64,
    /// Penetration tolerated without correction
    pub slop: f64,
}

/// What resolving one contact did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Resolution {
    /// Normal impulse magnitude, `0` when the bodies were separating
    pub normal_impulse: f64,
    /// Friction impulse magnitude
    pub friction_impulse: f64,
    /// Distance the bodies were pushed apart in total
    pub correction: f64,
}

impl Resolution {
    /// Whether a normal impulse was applied
    pub fn applied_impulse(&self) -> bool {
        self.normal_impulse > 0.0
    }
}

/// Resolve one contact between `a` and `b`; `contact.normal` points from `a`
/// to `b`
pub fn resolve_contact(a: &mut RigidBody, b: &mut RigidBody, contact: &Contact, params: CorrectionParams) -> Resolution {
    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return Resolution::default();
    }

    let n = contact.normal;
    let material = a.material().combine(b.material());
    let mut resolution = Resolution::default();

    let mut vel_a = a.linear_velocity();
    let mut vel_b = b.linear_velocity();
    let v_rel = (vel_b - vel_a).dot(n);

    if v_rel < 0.0 {
        let j = -(1.0 + material.restitution) * v_rel / inv_sum;
        vel_a -= n * (j * inv_a);
        vel_b += n * (j * inv_b);
        resolution.normal_impulse = j;

        let relative = vel_b - vel_a;
        let tangential = relative - n * relative.dot(n);
        let slide_speed = tangential.length();
        if slide_speed > GEOMETRY_EPSILON {
            let t = tangential / slide_speed;
            let jt = -relative.dot(t) / inv_sum;
            let friction = if jt.abs() <= material.static_friction * j {
                t * jt
            } else {
                t * (-material.dynamic_friction * j)
            };
            vel_a -= friction * inv_a;
            vel_b += friction * inv_b;
            resolution.friction_impulse = friction.length();
        }

        if a.is_dynamic() {
            a.set_linear_velocity(vel_a);
        }
        if b.is_dynamic() {
            b.set_linear_velocity(vel_b);
        }
    }

    let excess = (contact.depth - params.slop).max(0.0);
    if excess > 0.0 {
        let push: DVec3 = n * (excess * params.fraction / inv_sum);
        if a.is_dynamic() {
            a.translate(-push * inv_a);
        }
        if b.is_dynamic() {
            b.translate(push * inv_b);
        }
        resolution.correction = excess * params.fraction;
    }

    resolution
}
