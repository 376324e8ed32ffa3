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
//! Surface materials
//!
//! Each body owns a [`PhysicsMaterial`]. When two bodies touch, their
//! coefficients are merged with one fixed rule, the arithmetic mean, applied
//! identically to restitution and both friction coefficients.

/// Per-body surface coefficients
///
/// Out-of-range inputs are clamped at construction:
/// - restitution into `[0, 1]`
/// - frictions to `>= 0`, with dynamic friction capped at static friction
/// - non-finite values become `0`
///
/// # Examples
///
/// ```
/// use rigid_physics::material::PhysicsMaterial;
///
/// let rubber = PhysicsMaterial::new(1.4, 0.9, 0.7, 0.0);
/// assert_eq!(rubber.restitution(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsMaterial {
    restitution: f64,
    static_friction: f64,
    dynamic_friction: f64,
    reserved: f64,
}

impl PhysicsMaterial {
    /// Create a material from restitution, static friction, dynamic friction
    /// and the reserved coefficient
    pub fn new(restitution: f64, static_friction: f64, dynamic_friction: f64, reserved: f64) -> Self {
        let restitution = finite_or_zero(restitution).clamp(0.0, 1.0);
        let static_friction = finite_or_zero(static_friction).max(0.0);
        let dynamic_friction = finite_or_zero(dynamic_friction).max(0.0).min(static_friction);
        let reserved = finite_or_zero(reserved).max(0.0);

        PhysicsMaterial {
            restitution,
            static_friction,
            dynamic_friction,
            reserved,
        }
    }

    /// Perfectly inelastic, frictionless surface
    pub fn inelastic() -> Self {
        PhysicsMaterial::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Perfectly elastic, frictionless surface
    pub fn elastic() -> Self {
        PhysicsMaterial::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Fraction of normal approach speed returned after impact
    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    /// Friction coefficient below which sliding does not start
    pub fn static_friction(&self) -> f64 {
        self.static_friction
    }

    /// Friction coefficient while sliding
    pub fn dynamic_friction(&self) -> f64 {
        self.dynamic_friction
    }

    /// Fourth coefficient, carried but not used by the solver
    pub fn reserved(&self) -> f64 {
        self.reserved
    }

    /// Merge two materials for one contact
    pub fn combine(&self, other: &PhysicsMaterial) -> CombinedMaterial {
        CombinedMaterial {
            restitution: mean(self.restitution, other.restitution),
            static_friction: mean(self.static_friction, other.static_friction),
            dynamic_friction: mean(self.dynamic_friction, other.dynamic_friction),
        }
    }
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        PhysicsMaterial::new(0.0, 0.5, 0.3, 0.0)
    }
}

/// Coefficients for a single contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinedMaterial {
    /// Combined restitution
    pub restitution: f64,
    /// Combined static friction
    pub static_friction: f64,
    /// Combined dynamic friction
    pub dynamic_friction: f64,
}

fn mean(a: f64, b: f64) -> f64 {
    0.5 * (a + b)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
