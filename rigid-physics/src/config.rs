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
//! Engine configuration
//!
//! Simulation constants live here instead of in process-wide statics so that
//! several engines with different gravity can coexist.
//!
//! # Environment Configuration
//!
//! [`EngineConfig::from_env`] overlays these variables on the defaults:
//!
//! ```bash
//! export RIGID_PHYSICS_GRAVITY="0,-9.81,0"
//! export RIGID_PHYSICS_MAX_DELTA=0.05
//! ```

use crate::error::ConfigError;
use glam::DVec3;

/// Standard gravitational acceleration near the Earth's surface (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Environment variable overriding gravity, formatted `"x,y,z"`
pub const GRAVITY_ENV: &str = "RIGID_PHYSICS_GRAVITY";

/// Environment variable overriding the maximum frame delta in seconds
pub const MAX_DELTA_ENV: &str = "RIGID_PHYSICS_MAX_DELTA";

/// Configuration for a [`crate::PhysicsEngine`]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Acceleration applied to every dynamic body each tick
    pub gravity: DVec3,
    /// Fraction of the remaining penetration removed per tick, in (0, 1]
    pub correction_fraction: f64,
    /// Penetration depth tolerated without positional correction
    pub penetration_slop: f64,
    /// Accumulated forces above this magnitude are clamped
    pub max_force_magnitude: f64,
    /// Largest frame delta the step controller forwards to `tick`
    pub max_delta: f64,
    /// Frame deltas at or below this are skipped by the step controller
    pub min_delta: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            gravity: DVec3::new(0.0, -STANDARD_GRAVITY, 0.0),
            correction_fraction: 0.8,
            penetration_slop: 0.001,
            max_force_magnitude: 1e10,
            max_delta: 0.05,
            min_delta: 1e-5,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gravity vector
    pub fn with_gravity(mut self, gravity: DVec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Disable gravity
    pub fn without_gravity(self) -> Self {
        self.with_gravity(DVec3::ZERO)
    }

    /// Set the per-tick penetration correction fraction
    pub fn with_correction_fraction(mut self, fraction: f64) -> Self {
        self.correction_fraction = fraction;
        self
    }

    /// Set the penetration slop
    pub fn with_penetration_slop(mut self, slop: f64) -> Self {
        self.penetration_slop = slop;
        self
    }

    /// Set the force clamp
    pub fn with_max_force_magnitude(mut self, max: f64) -> Self {
        self.max_force_magnitude = max;
        self
    }

    /// Set the frame delta bounds used by the step controller
    pub fn with_delta_bounds(mut self, min_delta: f64, max_delta: f64) -> Self {
        self.min_delta = min_delta;
        self.max_delta = max_delta;
        self
    }

    /// Build a configuration from defaults plus environment overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(GRAVITY_ENV) {
            config.gravity = parse_vec3(&raw).map_err(|message| ConfigError::Env {
                var: GRAVITY_ENV.to_string(),
                message,
            })?;
        }

        if let Ok(raw) = std::env::var(MAX_DELTA_ENV) {
            config.max_delta = raw.trim().parse::<f64>().map_err(|e| ConfigError::Env {
                var: MAX_DELTA_ENV.to_string(),
                message: e.to_string(),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check every field against its documented range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.is_finite() {
            return Err(ConfigError::InvalidGravity(self.gravity.to_array()));
        }
        if !(self.correction_fraction > 0.0 && self.correction_fraction <= 1.0) {
            return Err(ConfigError::InvalidCorrectionFraction(self.correction_fraction));
        }
        if !(self.penetration_slop >= 0.0 && self.penetration_slop.is_finite()) {
            return Err(ConfigError::InvalidSlop(self.penetration_slop));
        }
        if !(self.max_force_magnitude > 0.0) {
            return Err(ConfigError::InvalidMaxForce(self.max_force_magnitude));
        }
        let bounds_ok = self.min_delta >= 0.0
            && self.max_delta.is_finite()
            && self.min_delta < self.max_delta;
        if !bounds_ok {
            return Err(ConfigError::InvalidDeltaBounds {
                min: self.min_delta,
                max: self.max_delta,
            });
        }
        Ok(())
    }
}

fn parse_vec3(raw: &str) -> Result<DVec3, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected 3 comma-separated numbers, got {}", parts.len()));
    }
    let mut out = [0.0; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part.parse::<f64>().map_err(|e| format!("{:?}: {}", part, e))?;
    }
    Ok(DVec3::from_array(out))
}
