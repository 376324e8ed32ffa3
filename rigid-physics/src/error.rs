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
//! Error types
//!
//! Configuration problems are reported at construction time. Once a world is
//! assembled, `tick` only fails on an unusable time delta.

use thiserror::Error;

/// Rejected collider geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColliderError {
    /// AABB with `min > max` on some axis, a zero extent, or non-finite bounds
    #[error("degenerate AABB: min {min:?}, max {max:?}")]
    DegenerateAabb {
        /// Lower corner as given
        min: [f64; 3],
        /// Upper corner as given
        max: [f64; 3],
    },

    /// Negative or non-finite sphere radius
    #[error("invalid sphere radius: {0}")]
    InvalidRadius(f64),

    /// OBB half-extents must be positive and finite
    #[error("invalid OBB half-extents: {0:?}")]
    InvalidHalfExtents([f64; 3]),

    /// Orientation quaternion could not be normalized
    #[error("invalid orientation quaternion")]
    InvalidOrientation,

    /// Convex hulls need at least four points
    #[error("convex hull needs at least 4 points, got {count}")]
    TooFewHullPoints {
        /// Number of points supplied
        count: usize,
    },

    /// All hull points lie in a single plane
    #[error("convex hull points are coplanar")]
    CoplanarHull,

    /// A hull vertex contains NaN or infinity
    #[error("convex hull vertex {index} is not finite")]
    NonFiniteVertex {
        /// Index of the offending vertex
        index: usize,
    },
}

/// Rejected engine configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Gravity must be finite
    #[error("gravity must be finite, got {0:?}")]
    InvalidGravity([f64; 3]),

    /// Correction fraction must lie in (0, 1]
    #[error("correction fraction must be in (0, 1], got {0}")]
    InvalidCorrectionFraction(f64),

    /// Penetration slop must be non-negative and finite
    #[error("penetration slop must be non-negative and finite, got {0}")]
    InvalidSlop(f64),

    /// Force clamp must be positive
    #[error("max force magnitude must be positive, got {0}")]
    InvalidMaxForce(f64),

    /// `min_delta` must be non-negative and below `max_delta`
    #[error("invalid delta bounds: min {min}, max {max}")]
    InvalidDeltaBounds {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// Environment override could not be parsed
    #[error("environment variable {var}: {message}")]
    Env {
        /// Variable name
        var: String,
        /// What went wrong
        message: String,
    },
}

/// Errors returned from [`crate::PhysicsEngine`] operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Tick delta was negative, NaN or infinite
    #[error("tick delta must be finite and non-negative, got {0}")]
    InvalidDelta(f64),

    /// Engine was built from an invalid configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Failure reported by a trigger handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    /// Handler returned an error or panicked
    #[error("trigger handler failed: {0}")]
    Handler(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ColliderError::TooFewHullPoints { count: 3 };
        assert_eq!(err.to_string(), "convex hull needs at least 4 points, got 3");

        let err = EngineError::InvalidDelta(-1.0);
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: EngineError = ConfigError::InvalidSlop(-0.1).into();
        assert!(matches!(err, EngineError::Config(ConfigError::InvalidSlop(_))));
    }
}
