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
//! Pose and small vector helpers
//!
//! All simulation math is double precision, built on `glam::DVec3` and
//! `glam::DQuat`.

use glam::{DQuat, DVec3};

/// Tolerance used by geometric predicates
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Rigid transform: translation plus unit orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World-space position
    pub position: DVec3,
    /// World-space orientation (unit quaternion)
    pub orientation: DQuat,
}

impl Pose {
    /// Identity pose at the origin
    pub const IDENTITY: Pose = Pose {
        position: DVec3::ZERO,
        orientation: DQuat::IDENTITY,
    };

    /// Create a pose from a position and orientation
    pub fn new(position: DVec3, orientation: DQuat) -> Self {
        Pose { position, orientation }
    }

    /// Pose with identity orientation at the given position
    pub fn from_position(position: DVec3) -> Self {
        Pose::new(position, DQuat::IDENTITY)
    }

    /// Map a local-space point into world space
    pub fn transform_point(&self, local: DVec3) -> DVec3 {
        self.position + self.orientation * local
    }

    /// Map a world-space point into local space
    pub fn inverse_transform_point(&self, world: DVec3) -> DVec3 {
        self.orientation.inverse() * (world - self.position)
    }

    /// Rotate a local-space direction into world space
    pub fn transform_vector(&self, local: DVec3) -> DVec3 {
        self.orientation * local
    }
}

impl Default for Pose {
    fn default() -> Self {
        Pose::IDENTITY
    }
}

/// Normalize a quaternion, returning `None` if it has no usable length
pub fn try_normalize_quat(q: DQuat) -> Option<DQuat> {
    let len = q.length();
    if len.is_finite() && len > GEOMETRY_EPSILON {
        Some(q / len)
    } else {
        None
    }
}

/// Unit vector for the principal axis with the given index
pub(crate) fn axis(index: usize) -> DVec3 {
    match index {
        0 => DVec3::X,
        1 => DVec3::Y,
        _ => DVec3::Z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_pose_round_trip() {
        let pose = Pose::new(DVec3::new(1.0, 2.0, 3.0), DQuat::from_rotation_y(FRAC_PI_2));
        let local = DVec3::new(1.0, 0.0, 0.0);
        let world = pose.transform_point(local);
        assert_abs_diff_eq!(world.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(world.z, 2.0, epsilon = 1e-12);

        let back = pose.inverse_transform_point(world);
        assert_abs_diff_eq!(back.distance(local), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_try_normalize_quat() {
        let q = try_normalize_quat(DQuat::from_xyzw(0.0, 0.0, 0.0, 2.0)).unwrap();
        assert_abs_diff_eq!(q.w, 1.0);
        assert!(try_normalize_quat(DQuat::from_xyzw(0.0, 0.0, 0.0, 0.0)).is_none());
        assert!(try_normalize_quat(DQuat::from_xyzw(f64::NAN, 0.0, 0.0, 1.0)).is_none());
    }
}
