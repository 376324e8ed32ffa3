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
//! Narrow-phase contact generation
//!
//! Every ordered pair of [`ShapeKind`]s maps to one routine in a fixed 4×4
//! table. Routines for a mirrored pair call the canonical routine with the
//! arguments swapped and negate the normal, so `intersect(a, b)` and
//! `intersect(b, a)` always agree up to the sign of the normal.
//!
//! # Contact Convention
//!
//! - `normal` is a unit vector pointing from the first shape toward the second
//! - `depth` is the non-negative penetration along `normal`
//! - touching shapes produce a contact with zero depth
//!
//! Degenerate shapes (zero radius, zero extent) never produce contacts.
//!
//! When two shapes of the same kind overlap equally in both directions along
//! an axis (concentric boxes, coincident sphere centers), the normal sign is
//! chosen from a total order over the shapes' coordinates, so swapping the
//! arguments still negates it. Two bit-identical shapes have no such order
//! and get the positive axis.

use crate::collider::{Polytope, ShapeKind, WorldShape};
use crate::math::{axis, GEOMETRY_EPSILON};
use glam::DVec3;
use std::cmp::Ordering;

/// A single contact between two shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// World-space contact point
    pub point: DVec3,
    /// Unit normal from the first shape toward the second
    pub normal: DVec3,
    /// Penetration depth, `>= 0`
    pub depth: f64,
}

impl Contact {
    /// Same contact seen from the other shape
    pub fn flipped(self) -> Contact {
        Contact {
            normal: -self.normal,
            ..self
        }
    }
}

/// Signature shared by every pair routine
pub type PairTest = fn(&WorldShape, &WorldShape) -> Option<Contact>;

/// Pair routines indexed by `[first.kind()][second.kind()]`
pub const DISPATCH: [[PairTest; ShapeKind::COUNT]; ShapeKind::COUNT] = [
    // Aabb
    [aabb_aabb, aabb_sphere, polytope_pair, polytope_pair],
    // Sphere
    [sphere_aabb, sphere_sphere, sphere_obb, sphere_convex],
    // Obb
    [polytope_pair_mirrored, obb_sphere, polytope_pair, polytope_pair],
    // Convex
    [polytope_pair_mirrored, convex_sphere, polytope_pair_mirrored, polytope_pair],
];

/// Test two world shapes for contact
///
/// # Examples
///
/// ```
/// use glam::DVec3;
/// use rigid_physics::collider::WorldShape;
/// use rigid_physics::collision::intersect;
///
/// let a = WorldShape::Sphere { center: DVec3::ZERO, radius: 1.0 };
/// let b = WorldShape::Sphere { center: DVec3::new(1.5, 0.0, 0.0), radius: 1.0 };
/// let contact = intersect(&a, &b).unwrap();
/// assert_eq!(contact.normal, DVec3::X);
/// assert!((contact.depth - 0.5).abs() < 1e-12);
/// ```
pub fn intersect(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    DISPATCH[a.kind().index()][b.kind().index()](a, b)
}

fn aabb_aabb(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    let (
        WorldShape::Aabb { min: min_a, max: max_a },
        WorldShape::Aabb { min: min_b, max: max_b },
    ) = (a, b)
    else {
        return None;
    };
    if (*max_a - *min_a).min_element() <= 0.0 || (*max_b - *min_b).min_element() <= 0.0 {
        return None;
    }

    let order = || {
        order_sign(
            min_a.to_array().into_iter().chain(max_a.to_array()),
            min_b.to_array().into_iter().chain(max_b.to_array()),
        )
    };
    let mut best: Option<(f64, DVec3)> = None;
    for i in 0..3 {
        let forward = max_a[i] - min_b[i];
        let backward = max_b[i] - min_a[i];
        if forward < 0.0 || backward < 0.0 {
            return None;
        }
        let (depth, normal) = overlap_direction(forward, backward, axis(i), order);
        if best.map_or(true, |(d, _)| depth < d) {
            best = Some((depth, normal));
        }
    }

    let (depth, normal) = best?;
    let lo = min_a.max(*min_b);
    let hi = max_a.min(*max_b);
    Some(Contact {
        point: (lo + hi) * 0.5,
        normal,
        depth,
    })
}

fn aabb_sphere(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    let (WorldShape::Aabb { min, max }, WorldShape::Sphere { center, radius }) = (a, b) else {
        return None;
    };
    let box_center = (*min + *max) * 0.5;
    let half = (*max - *min) * 0.5;
    box_sphere(box_center, [DVec3::X, DVec3::Y, DVec3::Z], half, *center, *radius)
}

fn sphere_aabb(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    aabb_sphere(b, a).map(Contact::flipped)
}

fn obb_sphere(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    let (
        WorldShape::Obb {
            center: box_center,
            axes,
            half_extents,
        },
        WorldShape::Sphere { center, radius },
    ) = (a, b)
    else {
        return None;
    };
    box_sphere(*box_center, *axes, *half_extents, *center, *radius)
}

fn sphere_obb(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    obb_sphere(b, a).map(Contact::flipped)
}

fn sphere_sphere(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    let (
        WorldShape::Sphere { center: ca, radius: ra },
        WorldShape::Sphere { center: cb, radius: rb },
    ) = (a, b)
    else {
        return None;
    };
    if *ra <= 0.0 || *rb <= 0.0 {
        return None;
    }

    let offset = *cb - *ca;
    let distance = offset.length();
    let reach = ra + rb;
    if distance > reach {
        return None;
    }

    // coincident centers: any axis separates them equally well
    let normal = if distance > GEOMETRY_EPSILON {
        offset / distance
    } else {
        let key_a = ca.to_array().into_iter().chain([*ra]);
        let key_b = cb.to_array().into_iter().chain([*rb]);
        DVec3::Y * order_sign(key_a, key_b)
    };
    let depth = reach - distance;
    Some(Contact {
        point: *ca + normal * (ra - depth * 0.5),
        normal,
        depth,
    })
}

fn convex_sphere(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    let (WorldShape::Convex(poly), WorldShape::Sphere { center, radius }) = (a, b) else {
        return None;
    };
    polytope_sphere(poly, *center, *radius)
}

fn sphere_convex(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    convex_sphere(b, a).map(Contact::flipped)
}

fn polytope_pair(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    let pa = a.polytope()?;
    let pb = b.polytope()?;
    polytope_polytope(&pa, &pb)
}

fn polytope_pair_mirrored(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    polytope_pair(b, a).map(Contact::flipped)
}

/// Sphere against a box given by center, unit axes and half extents.
/// Normal points from the box toward the sphere.
fn box_sphere(box_center: DVec3, axes: [DVec3; 3], half: DVec3, center: DVec3, radius: f64) -> Option<Contact> {
    if radius <= 0.0 || half.min_element() <= 0.0 {
        return None;
    }

    let rel = center - box_center;
    let local = DVec3::new(rel.dot(axes[0]), rel.dot(axes[1]), rel.dot(axes[2]));
    let closest = local.clamp(-half, half);
    let diff = local - closest;
    let distance_sq = diff.length_squared();
    if distance_sq > radius * radius {
        return None;
    }

    let to_world = |v: DVec3| axes[0] * v.x + axes[1] * v.y + axes[2] * v.z;

    if distance_sq > GEOMETRY_EPSILON * GEOMETRY_EPSILON {
        let distance = distance_sq.sqrt();
        return Some(Contact {
            point: box_center + to_world(closest),
            normal: to_world(diff / distance),
            depth: radius - distance,
        });
    }

    // center inside the box: push out through the nearest face
    let gaps = half - local.abs();
    let mut face = 0;
    for i in 1..3 {
        if gaps[i] < gaps[face] {
            face = i;
        }
    }
    let sign = if local[face] < 0.0 { -1.0 } else { 1.0 };
    let mut surface = local;
    surface[face] = sign * half[face];
    Some(Contact {
        point: box_center + to_world(surface),
        normal: axes[face] * sign,
        depth: radius + gaps[face],
    })
}

/// Separating-axis test between two polytopes.
/// Normal points from `a` toward `b`.
fn polytope_polytope(a: &Polytope, b: &Polytope) -> Option<Contact> {
    let mut axes: Vec<DVec3> = Vec::with_capacity(
        a.face_normals.len() + b.face_normals.len() + a.edges.len() * b.edges.len(),
    );
    axes.extend(a.face_normals.iter().copied());
    axes.extend(b.face_normals.iter().copied());
    for ea in &a.edges {
        for eb in &b.edges {
            if let Some(n) = ea.cross(*eb).try_normalize() {
                axes.push(n);
            }
        }
    }

    let order = || order_sign(flatten(&a.vertices), flatten(&b.vertices));
    let mut best = MinimumAxis::default();
    for candidate in axes {
        let candidate = canonical(candidate);
        let (min_a, max_a) = a.project(candidate);
        let (min_b, max_b) = b.project(candidate);
        let forward = max_a - min_b;
        let backward = max_b - min_a;
        if forward < 0.0 || backward < 0.0 {
            return None;
        }
        let (depth, normal) = overlap_direction(forward, backward, candidate, order);
        best.offer(depth, normal);
    }

    let (depth, normal) = best.get()?;
    Some(Contact {
        point: b.support_centroid(-normal),
        normal,
        depth,
    })
}

/// Separating-axis test between a polytope and a sphere.
/// Normal points from the polytope toward the sphere.
///
/// Face normals cover a center in front of a face; the axis from the closest
/// edge point (vertices included) covers every other region outside the hull.
fn polytope_sphere(poly: &Polytope, center: DVec3, radius: f64) -> Option<Contact> {
    if radius <= 0.0 {
        return None;
    }

    let mut axes = poly.face_normals.clone();
    if let Some(nearest) = poly.closest_edge_point(center) {
        if let Some(n) = (center - nearest).try_normalize() {
            axes.push(n);
        }
    }

    let mut best = MinimumAxis::default();
    for candidate in axes {
        let candidate = canonical(candidate);
        let (min_a, max_a) = poly.project(candidate);
        let c = center.dot(candidate);
        let (min_b, max_b) = (c - radius, c + radius);
        let forward = max_a - min_b;
        let backward = max_b - min_a;
        if forward < 0.0 || backward < 0.0 {
            return None;
        }
        let (depth, normal) = overlap_direction(forward, backward, candidate, || 1.0);
        best.offer(depth, normal);
    }

    let (depth, normal) = best.get()?;
    Some(Contact {
        point: center - normal * radius,
        normal,
        depth,
    })
}

/// Depth and normal for one axis: the smaller of the two overlaps, with the
/// sign taken from `order` only when they are exactly equal.
fn overlap_direction(forward: f64, backward: f64, axis: DVec3, order: impl FnOnce() -> f64) -> (f64, DVec3) {
    if forward < backward {
        (forward, axis)
    } else if forward > backward {
        (backward, -axis)
    } else {
        (forward, axis * order())
    }
}

/// `1.0` if `a` sorts before or equal to `b` under `total_cmp`, else `-1.0`
fn order_sign(a: impl IntoIterator<Item = f64>, b: impl IntoIterator<Item = f64>) -> f64 {
    let mut a = a.into_iter();
    let mut b = b.into_iter();
    loop {
        match (a.next(), b.next()) {
            (Some(x), Some(y)) => match x.total_cmp(&y) {
                Ordering::Less => return 1.0,
                Ordering::Greater => return -1.0,
                Ordering::Equal => {}
            },
            (Some(_), None) => return -1.0,
            (None, _) => return 1.0,
        }
    }
}

fn flatten(points: &[DVec3]) -> impl Iterator<Item = f64> + '_ {
    points.iter().flat_map(|p| p.to_array())
}

/// Flip `axis` so its first non-negligible component is positive
fn canonical(axis: DVec3) -> DVec3 {
    let lead = axis
        .to_array()
        .into_iter()
        .find(|c| c.abs() > GEOMETRY_EPSILON)
        .unwrap_or(0.0);
    if lead < 0.0 {
        -axis
    } else {
        axis
    }
}

/// Tracks the axis of least overlap.
///
/// Ties are broken on the unsigned axis so the winner does not depend on the
/// order in which axes are offered or on the normal's sign.
#[derive(Default)]
struct MinimumAxis {
    best: Option<(f64, DVec3)>,
}

impl MinimumAxis {
    fn offer(&mut self, depth: f64, normal: DVec3) {
        let replace = match self.best {
            None => true,
            Some((d, n)) => {
                if (depth - d).abs() <= GEOMETRY_EPSILON * d.abs().max(1.0) {
                    tie_key(normal) < tie_key(n)
                } else {
                    depth < d
                }
            }
        };
        if replace {
            self.best = Some((depth, normal));
        }
    }

    fn get(&self) -> Option<(f64, DVec3)> {
        self.best
    }
}

fn tie_key(axis: DVec3) -> [i64; 3] {
    let line = canonical(axis);
    let q = |v: f64| (v * 1e9).round() as i64;
    [q(line.x), q(line.y), q(line.z)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::Collider;
    use crate::math::Pose;
    use approx::assert_abs_diff_eq;
    use glam::DQuat;
    use std::f64::consts::FRAC_PI_4;

    fn aabb(min: [f64; 3], max: [f64; 3]) -> WorldShape {
        WorldShape::Aabb {
            min: DVec3::from_array(min),
            max: DVec3::from_array(max),
        }
    }

    fn sphere(center: [f64; 3], radius: f64) -> WorldShape {
        WorldShape::Sphere {
            center: DVec3::from_array(center),
            radius,
        }
    }

    fn cube_hull_at(position: DVec3) -> WorldShape {
        cube_hull(1.0, position)
    }

    fn cube_hull(half: f64, position: DVec3) -> WorldShape {
        let mut pts = Vec::new();
        for x in [-half, half] {
            for y in [-half, half] {
                for z in [-half, half] {
                    pts.push(DVec3::new(x, y, z));
                }
            }
        }
        Collider::convex(pts).unwrap().at(&Pose::from_position(position))
    }

    fn assert_mirrored(a: &WorldShape, b: &WorldShape) {
        let ab = intersect(a, b).expect("a-b contact");
        let ba = intersect(b, a).expect("b-a contact");
        assert_abs_diff_eq!(ab.depth, ba.depth, epsilon = 1e-9);
        assert_abs_diff_eq!(ab.normal.distance(-ba.normal), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_aabb_aabb_minimum_axis() {
        let a = aabb([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
        let b = aabb([1.5, 0.5, 0.5], [3.5, 1.5, 1.5]);
        let c = intersect(&a, &b).unwrap();
        assert_eq!(c.normal, DVec3::X);
        assert_abs_diff_eq!(c.depth, 0.5);
        assert_abs_diff_eq!(c.point.x, 1.75);
        assert_mirrored(&a, &b);
    }

    #[test]
    fn test_aabb_aabb_separated_and_touching() {
        let a = aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        assert!(intersect(&a, &aabb([1.1, 0.0, 0.0], [2.0, 1.0, 1.0])).is_none());
        let touch = intersect(&a, &aabb([1.0, 0.0, 0.0], [2.0, 1.0, 1.0])).unwrap();
        assert_eq!(touch.depth, 0.0);
    }

    #[test]
    fn test_sphere_sphere() {
        let a = sphere([0.0, 0.0, 0.0], 1.0);
        let b = sphere([0.0, 1.5, 0.0], 1.0);
        let c = intersect(&a, &b).unwrap();
        assert_eq!(c.normal, DVec3::Y);
        assert_abs_diff_eq!(c.depth, 0.5);
        assert_abs_diff_eq!(c.point.y, 0.75);
        assert!(intersect(&a, &sphere([0.0, 2.5, 0.0], 1.0)).is_none());
    }

    #[test]
    fn test_sphere_sphere_coincident_centers() {
        let a = sphere([1.0, 1.0, 1.0], 1.0);
        let b = sphere([1.0, 1.0, 1.0], 0.5);
        let c = intersect(&a, &b).unwrap();
        assert_abs_diff_eq!(c.normal.length(), 1.0);
        assert_abs_diff_eq!(c.depth, 1.5);
    }

    #[test]
    fn test_zero_radius_sphere_never_contacts() {
        let a = sphere([0.0, 0.0, 0.0], 0.0);
        let b = sphere([0.0, 0.0, 0.0], 1.0);
        assert!(intersect(&a, &b).is_none());
        assert!(intersect(&aabb([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]), &a).is_none());
    }

    #[test]
    fn test_aabb_sphere_outside_and_inside() {
        let floor = aabb([-10.0, -1.0, -10.0], [10.0, 0.0, 10.0]);
        let ball = sphere([0.0, 0.9, 0.0], 1.0);
        let c = intersect(&floor, &ball).unwrap();
        assert_abs_diff_eq!(c.normal.distance(DVec3::Y), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.depth, 0.1, epsilon = 1e-12);
        assert_mirrored(&floor, &ball);

        // center below the top face but inside the slab
        let sunk = sphere([0.0, -0.2, 0.0], 0.5);
        let c = intersect(&floor, &sunk).unwrap();
        assert_eq!(c.normal, DVec3::Y);
        assert_abs_diff_eq!(c.depth, 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_obb_sphere_rotated() {
        let obb = Collider::obb(DVec3::new(1.0, 1.0, 1.0), DQuat::from_rotation_z(FRAC_PI_4))
            .unwrap()
            .at(&Pose::IDENTITY);
        let corner_reach = 2.0_f64.sqrt();
        let ball = sphere([0.0, corner_reach + 0.4, 0.0], 0.5);
        let c = intersect(&obb, &ball).unwrap();
        assert_abs_diff_eq!(c.depth, 0.1, epsilon = 1e-9);
        assert_abs_diff_eq!(c.normal.distance(DVec3::Y), 0.0, epsilon = 1e-9);
        assert_mirrored(&obb, &ball);
    }

    #[test]
    fn test_obb_obb_separating_axis() {
        let a = Collider::obb(DVec3::ONE, DQuat::IDENTITY).unwrap().at(&Pose::IDENTITY);
        let rotated = Collider::obb(DVec3::ONE, DQuat::from_rotation_z(FRAC_PI_4)).unwrap();

        let far = rotated.at(&Pose::from_position(DVec3::new(2.5, 0.0, 0.0)));
        assert!(intersect(&a, &far).is_none());

        let near = rotated.at(&Pose::from_position(DVec3::new(2.3, 0.0, 0.0)));
        let c = intersect(&a, &near).unwrap();
        assert_abs_diff_eq!(c.depth, 1.0 + 2.0_f64.sqrt() - 2.3, epsilon = 1e-9);
        assert!(c.normal.x > 0.9);
        assert_mirrored(&a, &near);
    }

    #[test]
    fn test_aabb_obb_mirrored() {
        let a = aabb([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]);
        let b = Collider::obb(DVec3::ONE, DQuat::from_rotation_y(0.3))
            .unwrap()
            .at(&Pose::from_position(DVec3::new(0.0, 1.8, 0.0)));
        let c = intersect(&a, &b).unwrap();
        assert_abs_diff_eq!(c.normal.distance(DVec3::Y), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.depth, 0.2, epsilon = 1e-9);
        assert_mirrored(&a, &b);
    }

    #[test]
    fn test_convex_convex() {
        let a = cube_hull_at(DVec3::ZERO);
        let b = cube_hull_at(DVec3::new(0.0, 0.0, 1.75));
        let c = intersect(&a, &b).unwrap();
        assert_eq!(c.normal, DVec3::Z);
        assert_abs_diff_eq!(c.depth, 0.25, epsilon = 1e-9);
        assert!(intersect(&a, &cube_hull_at(DVec3::new(0.0, 0.0, 2.5))).is_none());
    }

    #[test]
    fn test_convex_against_box_and_sphere() {
        let hull = cube_hull_at(DVec3::ZERO);
        let floor = aabb([-5.0, -3.0, -5.0], [5.0, -0.9, 5.0]);
        let c = intersect(&floor, &hull).unwrap();
        assert_eq!(c.normal, DVec3::Y);
        assert_abs_diff_eq!(c.depth, 0.1, epsilon = 1e-9);
        assert_mirrored(&floor, &hull);

        let ball = sphere([1.5, 0.0, 0.0], 0.75);
        let c = intersect(&hull, &ball).unwrap();
        assert_eq!(c.normal, DVec3::X);
        assert_abs_diff_eq!(c.depth, 0.25, epsilon = 1e-9);
        assert_mirrored(&hull, &ball);

        // sphere near a corner is separated along the corner axis
        let corner = sphere([1.5, 1.5, 1.5], 0.5);
        assert!(intersect(&hull, &corner).is_none());
    }

    #[test]
    fn test_sphere_beside_hull_edge() {
        let hull = cube_hull_at(DVec3::ZERO);
        let obb = Collider::obb(DVec3::ONE, DQuat::IDENTITY).unwrap().at(&Pose::IDENTITY);

        // within reach of both face planes, clear of the shared edge
        let clear = sphere([1.3, 1.3, 0.0], 0.4);
        assert!(intersect(&obb, &clear).is_none());
        assert!(intersect(&hull, &clear).is_none());
        assert!(intersect(&clear, &hull).is_none());

        let grazing = sphere([1.3, 1.3, 0.0], 0.45);
        let c = intersect(&hull, &grazing).unwrap();
        let diagonal = DVec3::new(1.0, 1.0, 0.0).normalize();
        assert_abs_diff_eq!(c.depth, 0.45 - 0.3 * 2.0_f64.sqrt(), epsilon = 1e-9);
        assert_abs_diff_eq!(c.normal.distance(diagonal), 0.0, epsilon = 1e-9);

        let boxed = intersect(&obb, &grazing).unwrap();
        assert_abs_diff_eq!(boxed.depth, c.depth, epsilon = 1e-9);
        assert_mirrored(&hull, &grazing);
    }

    #[test]
    fn test_concentric_same_kind_normals_negate() {
        let outer = aabb([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]);
        let inner = aabb([-0.5, -0.5, -0.5], [0.5, 0.5, 0.5]);
        assert_abs_diff_eq!(intersect(&outer, &inner).unwrap().depth, 1.5);
        assert_mirrored(&outer, &inner);

        let big = Collider::obb(DVec3::ONE, DQuat::IDENTITY).unwrap().at(&Pose::IDENTITY);
        let small = Collider::obb(DVec3::splat(0.5), DQuat::IDENTITY).unwrap().at(&Pose::IDENTITY);
        assert_mirrored(&big, &small);

        let hull_big = cube_hull(1.0, DVec3::new(2.0, 0.0, 0.0));
        let hull_small = cube_hull(0.5, DVec3::new(2.0, 0.0, 0.0));
        assert_mirrored(&hull_big, &hull_small);
    }

    #[test]
    fn test_coincident_sphere_normals_negate() {
        let a = sphere([1.0, 1.0, 1.0], 1.0);
        let b = sphere([1.0, 1.0, 1.0], 0.5);
        assert_mirrored(&a, &b);
        assert_abs_diff_eq!(intersect(&a, &b).unwrap().normal.y.abs(), 1.0);
    }

    #[test]
    fn test_dispatch_covers_every_pair() {
        let shapes = [
            aabb([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]),
            sphere([0.0, 0.5, 0.0], 1.0),
            Collider::obb(DVec3::ONE, DQuat::IDENTITY)
                .unwrap()
                .at(&Pose::from_position(DVec3::new(0.5, 0.0, 0.0))),
            cube_hull_at(DVec3::new(0.0, 0.0, 0.5)),
        ];
        for a in &shapes {
            for b in &shapes {
                let c = intersect(a, b).expect("overlapping shapes must contact");
                assert!(c.depth >= 0.0);
                assert_abs_diff_eq!(c.normal.length(), 1.0, epsilon = 1e-9);
            }
        }
    }
}
