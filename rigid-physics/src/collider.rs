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
//! Collision shapes
//!
//! [`Collider`] is a closed set of four shapes. Geometry is validated once at
//! construction; queries assume a well-formed shape.
//!
//! # Frames
//!
//! Shapes are described in the owner's local frame and placed in the world by
//! a [`Pose`]. The AABB is the exception for rotation: it follows the pose's
//! translation only and stays axis-aligned in world space. OBB orientation is
//! composed with the pose orientation.
//!
//! # Examples
//!
//! ```
//! use glam::DVec3;
//! use rigid_physics::collider::Collider;
//!
//! let floor = Collider::aabb(DVec3::new(-10.0, -1.0, -10.0), DVec3::new(10.0, 0.0, 10.0)).unwrap();
//! assert!(Collider::aabb(DVec3::ONE, DVec3::ZERO).is_err());
//! assert!(Collider::convex(vec![DVec3::ZERO; 3]).is_err());
//! # let _ = floor;
//! ```

use crate::error::ColliderError;
use crate::math::{try_normalize_quat, Pose, GEOMETRY_EPSILON};
use glam::{DQuat, DVec3};

/// Discriminant of a [`Collider`], used to index the pair dispatch table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeKind {
    /// Axis-aligned box
    Aabb = 0,
    /// Sphere
    Sphere = 1,
    /// Oriented box
    Obb = 2,
    /// Convex hull
    Convex = 3,
}

impl ShapeKind {
    /// Number of shape kinds
    pub const COUNT: usize = 4;

    /// Row/column in the dispatch table
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Supporting plane of a hull face, `normal · p <= offset` inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePlane {
    /// Outward unit normal
    pub normal: DVec3,
    /// Plane offset along the normal
    pub offset: f64,
}

/// Convex hull with precomputed face planes and edges
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexHull {
    vertices: Vec<DVec3>,
    faces: Vec<FacePlane>,
    edges: Vec<DVec3>,
    segments: Vec<[usize; 2]>,
    tolerance: f64,
}

impl ConvexHull {
    fn build(vertices: Vec<DVec3>) -> Result<Self, ColliderError> {
        if vertices.len() < 4 {
            return Err(ColliderError::TooFewHullPoints { count: vertices.len() });
        }
        if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(ColliderError::NonFiniteVertex { index });
        }

        let scale = vertices.iter().fold(1.0_f64, |acc, v| acc.max(v.abs().max_element()));
        let tolerance = GEOMETRY_EPSILON * scale;

        if !spans_volume(&vertices, tolerance) {
            return Err(ColliderError::CoplanarHull);
        }

        let faces = hull_faces(&vertices, tolerance);
        let (edges, segments) = hull_edges(&vertices, &faces, tolerance);

        Ok(ConvexHull {
            vertices,
            faces,
            edges,
            segments,
            tolerance,
        })
    }

    /// Hull points in local space, in the order given
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Face planes in local space
    pub fn faces(&self) -> &[FacePlane] {
        &self.faces
    }

    /// Distinct edge directions in local space
    pub fn edges(&self) -> &[DVec3] {
        &self.edges
    }

    /// Edges as pairs of indices into [`ConvexHull::vertices`]
    pub fn segments(&self) -> &[[usize; 2]] {
        &self.segments
    }

    fn contains_local(&self, p: DVec3) -> bool {
        self.faces
            .iter()
            .all(|f| f.normal.dot(p) <= f.offset + self.tolerance)
    }
}

/// Collision shape
#[derive(Debug, Clone, PartialEq)]
pub enum Collider {
    /// Axis-aligned box given by local corners
    Aabb {
        /// Lower corner
        min: DVec3,
        /// Upper corner
        max: DVec3,
    },
    /// Sphere centered on the pose position
    Sphere {
        /// Radius, zero allowed
        radius: f64,
    },
    /// Box with its own local rotation
    Obb {
        /// Half size along each local axis
        half_extents: DVec3,
        /// Rotation relative to the owner
        orientation: DQuat,
    },
    /// Convex hull of a point set
    Convex(ConvexHull),
}

impl Collider {
    /// Axis-aligned box; every axis must have a positive, finite extent
    pub fn aabb(min: DVec3, max: DVec3) -> Result<Self, ColliderError> {
        let extent = max - min;
        if !min.is_finite() || !max.is_finite() || extent.min_element() <= 0.0 {
            return Err(ColliderError::DegenerateAabb {
                min: min.to_array(),
                max: max.to_array(),
            });
        }
        Ok(Collider::Aabb { min, max })
    }

    /// Sphere; a zero radius is accepted and never produces contacts
    pub fn sphere(radius: f64) -> Result<Self, ColliderError> {
        if !(radius >= 0.0 && radius.is_finite()) {
            return Err(ColliderError::InvalidRadius(radius));
        }
        Ok(Collider::Sphere { radius })
    }

    /// Oriented box; the orientation is normalized
    pub fn obb(half_extents: DVec3, orientation: DQuat) -> Result<Self, ColliderError> {
        if !half_extents.is_finite() || half_extents.min_element() <= 0.0 {
            return Err(ColliderError::InvalidHalfExtents(half_extents.to_array()));
        }
        let orientation = try_normalize_quat(orientation).ok_or(ColliderError::InvalidOrientation)?;
        Ok(Collider::Obb {
            half_extents,
            orientation,
        })
    }

    /// Convex hull of at least four non-coplanar points
    pub fn convex(vertices: Vec<DVec3>) -> Result<Self, ColliderError> {
        ConvexHull::build(vertices).map(Collider::Convex)
    }

    /// Shape discriminant
    pub fn kind(&self) -> ShapeKind {
        match self {
            Collider::Aabb { .. } => ShapeKind::Aabb,
            Collider::Sphere { .. } => ShapeKind::Sphere,
            Collider::Obb { .. } => ShapeKind::Obb,
            Collider::Convex(_) => ShapeKind::Convex,
        }
    }

    /// Place the shape in the world
    pub fn at(&self, pose: &Pose) -> WorldShape {
        match self {
            Collider::Aabb { min, max } => WorldShape::Aabb {
                min: *min + pose.position,
                max: *max + pose.position,
            },
            Collider::Sphere { radius } => WorldShape::Sphere {
                center: pose.position,
                radius: *radius,
            },
            Collider::Obb {
                half_extents,
                orientation,
            } => {
                let rotation = pose.orientation * *orientation;
                WorldShape::Obb {
                    center: pose.position,
                    axes: [rotation * DVec3::X, rotation * DVec3::Y, rotation * DVec3::Z],
                    half_extents: *half_extents,
                }
            }
            Collider::Convex(hull) => WorldShape::Convex(Polytope {
                vertices: hull.vertices.iter().map(|v| pose.transform_point(*v)).collect(),
                face_normals: hull.faces.iter().map(|f| pose.transform_vector(f.normal)).collect(),
                edges: hull.edges.iter().map(|e| pose.transform_vector(*e)).collect(),
                segments: hull.segments.clone(),
            }),
        }
    }

    /// World-space bounding box at the given pose
    pub fn bounds(&self, pose: &Pose) -> Bounds {
        self.at(pose).bounds()
    }

    /// Whether a world-space point lies inside (or on) the shape
    pub fn contains_point(&self, pose: &Pose, point: DVec3) -> bool {
        match self {
            Collider::Aabb { min, max } => {
                let p = point - pose.position;
                p.cmpge(*min).all() && p.cmple(*max).all()
            }
            Collider::Sphere { radius } => point.distance_squared(pose.position) <= radius * radius,
            Collider::Obb {
                half_extents,
                orientation,
            } => {
                let rotation = pose.orientation * *orientation;
                let local = rotation.inverse() * (point - pose.position);
                local.abs().cmple(*half_extents).all()
            }
            Collider::Convex(hull) => hull.contains_local(pose.inverse_transform_point(point)),
        }
    }
}

/// World-space axis-aligned bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lower corner
    pub min: DVec3,
    /// Upper corner
    pub max: DVec3,
}

impl Bounds {
    /// Inclusive overlap test; touching faces count as overlapping
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }
}

/// Vertex, face normal and edge sets used by the separating-axis tests
#[derive(Debug, Clone, PartialEq)]
pub struct Polytope {
    /// World-space vertices
    pub vertices: Vec<DVec3>,
    /// World-space unit face normals
    pub face_normals: Vec<DVec3>,
    /// World-space unit edge directions
    pub edges: Vec<DVec3>,
    /// Edges as index pairs into `vertices`
    pub segments: Vec<[usize; 2]>,
}

impl Polytope {
    /// Min and max projection of the vertices onto an axis
    pub fn project(&self, axis: DVec3) -> (f64, f64) {
        self.vertices.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            let d = v.dot(axis);
            (lo.min(d), hi.max(d))
        })
    }

    /// Average of the vertices that are deepest along `direction`
    pub fn support_centroid(&self, direction: DVec3) -> DVec3 {
        let (_, hi) = self.project(direction);
        let tolerance = GEOMETRY_EPSILON * hi.abs().max(1.0);
        let (sum, count) = self
            .vertices
            .iter()
            .filter(|v| v.dot(direction) >= hi - tolerance)
            .fold((DVec3::ZERO, 0usize), |(s, n), v| (s + *v, n + 1));
        if count == 0 {
            DVec3::ZERO
        } else {
            sum / count as f64
        }
    }

    /// Vertex closest to a point
    pub fn closest_vertex(&self, point: DVec3) -> Option<DVec3> {
        self.vertices.iter().copied().min_by(|a, b| {
            a.distance_squared(point)
                .total_cmp(&b.distance_squared(point))
        })
    }

    /// Point on any edge (endpoints included) closest to `point`
    ///
    /// Falls back to the closest vertex when there are no edges.
    pub fn closest_edge_point(&self, point: DVec3) -> Option<DVec3> {
        self.segments
            .iter()
            .filter_map(|[i, j]| {
                let a = *self.vertices.get(*i)?;
                let b = *self.vertices.get(*j)?;
                Some(closest_on_segment(a, b, point))
            })
            .min_by(|a, b| {
                a.distance_squared(point)
                    .total_cmp(&b.distance_squared(point))
            })
            .or_else(|| self.closest_vertex(point))
    }
}

/// A collider instantiated at a pose
#[derive(Debug, Clone, PartialEq)]
pub enum WorldShape {
    /// World-space axis-aligned box
    Aabb {
        /// Lower corner
        min: DVec3,
        /// Upper corner
        max: DVec3,
    },
    /// World-space sphere
    Sphere {
        /// Center
        center: DVec3,
        /// Radius
        radius: f64,
    },
    /// World-space oriented box
    Obb {
        /// Center
        center: DVec3,
        /// Unit local axes in world space
        axes: [DVec3; 3],
        /// Half size along each axis
        half_extents: DVec3,
    },
    /// World-space convex hull
    Convex(Polytope),
}

impl WorldShape {
    /// Shape discriminant
    pub fn kind(&self) -> ShapeKind {
        match self {
            WorldShape::Aabb { .. } => ShapeKind::Aabb,
            WorldShape::Sphere { .. } => ShapeKind::Sphere,
            WorldShape::Obb { .. } => ShapeKind::Obb,
            WorldShape::Convex(_) => ShapeKind::Convex,
        }
    }

    /// Axis-aligned bounds
    pub fn bounds(&self) -> Bounds {
        match self {
            WorldShape::Aabb { min, max } => Bounds { min: *min, max: *max },
            WorldShape::Sphere { center, radius } => Bounds {
                min: *center - DVec3::splat(*radius),
                max: *center + DVec3::splat(*radius),
            },
            WorldShape::Obb {
                center,
                axes,
                half_extents,
            } => {
                let reach = axes[0].abs() * half_extents.x
                    + axes[1].abs() * half_extents.y
                    + axes[2].abs() * half_extents.z;
                Bounds {
                    min: *center - reach,
                    max: *center + reach,
                }
            }
            WorldShape::Convex(poly) => {
                let (min, max) = poly.vertices.iter().fold(
                    (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
                    |(lo, hi), v| (lo.min(*v), hi.max(*v)),
                );
                Bounds { min, max }
            }
        }
    }

    /// Polytope view for separating-axis tests; `None` for spheres
    pub fn polytope(&self) -> Option<Polytope> {
        match self {
            WorldShape::Aabb { min, max } => {
                let center = (*min + *max) * 0.5;
                let half = (*max - *min) * 0.5;
                Some(box_polytope(center, [DVec3::X, DVec3::Y, DVec3::Z], half))
            }
            WorldShape::Obb {
                center,
                axes,
                half_extents,
            } => Some(box_polytope(*center, *axes, *half_extents)),
            WorldShape::Convex(poly) => Some(poly.clone()),
            WorldShape::Sphere { .. } => None,
        }
    }
}

fn box_polytope(center: DVec3, axes: [DVec3; 3], half: DVec3) -> Polytope {
    let mut vertices = Vec::with_capacity(8);
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            for sz in [-1.0, 1.0] {
                vertices.push(
                    center + axes[0] * (sx * half.x) + axes[1] * (sy * half.y) + axes[2] * (sz * half.z),
                );
            }
        }
    }
    // vertex index bits are (x, y, z) = (4, 2, 1); an edge flips one bit
    let mut segments = Vec::with_capacity(12);
    for i in 0..8 {
        for bit in [4, 2, 1] {
            if i & bit == 0 {
                segments.push([i, i | bit]);
            }
        }
    }
    Polytope {
        vertices,
        face_normals: axes.to_vec(),
        edges: axes.to_vec(),
        segments,
    }
}

fn closest_on_segment(a: DVec3, b: DVec3, point: DVec3) -> DVec3 {
    let ab = b - a;
    let length_sq = ab.length_squared();
    if length_sq <= GEOMETRY_EPSILON * GEOMETRY_EPSILON {
        return a;
    }
    let t = ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    a + ab * t
}

fn spans_volume(vertices: &[DVec3], tolerance: f64) -> bool {
    let p0 = vertices[0];
    let far = |score: &dyn Fn(DVec3) -> f64| {
        vertices
            .iter()
            .copied()
            .max_by(|a, b| score(*a).total_cmp(&score(*b)))
            .unwrap_or(p0)
    };

    let p1 = far(&|v| v.distance_squared(p0));
    let line = p1 - p0;
    if line.length() <= tolerance {
        return false;
    }
    let p2 = far(&|v| line.cross(v - p0).length_squared());
    let normal = line.cross(p2 - p0);
    if normal.length() <= tolerance {
        return false;
    }
    let normal = normal.normalize();
    vertices.iter().any(|v| normal.dot(*v - p0).abs() > tolerance)
}

fn hull_faces(vertices: &[DVec3], tolerance: f64) -> Vec<FacePlane> {
    let mut faces: Vec<FacePlane> = Vec::new();
    let n = vertices.len();

    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                let raw = (vertices[j] - vertices[i]).cross(vertices[k] - vertices[i]);
                let Some(normal) = raw.try_normalize() else {
                    continue;
                };
                let offset = normal.dot(vertices[i]);

                let (lo, hi) = vertices.iter().fold((0.0_f64, 0.0_f64), |(lo, hi), v| {
                    let d = normal.dot(*v) - offset;
                    (lo.min(d), hi.max(d))
                });

                let plane = if hi <= tolerance {
                    FacePlane { normal, offset }
                } else if lo >= -tolerance {
                    FacePlane {
                        normal: -normal,
                        offset: -offset,
                    }
                } else {
                    continue;
                };

                let duplicate = faces
                    .iter()
                    .any(|f| f.normal.dot(plane.normal) > 1.0 - GEOMETRY_EPSILON);
                if !duplicate {
                    faces.push(plane);
                }
            }
        }
    }

    faces
}

/// Distinct edge directions plus every vertex pair lying on two faces
fn hull_edges(vertices: &[DVec3], faces: &[FacePlane], tolerance: f64) -> (Vec<DVec3>, Vec<[usize; 2]>) {
    let on_face = |face: &FacePlane, v: DVec3| (face.normal.dot(v) - face.offset).abs() <= tolerance;
    let mut edges: Vec<DVec3> = Vec::new();
    let mut segments = Vec::new();

    for (i, a) in vertices.iter().enumerate() {
        for (j, b) in vertices.iter().enumerate().skip(i + 1) {
            let shared = faces
                .iter()
                .filter(|f| on_face(f, *a) && on_face(f, *b))
                .count();
            if shared < 2 {
                continue;
            }
            let Some(dir) = (*b - *a).try_normalize() else {
                continue;
            };
            segments.push([i, j]);
            if !edges.iter().any(|e| e.dot(dir).abs() > 1.0 - GEOMETRY_EPSILON) {
                edges.push(dir);
            }
        }
    }

    (edges, segments)
}
