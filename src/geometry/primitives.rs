// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene geometry generator
//!
//! Shapes are centered on the origin with Y up. Cylinders run along Y.

use super::{Mesh, Triangle, Vertex};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Geometry in scene axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Geometry {
    Box {
        width: f64,
        height: f64,
        depth: f64,
    },
    Sphere {
        radius: f64,
        width_segments: u32,
        height_segments: u32,
    },
    Cylinder {
        radius: f64,
        height: f64,
        radial_segments: u32,
    },
}

impl Geometry {
    /// Box spanning `width` on X, `height` on Y and `depth` on Z
    pub fn cuboid(width: f64, height: f64, depth: f64) -> Self {
        Self::Box {
            width,
            height,
            depth,
        }
    }

    pub fn sphere(radius: f64, width_segments: u32, height_segments: u32) -> Self {
        Self::Sphere {
            radius,
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }

    pub fn cylinder(radius: f64, height: f64, radial_segments: u32) -> Self {
        Self::Cylinder {
            radius,
            height,
            radial_segments: radial_segments.max(3),
        }
    }

    pub fn to_mesh(&self) -> Mesh {
        match *self {
            Self::Box {
                width,
                height,
                depth,
            } => generate_box_mesh(Vector3::new(width, height, depth)),
            Self::Sphere {
                radius,
                width_segments,
                height_segments,
            } => generate_sphere_mesh(radius, width_segments, height_segments),
            Self::Cylinder {
                radius,
                height,
                radial_segments,
            } => generate_cylinder_mesh(radius, height, radial_segments),
        }
    }

    /// Extent along X, Y and Z
    pub fn extent(&self) -> Vector3<f64> {
        match *self {
            Self::Box {
                width,
                height,
                depth,
            } => Vector3::new(width, height, depth),
            Self::Sphere { radius, .. } => Vector3::repeat(2.0 * radius),
            Self::Cylinder { radius, height, .. } => Vector3::new(2.0 * radius, height, 2.0 * radius),
        }
    }
}

fn generate_box_mesh(size: Vector3<f64>) -> Mesh {
    let mut mesh = Mesh::with_capacity(36, 12);
    let half = size / 2.0;
    let (min_x, max_x) = (-half.x, half.x);
    let (min_y, max_y) = (-half.y, half.y);
    let (min_z, max_z) = (-half.z, half.z);

    // 8 corners of the box
    let positions = [
        Point3::new(min_x, min_y, min_z),
        Point3::new(max_x, min_y, min_z),
        Point3::new(max_x, max_y, min_z),
        Point3::new(min_x, max_y, min_z),
        Point3::new(min_x, min_y, max_z),
        Point3::new(max_x, min_y, max_z),
        Point3::new(max_x, max_y, max_z),
        Point3::new(min_x, max_y, max_z),
    ];

    // 6 faces, each with its own vertices so normals stay flat
    let faces = [
        // Front (z+)
        ([4, 5, 6], Vector3::new(0.0, 0.0, 1.0)),
        ([4, 6, 7], Vector3::new(0.0, 0.0, 1.0)),
        // Back (z-)
        ([1, 0, 3], Vector3::new(0.0, 0.0, -1.0)),
        ([1, 3, 2], Vector3::new(0.0, 0.0, -1.0)),
        // Right (x+)
        ([5, 1, 2], Vector3::new(1.0, 0.0, 0.0)),
        ([5, 2, 6], Vector3::new(1.0, 0.0, 0.0)),
        // Left (x-)
        ([0, 4, 7], Vector3::new(-1.0, 0.0, 0.0)),
        ([0, 7, 3], Vector3::new(-1.0, 0.0, 0.0)),
        // Top (y+)
        ([7, 6, 2], Vector3::new(0.0, 1.0, 0.0)),
        ([7, 2, 3], Vector3::new(0.0, 1.0, 0.0)),
        // Bottom (y-)
        ([0, 1, 5], Vector3::new(0.0, -1.0, 0.0)),
        ([0, 5, 4], Vector3::new(0.0, -1.0, 0.0)),
    ];

    for (indices, normal) in faces {
        let v0 = mesh.add_vertex(Vertex::new(positions[indices[0]], normal));
        let v1 = mesh.add_vertex(Vertex::new(positions[indices[1]], normal));
        let v2 = mesh.add_vertex(Vertex::new(positions[indices[2]], normal));
        mesh.add_triangle(Triangle::new([v0, v1, v2]));
    }

    mesh
}

/// UV sphere: `height_segments` rings from pole to pole, `width_segments` around
fn generate_sphere_mesh(radius: f64, width_segments: u32, height_segments: u32) -> Mesh {
    let columns = width_segments as usize + 1;
    let mut mesh = Mesh::with_capacity(
        columns * (height_segments as usize + 1),
        2 * width_segments as usize * height_segments as usize,
    );

    for iy in 0..=height_segments {
        let phi = PI * iy as f64 / height_segments as f64;

        for ix in 0..=width_segments {
            let theta = 2.0 * PI * ix as f64 / width_segments as f64;
            let direction = Vector3::new(
                -theta.cos() * phi.sin(),
                phi.cos(),
                theta.sin() * phi.sin(),
            );
            mesh.add_vertex(Vertex::new(Point3::from(direction * radius), direction));
        }
    }

    // Pole rows collapse to a point, so skip their degenerate triangles
    for iy in 0..height_segments as usize {
        for ix in 0..width_segments as usize {
            let a = iy * columns + ix + 1;
            let b = iy * columns + ix;
            let c = (iy + 1) * columns + ix;
            let d = (iy + 1) * columns + ix + 1;

            if iy != 0 {
                mesh.add_triangle(Triangle::new([a, b, d]));
            }
            if iy != height_segments as usize - 1 {
                mesh.add_triangle(Triangle::new([b, c, d]));
            }
        }
    }

    mesh
}

fn generate_cylinder_mesh(radius: f64, height: f64, segments: u32) -> Mesh {
    let mut mesh = Mesh::new();
    let half = height / 2.0;
    let up = Vector3::new(0.0, 1.0, 0.0);
    let down = -up;

    let rim = |i: u32| {
        let theta = 2.0 * PI * i as f64 / segments as f64;
        (theta.sin(), theta.cos())
    };

    // Side: separate rings so the caps keep flat normals
    let mut bottom_side = Vec::with_capacity(segments as usize);
    let mut top_side = Vec::with_capacity(segments as usize);
    for i in 0..segments {
        let (sin, cos) = rim(i);
        let normal = Vector3::new(sin, 0.0, cos);
        bottom_side.push(mesh.add_vertex(Vertex::new(
            Point3::new(radius * sin, -half, radius * cos),
            normal,
        )));
        top_side.push(mesh.add_vertex(Vertex::new(
            Point3::new(radius * sin, half, radius * cos),
            normal,
        )));
    }

    for i in 0..segments as usize {
        let next = (i + 1) % segments as usize;
        let (bi, ti) = (bottom_side[i], top_side[i]);
        let (bn, tn) = (bottom_side[next], top_side[next]);

        mesh.add_triangle(Triangle::new([bi, bn, ti]));
        mesh.add_triangle(Triangle::new([bn, tn, ti]));
    }

    // Caps
    for (y, normal) in [(half, up), (-half, down)] {
        let center = mesh.add_vertex(Vertex::new(Point3::new(0.0, y, 0.0), normal));
        let ring: Vec<usize> = (0..segments)
            .map(|i| {
                let (sin, cos) = rim(i);
                mesh.add_vertex(Vertex::new(Point3::new(radius * sin, y, radius * cos), normal))
            })
            .collect();

        for i in 0..segments as usize {
            let next = (i + 1) % segments as usize;
            if y > 0.0 {
                mesh.add_triangle(Triangle::new([center, ring[i], ring[next]]));
            } else {
                mesh.add_triangle(Triangle::new([center, ring[next], ring[i]]));
            }
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_generation() {
        let mesh = Geometry::cuboid(4.0, 2.0, 6.0).to_mesh();
        assert_eq!(mesh.vertex_count(), 36);
        assert_eq!(mesh.triangle_count(), 12);

        let bbox = mesh.bounding_box();
        assert_eq!(bbox.min, Point3::new(-2.0, -1.0, -3.0));
        assert_eq!(bbox.max, Point3::new(2.0, 1.0, 3.0));
        assert!((mesh.signed_volume() - 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_bounds_and_volume() {
        let mesh = Geometry::sphere(3.0, 32, 16).to_mesh();
        assert_eq!(mesh.vertex_count(), 33 * 17);
        assert_eq!(mesh.triangle_count(), 2 * 32 * 16 - 2 * 32);

        let bbox = mesh.bounding_box();
        assert!(bbox.approx_eq(
            &crate::geometry::BoundingBox::new(Point3::new(-3.0, -3.0, -3.0), Point3::new(3.0, 3.0, 3.0)),
            1e-9
        ));

        let exact = 4.0 / 3.0 * PI * 27.0;
        let volume = mesh.signed_volume();
        assert!(volume > 0.0, "sphere winding should face outward");
        assert!((volume - exact).abs() / exact < 0.05);
    }

    #[test]
    fn test_cylinder_bounds_and_volume() {
        let mesh = Geometry::cylinder(2.0, 10.0, 32).to_mesh();
        assert_eq!(mesh.triangle_count(), 32 * 4);

        let bbox = mesh.bounding_box();
        assert!(bbox.approx_eq(
            &crate::geometry::BoundingBox::new(Point3::new(-2.0, -5.0, -2.0), Point3::new(2.0, 5.0, 2.0)),
            1e-9
        ));

        let exact = PI * 4.0 * 10.0;
        let volume = mesh.signed_volume();
        assert!(volume > 0.0, "cylinder winding should face outward");
        assert!((volume - exact).abs() / exact < 0.02);
    }

    #[test]
    fn test_extent_matches_mesh() {
        for geometry in [
            Geometry::cuboid(1.0, 2.0, 3.0),
            Geometry::sphere(1.5, 32, 16),
            Geometry::cylinder(0.5, 4.0, 32),
        ] {
            let size = geometry.to_mesh().bounding_box().size();
            assert!((size - geometry.extent()).norm() < 1e-9);
        }
    }

    #[test]
    fn test_segment_minimums() {
        assert_eq!(
            Geometry::sphere(1.0, 0, 0),
            Geometry::Sphere {
                radius: 1.0,
                width_segments: 3,
                height_segments: 2
            }
        );
    }

    #[test]
    fn test_sphere_triangle_count() {
        // Pole rows contribute one triangle per column instead of two
        let mesh = Geometry::sphere(1.0, 64, 48).to_mesh();
        assert_eq!(mesh.triangle_count(), 2 * 64 * 47);
        assert_eq!(mesh.vertex_count(), 65 * 49);
    }
}
