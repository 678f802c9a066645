// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Camera framing

use crate::config::CameraConfig;
use crate::geometry::BoundingBox;
use crate::utils::math::{deg_to_rad, fit_distance};
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Camera pose and lens derived from the scene bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraFrame {
    pub position: Point3<f64>,
    pub target: Point3<f64>,
    pub fov_degrees: f64,
    /// Fit distance before the diagonal offset is applied
    pub distance: f64,
    pub near: f64,
    pub far: f64,
}

impl CameraFrame {
    /// Un-framed starting pose looking at the origin
    pub fn initial(config: &CameraConfig) -> Self {
        let [x, y, z] = config.initial_position;
        let position = Point3::new(x, y, z);
        Self {
            position,
            target: Point3::origin(),
            fov_degrees: config.fov_degrees,
            distance: position.coords.norm(),
            near: config.near,
            far: config.far,
        }
    }

    /// Frame `bounds` from a fixed diagonal.
    ///
    /// The fit distance is `max_extent / (2 tan(fov / 2))`; the camera sits at
    /// `center + distance * distance_factor` on all three axes and looks at the
    /// center. Returns `None` for empty bounds.
    pub fn frame(bounds: &BoundingBox, config: &CameraConfig) -> Option<Self> {
        if bounds.is_empty() {
            return None;
        }

        let center = bounds.center();
        let distance = fit_distance(bounds.max_extent(), config.fov_degrees);
        if !distance.is_finite() {
            return None;
        }

        let offset = distance * config.distance_factor;
        Some(Self {
            position: center + Vector3::repeat(offset),
            target: center,
            fov_degrees: config.fov_degrees,
            distance,
            near: config.near,
            far: config.far,
        })
    }

    /// Unit vector from the camera toward its target
    pub fn direction(&self) -> Vector3<f64> {
        (self.target - self.position).normalize()
    }

    /// Right-handed, Y-up view matrix
    pub fn view_matrix(&self) -> Matrix4<f64> {
        Isometry3::look_at_rh(&self.position, &self.target, &Vector3::y()).to_homogeneous()
    }

    pub fn projection_matrix(&self, aspect: f64) -> Matrix4<f64> {
        Perspective3::new(aspect, deg_to_rad(self.fov_degrees), self.near, self.far).to_homogeneous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_frame_two_unit_box() {
        let frame = CameraFrame::frame(&unit_box(), &CameraConfig::default()).unwrap();
        let expected = 2.0 / (2.0 * 37.5f64.to_radians().tan());

        assert!((frame.distance - expected).abs() < 1e-12);
        assert!((frame.distance - 1.3032).abs() < 1e-4);
        assert_eq!(frame.target, Point3::origin());
        for axis in 0..3 {
            assert!((frame.position[axis] - 1.5 * expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_bounds_skip_framing() {
        assert!(CameraFrame::frame(&BoundingBox::empty(), &CameraConfig::default()).is_none());
    }

    #[test]
    fn test_view_matrix_maps_target_in_front() {
        let frame = CameraFrame::frame(&unit_box(), &CameraConfig::default()).unwrap();
        let view = frame.view_matrix();
        let target = view.transform_point(&frame.target);

        // Right-handed view space looks down -Z
        assert!(target.x.abs() < 1e-9);
        assert!(target.y.abs() < 1e-9);
        assert!(target.z < 0.0);
    }

    #[test]
    fn test_projection_keeps_target_inside_clip_volume() {
        let frame = CameraFrame::frame(&unit_box(), &CameraConfig::default()).unwrap();
        let clip = frame.projection_matrix(1.0) * frame.view_matrix();
        let ndc = clip.transform_point(&frame.target);

        assert!(ndc.x.abs() < 1e-9);
        assert!(ndc.y.abs() < 1e-9);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);

        // A point behind the camera falls outside the depth range
        let behind = frame.position + (frame.position - frame.target);
        let ndc = clip.transform_point(&behind);
        assert!(!(ndc.z > -1.0 && ndc.z < 1.0));
    }

    #[test]
    fn test_initial_pose() {
        let frame = CameraFrame::initial(&CameraConfig::default());
        assert_eq!(frame.position, Point3::new(0.0, 0.0, 5.0));
        assert_eq!(frame.distance, 5.0);
        assert_eq!(frame.direction(), Vector3::new(0.0, 0.0, -1.0));
    }
}
