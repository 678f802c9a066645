// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

/// Check if two floats are approximately equal
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

/// Convert degrees to radians
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

/// Distance at which an extent fills a vertical field of view
pub fn fit_distance(extent: f64, fov_degrees: f64) -> f64 {
    extent / (2.0 * (deg_to_rad(fov_degrees) / 2.0).tan())
}
