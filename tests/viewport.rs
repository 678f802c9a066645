// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Viewport reload behavior

use approx::assert_relative_eq;
use nalgebra::Point3;
use scad_preview::{PreviewConfig, PreviewWarning, Viewport};

#[test]
fn test_reload_replaces_every_object() {
    let mut viewport = Viewport::new();

    viewport.load("cube([1, 1, 1]); cube([2, 2, 2]); sphere(r = 1);");
    assert_eq!(viewport.scene().unwrap().len(), 3);

    viewport.load("cylinder(h = 1, r = 1);");
    let scene = viewport.scene().unwrap();
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.objects[0].index, 0);
    assert_eq!(viewport.generation(), 2);
}

#[test]
fn test_reload_reframes_camera() {
    let mut viewport = Viewport::new();

    viewport.load("cube([2, 2, 2]);");
    let small = *viewport.camera();

    viewport.load("cube([20, 20, 20]);");
    let large = *viewport.camera();

    assert_relative_eq!(large.distance, small.distance * 10.0, epsilon = 1e-9);
    assert_eq!(large.target, Point3::origin());
}

#[test]
fn test_failed_parse_still_shows_placeholder() {
    let mut viewport = Viewport::new();
    let preview = viewport.load("sphere(r = );");

    assert!(preview.used_placeholder());
    assert!(preview.warnings[0].is_parse_mismatch());
    assert_eq!(preview.warnings[1], PreviewWarning::EmptyScene);
    assert_eq!(viewport.scene().unwrap().len(), 1);
}

#[test]
fn test_clear_returns_to_initial_camera() {
    let mut viewport = Viewport::with_config(PreviewConfig::default());
    viewport.load("sphere(r = 10);");
    viewport.clear();

    assert!(viewport.scene().is_none());
    assert_eq!(viewport.camera().position, Point3::new(0.0, 0.0, 5.0));
    assert_eq!(viewport.generation(), 2);
}
