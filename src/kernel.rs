// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Preview pipeline and the viewport that holds its latest result

use crate::ast::PrimitiveDescriptor;
use crate::config::PreviewConfig;
use crate::error::PreviewWarning;
use crate::geometry::BoundingBox;
use crate::io::{extract, strip_code_fences, Extraction};
use crate::scene::{CameraFrame, Scene, SceneBuilder};
use log::info;
use serde::Serialize;

/// Everything produced for one source text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub extraction: Extraction,
    pub scene: Scene,
    /// `None` only when the scene has no objects
    pub camera: Option<CameraFrame>,
    /// Parse mismatches, then the empty-scene notice, then clamped dimensions
    pub warnings: Vec<PreviewWarning>,
}

impl Preview {
    /// Run fence removal, extraction and scene building over `source`
    pub fn run(source: &str, config: &PreviewConfig) -> Self {
        let source = strip_code_fences(source);
        let extraction = extract(&source);
        let build = SceneBuilder::new(config).build_extraction(&extraction);

        let mut warnings: Vec<PreviewWarning> = extraction
            .mismatches
            .iter()
            .cloned()
            .map(PreviewWarning::from)
            .collect();
        if extraction.used_placeholder {
            warnings.push(PreviewWarning::EmptyScene);
        }
        warnings.extend(build.warnings);

        Self {
            extraction,
            scene: build.scene,
            camera: build.camera,
            warnings,
        }
    }

    pub fn descriptors(&self) -> &[PrimitiveDescriptor] {
        &self.extraction.descriptors
    }

    pub fn skipped(&self) -> usize {
        self.extraction.skipped()
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        self.scene.bounds()
    }

    pub fn used_placeholder(&self) -> bool {
        self.extraction.used_placeholder
    }
}

/// Holds the current preview; every load replaces it wholesale
pub struct Viewport {
    config: PreviewConfig,
    current: Option<Preview>,
    camera: CameraFrame,
    generation: u64,
}

impl Viewport {
    pub fn new() -> Self {
        Self::with_config(PreviewConfig::default())
    }

    pub fn with_config(config: PreviewConfig) -> Self {
        let camera = CameraFrame::initial(&config.camera);
        Self {
            config,
            current: None,
            camera,
            generation: 0,
        }
    }

    /// Replace the displayed scene with one built from `source`.
    ///
    /// The camera is re-framed whenever the new scene has objects and kept
    /// otherwise.
    pub fn load(&mut self, source: &str) -> &Preview {
        let preview = Preview::run(source, &self.config);
        if let Some(camera) = preview.camera {
            self.camera = camera;
        }
        self.generation += 1;

        info!(
            "viewport generation {}: {} objects, {} warnings",
            self.generation,
            preview.scene.len(),
            preview.warnings.len()
        );

        self.current.insert(preview)
    }

    /// Drop the scene and return to the initial camera
    pub fn clear(&mut self) {
        self.current = None;
        self.camera = CameraFrame::initial(&self.config.camera);
        self.generation += 1;
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.current.as_ref()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.current.as_ref().map(|p| &p.scene)
    }

    pub fn camera(&self) -> &CameraFrame {
        &self.camera
    }

    /// Incremented on every load or clear
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_warning_order() {
        let preview = Preview::run("sphere(r=\"big\");", &PreviewConfig::default());
        assert_eq!(preview.warnings.len(), 2);
        assert!(preview.warnings[0].is_parse_mismatch());
        assert_eq!(preview.warnings[1], PreviewWarning::EmptyScene);
        assert!(preview.used_placeholder());
    }

    #[test]
    fn test_viewport_starts_at_initial_camera() {
        let viewport = Viewport::new();
        assert!(viewport.scene().is_none());
        assert_eq!(viewport.camera().position, Point3::new(0.0, 0.0, 5.0));
        assert_eq!(viewport.generation(), 0);
    }

    #[test]
    fn test_load_replaces_scene() {
        let mut viewport = Viewport::new();
        viewport.load("cube([1,1,1]); sphere(r=1);");
        assert_eq!(viewport.scene().map(Scene::len), Some(2));

        let preview = viewport.load("cylinder(h=2, r=1);");
        assert_eq!(preview.scene.len(), 1);
        assert_eq!(viewport.scene().map(Scene::len), Some(1));
        assert_eq!(viewport.generation(), 2);
    }

    #[test]
    fn test_viewport_uses_its_config() {
        let mut config = PreviewConfig::default();
        config.camera.initial_position = [0.0, 3.0, 0.0];
        config.tessellation.cylinder_radial_segments = 8;

        let mut viewport = Viewport::with_config(config.clone());
        assert_eq!(viewport.config(), &config);
        assert_eq!(viewport.camera().position, Point3::new(0.0, 3.0, 0.0));

        let preview = viewport.load("cylinder(h=1, r=1);");
        assert_eq!(
            preview.scene.objects[0].geometry,
            crate::geometry::Geometry::cylinder(1.0, 1.0, 8)
        );
    }

    #[test]
    fn test_clear_resets_camera() {
        let mut viewport = Viewport::new();
        viewport.load("cube([4,4,4]);");
        assert_ne!(viewport.camera().position, Point3::new(0.0, 0.0, 5.0));

        viewport.clear();
        assert!(viewport.preview().is_none());
        assert_eq!(viewport.camera().position, Point3::new(0.0, 0.0, 5.0));
    }
}
