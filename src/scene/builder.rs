// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene builder - descriptors to mesh objects and a camera frame

use super::{CameraFrame, MaterialId, MeshObject, Scene};
use crate::ast::PrimitiveDescriptor;
use crate::config::PreviewConfig;
use crate::error::PreviewWarning;
use crate::geometry::Geometry;
use crate::io::Extraction;
use log::{debug, warn};

/// Output of a single build
#[derive(Debug, Clone, PartialEq)]
pub struct SceneBuild {
    pub scene: Scene,
    /// `None` when the scene is empty
    pub camera: Option<CameraFrame>,
    pub warnings: Vec<PreviewWarning>,
}

/// Converts descriptors into a fresh scene on every call
pub struct SceneBuilder<'c> {
    config: &'c PreviewConfig,
}

impl<'c> SceneBuilder<'c> {
    pub fn new(config: &'c PreviewConfig) -> Self {
        Self { config }
    }

    /// Build one object per descriptor, all sharing the default material
    pub fn build(&self, descriptors: &[PrimitiveDescriptor]) -> SceneBuild {
        self.build_with(descriptors, false)
    }

    /// Build from an extraction, giving the fallback box its highlight material
    pub fn build_extraction(&self, extraction: &Extraction) -> SceneBuild {
        self.build_with(&extraction.descriptors, extraction.used_placeholder)
    }

    fn build_with(&self, descriptors: &[PrimitiveDescriptor], placeholder: bool) -> SceneBuild {
        let mut scene = Scene::new(self.config.material);
        let mut warnings = Vec::new();

        let material: MaterialId = if placeholder {
            scene.add_material(self.config.placeholder_material)
        } else {
            0
        };

        for (index, descriptor) in descriptors.iter().enumerate() {
            let geometry = self.geometry_for(index, descriptor, &mut warnings);
            scene.add_object(MeshObject {
                index,
                descriptor: *descriptor,
                geometry,
                mesh: geometry.to_mesh(),
                material,
            });
        }

        let camera = scene
            .bounds()
            .and_then(|bounds| CameraFrame::frame(&bounds, &self.config.camera));

        debug!(
            "built {} objects ({} triangles), camera framed: {}",
            scene.len(),
            scene.triangle_count(),
            camera.is_some()
        );

        SceneBuild {
            scene,
            camera,
            warnings,
        }
    }

    /// Map declared dimensions onto scene axes.
    ///
    /// `cube([width, depth, height])` becomes a box with width on X, height on
    /// Y and depth on Z.
    fn geometry_for(
        &self,
        index: usize,
        descriptor: &PrimitiveDescriptor,
        warnings: &mut Vec<PreviewWarning>,
    ) -> Geometry {
        let mut clamp = |field: &str, value: f64| self.clamp_dimension(index, field, value, warnings);
        let tessellation = &self.config.tessellation;

        match *descriptor {
            PrimitiveDescriptor::Box {
                width,
                depth,
                height,
            } => Geometry::cuboid(
                clamp("width", width),
                clamp("height", height),
                clamp("depth", depth),
            ),
            PrimitiveDescriptor::Sphere { radius } => Geometry::sphere(
                clamp("radius", radius),
                tessellation.sphere_width_segments,
                tessellation.sphere_height_segments,
            ),
            PrimitiveDescriptor::Cylinder { height, radius } => Geometry::cylinder(
                clamp("radius", radius),
                clamp("height", height),
                tessellation.cylinder_radial_segments,
            ),
        }
    }

    fn clamp_dimension(
        &self,
        index: usize,
        field: &str,
        value: f64,
        warnings: &mut Vec<PreviewWarning>,
    ) -> f64 {
        if value > 0.0 && value.is_finite() {
            return value;
        }

        let clamped = self.config.min_dimension;
        let warning = PreviewWarning::DegenerateDimension {
            object: index,
            field: field.to_string(),
            value,
            clamped,
        };
        warn!("{}", warning);
        warnings.push(warning);
        clamped
    }
}
