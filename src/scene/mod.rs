// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene module - mesh objects, shared materials and camera framing

mod builder;
mod camera;
mod material;

pub use builder::{SceneBuild, SceneBuilder};
pub use camera::CameraFrame;
pub use material::Material;

use crate::ast::PrimitiveDescriptor;
use crate::geometry::{BoundingBox, Geometry, Mesh};
use serde::Serialize;

/// Index into [`Scene::materials`]
pub type MaterialId = usize;

/// One renderable object created from one descriptor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshObject {
    /// Position of the source descriptor
    pub index: usize,
    pub descriptor: PrimitiveDescriptor,
    pub geometry: Geometry,
    #[serde(skip)]
    pub mesh: Mesh,
    pub material: MaterialId,
}

impl MeshObject {
    pub fn bounding_box(&self) -> BoundingBox {
        self.mesh.bounding_box()
    }
}

/// Objects plus the materials they reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub materials: Vec<Material>,
    pub objects: Vec<MeshObject>,
}

impl Scene {
    /// Empty scene with `default_material` at id 0
    pub fn new(default_material: Material) -> Self {
        Self {
            materials: vec![default_material],
            objects: Vec::new(),
        }
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        self.materials.len() - 1
    }

    pub fn add_object(&mut self, object: MeshObject) {
        self.objects.push(object);
    }

    pub fn material(&self, object: &MeshObject) -> &Material {
        &self.materials[object.material]
    }

    /// Union of every object's bounds; `None` for an empty scene
    pub fn bounds(&self) -> Option<BoundingBox> {
        let bounds = self
            .objects
            .iter()
            .fold(BoundingBox::empty(), |acc, object| acc.union(&object.bounding_box()));
        (!bounds.is_empty()).then_some(bounds)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.objects.iter().map(|o| o.mesh.vertex_count()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(|o| o.mesh.triangle_count()).sum()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Material::default())
    }
}
