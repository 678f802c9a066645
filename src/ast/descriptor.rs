// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Primitive descriptor definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Edge length of the fallback box shown when nothing could be extracted
pub const PLACEHOLDER_SIZE: f64 = 2.0;

/// Closed set of constructor calls the extractor recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Cube,
    Sphere,
    Cylinder,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 3] = [Self::Cube, Self::Sphere, Self::Cylinder];

    /// Map an OpenSCAD constructor name to its kind
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "cube" => Some(Self::Cube),
            "sphere" => Some(Self::Sphere),
            "cylinder" => Some(Self::Cylinder),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Sphere => "sphere",
            Self::Cylinder => "cylinder",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A primitive recognized in source text, with dimensions in declared order.
///
/// `Box` keeps the OpenSCAD argument order `[width, depth, height]`; the
/// mapping onto scene axes happens in the geometry layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PrimitiveDescriptor {
    Box { width: f64, depth: f64, height: f64 },
    Sphere { radius: f64 },
    Cylinder { height: f64, radius: f64 },
}

impl PrimitiveDescriptor {
    pub fn cube(width: f64, depth: f64, height: f64) -> Self {
        Self::Box {
            width,
            depth,
            height,
        }
    }

    pub fn sphere(radius: f64) -> Self {
        Self::Sphere { radius }
    }

    pub fn cylinder(height: f64, radius: f64) -> Self {
        Self::Cylinder { height, radius }
    }

    /// Fixed-size box substituted when a scene would otherwise be empty
    pub fn placeholder() -> Self {
        Self::cube(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, PLACEHOLDER_SIZE)
    }

    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Box { .. } => PrimitiveKind::Cube,
            Self::Sphere { .. } => PrimitiveKind::Sphere,
            Self::Cylinder { .. } => PrimitiveKind::Cylinder,
        }
    }

    /// Named dimensions, in declared order
    pub fn dimensions(&self) -> Vec<(&'static str, f64)> {
        match *self {
            Self::Box {
                width,
                depth,
                height,
            } => vec![("width", width), ("depth", depth), ("height", height)],
            Self::Sphere { radius } => vec![("radius", radius)],
            Self::Cylinder { height, radius } => vec![("height", height), ("radius", radius)],
        }
    }
}

impl fmt::Display for PrimitiveDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Box {
                width,
                depth,
                height,
            } => write!(f, "cube([{}, {}, {}])", width, depth, height),
            Self::Sphere { radius } => write!(f, "sphere(r={})", radius),
            Self::Cylinder { height, radius } => write!(f, "cylinder(h={}, r={})", height, radius),
        }
    }
}
