// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Surface materials

use serde::{Deserialize, Serialize};

/// Physically based surface description handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Packed `0xRRGGBB`
    pub color: u32,
    pub metalness: f64,
    pub roughness: f64,
}

impl Material {
    pub fn new(color: u32, metalness: f64, roughness: f64) -> Self {
        Self {
            color,
            metalness,
            roughness,
        }
    }

    /// Highlight material for the fallback box
    pub fn placeholder() -> Self {
        Self {
            color: 0xff4500,
            ..Self::default()
        }
    }

    /// Color channels scaled to `0.0..=1.0`
    pub fn rgb(&self) -> [f32; 3] {
        [
            ((self.color >> 16) & 0xff) as f32 / 255.0,
            ((self.color >> 8) & 0xff) as f32 / 255.0,
            (self.color & 0xff) as f32 / 255.0,
        ]
    }

    /// `#rrggbb` form of the color
    pub fn hex(&self) -> String {
        format!("#{:06x}", self.color & 0xff_ffff)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: 0x1e90ff,
            metalness: 0.1,
            roughness: 0.5,
        }
    }
}
