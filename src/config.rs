// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Preview configuration system

use crate::scene::Material;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up by [`PreviewConfig::load`]
pub const CONFIG_FILE: &str = "scad-preview.toml";

/// Upper bound for any tessellation segment count
pub const MAX_SEGMENTS: u32 = 1024;

/// Preview configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Dimensions at or below zero are clamped to this value
    pub min_dimension: f64,
    pub camera: CameraConfig,
    /// Material shared by every extracted object
    pub material: Material,
    /// Material for the fallback box shown when nothing was extracted
    pub placeholder_material: Material,
    pub tessellation: TessellationConfig,
}

/// Camera framing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f64,
    /// Multiplier applied to the fit distance along each axis
    pub distance_factor: f64,
    pub near: f64,
    pub far: f64,
    /// Camera position before anything has been framed
    pub initial_position: [f64; 3],
}

/// Segment counts for curved primitives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TessellationConfig {
    pub sphere_width_segments: u32,
    pub sphere_height_segments: u32,
    pub cylinder_radial_segments: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            min_dimension: 1e-4,
            camera: CameraConfig::default(),
            material: Material::default(),
            placeholder_material: Material::placeholder(),
            tessellation: TessellationConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            distance_factor: 1.5,
            near: 0.1,
            far: 1000.0,
            initial_position: [0.0, 0.0, 5.0],
        }
    }
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            sphere_width_segments: 32,
            sphere_height_segments: 16,
            cylinder_radial_segments: 32,
        }
    }
}

impl PreviewConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: PreviewConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(fov) = std::env::var("SCAD_PREVIEW_FOV") {
            self.camera.fov_degrees = fov
                .parse()
                .with_context(|| format!("Invalid SCAD_PREVIEW_FOV: {}", fov))?;
        }

        if let Ok(factor) = std::env::var("SCAD_PREVIEW_DISTANCE_FACTOR") {
            self.camera.distance_factor = factor
                .parse()
                .with_context(|| format!("Invalid SCAD_PREVIEW_DISTANCE_FACTOR: {}", factor))?;
        }

        if let Ok(min) = std::env::var("SCAD_PREVIEW_MIN_DIMENSION") {
            self.min_dimension = min
                .parse()
                .with_context(|| format!("Invalid SCAD_PREVIEW_MIN_DIMENSION: {}", min))?;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Reject values that would make framing or tessellation meaningless
    pub fn validate(&self) -> Result<()> {
        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            bail!("fov_degrees must be in (0, 180), got {}", camera.fov_degrees);
        }
        if !(camera.distance_factor > 0.0) {
            bail!("distance_factor must be positive, got {}", camera.distance_factor);
        }
        if !(camera.near > 0.0 && camera.near < camera.far) {
            bail!("near ({}) must be positive and below far ({})", camera.near, camera.far);
        }
        if !(self.min_dimension > 0.0) {
            bail!("min_dimension must be positive, got {}", self.min_dimension);
        }

        let t = &self.tessellation;
        if t.sphere_width_segments < 3 || t.sphere_height_segments < 2 || t.cylinder_radial_segments < 3 {
            bail!("tessellation segment counts are too small: {:?}", t);
        }
        if [t.sphere_width_segments, t.sphere_height_segments, t.cylinder_radial_segments]
            .iter()
            .any(|&n| n > MAX_SEGMENTS)
        {
            bail!("tessellation segment counts may not exceed {}: {:?}", MAX_SEGMENTS, t);
        }

        Ok(())
    }
}
