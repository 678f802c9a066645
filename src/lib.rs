// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! SCAD Preview
//!
//! Turns OpenSCAD text (typically model-generated) into a quick preview scene.
//! Only `cube`, `sphere` and `cylinder` calls are recognized; every match becomes
//! an origin-centered mesh with a shared material, and a camera is framed to fit
//! the combined bounds. Transforms, booleans and control flow are not evaluated.

pub mod ast;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod kernel;
pub mod scene;
pub mod utils;

#[cfg(feature = "wasm")]
pub mod ffi;

pub use ast::{PrimitiveDescriptor, PrimitiveKind};
pub use config::PreviewConfig;
pub use error::{ParseMismatch, PreviewWarning};
pub use geometry::{BoundingBox, Geometry, Mesh};
pub use io::{extract, import_scad_file, strip_code_fences, Extraction};
pub use kernel::{Preview, Viewport};
pub use scene::{CameraFrame, Material, Scene, SceneBuilder};

use anyhow::Result;
use std::path::Path;

/// Build a preview of `source` with the default configuration
pub fn preview(source: &str) -> Preview {
    Preview::run(source, &PreviewConfig::default())
}

/// Build a preview of `source` with an explicit configuration
pub fn preview_with_config(source: &str, config: &PreviewConfig) -> Preview {
    Preview::run(source, config)
}

/// Build a preview of a SCAD file (`-` reads stdin)
pub fn preview_file(path: impl AsRef<Path>) -> Result<Preview> {
    let source = io::read_source(path)?;
    Ok(preview(&source))
}
