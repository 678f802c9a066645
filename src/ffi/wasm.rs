// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! WASM bindings using wasm-bindgen

use crate::{io, preview};
use wasm_bindgen::prelude::*;

/// Build a preview and return it as JSON
#[wasm_bindgen]
pub fn preview_scad(source: &str) -> Result<String, JsValue> {
    serde_json::to_string(&preview(source))
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {}", e)))
}

/// Extract primitives and return descriptors plus mismatches as JSON
#[wasm_bindgen]
pub fn extract_scad(source: &str) -> Result<String, JsValue> {
    let extraction = io::extract(&io::strip_code_fences(source));
    serde_json::to_string(&extraction)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {}", e)))
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
