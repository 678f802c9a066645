// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! SCAD source importer

use super::Extraction;
use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Read source text from a file, or from stdin when `path` is `-`
pub fn read_source(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    if path == Path::new("-") {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read SCAD source from stdin")?;
        return Ok(source);
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read SCAD file: {}", path.display()))
}

/// Import a .scad file and extract its primitives
pub fn import_scad_file(path: impl AsRef<Path>) -> Result<Extraction> {
    let source = read_source(path)?;
    Ok(super::extract(&super::strip_code_fences(&source)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_import_scad_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "```openscad\ncube([10, 10, 10]);\n```")?;

        let extraction = import_scad_file(file.path())?;
        assert_eq!(extraction.descriptors.len(), 1);
        assert!(!extraction.used_placeholder);

        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = import_scad_file("/definitely/not/here.scad").unwrap_err();
        assert!(err.to_string().contains("Failed to read SCAD file"));
    }
}
