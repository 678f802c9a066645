// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Recoverable diagnostics raised while building a preview

use crate::ast::PrimitiveKind;
use serde::Serialize;
use thiserror::Error;

/// A recognized constructor call whose parameters could not be used
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("skipped malformed {primitive} call at {line}:{column}: {reason}")]
pub struct ParseMismatch {
    pub primitive: PrimitiveKind,
    pub line: usize,
    pub column: usize,
    pub reason: String,
}

/// Warnings surfaced alongside a preview; none of them abort the pipeline
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreviewWarning {
    #[error(transparent)]
    ParseMismatch(#[from] ParseMismatch),

    #[error("no primitives recognized; showing a placeholder box instead")]
    EmptyScene,

    #[error("object {object}: {field} of {value} is not positive, clamped to {clamped}")]
    DegenerateDimension {
        object: usize,
        field: String,
        value: f64,
        clamped: f64,
    },
}

impl PreviewWarning {
    pub fn is_parse_mismatch(&self) -> bool {
        matches!(self, Self::ParseMismatch(_))
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateDimension { .. })
    }
}
