// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Descriptor module
//!
//! Defines the flat primitive descriptors produced by the extractor

mod descriptor;

pub use descriptor::{PrimitiveDescriptor, PrimitiveKind, PLACEHOLDER_SIZE};
