// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - source import, fence removal, tokenizing and extraction

mod extractor;
mod fence;
mod importer;
mod lexer;

pub use extractor::{extract, Extraction};
pub use fence::strip_code_fences;
pub use importer::{import_scad_file, read_source};
pub use lexer::{tokenize, LexError, Token, TokenKind};
