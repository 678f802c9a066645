// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! OpenSCAD tokenizer using pest

use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

#[derive(Parser)]
#[grammar = "io/scad.pest"]
struct ScadLexer;

/// Token categories produced by the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Number,
    Str,
    Punct,
    Unknown,
}

/// A lexed token borrowing its text from the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub column: usize,
}

impl<'a> Token<'a> {
    pub fn is_punct(&self, text: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == text
    }

    pub fn is_ident(&self, text: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == text
    }
}

#[derive(Debug, Error)]
#[error("failed to tokenize source: {0}")]
pub struct LexError(String);

/// Split source text into tokens, skipping whitespace and comments
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut pairs =
        ScadLexer::parse(Rule::tokens, source).map_err(|e| LexError(e.to_string()))?;

    let mut tokens = Vec::new();

    if let Some(stream) = pairs.next() {
        for pair in stream.into_inner() {
            let kind = match pair.as_rule() {
                Rule::ident => TokenKind::Ident,
                Rule::number => TokenKind::Number,
                Rule::string => TokenKind::Str,
                Rule::punct => TokenKind::Punct,
                Rule::EOI => continue,
                _ => TokenKind::Unknown,
            };
            let (line, column) = pair.line_col();
            tokens.push(Token {
                kind,
                text: pair.as_str(),
                line,
                column,
            });
        }
    }

    Ok(tokens)
}
