// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Primitive extraction: token stream to descriptors

use super::lexer::{tokenize, Token, TokenKind};
use crate::ast::{PrimitiveDescriptor, PrimitiveKind};
use crate::error::ParseMismatch;
use crate::utils::math::approx_eq;
use log::{debug, warn};
use serde::Serialize;

/// Result of scanning a source text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    /// Recognized primitives in source order; never empty
    pub descriptors: Vec<PrimitiveDescriptor>,
    /// Recognized calls that were skipped
    pub mismatches: Vec<ParseMismatch>,
    /// Whether `descriptors` holds only the fallback placeholder
    pub used_placeholder: bool,
}

impl Extraction {
    pub fn skipped(&self) -> usize {
        self.mismatches.len()
    }
}

/// Extract box, sphere and cylinder calls from OpenSCAD text.
///
/// Calls with missing, non-numeric or negative parameters are recorded as
/// mismatches instead of descriptors. When nothing is recognized, a single
/// placeholder box is substituted.
pub fn extract(source: &str) -> Extraction {
    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(e) => {
            warn!("{}", e);
            Vec::new()
        }
    };
    debug!("tokenized {} bytes into {} tokens", source.len(), tokens.len());

    let mut descriptors = Vec::new();
    let mut mismatches = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        let kind = match PrimitiveKind::from_keyword(token.text) {
            Some(kind) if token.kind == TokenKind::Ident => kind,
            _ => {
                i += 1;
                continue;
            }
        };

        let is_call = tokens.get(i + 1).map_or(false, |t| t.is_punct("("));
        let is_definition =
            i > 0 && (tokens[i - 1].is_ident("module") || tokens[i - 1].is_ident("function"));
        if !is_call || is_definition {
            i += 1;
            continue;
        }

        match parse_call(kind, &tokens, i + 1) {
            Ok((descriptor, next)) => {
                debug!("{}:{} {}", token.line, token.column, descriptor);
                descriptors.push(descriptor);
                i = next;
            }
            Err(reason) => {
                let mismatch = ParseMismatch {
                    primitive: kind,
                    line: token.line,
                    column: token.column,
                    reason,
                };
                warn!("{}", mismatch);
                mismatches.push(mismatch);
                i += 2;
            }
        }
    }

    let used_placeholder = descriptors.is_empty();
    if used_placeholder {
        warn!("no primitives recognized, substituting placeholder box");
        descriptors.push(PrimitiveDescriptor::placeholder());
    }

    Extraction {
        descriptors,
        mismatches,
        used_placeholder,
    }
}

/// Parse the argument list opening at `open` and dispatch on the constructor.
/// Returns the descriptor and the index just past the closing parenthesis.
fn parse_call(
    kind: PrimitiveKind,
    tokens: &[Token<'_>],
    open: usize,
) -> Result<(PrimitiveDescriptor, usize), String> {
    let (slices, next) = split_arguments(tokens, open)?;
    let args = Args::from_slices(&slices);

    let descriptor = match kind {
        PrimitiveKind::Cube => recognize_cube(args)?,
        PrimitiveKind::Sphere => recognize_sphere(args)?,
        PrimitiveKind::Cylinder => recognize_cylinder(args)?,
    };

    Ok((descriptor, next))
}

fn split_arguments<'t, 'a>(
    tokens: &'t [Token<'a>],
    open: usize,
) -> Result<(Vec<&'t [Token<'a>]>, usize), String> {
    let mut slices = Vec::new();
    let mut depth = 0usize;
    let mut start = open + 1;

    for (i, token) in tokens.iter().enumerate().skip(open + 1) {
        if token.kind != TokenKind::Punct {
            continue;
        }
        match token.text {
            "(" | "[" | "{" => depth += 1,
            ")" | "]" | "}" if depth > 0 => depth -= 1,
            ")" => {
                slices.push(&tokens[start..i]);
                return Ok((slices, i + 1));
            }
            "]" | "}" => return Err(format!("unbalanced `{}` in argument list", token.text)),
            "," if depth == 0 => {
                slices.push(&tokens[start..i]);
                start = i + 1;
            }
            ";" if depth == 0 => return Err("argument list not closed before `;`".into()),
            _ => {}
        }
    }

    Err("unterminated argument list".into())
}

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Number(f64),
    Vector(Vec<f64>),
    Boolean(bool),
    Expr(String),
    Missing,
}

impl Value {
    fn parse(tokens: &[Token<'_>]) -> Self {
        match tokens {
            [] => Value::Missing,
            [t] if t.is_ident("true") => Value::Boolean(true),
            [t] if t.is_ident("false") => Value::Boolean(false),
            [open, inner @ .., close] if open.is_punct("[") && close.is_punct("]") => {
                Self::parse_vector(inner).unwrap_or_else(|| Value::Expr(join(tokens)))
            }
            _ => parse_scalar(tokens)
                .map(Value::Number)
                .unwrap_or_else(|| Value::Expr(join(tokens))),
        }
    }

    fn parse_vector(inner: &[Token<'_>]) -> Option<Self> {
        if inner.is_empty() {
            return Some(Value::Vector(Vec::new()));
        }
        inner
            .split(|t| t.is_punct(","))
            .map(parse_scalar)
            .collect::<Option<Vec<_>>>()
            .map(Value::Vector)
    }
}

/// A number literal with an optional leading sign
fn parse_scalar(tokens: &[Token<'_>]) -> Option<f64> {
    let (sign, literal) = match tokens {
        [t] => (1.0, t),
        [s, t] if s.is_punct("-") => (-1.0, t),
        [s, t] if s.is_punct("+") => (1.0, t),
        _ => return None,
    };
    if literal.kind != TokenKind::Number {
        return None;
    }
    literal.text.parse::<f64>().ok().map(|n| sign * n)
}

fn join(tokens: &[Token<'_>]) -> String {
    tokens
        .iter()
        .map(|t| t.text)
        .collect::<Vec<_>>()
        .join(" ")
}

struct Args<'a> {
    /// Named arguments in source order; a repeated name keeps its last value
    named: Vec<(&'a str, Value)>,
    positional: Vec<Value>,
}

impl<'a> Args<'a> {
    fn from_slices(slices: &[&[Token<'a>]]) -> Self {
        let mut named: Vec<(&'a str, Value)> = Vec::new();
        let mut positional = Vec::new();

        // `f()` yields one empty slice; a trailing comma yields an empty last one
        let slices = match slices {
            [only] if only.is_empty() => &slices[..0],
            [init @ .., last] if last.is_empty() => init,
            _ => slices,
        };

        for slice in slices {
            match &slice[..] {
                [name, eq, rest @ ..] if name.kind == TokenKind::Ident && eq.is_punct("=") => {
                    let value = Value::parse(rest);
                    match named.iter_mut().find(|(n, _)| *n == name.text) {
                        Some(slot) => slot.1 = value,
                        None => named.push((name.text, value)),
                    }
                }
                _ => positional.push(Value::parse(slice)),
            }
        }

        Self { named, positional }
    }

    /// Take a parameter by name, falling back to a positional slot
    fn take(&mut self, name: &str, position: Option<usize>) -> Option<Value> {
        if let Some(index) = self.named.iter().position(|(n, _)| *n == name) {
            return Some(self.named.remove(index).1);
        }
        position
            .and_then(|p| self.positional.get_mut(p))
            .map(|slot| std::mem::replace(slot, Value::Missing))
            .filter(|value| *value != Value::Missing)
    }

    /// Reject unknown named parameters and surplus positionals.
    /// `$`-prefixed special variables are always allowed.
    fn check_shape(&self, allowed: &[&str], max_positional: usize) -> Result<(), String> {
        if let Some(name) = self
            .named
            .iter()
            .map(|(name, _)| *name)
            .find(|name| !name.starts_with('$') && !allowed.contains(name))
        {
            return Err(format!("unexpected parameter `{}`", name));
        }
        if self.positional.len() > max_positional {
            return Err(format!(
                "expected at most {} positional arguments, found {}",
                max_positional,
                self.positional.len()
            ));
        }
        Ok(())
    }

    fn take_center(&mut self, position: usize) -> Result<(), String> {
        match self.take("center", Some(position)) {
            None | Some(Value::Boolean(_)) => Ok(()),
            Some(_) => Err("center must be true or false".into()),
        }
    }
}

fn dimension(value: Value, what: &str) -> Result<f64, String> {
    match value {
        Value::Number(n) if !n.is_finite() => Err(format!("{} is not a finite number", what)),
        Value::Number(n) if n < 0.0 => Err(format!("{} must not be negative (got {})", what, n)),
        Value::Number(n) => Ok(n),
        Value::Missing => Err(format!("missing {}", what)),
        Value::Expr(expr) => Err(format!("{} `{}` is not a number", what, expr)),
        Value::Vector(_) => Err(format!("{} must be a number, not a vector", what)),
        Value::Boolean(_) => Err(format!("{} must be a number, not a boolean", what)),
    }
}

fn required(value: Option<Value>, what: &str) -> Result<f64, String> {
    dimension(value.unwrap_or(Value::Missing), what)
}

fn recognize_cube(mut args: Args<'_>) -> Result<PrimitiveDescriptor, String> {
    args.check_shape(&["size", "center"], 2)?;
    args.take_center(1)?;

    match args.take("size", Some(0)) {
        Some(Value::Vector(v)) if v.len() == 3 => Ok(PrimitiveDescriptor::cube(
            dimension(Value::Number(v[0]), "width")?,
            dimension(Value::Number(v[1]), "depth")?,
            dimension(Value::Number(v[2]), "height")?,
        )),
        Some(Value::Vector(v)) => Err(format!(
            "size vector needs 3 components, found {}",
            v.len()
        )),
        other => {
            let size = required(other, "size")?;
            Ok(PrimitiveDescriptor::cube(size, size, size))
        }
    }
}

fn recognize_sphere(mut args: Args<'_>) -> Result<PrimitiveDescriptor, String> {
    args.check_shape(&["r", "d"], 1)?;

    let radius = match args.take("r", Some(0)) {
        Some(r) => dimension(r, "radius")?,
        None => required(args.take("d", None), "radius")? / 2.0,
    };

    Ok(PrimitiveDescriptor::sphere(radius))
}

fn recognize_cylinder(mut args: Args<'_>) -> Result<PrimitiveDescriptor, String> {
    args.check_shape(&["h", "r", "d", "r1", "r2", "center"], 4)?;
    args.take_center(3)?;

    let height = required(args.take("h", Some(0)), "height")?;

    let radius = if let Some(r) = args.take("r", None) {
        dimension(r, "radius")?
    } else if let Some(d) = args.take("d", None) {
        dimension(d, "diameter")? / 2.0
    } else {
        match (args.take("r1", Some(1)), args.take("r2", Some(2))) {
            (Some(r1), None) => dimension(r1, "radius")?,
            (Some(r1), Some(r2)) => {
                let (r1, r2) = (dimension(r1, "r1")?, dimension(r2, "r2")?);
                if !approx_eq(r1, r2, 1e-9) {
                    return Err(format!("cones are not supported (r1={}, r2={})", r1, r2));
                }
                r1
            }
            _ => return Err("missing radius".into()),
        }
    };

    Ok(PrimitiveDescriptor::cylinder(height, radius))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(source: &str) -> PrimitiveDescriptor {
        let extraction = extract(source);
        assert!(!extraction.used_placeholder, "nothing extracted from {}", source);
        assert_eq!(extraction.descriptors.len(), 1);
        extraction.descriptors[0]
    }

    fn rejected(source: &str) -> ParseMismatch {
        let extraction = extract(source);
        assert!(extraction.used_placeholder, "unexpected descriptor from {}", source);
        assert_eq!(extraction.mismatches.len(), 1);
        extraction.mismatches[0].clone()
    }

    #[test]
    fn test_cube_vector() {
        assert_eq!(
            only("cube([10, 20, 30]);"),
            PrimitiveDescriptor::cube(10.0, 20.0, 30.0)
        );
    }

    #[test]
    fn test_cube_scalar_and_named_size() {
        assert_eq!(only("cube(4);"), PrimitiveDescriptor::cube(4.0, 4.0, 4.0));
        assert_eq!(
            only("cube(size=[1, 2, 3], center=true);"),
            PrimitiveDescriptor::cube(1.0, 2.0, 3.0)
        );
        assert_eq!(
            only("cube([1, 2, 3], true);"),
            PrimitiveDescriptor::cube(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_sphere_forms() {
        assert_eq!(only("sphere(r=5);"), PrimitiveDescriptor::sphere(5.0));
        assert_eq!(only("sphere(2.5);"), PrimitiveDescriptor::sphere(2.5));
        assert_eq!(only("sphere(d=8, $fn=64);"), PrimitiveDescriptor::sphere(4.0));
    }

    #[test]
    fn test_cylinder_forms() {
        let expected = PrimitiveDescriptor::cylinder(10.0, 3.0);
        assert_eq!(only("cylinder(h=10, r=3);"), expected);
        assert_eq!(only("cylinder(r=3, h=10);"), expected);
        assert_eq!(only("cylinder(10, 3);"), expected);
        assert_eq!(only("cylinder(h=10, d=6, center=true);"), expected);
        assert_eq!(only("cylinder(h=10, r1=3, r2=3);"), expected);
    }

    #[test]
    fn test_malformed_calls_are_reported() {
        assert!(rejected("cube([10, , 30]);").reason.contains("not a number"));
        assert_eq!(rejected("sphere();").reason, "missing radius");
        assert_eq!(rejected("cylinder(h=10);").reason, "missing radius");
        assert!(rejected("cube([1, 2]);").reason.contains("3 components"));
        assert!(rejected("sphere(r=width);").reason.contains("`width`"));
        assert!(rejected("cylinder(h=5, r1=2, r2=1);").reason.contains("cones"));
        assert!(rejected("cube([1, -2, 3]);").reason.contains("negative"));
        assert!(rejected("sphere(radius=3);").reason.contains("unexpected parameter"));
        assert_eq!(rejected("cube([1, 2, 3]").reason, "unterminated argument list");
    }

    #[test]
    fn test_unknown_parameter_reported_in_source_order() {
        let source = "sphere(alpha=1, beta=2, gamma=3, delta=4, eps=5);";
        let first = extract(source);
        assert_eq!(first.mismatches[0].reason, "unexpected parameter `alpha`");
        for _ in 0..100 {
            assert_eq!(extract(source), first);
        }
    }

    #[test]
    fn test_repeated_parameter_keeps_last_value() {
        assert_eq!(only("sphere(r=1, r=2);"), PrimitiveDescriptor::sphere(2.0));
    }

    #[test]
    fn test_overflowing_literals_are_rejected() {
        assert_eq!(
            rejected("cube([1e999, 1, 1]);").reason,
            "width is not a finite number"
        );
        assert_eq!(
            rejected("sphere(d=1e999);").reason,
            "radius is not a finite number"
        );
        assert_eq!(
            rejected("cylinder(h=-1e999, r=1);").reason,
            "height is not a finite number"
        );
    }

    #[test]
    fn test_mismatch_position() {
        let mismatch = rejected("union() {\n  sphere(r=);\n}");
        assert_eq!(mismatch.primitive, PrimitiveKind::Sphere);
        assert_eq!((mismatch.line, mismatch.column), (2, 3));
    }

    #[test]
    fn test_source_order_is_kept() {
        let extraction = extract("sphere(r=1);\ncube([1,2,3]);\ncylinder(h=2, r=1);\nsphere(r=2);");
        assert_eq!(
            extraction.descriptors,
            vec![
                PrimitiveDescriptor::sphere(1.0),
                PrimitiveDescriptor::cube(1.0, 2.0, 3.0),
                PrimitiveDescriptor::cylinder(2.0, 1.0),
                PrimitiveDescriptor::sphere(2.0),
            ]
        );
    }

    #[test]
    fn test_transforms_are_looked_through() {
        let source = "difference() {\n  translate([5, 0, 0]) rotate([0, 90, 0]) cube([4, 4, 4]);\n  sphere(r=3);\n}";
        let extraction = extract(source);
        assert_eq!(extraction.descriptors.len(), 2);
        assert!(extraction.mismatches.is_empty());
    }

    #[test]
    fn test_definitions_and_identifiers_are_ignored() {
        let extraction = extract("module cube(size) { }\ncube = 3;\nmy_cube(1);");
        assert!(extraction.used_placeholder);
        assert!(extraction.mismatches.is_empty());
    }

    #[test]
    fn test_empty_source_uses_placeholder() {
        let extraction = extract("");
        assert!(extraction.used_placeholder);
        assert_eq!(extraction.descriptors, vec![PrimitiveDescriptor::placeholder()]);
    }

    #[test]
    fn test_value_parsing() {
        let tokens = tokenize("[1, -2, +3.5]").unwrap();
        assert_eq!(Value::parse(&tokens), Value::Vector(vec![1.0, -2.0, 3.5]));

        let tokens = tokenize("a + 1").unwrap();
        assert_eq!(Value::parse(&tokens), Value::Expr("a + 1".into()));
    }
}
