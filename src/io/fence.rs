// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Markdown code fence removal for model-generated source

use std::borrow::Cow;

const FENCE: &str = "```";

/// Remove Markdown code fences, keeping their bodies, and trim the result.
///
/// An opening fence may carry a language tag (`openscad`, `scad`, ...) and must
/// end its line; the closing fence must start one. Unpaired fences are left as-is.
pub fn strip_code_fences(text: &str) -> Cow<'_, str> {
    if !text.contains(FENCE) {
        return Cow::Borrowed(text.trim());
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find(FENCE) {
        let after_open = &rest[open + FENCE.len()..];
        let tag_len = after_open
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
            .unwrap_or(after_open.len());

        if !after_open[tag_len..].starts_with('\n') {
            // Not an opening fence; keep the backticks and move on
            out.push_str(&rest[..open + FENCE.len()]);
            rest = after_open;
            continue;
        }

        let body_start = tag_len + 1;
        let closing = format!("\n{}", FENCE);
        match after_open[body_start..].find(&closing) {
            Some(close) => {
                out.push_str(&rest[..open]);
                out.push_str(&after_open[body_start..body_start + close]);
                rest = &after_open[body_start + close + closing.len()..];
            }
            None => {
                out.push_str(&rest[..open + FENCE.len()]);
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    Cow::Owned(out.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_trimmed() {
        assert_eq!(strip_code_fences("  cube(1);\n"), "cube(1);");
    }

    #[test]
    fn test_openscad_fence() {
        let text = "```openscad\ncube([1, 2, 3]);\nsphere(r=1);\n```";
        assert_eq!(strip_code_fences(text), "cube([1, 2, 3]);\nsphere(r=1);");
    }

    #[test]
    fn test_untagged_fence_with_surrounding_prose() {
        let text = "Here you go:\n```\ncube(1);\n```\nEnjoy";
        assert_eq!(strip_code_fences(text), "Here you go:\ncube(1);\nEnjoy");
    }

    #[test]
    fn test_multiple_fences() {
        let text = "```scad\ncube(1);\n```\n```scad\nsphere(r=2);\n```";
        assert_eq!(strip_code_fences(text), "cube(1);\nsphere(r=2);");
    }

    #[test]
    fn test_unclosed_fence_is_kept() {
        let text = "```openscad\ncube(1);";
        assert_eq!(strip_code_fences(text), text);
    }

    #[test]
    fn test_inline_backticks_are_kept() {
        assert_eq!(strip_code_fences("use ```x``` here"), "use ```x``` here");
    }
}
