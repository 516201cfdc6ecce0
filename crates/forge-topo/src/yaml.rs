//! Minimal YAML emission for topology documents.
//!
//! The persisted topology format is narrow and fully under our control, so
//! this is a small dedicated renderer rather than a general YAML library:
//! block mappings with two-space nesting, `- ` block sequences (inline flow
//! style when every element is a scalar), double-quoted JSON-escaped
//! strings, and bare numbers/booleans. Output always ends with exactly one
//! trailing newline.
//!
//! The parse direction is a different beast — arbitrary user YAML — and
//! lives in [`parser`](crate::parser) on top of a real YAML reader.

// Allow format string pushing for readability in the renderer
#![allow(clippy::format_push_string)]

use std::fmt::Write as _;

/// A YAML document tree.
///
/// Mapping keys keep their insertion order; the renderer never sorts.
#[derive(Debug, Clone, PartialEq)]
pub enum YamlValue {
    /// The null scalar.
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// An integer scalar.
    Int(i64),
    /// A floating-point scalar.
    Float(f64),
    /// A string scalar, always emitted double-quoted.
    String(String),
    /// A sequence of values.
    Sequence(Vec<YamlValue>),
    /// An ordered mapping.
    Mapping(Vec<(String, YamlValue)>),
}

impl YamlValue {
    /// Convenience constructor for string scalars.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::String(_)
        )
    }
}

/// Renders a value as indented YAML text ending in one newline.
#[must_use]
pub fn render(value: &YamlValue) -> String {
    let mut out = String::new();
    if let Some(text) = inline_value(value) {
        out.push_str(&text);
        out.push('\n');
    } else {
        match value {
            YamlValue::Mapping(entries) => render_mapping(&mut out, entries, 0),
            YamlValue::Sequence(items) => render_sequence(&mut out, items, 0),
            _ => {}
        }
    }
    out
}

/// The single-line form of a value, if it has one.
///
/// Scalars always do; `{}` and `[]` cover empty collections; a sequence
/// whose elements are all scalars renders in flow style. Non-empty mappings
/// and mixed sequences have no inline form.
fn inline_value(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::Null => Some("null".to_owned()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Int(n) => Some(n.to_string()),
        YamlValue::Float(n) => Some(format!("{n}")),
        YamlValue::String(s) => Some(escape_string(s)),
        YamlValue::Mapping(entries) if entries.is_empty() => Some("{}".to_owned()),
        YamlValue::Sequence(items) if items.iter().all(YamlValue::is_scalar) => {
            let mut flow = String::from("[");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    flow.push_str(", ");
                }
                // every item is a scalar, so it always has an inline form
                if let Some(text) = inline_value(item) {
                    flow.push_str(&text);
                }
            }
            flow.push(']');
            Some(flow)
        }
        _ => None,
    }
}

fn render_mapping(out: &mut String, entries: &[(String, YamlValue)], indent: usize) {
    let pad = "  ".repeat(indent);
    for (key, value) in entries {
        if let Some(text) = inline_value(value) {
            let _ = writeln!(out, "{pad}{key}: {text}");
        } else {
            let _ = writeln!(out, "{pad}{key}:");
            match value {
                YamlValue::Mapping(children) => render_mapping(out, children, indent + 1),
                YamlValue::Sequence(items) => render_sequence(out, items, indent + 1),
                _ => {}
            }
        }
    }
}

fn render_sequence(out: &mut String, items: &[YamlValue], indent: usize) {
    let pad = "  ".repeat(indent);
    for item in items {
        if let Some(text) = inline_value(item) {
            let _ = writeln!(out, "{pad}- {text}");
            continue;
        }
        // Render the item one level deeper, then fold its first line onto
        // the dash; continuation lines already align under it.
        let mut block = String::new();
        match item {
            YamlValue::Mapping(children) => render_mapping(&mut block, children, indent + 1),
            YamlValue::Sequence(children) => render_sequence(&mut block, children, indent + 1),
            _ => {}
        }
        let child_pad = "  ".repeat(indent + 1);
        out.push_str(&pad);
        out.push_str("- ");
        match block.strip_prefix(child_pad.as_str()) {
            Some(rest) => out.push_str(rest),
            None => out.push_str(&block),
        }
    }
}

/// Double-quotes a string with JSON escaping.
fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
