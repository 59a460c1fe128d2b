//! Deterministic JSON rendering policies.
//!
//! Independent encoders disagree only about whitespace and key order,
//! so every policy here shares one escaping routine and one numeric
//! format (both matching `serde_json`) and differs in nothing else.
//! The enumeration order of [`SerializationVariant::PRIORITY`] is part
//! of the contract: the resolver tries policies in exactly this order
//! and never reorders them at runtime.

use std::fmt;

use serde_json::{Map, Value};

/// One deterministic textual rendering policy for a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializationVariant {
    /// Verbatim caller-supplied literal, bypassing every encoder.
    RawOverride,
    /// Keys ascending lexicographically, no whitespace.
    SortedCompact,
    /// Caller's original field order, no whitespace.
    InsertionOrderCompact,
    /// `serde_json::to_string` as-is. Kept separate from
    /// [`InsertionOrderCompact`] because an independent encoder may
    /// format numbers or escapes subtly differently.
    DefaultEncoder,
    /// Sorted keys, one space after every `:` and every `,`.
    SortedSpaced,
    /// Pretty-printed with 2-space indentation, sorted keys.
    SortedPretty,
    /// Sorted compact plus one trailing space after the closing brace.
    SortedTrailingSpace,
    /// Sorted compact, space after `:` only.
    SpaceAfterColon,
    /// Sorted compact, space after `,` only.
    SpaceAfterComma,
}

impl SerializationVariant {
    /// All variants in priority order. First prefix match wins; ties
    /// are broken by position in this array, not by specificity.
    pub const PRIORITY: [SerializationVariant; 9] = [
        SerializationVariant::RawOverride,
        SerializationVariant::SortedCompact,
        SerializationVariant::InsertionOrderCompact,
        SerializationVariant::DefaultEncoder,
        SerializationVariant::SortedSpaced,
        SerializationVariant::SortedPretty,
        SerializationVariant::SortedTrailingSpace,
        SerializationVariant::SpaceAfterColon,
        SerializationVariant::SpaceAfterComma,
    ];

    /// Stable name used in attempt traces and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            SerializationVariant::RawOverride => "raw-override",
            SerializationVariant::SortedCompact => "sorted-compact",
            SerializationVariant::InsertionOrderCompact => "insertion-order-compact",
            SerializationVariant::DefaultEncoder => "default-encoder",
            SerializationVariant::SortedSpaced => "sorted-spaced",
            SerializationVariant::SortedPretty => "sorted-pretty",
            SerializationVariant::SortedTrailingSpace => "sorted-trailing-space",
            SerializationVariant::SpaceAfterColon => "space-after-colon",
            SerializationVariant::SpaceAfterComma => "space-after-comma",
        }
    }

    /// Render `value` under this policy.
    ///
    /// Returns `None` when the policy cannot produce text: a raw
    /// override that was never supplied, or an encoder failure. A
    /// `None` means "skip this variant", never an error.
    pub fn render(&self, value: &Value, raw_override: Option<&str>) -> Option<String> {
        match self {
            SerializationVariant::RawOverride => raw_override.map(str::to_string),
            SerializationVariant::SortedCompact => Some(canonical(value, true, "", "")),
            SerializationVariant::InsertionOrderCompact => Some(canonical(value, false, "", "")),
            SerializationVariant::DefaultEncoder => serde_json::to_string(value).ok(),
            SerializationVariant::SortedSpaced => Some(canonical(value, true, " ", " ")),
            SerializationVariant::SortedPretty => {
                serde_json::to_string_pretty(&sort_keys_deep(value)).ok()
            }
            SerializationVariant::SortedTrailingSpace => {
                let mut out = canonical(value, true, "", "");
                out.push(' ');
                Some(out)
            }
            SerializationVariant::SpaceAfterColon => Some(canonical(value, true, " ", "")),
            SerializationVariant::SpaceAfterComma => Some(canonical(value, true, "", " ")),
        }
    }
}

impl fmt::Display for SerializationVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render a value with configurable key ordering and whitespace.
///
/// `colon` and `comma` are the suffixes emitted after `:` and `,`.
fn canonical(value: &Value, sort_keys: bool, colon: &str, comma: &str) -> String {
    let mut out = String::new();
    write_canonical(value, sort_keys, colon, comma, &mut out);
    out
}

fn write_canonical(value: &Value, sort_keys: bool, colon: &str, comma: &str, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_json_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                    out.push_str(comma);
                }
                write_canonical(item, sort_keys, colon, comma, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            if sort_keys {
                keys.sort();
            }
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                    out.push_str(comma);
                }
                write_json_string(key, out);
                out.push(':');
                out.push_str(colon);
                write_canonical(&map[key.as_str()], sort_keys, colon, comma, out);
            }
            out.push('}');
        }
    }
}

/// Write a string literal with `serde_json`-compatible escaping.
///
/// Escapes `"`, `\` and control characters below U+0020; everything
/// else, including non-ASCII, passes through unescaped.
fn write_json_string(s: &str, out: &mut String) {
    use std::fmt::Write;

    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{09}' => out.push_str("\\t"),
            '\u{0a}' => out.push_str("\\n"),
            '\u{0c}' => out.push_str("\\f"),
            '\u{0d}' => out.push_str("\\r"),
            c if c < '\u{20}' => {
                // Infallible for String targets.
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Deep-copy a value with every object's keys sorted ascending.
fn sort_keys_deep(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                sorted.insert(key.clone(), sort_keys_deep(&map[key.as_str()]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys_deep).collect()),
        other => other.clone(),
    }
}
