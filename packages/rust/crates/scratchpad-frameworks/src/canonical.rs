//! Canonical on-disk YAML form.
//!
//! Emission rules:
//! - Output starts with the `---` document marker; 2-space indentation.
//! - Key order is kept as authored.
//! - `version` values are always double-quoted, even when numeric.
//! - Strings the core schema could read as something else (booleans, nulls,
//!   numbers) or that carry indicator characters are double-quoted.
//! - Multi-line strings use literal block style with the chomping indicator
//!   that keeps their trailing newlines (`|-`, `|`, `|+`). Text a literal
//!   block cannot carry falls back to an escaped double-quoted scalar.
//! - Empty collections are written inline as `{}` and `[]`.
//!
//! Re-parsing the output yields the input value, except that `version`
//! numbers come back as strings.

use std::fmt::Write as _;

use serde_yaml::{Mapping, Value};

use crate::record::keys;

/// Document start marker line.
pub const DOCUMENT_START: &str = "---\n";

const INDENT: usize = 2;

/// Words the YAML 1.1 and core schemas resolve to booleans or null.
const AMBIGUOUS_WORDS: [&str; 10] = [
    "yes", "no", "on", "off", "true", "false", "y", "n", "null", "~",
];

/// Serialize `value` in canonical form.
#[must_use]
pub fn to_canonical_yaml(value: &Value) -> String {
    let mut out = String::from(DOCUMENT_START);
    match value {
        Value::Mapping(map) if !map.is_empty() => write_mapping(&mut out, map, 0),
        Value::Sequence(seq) if !seq.is_empty() => write_sequence(&mut out, seq, 0),
        other => {
            out.push_str(&inline_scalar(other, false));
            out.push('\n');
        }
    }
    out
}

fn write_mapping(out: &mut String, map: &Mapping, indent: usize) {
    let pad = " ".repeat(indent);
    for (key, value) in map {
        out.push_str(&pad);
        out.push_str(&render_key(key));
        out.push(':');
        let force_quote = key.as_str() == Some(keys::VERSION);
        write_value(out, value, indent + INDENT, force_quote);
    }
}

fn write_sequence(out: &mut String, seq: &[Value], indent: usize) {
    let pad = " ".repeat(indent);
    let inner_pad = " ".repeat(indent + INDENT);
    for item in seq {
        let mut nested = String::new();
        match item {
            Value::Mapping(map) if !map.is_empty() => {
                write_mapping(&mut nested, map, indent + INDENT);
            }
            Value::Sequence(items) if !items.is_empty() => {
                write_sequence(&mut nested, items, indent + INDENT);
            }
            _ => {
                out.push_str(&pad);
                out.push('-');
                write_value(out, item, indent + INDENT, false);
                continue;
            }
        }
        // Compact form: the first nested line shares the dash line.
        out.push_str(&pad);
        out.push_str("- ");
        out.push_str(nested.strip_prefix(inner_pad.as_str()).unwrap_or(&nested));
    }
}

/// Write a value that follows `key:` or `-`. Nested blocks go at
/// `child_indent`.
fn write_value(out: &mut String, value: &Value, child_indent: usize, force_quote: bool) {
    match value {
        Value::Mapping(map) if !map.is_empty() => {
            out.push('\n');
            write_mapping(out, map, child_indent);
        }
        Value::Sequence(seq) if !seq.is_empty() => {
            out.push('\n');
            write_sequence(out, seq, child_indent);
        }
        Value::String(s) if !force_quote && literal_block_fits(s) => {
            write_literal(out, s, child_indent);
        }
        Value::Tagged(tagged) => {
            let _ = write!(out, " {}", tagged.tag);
            write_value(out, &tagged.value, child_indent, force_quote);
        }
        scalar => {
            out.push(' ');
            out.push_str(&inline_scalar(scalar, force_quote));
            out.push('\n');
        }
    }
}

fn write_literal(out: &mut String, text: &str, indent: usize) {
    let body = text.trim_end_matches('\n');
    let trailing = text.len() - body.len();
    out.push_str(match trailing {
        0 => " |-\n",
        1 => " |\n",
        _ => " |+\n",
    });

    let pad = " ".repeat(indent);
    for line in body.split('\n') {
        if !line.is_empty() {
            out.push_str(&pad);
            out.push_str(line);
        }
        out.push('\n');
    }
    for _ in 1..trailing {
        out.push('\n');
    }
}

/// A literal block can hold `text` verbatim.
fn literal_block_fits(text: &str) -> bool {
    if !text.contains('\n') || text.trim_end_matches('\n').is_empty() {
        return false;
    }
    let first_line = text.split('\n').next().unwrap_or_default();
    if first_line.is_empty() || first_line.starts_with([' ', '\t']) {
        return false;
    }
    !text.chars().any(|c| c != '\n' && c != '\t' && needs_escape(c))
}

fn inline_scalar(value: &Value, force_quote: bool) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) if force_quote => double_quote(&b.to_string()),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) if force_quote => double_quote(&n.to_string()),
        Value::Number(n) => n.to_string(),
        Value::String(s) if force_quote || needs_quotes(s) => double_quote(s),
        Value::String(s) => s.clone(),
        Value::Sequence(_) => "[]".to_string(),
        Value::Mapping(_) => "{}".to_string(),
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, inline_scalar(&tagged.value, force_quote)),
    }
}

fn render_key(key: &Value) -> String {
    match key {
        Value::String(s) if s.contains('\n') || needs_quotes(s) || s == "<<" => double_quote(s),
        Value::String(s) => s.clone(),
        Value::Null | Value::Bool(_) | Value::Number(_) => inline_scalar(key, false),
        // Complex keys do not occur in framework records; keep them readable.
        other => double_quote(serde_yaml::to_string(other).unwrap_or_default().trim_end()),
    }
}

/// Plain style would not read back as the same string.
fn needs_quotes(s: &str) -> bool {
    if s.is_empty() || s.trim() != s {
        return true;
    }
    if AMBIGUOUS_WORDS.iter().any(|word| s.eq_ignore_ascii_case(word)) || looks_numeric(s) {
        return true;
    }
    if s.starts_with(|c: char| "-?:,[]{}#&*!|>'\"%@`".contains(c)) {
        return true;
    }
    if s.contains(": ") || s.contains(" #") || s.ends_with(':') {
        return true;
    }
    s.chars().any(|c| c == '\n' || c == '\t' || needs_escape(c))
}

fn looks_numeric(s: &str) -> bool {
    let unsigned = s.trim_start_matches(['+', '-']);
    let lower = unsigned.to_ascii_lowercase();
    s.parse::<f64>().is_ok()
        || s.replace('_', "").parse::<f64>().is_ok()
        || matches!(lower.as_str(), ".inf" | ".nan")
        || ((lower.starts_with("0x") || lower.starts_with("0o") || lower.starts_with("0b"))
            && lower.len() > 2
            && lower[2..].chars().all(|c| c.is_ascii_hexdigit() || c == '_'))
}

fn needs_escape(c: char) -> bool {
    c.is_control() || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}')
}

fn double_quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            '\0' => quoted.push_str("\\0"),
            '\u{85}' => quoted.push_str("\\N"),
            '\u{2028}' => quoted.push_str("\\L"),
            '\u{2029}' => quoted.push_str("\\P"),
            c if needs_escape(c) => {
                let _ = write!(quoted, "\\u{:04X}", u32::from(c));
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
