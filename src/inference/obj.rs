use serde_json::{Map, Value};

use super::arr::{self, Peeled};

/// Walker settings that decide which fields of an object survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShapeRules {
    /// an empty array ends the object (legacy mode)
    pub empty_array_aborts: bool,
    /// arrays nested deeper than this are skipped
    pub max_array_depth: Option<usize>,
}

/// Structural signature of an object, independent of key order and values.
///
/// Two objects get the same signature when they would produce the same
/// generated type: same kept keys, same inferred kinds, recursively. Fields
/// the walker drops (nulls, empty or untyped arrays, arrays deeper than the
/// target allows) do not take part.
pub fn shape_signature(map: &Map<String, Value>, rules: &ShapeRules) -> String {
    let mut out = String::new();
    write_object(map, rules, &mut out);
    out
}

fn write_object(map: &Map<String, Value>, rules: &ShapeRules, out: &mut String) {
    let mut kept: Vec<(&String, String)> = Vec::with_capacity(map.len());
    for (key, value) in map {
        if rules.empty_array_aborts && matches!(value, Value::Array(items) if items.is_empty()) {
            break;
        }
        if let Some(kind) = value_kind(value, rules) {
            kept.push((key, kind));
        }
    }
    kept.sort_by(|a, b| a.0.cmp(b.0));

    out.push('{');
    for (i, (key, kind)) in kept.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&serde_json::to_string(key).unwrap_or_default());
        out.push(':');
        out.push_str(&kind);
    }
    out.push('}');
}

fn value_kind(value: &Value, rules: &ShapeRules) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Array(items) => match arr::peel(items) {
            Peeled::Empty | Peeled::EmptyInner { .. } => None,
            Peeled::Element { depth, .. } if rules.max_array_depth.is_some_and(|max| depth > max) => None,
            Peeled::Element { first, depth } => {
                let element = match first {
                    Value::Null | Value::Array(_) => return None,
                    other => value_kind(other, rules)?,
                };
                Some(format!("{}{element}{}", "[".repeat(depth), "]".repeat(depth)))
            }
        },
        Value::Bool(_) => Some("b".to_string()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some("i".to_string()),
        Value::Number(_) => Some("d".to_string()),
        Value::String(_) => Some("s".to_string()),
        Value::Object(map) => {
            let mut nested = String::new();
            write_object(map, rules, &mut nested);
            Some(nested)
        }
    }
}
