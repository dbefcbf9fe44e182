//! Script value parsing and type-argument lookup.
//!
//! Turns the raw JSON carried by script steps into mock [`Value`]s.
//!
//! # Key responsibilities
//! - Map plain JSON onto the matching value variants.
//! - Expand the typed-annotation envelope (`{"type": "...", "value": ...}`)
//!   for values plain JSON cannot express, such as identity handles.
//! - Resolve type-argument names to [`TypeArg`]s.

use crate::{Result, SleightError};
use serde_json::Value as JsonValue;
use sleight_mock::{Handle, TypeArg, Value};
use std::collections::HashMap;

/// Stateful JSON → [`Value`] converter for one script run.
///
/// Handles are interned by id so that `{"type": "handle", "value": "g1"}`
/// names the same object every time it appears in a script.
#[derive(Debug, Default)]
pub struct ValueParser {
    handles: HashMap<String, Handle>,
}

impl ValueParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `json` as a value belonging to step `step`.
    pub fn parse(&mut self, step: usize, json: &JsonValue) -> Result<Value> {
        self.convert(json)
            .map_err(|message| SleightError::InvalidValue { step, message })
    }

    /// Parse every element of `items`.
    pub fn parse_all(&mut self, step: usize, items: &[JsonValue]) -> Result<Vec<Value>> {
        items.iter().map(|item| self.parse(step, item)).collect()
    }

    fn convert(&mut self, json: &JsonValue) -> std::result::Result<Value, String> {
        match json {
            JsonValue::Null => Ok(Value::Null),
            JsonValue::Bool(b) => Ok(Value::Bool(*b)),
            JsonValue::Number(n) => number_value(n),
            JsonValue::String(s) => Ok(Value::Str(s.clone())),
            JsonValue::Array(items) => items
                .iter()
                .map(|item| self.convert(item))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Value::List),
            JsonValue::Object(_) if is_typed_annotation(json) => self.convert_annotated(json),
            JsonValue::Object(_) => Ok(Value::object(json.clone())),
        }
    }

    fn convert_annotated(&mut self, json: &JsonValue) -> std::result::Result<Value, String> {
        let type_name = json["type"].as_str().unwrap_or_default();
        let inner = &json["value"];

        match type_name {
            "handle" => {
                let id = inner.as_str().ok_or_else(|| {
                    format!(
                        "handle id must be a string, got {}",
                        json_type_name(inner)
                    )
                })?;
                let handle = self
                    .handles
                    .entry(id.to_string())
                    .or_insert_with(|| Handle::labelled(id, id.to_string()))
                    .clone();
                Ok(Value::Handle(handle))
            }
            "int" => inner
                .as_i64()
                .map(Value::Int)
                .ok_or_else(|| format!("expected an integer, got {}", inner)),
            "float" => inner
                .as_f64()
                .map(Value::Float)
                .ok_or_else(|| format!("expected a number, got {}", json_type_name(inner))),
            "string" => match inner {
                JsonValue::String(s) => Ok(Value::Str(s.clone())),
                other => Ok(Value::Str(other.to_string())),
            },
            "list" => match inner {
                JsonValue::Array(_) => self.convert(inner),
                other => Err(format!("expected an array, got {}", json_type_name(other))),
            },
            other => Err(format!("unknown annotation type `{}`", other)),
        }
    }
}

/// Resolve a type-argument name from a script.
///
/// Well-known primitive names map onto real Rust types so that scripts and
/// Rust tests agree on equality; anything else stays a bare name.
pub fn parse_type_arg(name: &str) -> TypeArg {
    match name.trim() {
        "string" | "String" => TypeArg::of::<String>(),
        "str" => TypeArg::of::<str>(),
        "bool" => TypeArg::of::<bool>(),
        "int" | "i32" => TypeArg::of::<i32>(),
        "long" | "i64" => TypeArg::of::<i64>(),
        "u32" => TypeArg::of::<u32>(),
        "u64" => TypeArg::of::<u64>(),
        "f32" => TypeArg::of::<f32>(),
        "double" | "f64" => TypeArg::of::<f64>(),
        other => TypeArg::named(other),
    }
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn number_value(n: &serde_json::Number) -> std::result::Result<Value, String> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::Int(i));
    }
    if n.is_u64() {
        return Err(format!("integer {} does not fit in i64", n));
    }
    n.as_f64()
        .map(Value::Float)
        .ok_or_else(|| format!("unrepresentable number {}", n))
}

fn is_typed_annotation(value: &JsonValue) -> bool {
    matches!(
        value,
        JsonValue::Object(obj)
            if obj.len() == 2
                && obj.get("type").is_some_and(JsonValue::is_string)
                && obj.contains_key("value")
    )
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_json_maps_onto_values() {
        let mut parser = ValueParser::new();
        assert_eq!(parser.parse(0, &json!(null)).unwrap(), Value::Null);
        assert_eq!(parser.parse(0, &json!(3)).unwrap(), Value::Int(3));
        assert_eq!(parser.parse(0, &json!(1.5)).unwrap(), Value::Float(1.5));
        assert_eq!(
            parser.parse(0, &json!(["a", true])).unwrap(),
            Value::List(vec![Value::from("a"), Value::Bool(true)])
        );
    }

    #[test]
    fn integers_beyond_i64_are_rejected() {
        let mut parser = ValueParser::new();
        let err = parser.parse(5, &json!(u64::MAX)).unwrap_err();
        assert!(err.to_string().contains("step 5"));
        assert!(err.to_string().contains("does not fit in i64"));

        assert_eq!(parser.parse(0, &json!(i64::MAX)).unwrap(), Value::Int(i64::MAX));
        assert!(parser.parse(0, &json!([1, u64::MAX])).is_err());
    }

    #[test]
    fn plain_objects_compare_structurally() {
        let mut parser = ValueParser::new();
        let a = parser.parse(0, &json!({"name": "Jane", "age": 30})).unwrap();
        let b = parser.parse(1, &json!({"age": 30, "name": "Jane"})).unwrap();
        let c = parser.parse(2, &json!({"name": "Jill"})).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn handles_are_interned_per_parser() {
        let mut parser = ValueParser::new();
        let first = parser.parse(0, &json!({"type": "handle", "value": "g1"})).unwrap();
        let again = parser.parse(3, &json!({"type": "handle", "value": "g1"})).unwrap();
        let other = parser.parse(4, &json!({"type": "handle", "value": "g2"})).unwrap();
        assert_eq!(first, again);
        assert_ne!(first, other);

        let mut fresh = ValueParser::new();
        let elsewhere = fresh.parse(0, &json!({"type": "handle", "value": "g1"})).unwrap();
        assert_ne!(first, elsewhere);
    }

    #[test]
    fn annotations_coerce_values() {
        let mut parser = ValueParser::new();
        assert_eq!(
            parser.parse(0, &json!({"type": "float", "value": 2})).unwrap(),
            Value::Float(2.0)
        );
        assert_eq!(
            parser.parse(0, &json!({"type": "string", "value": 42})).unwrap(),
            Value::from("42")
        );
    }

    #[test]
    fn bad_annotations_report_the_step() {
        let mut parser = ValueParser::new();
        let err = parser
            .parse(7, &json!({"type": "date", "value": "2020-01-01"}))
            .unwrap_err();
        assert!(err.to_string().contains("step 7"));
        assert!(err.to_string().contains("date"));

        let err = parser
            .parse(1, &json!({"type": "handle", "value": 5}))
            .unwrap_err();
        assert!(err.to_string().contains("number"));
    }

    #[test]
    fn objects_with_extra_keys_are_not_annotations() {
        let mut parser = ValueParser::new();
        let value = parser
            .parse(0, &json!({"type": "handle", "value": "g1", "extra": 1}))
            .unwrap();
        assert!(matches!(value, Value::Object(_)));
    }

    #[test]
    fn type_args_map_known_names() {
        assert!(parse_type_arg("string").is::<String>());
        assert!(parse_type_arg("int").is::<i32>());
        assert!(parse_type_arg("double").is::<f64>());
        assert_eq!(parse_type_arg("Customer"), TypeArg::named("Customer"));
    }
}
