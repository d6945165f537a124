//! Closed value type for weakly-typed specification fields
//!
//! Models, profile entries and tool-resource fields arrive as arbitrary JSON.
//! They are lowered once into [`SpecValue`] so the renderers only ever see
//! text, integers, booleans and string-keyed mappings.

use indexmap::IndexMap;
use serde_json::Value;

/// A specification value the compiler knows how to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecValue {
    /// String value (floats are carried here in their JSON text form)
    Text(String),
    /// Integer value
    Integer(i64),
    /// Boolean value
    Boolean(bool),
    /// Nested mapping, insertion ordered
    Mapping(IndexMap<String, SpecValue>),
}

impl SpecValue {
    /// Lower a JSON value
    ///
    /// Returns `None` for `null` and arrays, which have no rendering.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => Some(
                n.as_i64()
                    .map_or_else(|| Self::Text(n.to_string()), Self::Integer),
            ),
            Value::Bool(b) => Some(Self::Boolean(*b)),
            Value::Object(map) => Some(Self::Mapping(
                map.iter()
                    .filter_map(|(k, v)| Self::from_json(v).map(|v| (k.clone(), v)))
                    .collect(),
            )),
            Value::Null | Value::Array(_) => {
                tracing::debug!("dropping {} value with no rendering", json_kind(value));
                None
            }
        }
    }

    /// Borrow as text if this is a `Text` value
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Scalar text form; `None` for mappings
    #[must_use]
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Boolean(b) => Some(b.to_string()),
            Self::Mapping(_) => None,
        }
    }

    /// Check if this is a mapping
    #[inline]
    #[must_use]
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }
}

impl From<&str> for SpecValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for SpecValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for SpecValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

/// Human-readable JSON kind name
#[must_use]
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Whether a JSON value counts as present
///
/// `null`, `false`, zero, empty strings and empty collections are blank.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
