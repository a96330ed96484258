//! Tagged JSON value model.
//!
//! The document side of the core uses an explicit enum rather than a
//! dynamically typed value so that every conversion site matches
//! exhaustively and round trips stay faithful: `Int(123)` and
//! `String("123")` are different values, as are `Int(1)` and `Float(1.0)`.

use indexmap::IndexMap;

/// One record of the JSON document: an insertion-ordered name→value map.
pub type JsonRecord = IndexMap<String, JsonValue>;

/// A JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<JsonValue>),
    Object(IndexMap<String, JsonValue>),
}

impl JsonValue {
    /// Short name of the value's kind, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "bool",
            JsonValue::Int(_) => "int",
            JsonValue::Float(_) => "float",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Render the value as a single table cell.
    ///
    /// Scalars use their canonical cell form (`True`/`False` for booleans,
    /// plain decimal for numbers, the bare text for strings); null becomes
    /// the empty cell; arrays and objects serialize to compact JSON text.
    pub fn to_cell_string(&self) -> String {
        match self {
            JsonValue::Null => String::new(),
            JsonValue::Bool(true) => "True".to_string(),
            JsonValue::Bool(false) => "False".to_string(),
            JsonValue::Int(n) => n.to_string(),
            JsonValue::Float(f) => f.to_string(),
            JsonValue::String(s) => s.clone(),
            JsonValue::Array(_) | JsonValue::Object(_) => {
                serde_json::to_string(&self.to_serde()).unwrap_or_default()
            }
        }
    }

    /// Convert to a `serde_json::Value` for serialization.
    pub fn to_serde(&self) -> serde_json::Value {
        match self {
            JsonValue::Null => serde_json::Value::Null,
            JsonValue::Bool(b) => serde_json::Value::Bool(*b),
            JsonValue::Int(n) => serde_json::Value::Number((*n).into()),
            JsonValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            JsonValue::String(s) => serde_json::Value::String(s.clone()),
            JsonValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(JsonValue::to_serde).collect())
            }
            JsonValue::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_serde()))
                    .collect(),
            ),
        }
    }

    /// Convert from a parsed `serde_json::Value`.
    ///
    /// Whole numbers that fit an `i64` become `Int`; everything else
    /// numeric becomes `Float`.
    pub fn from_serde(value: &serde_json::Value) -> JsonValue {
        match value {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(b) => JsonValue::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    JsonValue::Int(i)
                } else {
                    JsonValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => JsonValue::String(s.clone()),
            serde_json::Value::Array(items) => {
                JsonValue::Array(items.iter().map(JsonValue::from_serde).collect())
            }
            serde_json::Value::Object(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), JsonValue::from_serde(v)))
                    .collect(),
            ),
        }
    }
}
