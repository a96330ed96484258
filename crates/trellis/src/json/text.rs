//! JSON text boundary: document parsing and serialization.

use crate::error::{Result, TrellisError};
use crate::json::value::{JsonRecord, JsonValue};

/// Parse JSON text into the document model.
///
/// The text must be a top-level array of objects. Malformed JSON is a
/// `Syntax` error carrying the parser's line number; well-formed JSON of
/// the wrong shape is a `SchemaMismatch`.
pub fn parse_document(text: &str) -> Result<Vec<JsonRecord>> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(|e| {
        let line = if e.line() > 0 { Some(e.line()) } else { None };
        TrellisError::Syntax {
            line,
            message: e.to_string(),
        }
    })?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(TrellisError::SchemaMismatch(format!(
                "expected a top-level array of objects, found {}",
                JsonValue::from_serde(&other).type_name()
            )));
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            serde_json::Value::Object(map) => Ok(map
                .iter()
                .map(|(k, v)| (k.clone(), JsonValue::from_serde(v)))
                .collect()),
            other => Err(TrellisError::SchemaMismatch(format!(
                "record {} is not an object, found {}",
                index,
                JsonValue::from_serde(other).type_name()
            ))),
        })
        .collect()
}

/// Serialize a document back to JSON text.
pub fn document_to_text(records: &[JsonRecord], pretty: bool) -> String {
    let array = serde_json::Value::Array(records.iter().map(record_to_serde).collect());
    let rendered = if pretty {
        serde_json::to_string_pretty(&array)
    } else {
        serde_json::to_string(&array)
    };
    rendered.unwrap_or_default()
}

pub(crate) fn record_to_serde(record: &JsonRecord) -> serde_json::Value {
    serde_json::Value::Object(
        record
            .iter()
            .map(|(k, v)| (k.clone(), v.to_serde()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array_of_objects() {
        let records = parse_document(r#"[{"Name":"Alice","Age":30},{"Name":"Bob","Age":25}]"#)
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Name"], JsonValue::String("Alice".into()));
        assert_eq!(records[0]["Age"], JsonValue::Int(30));
        let keys: Vec<&str> = records[0].keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["Name", "Age"]);
    }

    #[test]
    fn test_parse_preserves_int_float_distinction() {
        let records = parse_document(r#"[{"a":1,"b":1.0}]"#).unwrap();
        assert_eq!(records[0]["a"], JsonValue::Int(1));
        assert_eq!(records[0]["b"], JsonValue::Float(1.0));
    }

    #[test]
    fn test_syntax_error_carries_line() {
        let err = parse_document("[\n  {\"a\": }\n]").unwrap_err();
        match err {
            TrellisError::Syntax { line, .. } => assert_eq!(line, Some(2)),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_top_level_object_rejected() {
        let err = parse_document(r#"{"a":1}"#).unwrap_err();
        assert!(matches!(err, TrellisError::SchemaMismatch(_)));
    }

    #[test]
    fn test_non_object_record_rejected() {
        let err = parse_document("[1,2,3]").unwrap_err();
        match err {
            TrellisError::SchemaMismatch(message) => assert!(message.contains("record 0")),
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_text_round_trip_keeps_key_order() {
        let text = r#"[{"z":1,"a":"two","m":[true,null]}]"#;
        let records = parse_document(text).unwrap();
        assert_eq!(document_to_text(&records, false), text);
    }
}
