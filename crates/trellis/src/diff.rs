//! Positional comparison of two JSON documents under a schema.

use serde::{Deserialize, Serialize};

use crate::json::{JsonRecord, JsonValue};
use crate::schema::TableSchema;

/// How a record's key set disagrees with the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    /// A schema column is absent from one side of a compared pair.
    Missing,
    /// The updated record carries a key the schema does not define.
    Unknown,
}

/// One key-level disagreement found while diffing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMismatch {
    pub record: usize,
    pub key: String,
    pub kind: MismatchKind,
}

/// Outcome of comparing a current document against an updated one.
///
/// Indices refer to record positions in the respective documents:
/// `added` into the updated document, `removed` into the current one,
/// `modified` into both (the compared prefix).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    pub added: Vec<usize>,
    pub removed: Vec<usize>,
    pub modified: Vec<usize>,
    pub key_mismatches: Vec<KeyMismatch>,
}

impl DiffResult {
    /// True when the two documents are equivalent under the schema.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.modified.is_empty()
            && self.key_mismatches.is_empty()
    }

    /// True when applying the updated document would change record content.
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty() || !self.modified.is_empty()
    }
}

/// Compare two documents record by record, positionally, up to the
/// shorter length.
///
/// A record is modified when any schema column's value differs between
/// the sides or is missing from either side. Records beyond the shorter
/// length are wholly added or removed. Float values are compared after
/// rounding to six decimal places.
pub fn diff_documents(
    current: &[JsonRecord],
    updated: &[JsonRecord],
    schema: &TableSchema,
) -> DiffResult {
    let mut result = DiffResult::default();
    let shared = current.len().min(updated.len());

    for index in 0..shared {
        let before = &current[index];
        let after = &updated[index];
        let mut changed = false;

        for column in &schema.columns {
            match (before.get(&column.name), after.get(&column.name)) {
                (Some(old), Some(new)) => {
                    if !changed && !values_equal(old, new) {
                        changed = true;
                    }
                }
                _ => {
                    result.key_mismatches.push(KeyMismatch {
                        record: index,
                        key: column.name.clone(),
                        kind: MismatchKind::Missing,
                    });
                    changed = true;
                }
            }
        }

        for key in after.keys() {
            if schema.get_column(key).is_none() {
                result.key_mismatches.push(KeyMismatch {
                    record: index,
                    key: key.clone(),
                    kind: MismatchKind::Unknown,
                });
            }
        }

        if changed {
            result.modified.push(index);
        }
    }

    if updated.len() > shared {
        result.added.extend(shared..updated.len());
    }
    if current.len() > shared {
        result.removed.extend(shared..current.len());
    }

    result
}

fn values_equal(a: &JsonValue, b: &JsonValue) -> bool {
    match (a, b) {
        (JsonValue::Null, JsonValue::Null) => true,
        (JsonValue::Bool(x), JsonValue::Bool(y)) => x == y,
        (JsonValue::Int(x), JsonValue::Int(y)) => x == y,
        (JsonValue::Float(x), JsonValue::Float(y)) => round6(*x) == round6(*y),
        (JsonValue::Int(x), JsonValue::Float(y)) | (JsonValue::Float(y), JsonValue::Int(x)) => {
            round6(*x as f64) == round6(*y)
        }
        (JsonValue::String(x), JsonValue::String(y)) => x == y,
        (JsonValue::Array(x), JsonValue::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| values_equal(l, r))
        }
        (JsonValue::Object(x), JsonValue::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(k, v)| y.get(k).is_some_and(|w| values_equal(v, w)))
        }
        _ => false,
    }
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
