//! Table → JSON: collapsing row groups into records.

use crate::input::Table;
use crate::json::{JsonRecord, JsonValue};
use crate::schema::{ColumnSchema, ColumnType, TableSchema};
use crate::validation::{parse_bool, parse_float, parse_int};

/// Convert a table to its JSON record representation.
///
/// Rows partition into consecutive groups, each group becoming one record.
/// A new group starts at the first row and wherever the first column holds
/// a non-empty value; rows with an empty first column continue the current
/// group. Within a group, each column's non-empty values collect in row
/// order: zero values become `null`, one a scalar of the declared type,
/// several an array.
pub fn table_to_records(table: &Table, schema: &TableSchema) -> Vec<JsonRecord> {
    let mut records = Vec::new();
    let mut group: Vec<usize> = Vec::new();

    for row in 0..table.row_count() {
        let anchored = table
            .get(row, 0)
            .map(|cell| !Table::is_empty_value(cell))
            .unwrap_or(false);
        if anchored && !group.is_empty() {
            records.push(close_group(table, schema, &group));
            group.clear();
        }
        group.push(row);
    }
    if !group.is_empty() {
        records.push(close_group(table, schema, &group));
    }

    records
}

fn close_group(table: &Table, schema: &TableSchema, rows: &[usize]) -> JsonRecord {
    let mut record = JsonRecord::new();

    for (index, column) in schema.columns.iter().enumerate() {
        let collected: Vec<&str> = rows
            .iter()
            .filter_map(|&row| table.get(row, index))
            .filter(|cell| !Table::is_empty_value(cell))
            .collect();

        let value = match collected.as_slice() {
            [] => JsonValue::Null,
            [single] => convert_cell(single, column),
            many => JsonValue::Array(many.iter().map(|cell| convert_cell(cell, column)).collect()),
        };
        record.insert(column.name.clone(), value);
    }

    record
}

/// Convert one non-empty cell to a JSON value per the column's type.
///
/// A cell whose trimmed text starts with `{` or `[` is first tried as
/// embedded JSON (including the comma-joined object list `{...},{...}`);
/// on success the parsed structure is used verbatim. Cells that fail their
/// type-directed parse fall back to strings, so the transform itself never
/// fails.
fn convert_cell(raw: &str, column: &ColumnSchema) -> JsonValue {
    let trimmed = raw.trim();

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Some(value) = parse_embedded_json(trimmed) {
            return value;
        }
    }

    match column.column_type {
        ColumnType::Int => parse_int(trimmed)
            .map(JsonValue::Int)
            .unwrap_or_else(|| JsonValue::String(raw.to_string())),
        ColumnType::Float => parse_float(trimmed)
            .map(JsonValue::Float)
            .unwrap_or_else(|| JsonValue::String(raw.to_string())),
        ColumnType::Bool => parse_bool(trimmed)
            .map(JsonValue::Bool)
            .unwrap_or_else(|| JsonValue::String(raw.to_string())),
        ColumnType::Date => JsonValue::String(trimmed.to_string()),
        ColumnType::String => JsonValue::String(raw.to_string()),
    }
}

fn parse_embedded_json(trimmed: &str) -> Option<JsonValue> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return Some(JsonValue::from_serde(&value));
    }

    // An inline object list that lost its surrounding brackets:
    // "{...},{...}" splits at each "},{" with the braces re-inserted.
    if trimmed.starts_with('{') && trimmed.ends_with('}') && trimmed.contains("},{") {
        let parts: Vec<&str> = trimmed.split("},{").collect();
        let last = parts.len() - 1;
        let mut items = Vec::with_capacity(parts.len());
        for (index, part) in parts.iter().enumerate() {
            let piece = format!(
                "{}{}{}",
                if index == 0 { "" } else { "{" },
                part,
                if index == last { "" } else { "}" },
            );
            match serde_json::from_str::<serde_json::Value>(&piece) {
                Ok(value @ serde_json::Value::Object(_)) => {
                    items.push(JsonValue::from_serde(&value));
                }
                _ => return None,
            }
        }
        return Some(JsonValue::Array(items));
    }

    None
}
