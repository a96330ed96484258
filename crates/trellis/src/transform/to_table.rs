//! JSON → Table: expanding records into row groups.

use super::ArrayDisplay;
use crate::input::Table;
use crate::json::{JsonRecord, JsonValue};

/// Convert records back to a table under the given column order.
///
/// Scalar fields land on the group's first row; null fields write nothing.
/// Array fields expand one element per successive row (`Expanded`) or
/// comma-join their elements' scalar forms into the first row's cell
/// (`Inline`). A record occupies as many rows as its longest array, at
/// least one.
pub fn records_to_table(
    records: &[JsonRecord],
    headers: &[String],
    display: ArrayDisplay,
) -> Table {
    let mut rows: Vec<Vec<String>> = Vec::new();

    for record in records {
        let height = match display {
            ArrayDisplay::Expanded => record_height(record, headers),
            ArrayDisplay::Inline => 1,
        };
        let base = rows.len();
        for _ in 0..height {
            rows.push(vec![String::new(); headers.len()]);
        }

        for (col, name) in headers.iter().enumerate() {
            let Some(value) = record.get(name) else {
                continue;
            };
            match value {
                JsonValue::Null => {}
                JsonValue::Array(items) => match display {
                    ArrayDisplay::Expanded => {
                        for (offset, item) in items.iter().enumerate() {
                            rows[base + offset][col] = item.to_cell_string();
                        }
                    }
                    ArrayDisplay::Inline => {
                        rows[base][col] = items
                            .iter()
                            .map(JsonValue::to_cell_string)
                            .collect::<Vec<_>>()
                            .join(",");
                    }
                },
                scalar => rows[base][col] = scalar.to_cell_string(),
            }
        }
    }

    Table::new(headers.to_vec(), rows)
}

fn record_height(record: &JsonRecord, headers: &[String]) -> usize {
    headers
        .iter()
        .filter_map(|name| record.get(name))
        .filter_map(JsonValue::as_array)
        .map(|items| items.len())
        .max()
        .unwrap_or(0)
        .max(1)
}
