//! Whole-column validation against a candidate schema.

use serde::{Deserialize, Serialize};

use super::cell::validate_cell;
use crate::input::Table;
use crate::schema::ColumnSchema;

/// One row's validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

/// Result of validating every cell of one column.
///
/// `normalized` stays aligned to the table's rows whether or not the column
/// is valid; rows that failed keep their original raw value in that slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnValidationReport {
    pub is_valid: bool,
    pub errors: Vec<RowError>,
    pub normalized: Vec<String>,
}

impl ColumnValidationReport {
    /// A report for a failure that precedes any per-row checking.
    pub(crate) fn structural_failure(message: String) -> Self {
        Self {
            is_valid: false,
            errors: vec![RowError { row: 0, message }],
            normalized: Vec::new(),
        }
    }
}

/// Validate every cell of one column against a candidate schema.
///
/// The candidate, not the table's current schema, decides validity; this is
/// the gate a schema-type change must pass before commit.
pub fn validate_column(
    table: &Table,
    column_index: usize,
    candidate: &ColumnSchema,
) -> ColumnValidationReport {
    let mut errors = Vec::new();
    let mut normalized = Vec::with_capacity(table.row_count());

    for (row, raw) in table.column_values(column_index).enumerate() {
        match validate_cell(candidate, row, raw) {
            Ok(value) => normalized.push(value),
            Err(error) => {
                errors.push(RowError {
                    row,
                    message: error.to_string(),
                });
                normalized.push(raw.to_string());
            }
        }
    }

    ColumnValidationReport {
        is_valid: errors.is_empty(),
        errors,
        normalized,
    }
}
