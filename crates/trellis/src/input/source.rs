//! The in-memory table: headers plus row-major string cells.

use serde::{Deserialize, Serialize};

/// Tabular data as edited in the grid view.
///
/// Cells are raw strings; the schema layer decides what they mean. An
/// empty or whitespace-only cell is the "no value" marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding the header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Get all values for a column by index.
    ///
    /// Rows shorter than `index` yield the empty cell.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Whether a cell counts as empty (absent value).
    pub fn is_empty_value(value: &str) -> bool {
        value.trim().is_empty()
    }
}
