//! Table-level schema: the ordered list of column schemas.

use serde::{Deserialize, Serialize};

use super::column::ColumnSchema;

/// Schema for an entire table.
///
/// Columns are position-aligned with the table: `columns.len()` must equal
/// the table's column count at every quiescent point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Schemas for each column, in table order.
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Create a schema with the given columns.
    pub fn with_columns(columns: Vec<ColumnSchema>) -> Self {
        Self { columns }
    }

    /// Get a column by position.
    pub fn get(&self, index: usize) -> Option<&ColumnSchema> {
        self.columns.get(index)
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

impl Default for TableSchema {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnType;

    #[test]
    fn test_lookup() {
        let schema = TableSchema::with_columns(vec![
            ColumnSchema::new("Name", ColumnType::String),
            ColumnSchema::new("Age", ColumnType::Int),
        ]);

        assert_eq!(schema.column_count(), 2);
        assert_eq!(schema.get(1).map(|c| c.name.as_str()), Some("Age"));
        assert!(schema.get_column("Name").is_some());
        assert!(schema.get_column("Missing").is_none());
        assert_eq!(schema.column_names(), vec!["Name", "Age"]);
    }
}
