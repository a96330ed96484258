//! Column schema definition.

use serde::{Deserialize, Serialize};

use super::types::ColumnType;

/// Maximum number of sample values kept per column.
pub const MAX_SAMPLE_VALUES: usize = 5;

/// Schema for a single column, position-aligned with the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name (mirrors the table header).
    pub name: String,
    /// Declared logical type.
    pub column_type: ColumnType,
    /// Whether empty values are allowed.
    pub nullable: bool,
    /// Lower bound for numeric columns.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub min: Option<f64>,
    /// Upper bound for numeric columns.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max: Option<f64>,
    /// Number of distinct raw values observed (empties share one bucket).
    #[serde(default)]
    pub distinct_count: usize,
    /// Up to [`MAX_SAMPLE_VALUES`] non-empty values in encounter order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sample_values: Vec<String>,
}

impl ColumnSchema {
    /// Create a column schema with no bounds and no statistics.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
            min: None,
            max: None,
            distinct_count: 0,
            sample_values: Vec::new(),
        }
    }

    /// Set whether empty values are allowed.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Set the numeric range bounds.
    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Returns true if this column's declared type is numeric.
    pub fn is_numeric(&self) -> bool {
        self.column_type.is_numeric()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let column = ColumnSchema::new("Score", ColumnType::Float);
        assert_eq!(column.name, "Score");
        assert_eq!(column.column_type, ColumnType::Float);
        assert!(!column.nullable);
        assert!(column.min.is_none());
        assert!(column.max.is_none());
        assert!(column.sample_values.is_empty());
    }

    #[test]
    fn test_builders() {
        let column = ColumnSchema::new("Age", ColumnType::Int)
            .with_nullable(true)
            .with_range(Some(0.0), Some(120.0));
        assert!(column.nullable);
        assert_eq!(column.min, Some(0.0));
        assert_eq!(column.max, Some(120.0));
    }
}
