//! Core type definitions for column schemas.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared logical type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Text values; accepts anything.
    String,
    /// Whole numbers (no decimal point, no grouping separators).
    Int,
    /// Floating-point numbers.
    Float,
    /// Boolean values (`true`/`false`).
    Bool,
    /// Calendar dates, canonically `YYYY-MM-DD`.
    Date,
}

impl ColumnType {
    /// Returns true for the numeric types (`Int`, `Float`).
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Int | ColumnType::Float)
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::String
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::String => "String",
            ColumnType::Int => "Int",
            ColumnType::Float => "Float",
            ColumnType::Bool => "Bool",
            ColumnType::Date => "Date",
        };
        write!(f, "{name}")
    }
}
