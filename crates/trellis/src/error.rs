//! Error types for the Trellis library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Trellis operations.
#[derive(Debug, Error)]
pub enum TrellisError {
    /// Cell text does not match the column's declared type.
    #[error("Parse error at row {row}, column '{column}': {message}")]
    Parse {
        row: usize,
        column: String,
        message: String,
    },

    /// Numeric value outside the column's configured bounds.
    #[error("Range error at row {row}, column '{column}': {message}")]
    Range {
        row: usize,
        column: String,
        message: String,
    },

    /// Empty value in a column that does not allow them.
    #[error("Null error at row {row}, column '{column}': value is required")]
    Nullability { row: usize, column: String },

    /// Document or table structurally incompatible with the schema.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Malformed JSON text.
    #[error("Syntax error{}: {message}", fmt_line(.line))]
    Syntax {
        line: Option<usize>,
        message: String,
    },

    /// Column index outside the table width.
    #[error("Column index {index} out of range ({count} columns)")]
    ColumnOutOfBounds { index: usize, count: usize },

    /// Row index outside the table height.
    #[error("Row index {index} out of range ({count} rows)")]
    RowOutOfBounds { index: usize, count: usize },

    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File format not supported by the loader.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no data to load.
    #[error("Empty data: {0}")]
    EmptyData(String),
}

fn fmt_line(line: &Option<usize>) -> String {
    match line {
        Some(l) => format!(" at line {l}"),
        None => String::new(),
    }
}

/// Result type alias for Trellis operations.
pub type Result<T> = std::result::Result<T, TrellisError>;
