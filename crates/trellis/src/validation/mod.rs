//! Validation of cells, columns, and JSON documents against a schema.

mod cell;
mod column;
mod json;

pub use cell::validate_cell;
pub use column::{ColumnValidationReport, RowError, validate_column};
pub use json::{
    JsonErrorKind, JsonValidationError, JsonValidationReport, validate_document,
    validate_document_text,
};

pub(crate) use cell::{parse_bool, parse_date, parse_float, parse_int};
