//! Single-cell validation and normalization.
//!
//! Every accepted mutation funnels through [`validate_cell`]: it checks a
//! raw cell against one column schema and returns the canonical string form
//! that the table stores (`True`/`False` for booleans, plain decimal for
//! numbers, `YYYY-MM-DD` for dates).

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Result, TrellisError};
use crate::schema::{ColumnSchema, ColumnType};

/// Date formats accepted for parsing, in priority order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
];

/// Datetime formats accepted and truncated to their date part.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a date or datetime string under the accepted formats.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }
    None
}

/// Parse a boolean literal, case-insensitive `true`/`false` only.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Parse an integer, invariant locale, no grouping separators.
pub(crate) fn parse_int(value: &str) -> Option<i64> {
    value.parse().ok()
}

/// Parse a finite float, invariant locale.
pub(crate) fn parse_float(value: &str) -> Option<f64> {
    value.parse().ok().filter(|f: &f64| f.is_finite())
}

/// Validate one raw cell against a column schema.
///
/// Returns the normalized value to store. The `row` index appears only in
/// error context.
pub fn validate_cell(column: &ColumnSchema, row: usize, raw: &str) -> Result<String> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        if column.nullable {
            return Ok(String::new());
        }
        return Err(TrellisError::Nullability {
            row,
            column: column.name.clone(),
        });
    }

    match column.column_type {
        ColumnType::String => Ok(raw.to_string()),
        ColumnType::Int => {
            let value = parse_int(trimmed).ok_or_else(|| TrellisError::Parse {
                row,
                column: column.name.clone(),
                message: format!("'{trimmed}' is not a valid integer"),
            })?;
            check_range(column, row, value as f64)?;
            Ok(value.to_string())
        }
        ColumnType::Float => {
            let value = parse_float(trimmed).ok_or_else(|| TrellisError::Parse {
                row,
                column: column.name.clone(),
                message: format!("'{trimmed}' is not a valid number"),
            })?;
            check_range(column, row, value)?;
            Ok(value.to_string())
        }
        ColumnType::Bool => match parse_bool(trimmed) {
            Some(true) => Ok("True".to_string()),
            Some(false) => Ok("False".to_string()),
            None => Err(TrellisError::Parse {
                row,
                column: column.name.clone(),
                message: format!("'{trimmed}' is not a boolean (expected true or false)"),
            }),
        },
        ColumnType::Date => match parse_date(trimmed) {
            Some(date) => Ok(date.format("%Y-%m-%d").to_string()),
            None => Err(TrellisError::Parse {
                row,
                column: column.name.clone(),
                message: format!("'{trimmed}' is not a recognized date"),
            }),
        },
    }
}

/// Check configured bounds; the message names exactly the bounds that are set.
fn check_range(column: &ColumnSchema, row: usize, value: f64) -> Result<()> {
    let below = column.min.is_some_and(|min| value < min);
    let above = column.max.is_some_and(|max| value > max);
    if !below && !above {
        return Ok(());
    }

    let message = match (column.min, column.max) {
        (Some(min), Some(max)) => format!("value {value} must be between {min} and {max}"),
        (Some(min), None) => format!("value {value} must be at least {min}"),
        (None, Some(max)) => format!("value {value} must be at most {max}"),
        (None, None) => return Ok(()),
    };

    Err(TrellisError::Range {
        row,
        column: column.name.clone(),
        message,
    })
}
