//! Column type and statistics inference.
//!
//! Given a column's observed string values, derives the narrowest type that
//! fits every non-empty value, in the order Bool, Int, Float, Date, String.
//! Int is tested before Float on purpose: an all-integer column would also
//! parse as floats, and must not widen.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::input::Table;
use crate::schema::{ColumnSchema, ColumnType, MAX_SAMPLE_VALUES, TableSchema};
use crate::validation::{parse_bool, parse_date, parse_float, parse_int};

/// Shape pre-screen before attempting a real date parse.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}([ T]\d{2}:\d{2}:\d{2})?$").unwrap(), // ISO date
        Regex::new(r"^\d{4}/\d{1,2}/\d{1,2}$").unwrap(),                         // Alt ISO
        Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap(),                         // Day-first or US
        Regex::new(r"^\d{1,2}-\d{1,2}-\d{4}$").unwrap(),                         // Dashed day-first
    ]
});

fn looks_like_date(value: &str) -> bool {
    DATE_PATTERNS.iter().any(|pattern| pattern.is_match(value)) && parse_date(value).is_some()
}

/// Infer a schema for every column of a table.
pub fn infer_schema(table: &Table) -> TableSchema {
    let columns = table
        .headers
        .iter()
        .enumerate()
        .map(|(index, name)| infer_column(name, table.column_values(index)))
        .collect();
    TableSchema::with_columns(columns)
}

/// Infer one column's schema from its observed values.
///
/// Never fails: a column nothing else fits widens to `String`. An
/// all-empty column infers `{String, nullable}`.
pub fn infer_column<'a, I>(name: &str, values: I) -> ColumnSchema
where
    I: IntoIterator<Item = &'a str>,
{
    let mut non_empty: Vec<&str> = Vec::new();
    let mut sample_values: Vec<String> = Vec::new();
    let mut distinct: HashSet<&str> = HashSet::new();
    let mut has_empty = false;

    for raw in values {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            has_empty = true;
            distinct.insert("");
        } else {
            distinct.insert(raw);
            if sample_values.len() < MAX_SAMPLE_VALUES {
                sample_values.push(raw.to_string());
            }
            non_empty.push(trimmed);
        }
    }

    let mut column = ColumnSchema::new(name, ColumnType::String).with_nullable(has_empty);
    column.distinct_count = distinct.len();
    column.sample_values = sample_values;

    if non_empty.is_empty() {
        return column;
    }

    if non_empty.iter().all(|v| parse_bool(v).is_some()) {
        column.column_type = ColumnType::Bool;
    } else if non_empty.iter().all(|v| parse_int(v).is_some()) {
        column.column_type = ColumnType::Int;
        let parsed: Vec<i64> = non_empty.iter().filter_map(|v| parse_int(v)).collect();
        column.min = parsed.iter().min().map(|v| *v as f64);
        column.max = parsed.iter().max().map(|v| *v as f64);
    } else if non_empty.iter().all(|v| parse_float(v).is_some()) {
        column.column_type = ColumnType::Float;
        let parsed: Vec<f64> = non_empty.iter().filter_map(|v| parse_float(v)).collect();
        column.min = parsed.iter().copied().reduce(f64::min);
        column.max = parsed.iter().copied().reduce(f64::max);
    } else if non_empty.iter().all(|v| looks_like_date(v)) {
        column.column_type = ColumnType::Date;
    }

    column
}
