//! Fuzz target for cell validation.
//!
//! This fuzzer tests that cell validation:
//! 1. Never panics on any value under any column shape
//! 2. Normalizes idempotently: an accepted value's normalized form
//!    re-validates to itself

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use trellis::validation::validate_cell;
use trellis::{ColumnSchema, ColumnType};

#[derive(Arbitrary, Debug)]
struct CellInput {
    type_index: u8,
    nullable: bool,
    bounded: bool,
    min: i32,
    max: i32,
    value: String,
}

fuzz_target!(|input: CellInput| {
    if input.value.len() > 10_000 {
        return;
    }

    let column_type = match input.type_index % 5 {
        0 => ColumnType::String,
        1 => ColumnType::Int,
        2 => ColumnType::Float,
        3 => ColumnType::Bool,
        _ => ColumnType::Date,
    };

    let mut column =
        ColumnSchema::new("fuzzed", column_type).with_nullable(input.nullable);
    if input.bounded && column_type.is_numeric() {
        let low = input.min.min(input.max) as f64;
        let high = input.min.max(input.max) as f64;
        column = column.with_range(Some(low), Some(high));
    }

    if let Ok(normalized) = validate_cell(&column, 0, &input.value) {
        let again = validate_cell(&column, 0, &normalized)
            .expect("normalized value failed to re-validate");
        assert_eq!(normalized, again);
    }
});
