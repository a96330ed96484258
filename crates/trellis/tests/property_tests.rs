//! Property-based tests for Trellis.
//!
//! These tests use proptest to generate random tables and documents and
//! verify that the core pipelines maintain their invariants under all
//! conditions.
//!
//! # Testing Philosophy
//!
//! Property-based tests verify:
//! 1. **No panics**: Inference and transforms never crash on any input
//! 2. **Determinism**: Same input always produces same output
//! 3. **Round trips**: Save/load and table/document conversions are lossless
//! 4. **Invariants**: Normalization is idempotent, self-diffs are empty
//!
//! # Running Property Tests
//!
//! ```bash
//! # Run all property tests
//! cargo test -p trellis --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p trellis --test property_tests
//! ```

use proptest::prelude::*;

use trellis::json::{document_to_text, parse_document};
use trellis::output::csv_string;
use trellis::validation::{validate_cell, validate_document};
use trellis::{
    ArrayDisplay, ColumnSchema, ColumnType, JsonRecord, JsonValue, Loader, LoaderConfig, Table,
    TableSchema, diff_documents, infer_column, records_to_table, table_to_records,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Printable ASCII, the common case for raw cell values.
fn printable_cell() -> impl Strategy<Value = String> {
    "[ -~]{0,12}"
}

/// The value shapes one typed document field can take.
#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Text,
    Int,
    Bool,
}

fn field_kind() -> impl Strategy<Value = FieldKind> {
    prop_oneof![
        Just(FieldKind::Text),
        Just(FieldKind::Int),
        Just(FieldKind::Bool),
    ]
}

fn column_type_for(kind: FieldKind) -> ColumnType {
    match kind {
        FieldKind::Text => ColumnType::String,
        FieldKind::Int => ColumnType::Int,
        FieldKind::Bool => ColumnType::Bool,
    }
}

fn scalar_value(kind: FieldKind) -> BoxedStrategy<JsonValue> {
    match kind {
        FieldKind::Text => "[a-z]{1,8}".prop_map(JsonValue::String).boxed(),
        FieldKind::Int => (-1000i64..1000).prop_map(JsonValue::Int).boxed(),
        FieldKind::Bool => any::<bool>().prop_map(JsonValue::Bool).boxed(),
    }
}

/// A field value: null, a scalar, or a short multi-element array.
///
/// Arrays always hold at least two elements; a one-element array collapses
/// to a scalar on the way back from the grid, so it is not round-trippable
/// by design.
fn field_value(kind: FieldKind) -> BoxedStrategy<JsonValue> {
    prop_oneof![
        1 => Just(JsonValue::Null),
        3 => scalar_value(kind),
        2 => prop::collection::vec(scalar_value(kind), 2..5).prop_map(JsonValue::Array),
    ]
    .boxed()
}

/// A schema plus a document that fits it: a non-empty string key column
/// that anchors row grouping, and three typed value columns holding
/// scalars, nulls, or short arrays.
fn document() -> impl Strategy<Value = (TableSchema, Vec<JsonRecord>)> {
    (field_kind(), field_kind(), field_kind()).prop_flat_map(|(k0, k1, k2)| {
        let schema = TableSchema::with_columns(vec![
            ColumnSchema::new("key", ColumnType::String),
            ColumnSchema::new("f0", column_type_for(k0)).with_nullable(true),
            ColumnSchema::new("f1", column_type_for(k1)).with_nullable(true),
            ColumnSchema::new("f2", column_type_for(k2)).with_nullable(true),
        ]);

        let record = ("[a-z]{1,8}", field_value(k0), field_value(k1), field_value(k2)).prop_map(
            |(anchor, f0, f1, f2)| {
                let mut record = JsonRecord::new();
                record.insert("key".to_string(), JsonValue::String(anchor));
                record.insert("f0".to_string(), f0);
                record.insert("f1".to_string(), f1);
                record.insert("f2".to_string(), f2);
                record
            },
        );
        prop::collection::vec(record, 1..6).prop_map(move |records| (schema.clone(), records))
    })
}

/// Header names for generated tables.
fn header_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,7}"
}

/// Cell text biased toward the characters that exercise CSV quoting.
fn cell_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,10}",
        Just(String::new()),
        Just("a,b".to_string()),
        Just("say \"hi\"".to_string()),
        Just("line1\nline2".to_string()),
        Just(" padded ".to_string()),
    ]
}

/// A small rectangular table with tricky cell content.
fn small_table() -> impl Strategy<Value = Table> {
    (1..4usize).prop_flat_map(|width| {
        (
            prop::collection::vec(header_name(), width),
            prop::collection::vec(prop::collection::vec(cell_text(), width), 0..5),
        )
            .prop_map(|(headers, rows)| Table::new(headers, rows))
    })
}

// =============================================================================
// Inference Properties
// =============================================================================

mod inference_properties {
    use super::*;

    proptest! {
        /// Inference accepts any printable values without panicking.
        #[test]
        fn never_panics(values in prop::collection::vec(printable_cell(), 0..30)) {
            let _ = infer_column("col", values.iter().map(|v| v.as_str()));
        }

        /// The same values always infer the same column schema.
        #[test]
        fn inference_is_deterministic(values in prop::collection::vec(printable_cell(), 0..30)) {
            let first = infer_column("col", values.iter().map(|v| v.as_str()));
            let second = infer_column("col", values.iter().map(|v| v.as_str()));
            prop_assert_eq!(first, second);
        }

        /// A column is nullable exactly when some value is empty.
        #[test]
        fn nullable_tracks_empty_values(values in prop::collection::vec(printable_cell(), 0..30)) {
            let column = infer_column("col", values.iter().map(|v| v.as_str()));
            let has_empty = values.iter().any(|v| v.trim().is_empty());
            prop_assert_eq!(column.nullable, has_empty);
        }

        /// All-integer values infer Int, never the wider Float, and carry
        /// an observed range.
        #[test]
        fn integers_infer_int(values in prop::collection::vec("-?[0-9]{1,8}", 1..20)) {
            let column = infer_column("col", values.iter().map(|v| v.as_str()));
            prop_assert_eq!(column.column_type, ColumnType::Int);
            prop_assert!(column.min.is_some());
            prop_assert!(column.max.is_some());
        }

        /// Sample values never exceed the cap.
        #[test]
        fn samples_are_capped(values in prop::collection::vec("[a-z]{1,5}", 0..40)) {
            let column = infer_column("col", values.iter().map(|v| v.as_str()));
            prop_assert!(column.sample_values.len() <= 5);
        }
    }
}

// =============================================================================
// Normalization Properties
// =============================================================================

mod normalization_properties {
    use super::*;

    proptest! {
        /// Normalizing an already normalized integer changes nothing.
        #[test]
        fn int_normalization_is_idempotent(raw in "[+-]?[0-9]{1,9}") {
            let column = ColumnSchema::new("v", ColumnType::Int);
            let once = validate_cell(&column, 0, &raw).expect("first pass failed");
            let twice = validate_cell(&column, 0, &once).expect("second pass failed");
            prop_assert_eq!(once, twice);
        }

        /// Normalizing an already normalized float changes nothing.
        #[test]
        fn float_normalization_is_idempotent(raw in "[0-9]{1,6}\\.[0-9]{1,4}") {
            let column = ColumnSchema::new("v", ColumnType::Float);
            let once = validate_cell(&column, 0, &raw).expect("first pass failed");
            let twice = validate_cell(&column, 0, &once).expect("second pass failed");
            prop_assert_eq!(once, twice);
        }

        /// Booleans reach canonical case from any casing, and stay there.
        #[test]
        fn bool_normalization_is_canonical(raw in prop_oneof![
            Just("true"), Just("TRUE"), Just("tRuE"),
            Just("false"), Just("FALSE"), Just("fAlSe"),
        ]) {
            let column = ColumnSchema::new("v", ColumnType::Bool);
            let normalized = validate_cell(&column, 0, raw).expect("parse failed");
            prop_assert!(normalized == "True" || normalized == "False");
            let again = validate_cell(&column, 0, &normalized).expect("second pass failed");
            prop_assert_eq!(normalized, again);
        }

        /// Every accepted date layout canonicalizes to ISO.
        #[test]
        fn dates_canonicalize_to_iso(
            year in 1970i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
            layout in 0usize..3,
        ) {
            let raw = match layout {
                0 => format!("{year:04}-{month:02}-{day:02}"),
                1 => format!("{year:04}/{month:02}/{day:02}"),
                _ => format!("{day:02}/{month:02}/{year:04}"),
            };
            let column = ColumnSchema::new("v", ColumnType::Date);
            let normalized = validate_cell(&column, 0, &raw).expect("parse failed");
            prop_assert_eq!(normalized, format!("{year:04}-{month:02}-{day:02}"));
        }
    }
}

// =============================================================================
// Transform Properties
// =============================================================================

mod transform_properties {
    use super::*;

    proptest! {
        /// A document of scalars and multi-element arrays survives the
        /// trip through the grid unchanged.
        #[test]
        fn document_round_trips_through_table((schema, records) in document()) {
            let headers: Vec<String> =
                schema.columns.iter().map(|c| c.name.clone()).collect();
            let table = records_to_table(&records, &headers, ArrayDisplay::Expanded);
            let rebuilt = table_to_records(&table, &schema);
            prop_assert_eq!(rebuilt, records);
        }

        /// In expanded layout the grid height is the sum of each record's
        /// tallest array.
        #[test]
        fn expanded_height_is_sum_of_record_heights((schema, records) in document()) {
            let headers: Vec<String> =
                schema.columns.iter().map(|c| c.name.clone()).collect();
            let table = records_to_table(&records, &headers, ArrayDisplay::Expanded);
            let expected: usize = records
                .iter()
                .map(|record| {
                    record
                        .values()
                        .filter_map(JsonValue::as_array)
                        .map(|items| items.len())
                        .max()
                        .unwrap_or(0)
                        .max(1)
                })
                .sum();
            prop_assert_eq!(table.row_count(), expected);
        }

        /// Generated documents always pass validation against the schema
        /// they were built for.
        #[test]
        fn generated_documents_validate((schema, records) in document()) {
            let report = validate_document(&records, &schema);
            prop_assert!(report.is_valid);
        }

        /// Document text serialization reparses to the same records.
        #[test]
        fn json_text_round_trips((_schema, records) in document()) {
            let text = document_to_text(&records, true);
            let parsed = parse_document(&text).expect("reparse failed");
            prop_assert_eq!(parsed, records);
        }
    }
}

// =============================================================================
// Diff Properties
// =============================================================================

mod diff_properties {
    use super::*;

    proptest! {
        /// A document diffed against itself reports nothing.
        #[test]
        fn self_diff_is_empty((schema, records) in document()) {
            let diff = diff_documents(&records, &records, &schema);
            prop_assert!(diff.is_empty());
        }

        /// The same pair of documents always diffs the same way.
        #[test]
        fn diff_is_deterministic((schema, records) in document()) {
            let reversed: Vec<JsonRecord> = records.iter().rev().cloned().collect();
            let first = diff_documents(&records, &reversed, &schema);
            let second = diff_documents(&records, &reversed, &schema);
            prop_assert_eq!(first, second);
        }

        /// Appending records reports exactly the appended tail as added.
        #[test]
        fn appended_records_are_added((schema, records) in document()) {
            let mut updated = records.clone();
            updated.extend(records.iter().cloned());
            let diff = diff_documents(&records, &updated, &schema);
            let expected: Vec<usize> = (records.len()..updated.len()).collect();
            prop_assert_eq!(diff.added, expected);
            prop_assert!(diff.removed.is_empty());
            prop_assert!(diff.modified.is_empty());
        }
    }
}

// =============================================================================
// Save/Load Properties
// =============================================================================

mod round_trip_properties {
    use super::*;

    proptest! {
        /// Any rectangular table survives CSV save and reload, including
        /// cells with embedded delimiters, quotes and newlines.
        #[test]
        fn csv_round_trips_through_save_and_load(table in small_table()) {
            let text = csv_string(&table, b',').expect("serialize failed");
            let loader = Loader::with_config(LoaderConfig {
                delimiter: Some(b','),
                ..LoaderConfig::default()
            });
            let reloaded = loader.load_delimited_str(&text).expect("reload failed");
            prop_assert_eq!(reloaded.table, table);
        }
    }
}
