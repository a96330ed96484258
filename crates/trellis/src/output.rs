//! Serializing tables back to delimited text or JSON.

use std::fs;
use std::path::Path;

use crate::error::{Result, TrellisError};
use crate::input::Table;
use crate::json::document_to_text;
use crate::schema::TableSchema;
use crate::transform::table_to_records;

/// Render a table as delimited text.
///
/// Fields are quoted only when they contain the delimiter, a quote, or a
/// newline; embedded quotes are doubled.
pub fn csv_string(table: &Table, delimiter: u8) -> Result<String> {
    let mut buffer = Vec::new();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(&mut buffer);

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    drop(writer);

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Render a table as a JSON document via row grouping.
pub fn json_string(table: &Table, schema: &TableSchema, pretty: bool) -> String {
    let records = table_to_records(table, schema);
    document_to_text(&records, pretty)
}

/// Write a table to a delimited file.
pub fn write_csv_file(table: &Table, path: impl AsRef<Path>, delimiter: u8) -> Result<()> {
    let path = path.as_ref();
    let text = csv_string(table, delimiter)?;
    fs::write(path, text).map_err(|e| TrellisError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write a table to a JSON file.
pub fn write_json_file(
    table: &Table,
    schema: &TableSchema,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<()> {
    let path = path.as_ref();
    let text = json_string(table, schema, pretty);
    fs::write(path, text).map_err(|e| TrellisError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write a table to a file, picking the format from its extension.
pub fn write_file(table: &Table, schema: &TableSchema, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("json") => write_json_file(table, schema, path, true),
        Some("csv" | "txt") => write_csv_file(table, path, b','),
        Some("tsv") => write_csv_file(table, path, b'\t'),
        Some("psv") => write_csv_file(table, path, b'|'),
        other => Err(TrellisError::UnsupportedFormat(format!(
            "cannot save to '{}' files",
            other.unwrap_or("<none>")
        ))),
    }
}
