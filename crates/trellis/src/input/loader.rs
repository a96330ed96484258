//! File loading with delimiter detection.

use std::fs;
use std::io::BufRead;
use std::path::Path;

use super::source::Table;
use crate::error::{Result, TrellisError};
use crate::inference::infer_schema;
use crate::json::parse_document;
use crate::schema::TableSchema;
use crate::transform::{ArrayDisplay, records_to_table};
use crate::trellis::Trellis;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether delimited files carry a header row.
    pub has_header: bool,
    /// Quote character.
    pub quote: u8,
    /// How arrays in JSON sources are laid out as rows.
    pub array_display: ArrayDisplay,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            quote: b'"',
            array_display: ArrayDisplay::default(),
        }
    }
}

/// The storage format a source was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// A delimited text file (CSV, TSV and friends).
    Delimited { delimiter: u8 },
    /// A JSON array-of-records file.
    Json,
}

/// A freshly loaded dataset: table, rough-inferred schema, and origin.
///
/// The schema comes from inference over the loaded cells; callers may
/// replace it before opening a session.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub table: Table,
    pub schema: TableSchema,
    pub format: SourceFormat,
}

impl LoadedSource {
    /// Open an editing session over the loaded data.
    pub fn into_session(self) -> Result<Trellis> {
        Trellis::new(self.table, self.schema)
    }
}

/// Loads delimited or JSON files into tables.
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a new loader with default configuration.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a file, picking the format from its extension.
    ///
    /// Unknown extensions fall back to sniffing the content: text whose
    /// first non-space character is `[` is treated as JSON.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<LoadedSource> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| TrellisError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("json") => self.load_json_str(&contents),
            Some("csv" | "tsv" | "psv" | "txt") => self.load_delimited_str(&contents),
            _ => {
                if contents.trim_start().starts_with('[') {
                    self.load_json_str(&contents)
                } else {
                    self.load_delimited_str(&contents)
                }
            }
        }
    }

    /// Load delimited text.
    pub fn load_delimited_str(&self, text: &str) -> Result<LoadedSource> {
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(text.as_bytes())?,
        };

        let table = self.parse_delimited(text.as_bytes(), delimiter)?;
        let schema = infer_schema(&table);
        Ok(LoadedSource {
            table,
            schema,
            format: SourceFormat::Delimited { delimiter },
        })
    }

    /// Load a JSON array-of-records document.
    ///
    /// Column order is the first-appearance order of keys across records.
    pub fn load_json_str(&self, text: &str) -> Result<LoadedSource> {
        let records = parse_document(text)?;
        if records.is_empty() {
            return Err(TrellisError::EmptyData(
                "document contains no records".to_string(),
            ));
        }

        let mut headers: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !headers.iter().any(|h| h == key) {
                    headers.push(key.clone());
                }
            }
        }

        let table = records_to_table(&records, &headers, self.config.array_display);
        let schema = infer_schema(&table);
        Ok(LoadedSource {
            table,
            schema,
            format: SourceFormat::Json,
        })
    }

    fn parse_delimited(&self, bytes: &[u8], delimiter: u8) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.to_string()).collect()
        } else {
            match reader.records().next() {
                Some(Ok(record)) => (0..record.len())
                    .map(|i| format!("column_{}", i + 1))
                    .collect(),
                Some(Err(e)) => return Err(e.into()),
                None => {
                    return Err(TrellisError::EmptyData("no data rows found".to_string()));
                }
            }
        };

        if headers.is_empty() {
            return Err(TrellisError::EmptyData("no columns found".to_string()));
        }

        // Re-create the reader in case sizing the headers consumed rows.
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let expected_cols = headers.len();
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();

            // Pad or trim ragged rows to the header width.
            while row.len() < expected_cols {
                row.push(String::new());
            }
            row.truncate(expected_cols);

            rows.push(row);
        }

        Ok(Table::new(headers, rows))
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let lines: Vec<String> = bytes
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(TrellisError::EmptyData("no lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // A delimiter that appears the same number of times on every line
        // outranks higher raw counts; tabs get a small bonus since they
        // rarely occur inside field text.
        let consistent = counts.iter().all(|&c| c == first_count);
        let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        let variance = counts
            .iter()
            .map(|&c| (c as f64 - mean).powi(2))
            .sum::<f64>()
            / counts.len() as f64;

        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::JsonValue;
    use crate::schema::ColumnType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        let data = b"a;b;c\n1;2;3";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_detect_ignores_quoted_delimiters() {
        let data = b"name|note\nAlice|\"red,green,blue\"\nBob|\"x,y\"";
        assert_eq!(detect_delimiter(data).unwrap(), b'|');
    }

    #[test]
    fn test_load_csv_pads_ragged_rows() {
        let loader = Loader::new();
        let source = loader
            .load_delimited_str("name,age,city\nAlice,30,NYC\nBob,25\n")
            .unwrap();

        assert_eq!(source.table.headers, vec!["name", "age", "city"]);
        assert_eq!(source.table.rows[1], vec!["Bob", "25", ""]);
        assert_eq!(source.format, SourceFormat::Delimited { delimiter: b',' });
    }

    #[test]
    fn test_load_infers_schema() {
        let loader = Loader::new();
        let source = loader
            .load_delimited_str("name,age\nAlice,30\nBob,25\n")
            .unwrap();

        assert_eq!(source.schema.columns[0].column_type, ColumnType::String);
        assert_eq!(source.schema.columns[1].column_type, ColumnType::Int);
    }

    #[test]
    fn test_load_header_only_file() {
        let loader = Loader::new();
        let source = loader.load_delimited_str("name,age\n").unwrap();
        assert_eq!(source.table.row_count(), 0);
        assert_eq!(source.table.column_count(), 2);
    }

    #[test]
    fn test_load_without_header_names_columns() {
        let loader = Loader::with_config(LoaderConfig {
            has_header: false,
            delimiter: Some(b','),
            ..LoaderConfig::default()
        });
        let source = loader.load_delimited_str("1,2\n3,4\n").unwrap();

        assert_eq!(source.table.headers, vec!["column_1", "column_2"]);
        assert_eq!(source.table.row_count(), 2);
    }

    #[test]
    fn test_load_json_orders_columns_by_first_appearance() {
        let loader = Loader::new();
        let source = loader
            .load_json_str(r#"[{"b":1,"a":2},{"a":3,"c":4}]"#)
            .unwrap();

        assert_eq!(source.table.headers, vec!["b", "a", "c"]);
        assert_eq!(source.format, SourceFormat::Json);
    }

    #[test]
    fn test_load_json_expands_arrays() {
        let loader = Loader::new();
        let source = loader
            .load_json_str(r#"[{"Owner":"alice","Tags":["red","green"]}]"#)
            .unwrap();

        assert_eq!(source.table.row_count(), 2);
        assert_eq!(source.table.rows[0], vec!["alice", "red"]);
        assert_eq!(source.table.rows[1], vec!["", "green"]);

        let session = source.into_session().unwrap();
        let tags = session.records()[0]["Tags"].as_array().unwrap();
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_load_json_rejects_empty_document() {
        let loader = Loader::new();
        assert!(matches!(
            loader.load_json_str("[]"),
            Err(TrellisError::EmptyData(_))
        ));
    }

    #[test]
    fn test_load_path_dispatches_on_extension() {
        let loader = Loader::new();

        let csv = create_test_file("a,b\n1,2\n", ".csv");
        let source = loader.load_path(csv.path()).unwrap();
        assert!(matches!(source.format, SourceFormat::Delimited { .. }));

        let json = create_test_file(r#"[{"a":1,"b":2}]"#, ".json");
        let source = loader.load_path(json.path()).unwrap();
        assert_eq!(source.format, SourceFormat::Json);
    }

    #[test]
    fn test_load_path_sniffs_unknown_extension() {
        let loader = Loader::new();
        let file = create_test_file(r#"  [{"a":1}]"#, ".data");
        let source = loader.load_path(file.path()).unwrap();
        assert_eq!(source.format, SourceFormat::Json);
    }

    #[test]
    fn test_loaded_json_round_trips_through_session() {
        let loader = Loader::new();
        let text = r#"[{"Name":"Alice","Score":10},{"Name":"Bob","Score":20}]"#;
        let session = loader.load_json_str(text).unwrap().into_session().unwrap();

        assert_eq!(session.records().len(), 2);
        assert_eq!(session.records()[1]["Score"], JsonValue::Int(20));
    }
}
