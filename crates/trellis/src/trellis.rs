//! Main Trellis struct and public API.

use serde::{Deserialize, Serialize};

use crate::diff::{DiffResult, diff_documents};
use crate::error::{Result, TrellisError};
use crate::inference::infer_schema;
use crate::input::Table;
use crate::json::{JsonRecord, document_to_text};
use crate::schema::{ColumnSchema, TableSchema};
use crate::transform::{ArrayDisplay, records_to_table, table_to_records};
use crate::validation::{
    ColumnValidationReport, JsonValidationReport, validate_cell, validate_column,
    validate_document_text,
};

/// Configuration for an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrellisConfig {
    /// How array fields are laid out when JSON is converted back to rows.
    pub array_display: ArrayDisplay,
    /// Whether `json_text` pretty-prints the document.
    pub pretty_json: bool,
}

impl Default for TrellisConfig {
    fn default() -> Self {
        Self {
            array_display: ArrayDisplay::default(),
            pretty_json: true,
        }
    }
}

/// An editing session over one dataset.
///
/// Owns the table, its schema, and the JSON projection as a single
/// consistent unit. Every mutation is validated before it is committed;
/// a failed mutation leaves all three views untouched. After a commit the
/// JSON projection is rebuilt from the table, so the views never drift.
#[derive(Debug, Clone)]
pub struct Trellis {
    config: TrellisConfig,
    table: Table,
    schema: TableSchema,
    records: Vec<JsonRecord>,
}

impl Trellis {
    /// Create a session from a table and a matching schema.
    ///
    /// Fails if the schema width differs from the table width or any cell
    /// does not validate under its column. An inconsistent initial pair is
    /// a loader bug with no prior state to roll back to, so it is rejected
    /// here rather than repaired.
    pub fn new(table: Table, schema: TableSchema) -> Result<Self> {
        Self::with_config(table, schema, TrellisConfig::default())
    }

    /// Create a session with custom configuration.
    pub fn with_config(table: Table, schema: TableSchema, config: TrellisConfig) -> Result<Self> {
        if table.column_count() != schema.column_count() {
            return Err(TrellisError::SchemaMismatch(format!(
                "table has {} columns but the schema describes {}",
                table.column_count(),
                schema.column_count()
            )));
        }
        validate_all(&table, &schema)?;

        let records = table_to_records(&table, &schema);
        Ok(Self {
            config,
            table,
            schema,
            records,
        })
    }

    /// Create a session by inferring a schema from the table.
    pub fn from_table(table: Table) -> Result<Self> {
        let schema = infer_schema(&table);
        Self::new(table, schema)
    }

    /// An empty session with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            config: TrellisConfig::default(),
            table: Table::new(Vec::new(), Vec::new()),
            schema: TableSchema::new(),
            records: Vec::new(),
        }
    }

    /// The current table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The current schema.
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// The current JSON projection.
    pub fn records(&self) -> &[JsonRecord] {
        &self.records
    }

    /// The session configuration.
    pub fn config(&self) -> &TrellisConfig {
        &self.config
    }

    /// The JSON projection rendered as text.
    pub fn json_text(&self) -> String {
        document_to_text(&self.records, self.config.pretty_json)
    }

    /// Validate and commit a single cell edit.
    ///
    /// On success the cell holds the normalized value, the JSON projection
    /// is rebuilt, and the normalized value is returned so callers can
    /// record it for undo. On failure the table is untouched.
    pub fn update_cell(&mut self, row: usize, col: usize, raw: &str) -> Result<String> {
        if row >= self.table.row_count() {
            return Err(TrellisError::RowOutOfBounds {
                index: row,
                count: self.table.row_count(),
            });
        }
        if col >= self.schema.column_count() {
            return Err(TrellisError::ColumnOutOfBounds {
                index: col,
                count: self.schema.column_count(),
            });
        }

        let normalized = validate_cell(&self.schema.columns[col], row, raw)?;
        self.table.rows[row][col] = normalized.clone();
        self.rebuild_records();
        Ok(normalized)
    }

    /// Replace one column's schema after re-validating every cell under
    /// the candidate.
    ///
    /// All rows must pass or nothing is mutated. On success every cell in
    /// the column is rewritten with its normalized value, the header takes
    /// the candidate's name, and the JSON projection is rebuilt.
    pub fn update_schema(
        &mut self,
        col: usize,
        candidate: ColumnSchema,
    ) -> std::result::Result<(), ColumnValidationReport> {
        if col >= self.schema.column_count() {
            return Err(ColumnValidationReport::structural_failure(format!(
                "column index {col} is out of range for {} columns",
                self.schema.column_count()
            )));
        }

        let report = validate_column(&self.table, col, &candidate);
        if !report.is_valid {
            return Err(report);
        }

        for (row, normalized) in self.table.rows.iter_mut().zip(report.normalized) {
            row[col] = normalized;
        }
        self.table.headers[col] = candidate.name.clone();
        self.schema.columns[col] = candidate;
        self.rebuild_records();
        Ok(())
    }

    /// Rename a column in the schema and the table header together.
    pub fn rename_column(&mut self, col: usize, new_name: &str) -> Result<()> {
        if col >= self.schema.column_count() {
            return Err(TrellisError::ColumnOutOfBounds {
                index: col,
                count: self.schema.column_count(),
            });
        }

        self.schema.columns[col].name = new_name.to_string();
        self.table.headers[col] = new_name.to_string();
        self.rebuild_records();
        Ok(())
    }

    /// Validate JSON text and report what applying it would change,
    /// without mutating anything.
    ///
    /// This is the review half of the two-phase edit protocol: callers
    /// show the diff, then call [`apply_json_edit`](Self::apply_json_edit)
    /// to commit.
    pub fn preview_json_edit(
        &self,
        text: &str,
    ) -> std::result::Result<DiffResult, JsonValidationReport> {
        let candidate = validate_document_text(text, &self.schema)?;
        Ok(diff_documents(&self.records, &candidate, &self.schema))
    }

    /// Validate JSON text and commit it, rebuilding the table from the
    /// parsed records.
    ///
    /// Returns the diff against the prior state for caller display. On
    /// validation failure the report is returned and nothing is mutated.
    pub fn apply_json_edit(
        &mut self,
        text: &str,
    ) -> std::result::Result<DiffResult, JsonValidationReport> {
        let candidate = validate_document_text(text, &self.schema)?;
        let diff = diff_documents(&self.records, &candidate, &self.schema);

        let headers: Vec<String> = self
            .schema
            .columns
            .iter()
            .map(|column| column.name.clone())
            .collect();
        self.table = records_to_table(&candidate, &headers, self.config.array_display);
        self.records = candidate;
        Ok(diff)
    }

    /// Replace the whole table after re-validating every cell against the
    /// current schema.
    ///
    /// The candidate must keep the schema's width and column names; a
    /// failed validation rejects the edit with no partial mutation.
    pub fn apply_table_edit(&mut self, candidate: Table) -> Result<()> {
        if candidate.column_count() != self.schema.column_count() {
            return Err(TrellisError::SchemaMismatch(format!(
                "table has {} columns but the schema describes {}",
                candidate.column_count(),
                self.schema.column_count()
            )));
        }
        for (index, (header, column)) in
            candidate.headers.iter().zip(&self.schema.columns).enumerate()
        {
            if header != &column.name {
                return Err(TrellisError::SchemaMismatch(format!(
                    "column {index} is named '{header}' but the schema calls it '{}'",
                    column.name
                )));
            }
        }
        validate_all(&candidate, &self.schema)?;

        self.table = candidate;
        self.rebuild_records();
        Ok(())
    }

    fn rebuild_records(&mut self) {
        self.records = table_to_records(&self.table, &self.schema);
    }
}

impl Default for Trellis {
    fn default() -> Self {
        Self::empty()
    }
}

fn validate_all(table: &Table, schema: &TableSchema) -> Result<()> {
    for (row_index, row) in table.rows.iter().enumerate() {
        if row.len() != schema.column_count() {
            return Err(TrellisError::SchemaMismatch(format!(
                "row {row_index} has {} cells, expected {}",
                row.len(),
                schema.column_count()
            )));
        }
        for (cell, column) in row.iter().zip(&schema.columns) {
            validate_cell(column, row_index, cell)?;
        }
    }
    Ok(())
}
