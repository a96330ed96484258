//! Trellis: a data core for editing tabular data through synchronized views.
//!
//! Trellis owns three projections of one dataset: a table of raw string
//! cells, a typed column schema, and a JSON array-of-records document.
//! Every edit, whichever view it arrives from, is validated against the
//! schema before it is committed, and a committed edit rebuilds the other
//! views so the three never drift apart.
//!
//! # Core pieces
//!
//! - **Inference**: derive a column's type and statistics from its values
//! - **Validation**: check cells, whole columns, and JSON documents
//! - **Transform**: map tables to JSON records and back, grouping rows
//!   into array fields
//! - **Diff**: compare documents positionally for edit review
//! - **History**: linear undo/redo over committed cell edits
//!
//! # Example
//!
//! ```no_run
//! use trellis::input::Loader;
//!
//! let source = Loader::new().load_path("scores.csv").unwrap();
//! let mut session = source.into_session().unwrap();
//!
//! let normalized = session.update_cell(0, 1, "42").unwrap();
//! println!("committed {normalized}");
//! println!("{}", session.json_text());
//! ```

pub mod diff;
pub mod error;
pub mod history;
pub mod inference;
pub mod input;
pub mod json;
pub mod output;
pub mod schema;
pub mod transform;
pub mod validation;

mod trellis;

pub use crate::trellis::{Trellis, TrellisConfig};
pub use diff::{DiffResult, KeyMismatch, MismatchKind, diff_documents};
pub use error::{Result, TrellisError};
pub use history::{CellEdit, HistoryLog};
pub use inference::{infer_column, infer_schema};
pub use input::{LoadedSource, Loader, LoaderConfig, SourceFormat, Table};
pub use json::{JsonRecord, JsonValue};
pub use schema::{ColumnSchema, ColumnType, TableSchema};
pub use transform::{ArrayDisplay, records_to_table, table_to_records};
pub use validation::{
    ColumnValidationReport, JsonErrorKind, JsonValidationError, JsonValidationReport, RowError,
};
