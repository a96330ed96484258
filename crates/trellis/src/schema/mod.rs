//! Schema types describing the logical shape of a table.

mod column;
mod table;
mod types;

pub use column::{ColumnSchema, MAX_SAMPLE_VALUES};
pub use table::TableSchema;
pub use types::ColumnType;
