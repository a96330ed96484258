//! The table↔JSON transformation pair: grouping rows into records and
//! expanding records back into rows.

use serde::{Deserialize, Serialize};

mod to_json;
mod to_table;

pub use to_json::table_to_records;
pub use to_table::records_to_table;

/// How array-valued fields render in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayDisplay {
    /// One row per array element.
    Expanded,
    /// All elements comma-joined into a single cell.
    Inline,
}

impl Default for ArrayDisplay {
    fn default() -> Self {
        ArrayDisplay::Expanded
    }
}
