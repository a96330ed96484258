//! JSON document model and its text boundary.

mod text;
mod value;

pub use text::{document_to_text, parse_document};
pub use value::{JsonRecord, JsonValue};
