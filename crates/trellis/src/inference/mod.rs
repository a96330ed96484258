//! Schema inference from observed string data.

mod engine;

pub use engine::{infer_column, infer_schema};
