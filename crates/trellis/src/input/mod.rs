//! Data loading: the in-memory table and the file loader.

mod loader;
mod source;

pub use loader::{LoadedSource, Loader, LoaderConfig, SourceFormat};
pub use source::Table;
