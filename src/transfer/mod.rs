//! CSV import and export of portfolio projects.
//!
//! Import runs parse → header mapping → per-row validation and duplicate
//! detection → persistence, and always ends in an [`ImportOutcome`]. Export
//! turns stored projects into a BOM-prefixed CSV with the same canonical
//! header names, so an exported file can be imported again.

pub mod dedupe;
pub mod export;
pub mod headers;
pub mod import;
pub mod parser;
pub mod store;

pub use export::{ExportError, export_csv};
pub use headers::{Field, HeaderMap};
pub use import::{ImportOutcome, SkippedRow, import_csv};
pub use store::ProjectStore;
