//! Data sources for chart-backed slides: CSV, Excel and JSON files plus
//! JSON HTTP endpoints.

mod http;
pub mod source;
pub mod workbook;

pub use source::{FileDataSource, SourceKind};
pub use workbook::{Sheet, WorkbookReader};
