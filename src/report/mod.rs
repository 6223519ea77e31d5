//! Report rendering on top of a frozen registry: JSON results, CSV exports
//! and the Markdown summary.

pub mod csv_export;
pub mod json;
pub mod markdown;
pub mod statistics;
pub mod tables;

pub use csv_export::CsvFilenames;
pub use markdown::MarkdownOptions;
pub use statistics::Statistics;
pub use tables::{CsvData, Table};
