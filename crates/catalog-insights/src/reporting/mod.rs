//! Run summaries and text tables.
//!
//! A [`ReportSummary`] gathers the shapes, drop counts, aggregations and
//! written charts of one run. It serves both the `--json` CLI output and
//! the `report_summary.json` file.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_insights::reporting::ReportGenerator;
//!
//! let generator = ReportGenerator::new(PathBuf::from("graphs"));
//! generator.write_summary_to_file(&summary)?;
//! ```

mod generator;
mod tables;

pub use generator::{ReportGenerator, ReportSummary, SUMMARY_FILE_NAME, SummaryParams};
pub use tables::format_tables;
