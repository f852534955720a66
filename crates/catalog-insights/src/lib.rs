//! Media Catalog Report Library
//!
//! Loads a catalog of movies and TV shows from CSV, cleans it, and renders
//! summary charts with Polars and plotters.
//!
//! # Overview
//!
//! - **Loading**: every column read as text, with fallbacks for awkward files
//! - **Cleaning**: rows missing `type`, `country` or `date_added` are dropped;
//!   dates in mixed formats are normalized and `year_added` is derived
//! - **Aggregation**: counts by type, top countries, titles per year, a
//!   genre × type grid and top genres
//! - **Rendering**: one PNG per aggregation under the output directory
//! - **Summary**: an optional JSON record of the run
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use catalog_insights::{ReportConfig, ReportPipeline};
//!
//! let config = ReportConfig::builder()
//!     .input_path("netflix_titles.csv")
//!     .output_dir("graphs")
//!     .build()?;
//!
//! let summary = ReportPipeline::builder()
//!     .config(config)
//!     .on_progress(|update| println!("[{}] {}", update.stage, update.message))
//!     .build()?
//!     .run()?;
//!
//! println!("Dropped {} rows with bad dates", summary.cleaning.dropped_unparseable_dates);
//! ```
//!
//! # Using the stages directly
//!
//! ```rust,ignore
//! use catalog_insights::{CatalogCleaner, aggregate, loader};
//!
//! let raw = loader::load_catalog("titles.csv".as_ref())?;
//! let (cleaned, _) = CatalogCleaner.clean(raw)?;
//! let countries = aggregate::top_countries(&cleaned, 10)?;
//! ```

pub mod aggregate;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod render;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use aggregate::aggregate_all;
pub use cleaner::{CatalogCleaner, parse_date_added};
pub use config::{ConfigValidationError, ReportConfig, ReportConfigBuilder};
pub use error::{ReportError, Result as ReportResult, ResultExt};
pub use loader::load_catalog;
pub use pipeline::{
    Analysis, ClosureProgressReporter, ProgressReporter, ProgressUpdate, ReportPipeline,
    ReportPipelineBuilder, ReportStage,
};
pub use render::{ChartKind, ChartRenderer, PlotError};
pub use reporting::{ReportGenerator, ReportSummary};
pub use types::{AggregationSet, CategoryCounts, CleaningSummary, CrossTab};
