//! Pipeline module.
//!
//! This module provides the report pipeline and stage reporting.

mod builder;
pub mod progress;

pub use builder::{Analysis, ReportPipeline, ReportPipelineBuilder};
pub use progress::{ClosureProgressReporter, ProgressReporter, ProgressUpdate, ReportStage};
