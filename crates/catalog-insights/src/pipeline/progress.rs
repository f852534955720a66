//! Stage tracking for a report run.
//!
//! A run moves through a fixed sequence of [`ReportStage`]s. Callers can
//! observe it by installing a [`ProgressReporter`]; the same stages name
//! the phase a failure happened in.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_insights::ReportPipeline;
//!
//! let summary = ReportPipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{}] {}", update.stage.display_name(), update.message);
//!     })
//!     .build()?
//!     .run()?;
//! ```

use serde::{Deserialize, Serialize};

/// Phases of a report run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStage {
    /// Preparing the output directory
    Initializing,
    /// Reading the source table
    Loading,
    /// Dropping incomplete rows and normalizing dates
    Cleaning,
    /// Computing the chart tables
    Aggregating,
    /// Drawing and saving charts
    Rendering,
    /// Assembling and optionally writing the run summary
    Summarizing,
    /// Run finished
    Complete,
    /// Run aborted
    Failed,
}

impl ReportStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Initializing => "Initializing",
            Self::Loading => "Loading Dataset",
            Self::Cleaning => "Cleaning Data",
            Self::Aggregating => "Aggregating",
            Self::Rendering => "Rendering Charts",
            Self::Summarizing => "Writing Summary",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// True for `Complete` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

impl std::fmt::Display for ReportStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One progress notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub stage: ReportStage,

    /// Human-readable message describing current activity
    pub message: String,

    /// Items finished so far within the stage (charts, for rendering)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_processed: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_total: Option<usize>,
}

impl ProgressUpdate {
    pub fn new(stage: ReportStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
            items_processed: None,
            items_total: None,
        }
    }

    /// Creates an update with item counts.
    pub fn with_items(
        stage: ReportStage,
        current: usize,
        total: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            stage,
            message: message.into(),
            items_processed: Some(current),
            items_total: Some(total),
        }
    }

    pub fn complete(message: impl Into<String>) -> Self {
        Self::new(ReportStage::Complete, message)
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(ReportStage::Failed, message)
    }

    /// Fraction of items done, when counts are known.
    pub fn fraction(&self) -> Option<f32> {
        match (self.items_processed, self.items_total) {
            (Some(done), Some(total)) if total > 0 => Some(done as f32 / total as f32),
            _ => None,
        }
    }
}

/// Receives progress updates during a run.
///
/// Implementations must be `Send + Sync` so a pipeline can be moved to a
/// worker thread.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}
