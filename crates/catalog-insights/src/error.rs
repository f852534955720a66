//! Custom error types for the catalog report pipeline.
//!
//! This module provides the error hierarchy using `thiserror` so every
//! stage (loading, cleaning, aggregation, rendering) reports failures with
//! enough context for a one-line diagnostic.
//!
//! Errors are serializable so they can be embedded in the JSON run summary.

use crate::render::PlotError;
use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the report pipeline.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The source table could not be read.
    #[error("Failed to load dataset from '{path}': {reason}")]
    LoadFailed { path: String, reason: String },

    /// A required column is absent from the source table.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Data cleaning failed.
    #[error("Failed to clean data: {0}")]
    CleaningFailed(String),

    /// An aggregation step failed.
    #[error("Failed to aggregate '{chart}': {reason}")]
    AggregationFailed { chart: String, reason: String },

    /// A chart could not be drawn or written.
    #[error("Failed to render chart '{chart}': {source}")]
    RenderFailed {
        chart: String,
        #[source]
        source: PlotError,
    },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ReportError>,
    },
}

impl ReportError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ReportError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, used in the JSON summary.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::LoadFailed { .. } => "LOAD_FAILED",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::CleaningFailed(_) => "CLEANING_FAILED",
            Self::AggregationFailed { .. } => "AGGREGATION_FAILED",
            Self::RenderFailed { .. } => "RENDER_FAILED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// True for failures that happen before any chart could be produced.
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::LoadFailed { .. } | Self::ColumnNotFound(_) | Self::CleaningFailed(_) => true,
            Self::WithContext { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for ReportError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ReportError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ReportError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            ReportError::ColumnNotFound("country".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
        assert_eq!(
            ReportError::RenderFailed {
                chart: "top_countries".to_string(),
                source: PlotError::InvalidData("empty".to_string()),
            }
            .error_code(),
            "RENDER_FAILED"
        );
    }

    #[test]
    fn test_is_input_error() {
        assert!(ReportError::ColumnNotFound("type".to_string()).is_input_error());
        assert!(
            ReportError::LoadFailed {
                path: "missing.csv".to_string(),
                reason: "not found".to_string(),
            }
            .is_input_error()
        );
        assert!(!ReportError::InvalidConfig("top_n".to_string()).is_input_error());
    }

    #[test]
    fn test_error_serialization() {
        let error = ReportError::ColumnNotFound("date_added".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("date_added"));
    }

    #[test]
    fn test_with_context() {
        let error =
            ReportError::ColumnNotFound("country".to_string()).with_context("During cleaning");
        assert!(error.to_string().contains("During cleaning"));
        assert_eq!(error.error_code(), "COLUMN_NOT_FOUND");
        assert!(error.is_input_error());
    }
}
