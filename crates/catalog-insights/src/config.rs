//! Configuration types for the catalog report pipeline.
//!
//! Paths and chart dimensions are configurable through a builder; the set
//! of charts produced is fixed.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the source table, relative to the working directory.
pub const DEFAULT_INPUT_PATH: &str = "netflix_titles.csv";

/// Default output directory for the rendered charts.
pub const DEFAULT_OUTPUT_DIR: &str = "graphs";

/// Default number of entries kept by the top-N aggregations.
pub const DEFAULT_TOP_N: usize = 10;

/// Smallest chart edge (in pixels) that still leaves room for axis labels.
pub const MIN_CHART_EDGE: u32 = 200;

/// Configuration for the report pipeline.
///
/// Use [`ReportConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use catalog_insights::config::ReportConfig;
///
/// let config = ReportConfig::builder()
///     .input_path("data/netflix_titles.csv")
///     .output_dir("report")
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Source CSV file.
    /// Default: "netflix_titles.csv"
    pub input_path: PathBuf,

    /// Directory the chart images are written into. Created if absent,
    /// never cleared.
    /// Default: "graphs"
    pub output_dir: PathBuf,

    /// Number of entries kept by the top countries / top genres charts.
    /// Default: 10
    pub top_n: usize,

    /// Chart width in pixels.
    /// Default: 1200
    pub chart_width: u32,

    /// Chart height in pixels.
    /// Default: 800
    pub chart_height: u32,

    /// Whether to write `report_summary.json` next to the charts.
    /// Default: false
    pub save_summary: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            top_n: DEFAULT_TOP_N,
            chart_width: 1200,
            chart_height: 800,
            save_summary: false,
        }
    }
}

impl ReportConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.top_n == 0 {
            return Err(ConfigValidationError::InvalidTopN(self.top_n));
        }

        for (field, value) in [
            ("chart_width", self.chart_width),
            ("chart_height", self.chart_height),
        ] {
            if value < MIN_CHART_EDGE {
                return Err(ConfigValidationError::ChartTooSmall {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("input_path".to_string()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("output_dir".to_string()));
        }

        Ok(())
    }

    /// Chart dimensions as a `(width, height)` pair.
    pub fn chart_size(&self) -> (u32, u32) {
        (self.chart_width, self.chart_height)
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid top-N: {0} (must be at least 1)")]
    InvalidTopN(usize),

    #[error("Invalid '{field}': {value}px (must be at least 200px)")]
    ChartTooSmall { field: String, value: u32 },

    #[error("'{0}' must not be empty")]
    EmptyPath(String),
}

impl From<ConfigValidationError> for crate::error::ReportError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::ReportError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`ReportConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    input_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    top_n: Option<usize>,
    chart_width: Option<u32>,
    chart_height: Option<u32>,
    save_summary: Option<bool>,
}

impl ReportConfigBuilder {
    /// Set the source CSV file.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the output directory for chart images.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set how many entries the top-N charts keep.
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    /// Set the chart size in pixels.
    pub fn chart_size(mut self, width: u32, height: u32) -> Self {
        self.chart_width = Some(width);
        self.chart_height = Some(height);
        self
    }

    /// Enable or disable writing `report_summary.json`.
    pub fn save_summary(mut self, save: bool) -> Self {
        self.save_summary = Some(save);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ReportConfig` or an error if validation fails.
    pub fn build(self) -> Result<ReportConfig, ConfigValidationError> {
        let defaults = ReportConfig::default();
        let config = ReportConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            top_n: self.top_n.unwrap_or(defaults.top_n),
            chart_width: self.chart_width.unwrap_or(defaults.chart_width),
            chart_height: self.chart_height.unwrap_or(defaults.chart_height),
            save_summary: self.save_summary.unwrap_or(defaults.save_summary),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.input_path, PathBuf::from("netflix_titles.csv"));
        assert_eq!(config.output_dir, PathBuf::from("graphs"));
        assert_eq!(config.top_n, 10);
        assert_eq!(config.chart_size(), (1200, 800));
        assert!(!config.save_summary);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = ReportConfig::builder()
            .input_path("data/titles.csv")
            .output_dir("out")
            .top_n(5)
            .chart_size(1600, 900)
            .save_summary(true)
            .build()
            .unwrap();

        assert_eq!(config.input_path, PathBuf::from("data/titles.csv"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.top_n, 5);
        assert_eq!(config.chart_size(), (1600, 900));
        assert!(config.save_summary);
    }

    #[test]
    fn test_validation_zero_top_n() {
        let result = ReportConfig::builder().top_n(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidTopN(0)
        ));
    }

    #[test]
    fn test_validation_tiny_chart() {
        let result = ReportConfig::builder().chart_size(100, 800).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::ChartTooSmall { ref field, value: 100 } if field == "chart_width"
        ));
    }

    #[test]
    fn test_validation_empty_output_dir() {
        let result = ReportConfig::builder().output_dir("").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyPath(ref field) if field == "output_dir"
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "input_path": "snapshot.csv",
            "output_dir": "charts",
            "top_n": 15,
            "chart_width": 1000,
            "chart_height": 700,
            "save_summary": true
        }"#;

        let config: ReportConfig = serde_json::from_str(json).expect("valid config JSON");
        assert_eq!(config.input_path, PathBuf::from("snapshot.csv"));
        assert_eq!(config.top_n, 15);
        assert_eq!(config.chart_size(), (1000, 700));
        assert!(config.validate().is_ok());
    }
}
