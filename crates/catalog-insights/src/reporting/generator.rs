use crate::error::Result;
use crate::types::{AggregationSet, CleaningSummary};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the summary written next to the charts.
pub const SUMMARY_FILE_NAME: &str = "report_summary.json";

/// Everything a run produced, suitable for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Timestamp when the summary was generated
    pub generated_at: String,
    pub input_file: String,
    pub output_dir: String,
    /// Shape of the table as read, before cleaning
    pub rows_loaded: usize,
    pub columns_loaded: usize,
    pub cleaning: CleaningSummary,
    pub aggregations: AggregationSet,
    /// Chart files written, in drawing order (empty for a dry run)
    pub charts_written: Vec<String>,
    pub duration_ms: u64,
}

/// Inputs for [`ReportGenerator::build_summary`].
#[derive(Debug, Clone, Copy)]
pub struct SummaryParams<'a> {
    pub input_file: &'a Path,
    pub rows_loaded: usize,
    pub columns_loaded: usize,
    pub cleaning: &'a CleaningSummary,
    pub aggregations: &'a AggregationSet,
    pub charts_written: &'a [PathBuf],
    pub duration_ms: u64,
}

/// Builds run summaries and writes them into the output directory.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn build_summary(&self, params: SummaryParams<'_>) -> ReportSummary {
        let SummaryParams {
            input_file,
            rows_loaded,
            columns_loaded,
            cleaning,
            aggregations,
            charts_written,
            duration_ms,
        } = params;

        ReportSummary {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.display().to_string(),
            output_dir: self.output_dir.display().to_string(),
            rows_loaded,
            columns_loaded,
            cleaning: cleaning.clone(),
            aggregations: aggregations.clone(),
            charts_written: charts_written
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            duration_ms,
        }
    }

    /// Write `summary` as pretty JSON to `report_summary.json`, replacing
    /// any previous file.
    pub fn write_summary_to_file(&self, summary: &ReportSummary) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let summary_path = self.output_dir.join(SUMMARY_FILE_NAME);
        let mut file = File::create(&summary_path)?;
        file.write_all(serde_json::to_string_pretty(summary)?.as_bytes())?;

        info!("Summary saved: {}", summary_path.display());

        Ok(summary_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CategoryCounts;

    fn params<'a>(
        cleaning: &'a CleaningSummary,
        aggregations: &'a AggregationSet,
        charts: &'a [PathBuf],
    ) -> SummaryParams<'a> {
        SummaryParams {
            input_file: Path::new("titles.csv"),
            rows_loaded: 3,
            columns_loaded: 4,
            cleaning,
            aggregations,
            charts_written: charts,
            duration_ms: 12,
        }
    }

    #[test]
    fn test_build_summary_copies_results() {
        let cleaning = CleaningSummary {
            rows_before: 3,
            dropped_missing: 1,
            dropped_unparseable_dates: 0,
            rows_after: 2,
            columns_after: 5,
        };
        let aggregations = AggregationSet {
            by_type: CategoryCounts::new(vec![("Movie".to_string(), 2)]),
            ..Default::default()
        };
        let charts = vec![PathBuf::from("graphs/top_countries.png")];

        let generator = ReportGenerator::new(PathBuf::from("graphs"));
        let summary = generator.build_summary(params(&cleaning, &aggregations, &charts));

        assert_eq!(summary.input_file, "titles.csv");
        assert_eq!(summary.output_dir, "graphs");
        assert_eq!(summary.cleaning.dropped_missing, 1);
        assert_eq!(summary.aggregations.by_type.get("Movie"), Some(2));
        assert_eq!(summary.charts_written, vec!["graphs/top_countries.png"]);
        assert!(!summary.generated_at.is_empty());
    }

    #[test]
    fn test_write_summary_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let generator = ReportGenerator::new(out.clone());

        let cleaning = CleaningSummary::default();
        let aggregations = AggregationSet::default();
        let summary = generator.build_summary(params(&cleaning, &aggregations, &[]));

        let path = generator.write_summary_to_file(&summary).unwrap();
        assert_eq!(path, out.join(SUMMARY_FILE_NAME));

        let written: ReportSummary =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.rows_loaded, 3);
        assert_eq!(written.duration_ms, 12);
    }
}
