//! The report pipeline and its builder.

use crate::aggregate::aggregate_all;
use crate::cleaner::CatalogCleaner;
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::loader::load_catalog;
use crate::pipeline::progress::{
    ClosureProgressReporter, ProgressReporter, ProgressUpdate, ReportStage,
};
use crate::render::{ChartKind, ChartRenderer};
use crate::reporting::{ReportGenerator, ReportSummary, SummaryParams};
use crate::types::{AggregationSet, CleaningSummary};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Loads, cleans and aggregates a catalog, then draws the report charts.
///
/// Use [`ReportPipeline::builder()`] to create one.
///
/// # Example
///
/// ```rust,ignore
/// use catalog_insights::{ReportConfig, ReportPipeline};
///
/// let config = ReportConfig::builder()
///     .input_path("titles.csv")
///     .output_dir("graphs")
///     .build()?;
///
/// let summary = ReportPipeline::builder().config(config).build()?.run()?;
/// println!("{} charts written", summary.charts_written.len());
/// ```
pub struct ReportPipeline {
    config: ReportConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    cleaner: CatalogCleaner,
    renderer: ChartRenderer,
    reporter: ReportGenerator,
}

/// Output of the load, clean and aggregate stages.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub rows_loaded: usize,
    pub columns_loaded: usize,
    pub cleaning: CleaningSummary,
    pub aggregations: AggregationSet,
}

impl ReportPipeline {
    pub fn builder() -> ReportPipelineBuilder {
        ReportPipelineBuilder::default()
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Run every stage and write all five charts.
    ///
    /// Aborts on the first failure; charts saved before it stay on disk.
    pub fn run(&self) -> Result<ReportSummary> {
        let mut stage = ReportStage::Initializing;
        let result = self.run_internal(&mut stage, true);
        self.finish(stage, result)
    }

    /// Load, clean and aggregate without drawing anything.
    pub fn dry_run(&self) -> Result<ReportSummary> {
        let mut stage = ReportStage::Initializing;
        let result = self.run_internal(&mut stage, false);
        self.finish(stage, result)
    }

    /// Load, clean and aggregate the configured input.
    pub fn analyze(&self) -> Result<Analysis> {
        let mut stage = ReportStage::Loading;
        self.analyze_internal(&mut stage)
    }

    fn finish(&self, stage: ReportStage, result: Result<ReportSummary>) -> Result<ReportSummary> {
        match result {
            Ok(summary) => {
                self.report_progress(ProgressUpdate::complete(format!(
                    "Report completed: {} charts written",
                    summary.charts_written.len()
                )));
                Ok(summary)
            }
            Err(e) => {
                error!("Report failed during {}: {}", stage.display_name(), e);
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                Err(e)
            }
        }
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn enter(&self, stage: &mut ReportStage, next: ReportStage, message: impl Into<String>) {
        *stage = next;
        self.report_progress(ProgressUpdate::new(next, message));
    }

    fn run_internal(&self, stage: &mut ReportStage, render: bool) -> Result<ReportSummary> {
        let start_time = Instant::now();

        if render {
            self.enter(stage, ReportStage::Initializing, "Preparing output directory");
            fs::create_dir_all(self.renderer.output_dir())?;
            debug!("Output directory: {}", self.renderer.output_dir().display());
        }

        let analysis = self.analyze_internal(stage)?;

        let charts_written = if render {
            self.render_all(stage, &analysis.aggregations)?
        } else {
            Vec::new()
        };

        self.enter(stage, ReportStage::Summarizing, "Assembling run summary");
        let summary = self.reporter.build_summary(SummaryParams {
            input_file: &self.config.input_path,
            rows_loaded: analysis.rows_loaded,
            columns_loaded: analysis.columns_loaded,
            cleaning: &analysis.cleaning,
            aggregations: &analysis.aggregations,
            charts_written: &charts_written,
            duration_ms: start_time.elapsed().as_millis() as u64,
        });

        if self.config.save_summary {
            self.reporter.write_summary_to_file(&summary)?;
        }

        Ok(summary)
    }

    fn analyze_internal(&self, stage: &mut ReportStage) -> Result<Analysis> {
        self.enter(
            stage,
            ReportStage::Loading,
            format!("Loading {}", self.config.input_path.display()),
        );
        let raw = load_catalog(&self.config.input_path)?;
        let (rows_loaded, columns_loaded) = raw.shape();
        info!("Data loaded: {:?}", (rows_loaded, columns_loaded));

        self.enter(stage, ReportStage::Cleaning, "Cleaning data");
        let (cleaned, cleaning) = self.cleaner.clean(raw)?;

        self.enter(stage, ReportStage::Aggregating, "Computing aggregations");
        let aggregations = aggregate_all(&cleaned, self.config.top_n)?;

        Ok(Analysis {
            rows_loaded,
            columns_loaded,
            cleaning,
            aggregations,
        })
    }

    fn render_all(&self, stage: &mut ReportStage, set: &AggregationSet) -> Result<Vec<PathBuf>> {
        self.enter(stage, ReportStage::Rendering, "Rendering charts");

        let total = ChartKind::ALL.len();
        let mut written = Vec::with_capacity(total);

        for (i, kind) in ChartKind::ALL.into_iter().enumerate() {
            let path = self
                .renderer
                .render(kind, set)
                .map_err(|source| ReportError::RenderFailed {
                    chart: kind.name().to_string(),
                    source,
                })?;

            info!("Chart saved: {}", path.display());
            self.report_progress(ProgressUpdate::with_items(
                ReportStage::Rendering,
                i + 1,
                total,
                format!("Chart saved: {}", kind.file_name()),
            ));
            written.push(path);
        }

        Ok(written)
    }
}

/// Builder for [`ReportPipeline`].
#[derive(Default)]
pub struct ReportPipelineBuilder {
    config: Option<ReportConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl ReportPipelineBuilder {
    /// Set the run configuration. Defaults to [`ReportConfig::default()`].
    pub fn config(mut self, config: ReportConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving updates during the run.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline, validating the configuration.
    pub fn build(self) -> Result<ReportPipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let renderer = ChartRenderer::new(
            config.output_dir.clone(),
            config.chart_size(),
            config.top_n,
        );
        let reporter = ReportGenerator::new(config.output_dir.clone());

        Ok(ReportPipeline {
            config,
            progress_reporter: self.progress_reporter,
            cleaner: CatalogCleaner,
            renderer,
            reporter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn write_csv(dir: &std::path::Path, body: &str) -> PathBuf {
        let path = dir.join("titles.csv");
        fs::write(&path, body).unwrap();
        path
    }

    const SAMPLE: &str = "\
show_id,type,title,country,date_added,listed_in
s1,Movie,A,United States,\"September 25, 2021\",Dramas
s2,TV Show,B,\"United States, United Kingdom\",\" August 4, 2020\",\"Dramas, Comedies\"
s3,Movie,C,,\"July 1, 2019\",Comedies
";

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = ReportConfig {
            top_n: 0,
            ..Default::default()
        };
        let result = ReportPipeline::builder().config(config).build();
        assert!(matches!(result, Err(ReportError::InvalidConfig(_))));
    }

    #[test]
    fn test_analyze_sample() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_csv(dir.path(), SAMPLE);
        let config = ReportConfig::builder()
            .input_path(input)
            .output_dir(dir.path().join("graphs"))
            .build()
            .unwrap();

        let analysis = ReportPipeline::builder()
            .config(config)
            .build()
            .unwrap()
            .analyze()
            .unwrap();

        assert_eq!(analysis.rows_loaded, 3);
        assert_eq!(analysis.cleaning.dropped_missing, 1);
        assert_eq!(analysis.cleaning.dropped_unparseable_dates, 0);
        assert_eq!(analysis.aggregations.by_type.get("Movie"), Some(1));
        assert_eq!(analysis.aggregations.by_type.get("TV Show"), Some(1));
        assert_eq!(analysis.aggregations.top_countries.get("United States"), Some(2));
        assert_eq!(analysis.aggregations.top_countries.get("United Kingdom"), Some(1));
        assert_eq!(analysis.aggregations.genre_by_type.get("Comedies", "Movie"), Some(0));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_csv(dir.path(), SAMPLE);
        let output = dir.path().join("graphs");
        let config = ReportConfig::builder()
            .input_path(input)
            .output_dir(&output)
            .build()
            .unwrap();

        let summary = ReportPipeline::builder()
            .config(config)
            .build()
            .unwrap()
            .dry_run()
            .unwrap();

        assert!(summary.charts_written.is_empty());
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_reports_failed_stage() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::builder()
            .input_path(dir.path().join("absent.csv"))
            .output_dir(dir.path().join("graphs"))
            .build()
            .unwrap();

        let stages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&stages);

        let result = ReportPipeline::builder()
            .config(config)
            .on_progress(move |update| sink.lock().unwrap().push(update.stage))
            .build()
            .unwrap()
            .run();

        assert!(matches!(result, Err(ReportError::LoadFailed { .. })));
        let stages = stages.lock().unwrap();
        assert_eq!(stages.first(), Some(&ReportStage::Initializing));
        assert_eq!(stages.last(), Some(&ReportStage::Failed));
        assert!(!stages.contains(&ReportStage::Rendering));
    }
}
