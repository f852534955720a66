//! CLI entry point for the catalog report.

use anyhow::{Result, anyhow};
use catalog_insights::config::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_DIR, DEFAULT_TOP_N};
use catalog_insights::reporting::{ReportSummary, format_tables};
use catalog_insights::utils::format_count;
use catalog_insights::{ReportConfig, ReportPipeline};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Media catalog report: cleans a titles CSV and draws summary charts",
    long_about = "Reads a media catalog CSV, drops incomplete rows, normalizes the \
                  date each title was added, and writes five PNG charts.\n\n\
                  EXAMPLES:\n  \
                  # Default input and output locations\n  \
                  catalog-insights\n\n  \
                  # Custom paths, keep a JSON summary next to the charts\n  \
                  catalog-insights -i data/titles.csv -o report/ --emit-summary\n\n  \
                  # Print the tables without drawing anything\n  \
                  catalog-insights --dry-run"
)]
struct Args {
    /// Path to the catalog CSV file
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// Output directory for chart images
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Number of entries in the top countries and top genres charts
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Output the run summary as JSON to stdout instead of logs
    ///
    /// Useful for piping to other tools: `... --json | jq .cleaning`
    #[arg(long)]
    json: bool,

    /// Write report_summary.json to the output directory
    #[arg(short = 'r', long)]
    emit_summary: bool,

    /// Print the aggregation tables without rendering charts
    #[arg(long)]
    dry_run: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = ReportConfig::builder()
        .input_path(&args.input)
        .output_dir(&args.output)
        .top_n(args.top_n)
        .save_summary(args.emit_summary && !args.dry_run)
        .build()?;

    let pipeline = ReportPipeline::builder().config(config).build()?;

    let result = if args.dry_run {
        pipeline.dry_run()
    } else {
        pipeline.run()
    };

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            if args.json {
                println!("{}", serde_json::json!({ "error": e }));
            }
            if e.is_input_error() {
                return Err(anyhow!("Could not prepare catalog data: {}", e));
            }
            return Err(anyhow!("Report failed: {}", e));
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if args.dry_run {
        print_dry_run(&summary);
    } else {
        info!(
            "Report complete: {} charts in {}",
            summary.charts_written.len(),
            summary.output_dir
        );
    }

    Ok(())
}

/// Print the dry-run preview.
///
/// Uses `println!` on purpose: the tables are the output of `--dry-run`
/// and must show regardless of log level.
fn print_dry_run(summary: &ReportSummary) {
    println!("\n{}", "=".repeat(60));
    println!("DRY RUN - no charts written");
    println!("{}\n", "=".repeat(60));

    println!("  File: {}", summary.input_file);
    println!(
        "  Rows: {} loaded, {} after cleaning",
        format_count(summary.rows_loaded),
        format_count(summary.cleaning.rows_after)
    );
    println!(
        "  Dropped: {} missing required fields, {} unparseable dates",
        format_count(summary.cleaning.dropped_missing),
        format_count(summary.cleaning.dropped_unparseable_dates)
    );
    println!();

    print!("{}", format_tables(&summary.aggregations));
}
