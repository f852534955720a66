//! CSV loading with fallback strategies.
//!
//! Every column is read as text: the cleaner owns all type conversion, so
//! a date column that happens to look numeric in the first rows is never
//! coerced by schema inference.

use crate::error::{ReportError, Result};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// Load the catalog table from `path`.
///
/// Tries a standard quoted read first, then an unquoted read, then a
/// pre-cleaned in-memory copy of the file. Fails with
/// [`ReportError::LoadFailed`] when the file is missing or every strategy
/// fails.
pub fn load_catalog(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(load_failed(path, "file not found"));
    }

    info!("Loading dataset from: {}", path.display());

    // Strategy 1: Standard loading with quote handling
    match read_all_text(path, true) {
        Ok(df) => return Ok(df),
        Err(e) => debug!("Standard loading failed: {}", e),
    }

    // Strategy 2: Without quote handling
    match read_all_text(path, false) {
        Ok(df) => return Ok(df),
        Err(e) => debug!("Loading without quotes failed: {}", e),
    }

    // Strategy 3: Pre-clean content
    let content = std::fs::read_to_string(path).map_err(|e| load_failed(path, e))?;
    let cleaned = clean_csv_content(&content);

    CsvReadOptions::default()
        .with_infer_schema_length(Some(0))
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(cleaned))
        .finish()
        .map_err(|e| load_failed(path, e))
}

fn read_all_text(path: &Path, quoted: bool) -> PolarsResult<DataFrame> {
    let quote_char = if quoted { Some(b'"') } else { None };

    CsvReadOptions::default()
        .with_infer_schema_length(Some(0))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(quote_char))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
}

/// Drop blank lines and collapse doubled quotes left by broken exports.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn load_failed(path: &Path, reason: impl std::fmt::Display) -> ReportError {
    ReportError::LoadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
