//! Shared utilities for the report pipeline.
//!
//! Column access helpers used by both the cleaner and the aggregators, plus
//! the list-field splitting rule every exploded view relies on.

use crate::error::{ReportError, Result};
use polars::prelude::*;

// =============================================================================
// Column Access Utilities
// =============================================================================

/// Fetch a column or fail with [`ReportError::ColumnNotFound`].
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| ReportError::ColumnNotFound(name.to_string()))
}

/// Fetch a column as a String series, casting if the loader inferred
/// another type.
pub fn text_series(df: &DataFrame, name: &str) -> Result<Series> {
    let series = require_column(df, name)?.as_materialized_series();
    if series.dtype() == &DataType::String {
        Ok(series.clone())
    } else {
        Ok(series.cast(&DataType::String)?)
    }
}

// =============================================================================
// String Utilities
// =============================================================================

/// Separator between values of a multi-valued field.
pub const LIST_SEPARATOR: char = ',';

/// True for empty or whitespace-only text.
#[inline]
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Split a multi-valued field into its trimmed, non-empty values.
///
/// `"United States, India"` yields `["United States", "India"]`; a trailing
/// separator (`"France,"`) does not produce an empty value.
pub fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

/// Format a count with thousands separators (`12345` -> `"12,345"`).
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
