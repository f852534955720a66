//! One-to-many expansion of multi-valued list fields.

use crate::error::Result;
use crate::utils::{split_list, text_series};
use polars::prelude::*;

/// Expand `column` so each of its comma-separated values gets its own row.
///
/// The returned frame holds `carry` columns (copied unchanged from the
/// source row) followed by `column` with one value per row. Rows whose list
/// is missing or blank produce no output rows. Source row order is kept,
/// and values within a row keep their listed order.
pub fn explode_list_column(df: &DataFrame, column: &str, carry: &[&str]) -> Result<DataFrame> {
    let lists = text_series(df, column)?;

    let mut source_rows: Vec<IdxSize> = Vec::with_capacity(lists.len());
    let mut values: Vec<&str> = Vec::with_capacity(lists.len());

    for (row, list) in lists.str()?.into_iter().enumerate() {
        let Some(list) = list else { continue };
        for value in split_list(list) {
            source_rows.push(row as IdxSize);
            values.push(value);
        }
    }

    let values = Series::new(column.into(), values);
    if carry.is_empty() {
        return Ok(DataFrame::new(vec![values.into()])?);
    }

    let indices = IdxCa::from_vec("row".into(), source_rows);
    let mut exploded = df.select(carry.iter().copied())?.take(&indices)?;
    exploded.with_column(values)?;

    Ok(exploded)
}
