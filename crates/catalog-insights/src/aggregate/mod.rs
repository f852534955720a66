//! Aggregations over the cleaned catalog table.
//!
//! Every aggregation is a read-only function of the cleaned table that
//! returns labels with counts in the order the chart draws them:
//!
//! | Aggregation      | Source                         | Order                  |
//! |------------------|--------------------------------|------------------------|
//! | by type          | `type`                         | first seen             |
//! | top countries    | exploded `country`             | count desc, top N      |
//! | by year          | `year_added`                   | year ascending         |
//! | genre × type     | exploded `listed_in` × `type`  | labels ascending       |
//! | top genres       | exploded `listed_in`           | count desc, top N      |
//!
//! Both genre aggregations read the same exploded genre view, so rows with
//! a missing `listed_in` are excluded identically from each.

mod counter;
mod explode;

pub use explode::explode_list_column;

use crate::error::{ReportError, Result};
use crate::types::{
    AggregationSet, COUNTRY_COLUMN, CategoryCounts, CrossTab, GENRES_COLUMN, TYPE_COLUMN,
    YEAR_ADDED_COLUMN,
};
use crate::utils::{require_column, text_series};
use counter::FirstSeenCounter;
use polars::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Count rows per content type.
pub fn count_by_type(df: &DataFrame) -> Result<CategoryCounts> {
    let types = text_series(df, TYPE_COLUMN)?;
    let counter: FirstSeenCounter = types.str()?.into_iter().flatten().collect();
    Ok(counter.into_counts())
}

/// The `n` countries with the most titles, counting every listed country
/// of a co-production once.
pub fn top_countries(df: &DataFrame, n: usize) -> Result<CategoryCounts> {
    let exploded = explode_list_column(df, COUNTRY_COLUMN, &[])?;
    let countries = text_series(&exploded, COUNTRY_COLUMN)?;
    let counter: FirstSeenCounter = countries.str()?.into_iter().flatten().collect();
    Ok(counter.into_top(n))
}

/// Count rows per `year_added`, ascending by year.
pub fn count_by_year(df: &DataFrame) -> Result<CategoryCounts> {
    let years = require_column(df, YEAR_ADDED_COLUMN)?
        .as_materialized_series()
        .cast(&DataType::Int32)?;

    let mut per_year: BTreeMap<i32, usize> = BTreeMap::new();
    for year in years.i32()?.into_iter().flatten() {
        *per_year.entry(year).or_insert(0) += 1;
    }

    Ok(CategoryCounts::new(
        per_year
            .into_iter()
            .map(|(year, count)| (year.to_string(), count))
            .collect(),
    ))
}

/// The exploded genre view: one `(type, listed_in)` row per listed genre.
pub fn genre_view(df: &DataFrame) -> Result<DataFrame> {
    explode_list_column(df, GENRES_COLUMN, &[TYPE_COLUMN])
}

/// Dense genre × type grid over an exploded genre view.
///
/// Rows are genres and columns are types, both sorted ascending; pairs that
/// never occur are explicit zeros.
pub fn genre_by_type(genres: &DataFrame) -> Result<CrossTab> {
    let genre_values = text_series(genres, GENRES_COLUMN)?;
    let type_values = text_series(genres, TYPE_COLUMN)?;

    let mut pairs: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    let mut genre_labels: BTreeSet<&str> = BTreeSet::new();
    let mut type_labels: BTreeSet<&str> = BTreeSet::new();

    for (genre, kind) in genre_values
        .str()?
        .into_iter()
        .zip(type_values.str()?.into_iter())
    {
        let (Some(genre), Some(kind)) = (genre, kind) else {
            continue;
        };
        genre_labels.insert(genre);
        type_labels.insert(kind);
        *pairs.entry((genre, kind)).or_insert(0) += 1;
    }

    let counts = genre_labels
        .iter()
        .map(|genre| {
            type_labels
                .iter()
                .map(|kind| pairs.get(&(*genre, *kind)).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    Ok(CrossTab {
        row_labels: genre_labels.into_iter().map(str::to_string).collect(),
        column_labels: type_labels.into_iter().map(str::to_string).collect(),
        counts,
    })
}

/// The `n` most frequent genres over an exploded genre view.
pub fn top_genres(genres: &DataFrame, n: usize) -> Result<CategoryCounts> {
    let genre_values = text_series(genres, GENRES_COLUMN)?;
    let counter: FirstSeenCounter = genre_values.str()?.into_iter().flatten().collect();
    Ok(counter.into_top(n))
}

/// Run every aggregation over the cleaned table.
///
/// Failures name the aggregation they came from.
pub fn aggregate_all(df: &DataFrame, top_n: usize) -> Result<AggregationSet> {
    let by_type = count_by_type(df).map_err(|e| failed("content_type_distribution", e))?;
    let top_countries = top_countries(df, top_n).map_err(|e| failed("top_countries", e))?;
    let by_year = count_by_year(df).map_err(|e| failed("content_added_by_year", e))?;

    let genres = genre_view(df).map_err(|e| failed("genre_view", e))?;
    debug!("Exploded genre view: {} rows", genres.height());

    let genre_by_type = genre_by_type(&genres).map_err(|e| failed("genre_vs_type_heatmap", e))?;
    let top_genres = top_genres(&genres, top_n).map_err(|e| failed("top_10_genres", e))?;

    Ok(AggregationSet {
        by_type,
        top_countries,
        by_year,
        genre_by_type,
        top_genres,
    })
}

fn failed(chart: &str, err: ReportError) -> ReportError {
    ReportError::AggregationFailed {
        chart: chart.to_string(),
        reason: err.to_string(),
    }
}
