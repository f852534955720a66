//! Data cleaning for the catalog table.
//!
//! The cleaner is the only stage that changes the table. It:
//! - Removes rows missing `type`, `country` or `date_added`
//! - Normalizes `date_added` from mixed text formats to a `Date`
//! - Removes rows whose date matched no known format
//! - Derives `year_added` from the normalized date

mod dates;

pub use dates::{
    DATE_FORMATS, DATETIME_FORMATS, MONTH_YEAR_FORMATS, days_since_epoch, parse_date_added,
};

use crate::error::{ReportError, Result, ResultExt};
use crate::types::{CleaningSummary, DATE_ADDED_COLUMN, REQUIRED_COLUMNS, YEAR_ADDED_COLUMN};
use crate::utils::{is_blank, require_column, text_series};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use tracing::{debug, info, warn};

/// Cleaner for the raw catalog table.
pub struct CatalogCleaner;

impl CatalogCleaner {
    /// Clean a raw table.
    ///
    /// Steps, in order:
    /// 1. Drop rows with a missing (or blank) required field
    /// 2. Trim and parse `date_added`
    /// 3. Drop rows with an unparseable date, warning with the count
    /// 4. Derive `year_added`
    ///
    /// A missing required column fails with [`ReportError::ColumnNotFound`];
    /// any other failure is reported as [`ReportError::CleaningFailed`].
    pub fn clean(&self, df: DataFrame) -> Result<(DataFrame, CleaningSummary)> {
        for column in REQUIRED_COLUMNS {
            require_column(&df, column)?;
        }

        self.clean_internal(df).map_err(|e| match e {
            ReportError::ColumnNotFound(_) | ReportError::CleaningFailed(_) => e,
            other => ReportError::CleaningFailed(other.to_string()),
        })
    }

    fn clean_internal(&self, df: DataFrame) -> Result<(DataFrame, CleaningSummary)> {
        let mut summary = CleaningSummary {
            rows_before: df.height(),
            ..CleaningSummary::default()
        };

        info!("Cleaning dataset...");

        // 1. Drop rows missing any required field
        let present = self.required_fields_mask(&df)?;
        let df = df.filter(&present).context("Dropping incomplete rows")?;
        summary.dropped_missing = summary.rows_before - df.height();
        debug!(
            "Removed {} rows with missing required fields",
            summary.dropped_missing
        );

        // 2. Parse the trimmed date text
        let raw_dates = text_series(&df, DATE_ADDED_COLUMN)?;
        let parsed: Vec<Option<NaiveDate>> = raw_dates
            .str()?
            .into_iter()
            .map(|opt| opt.and_then(|v| parse_date_added(v.trim())))
            .collect();

        // 3. Drop rows whose date could not be parsed
        let parsed_mask = Series::new(
            "parsed".into(),
            parsed.iter().map(Option::is_some).collect::<Vec<bool>>(),
        );
        let mut df = df
            .filter(parsed_mask.bool()?)
            .context("Dropping unparseable dates")?;
        let dates: Vec<NaiveDate> = parsed.into_iter().flatten().collect();

        summary.dropped_unparseable_dates = raw_dates.len() - dates.len();
        if summary.dropped_unparseable_dates > 0 {
            warn!(
                "Dropped {} rows with unparseable dates",
                summary.dropped_unparseable_dates
            );
        }

        // 4. Replace the text column with normalized dates and add the year
        let days: Vec<i32> = dates.iter().map(|d| days_since_epoch(*d)).collect();
        let years: Vec<i32> = dates.iter().map(|d| d.year()).collect();

        let date_series = Series::new(DATE_ADDED_COLUMN.into(), days)
            .cast(&DataType::Date)
            .context("Normalizing date_added")?;
        df.replace(DATE_ADDED_COLUMN, date_series)?;
        df.with_column(Series::new(YEAR_ADDED_COLUMN.into(), years))?;

        summary.rows_after = df.height();
        summary.columns_after = df.width();

        info!("Data cleaned: {:?}", df.shape());
        Ok((df, summary))
    }

    /// Row mask that is true where every required field holds non-blank text.
    fn required_fields_mask(&self, df: &DataFrame) -> Result<BooleanChunked> {
        let mut keep = vec![true; df.height()];

        for column in REQUIRED_COLUMNS {
            let series = text_series(df, column)?;
            for (slot, value) in keep.iter_mut().zip(series.str()?.into_iter()) {
                if value.is_none_or(is_blank) {
                    *slot = false;
                }
            }
        }

        Ok(Series::new("present".into(), keep).bool()?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{COUNTRY_COLUMN, GENRES_COLUMN, TYPE_COLUMN};
    use pretty_assertions::assert_eq;

    fn year_values(df: &DataFrame) -> Vec<Option<i32>> {
        df.column(YEAR_ADDED_COLUMN)
            .unwrap()
            .as_materialized_series()
            .i32()
            .unwrap()
            .into_iter()
            .collect()
    }

    fn sample_frame() -> DataFrame {
        df![
            TYPE_COLUMN => [Some("Movie"), Some("TV Show"), Some("Movie"), None, Some("Movie")],
            COUNTRY_COLUMN => [Some("US, UK"), Some("US"), None, Some("India"), Some("France")],
            DATE_ADDED_COLUMN => [
                Some("September 9, 2019"),
                Some(" 2021-01-15 "),
                Some("bad-date"),
                Some("2020-05-01"),
                Some("sometime soon"),
            ],
            GENRES_COLUMN => [Some("Dramas"), Some("Dramas, Comedies"), Some("Comedies"), None, None],
        ]
        .unwrap()
    }

    #[test]
    fn test_clean_drops_missing_and_unparseable() {
        let (df, summary) = CatalogCleaner.clean(sample_frame()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(
            summary,
            CleaningSummary {
                rows_before: 5,
                dropped_missing: 2,
                dropped_unparseable_dates: 1,
                rows_after: 2,
                columns_after: 5,
            }
        );
        assert_eq!(year_values(&df), vec![Some(2019), Some(2021)]);
    }

    #[test]
    fn test_clean_converts_date_column() {
        let (df, _) = CatalogCleaner.clean(sample_frame()).unwrap();
        assert_eq!(df.column(DATE_ADDED_COLUMN).unwrap().dtype(), &DataType::Date);
    }

    #[test]
    fn test_clean_invariants_hold() {
        let (df, _) = CatalogCleaner.clean(sample_frame()).unwrap();
        for column in [TYPE_COLUMN, COUNTRY_COLUMN, DATE_ADDED_COLUMN, YEAR_ADDED_COLUMN] {
            assert_eq!(df.column(column).unwrap().null_count(), 0, "nulls in {column}");
        }
    }

    #[test]
    fn test_missing_country_never_reaches_date_parsing() {
        let df = df![
            TYPE_COLUMN => [Some("Movie")],
            COUNTRY_COLUMN => [None::<&str>],
            DATE_ADDED_COLUMN => [Some("bad-date")],
            GENRES_COLUMN => [Some("Comedies")],
        ]
        .unwrap();

        let (df, summary) = CatalogCleaner.clean(df).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(summary.dropped_missing, 1);
        assert_eq!(summary.dropped_unparseable_dates, 0);
    }

    #[test]
    fn test_blank_required_field_counts_as_missing() {
        let df = df![
            TYPE_COLUMN => ["Movie", "Movie"],
            COUNTRY_COLUMN => ["   ", "Japan"],
            DATE_ADDED_COLUMN => ["2019-01-01", "2019-01-01"],
        ]
        .unwrap();

        let (df, summary) = CatalogCleaner.clean(df).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(summary.dropped_missing, 1);
    }

    #[test]
    fn test_missing_genres_survive() {
        let df = df![
            TYPE_COLUMN => ["Movie"],
            COUNTRY_COLUMN => ["Japan"],
            DATE_ADDED_COLUMN => ["March 3, 2020"],
            GENRES_COLUMN => [None::<&str>],
        ]
        .unwrap();

        let (df, _) = CatalogCleaner.clean(df).unwrap();
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn test_each_bad_date_counts_once() {
        let df = df![
            TYPE_COLUMN => ["Movie", "Movie", "Movie"],
            COUNTRY_COLUMN => ["US", "US", "US"],
            DATE_ADDED_COLUMN => ["2019-01-01", "not a date", "31/31/2019"],
        ]
        .unwrap();

        let (_, summary) = CatalogCleaner.clean(df).unwrap();
        assert_eq!(summary.dropped_unparseable_dates, 2);
    }

    #[test]
    fn test_missing_required_column_fails() {
        let df = df![
            TYPE_COLUMN => ["Movie"],
            DATE_ADDED_COLUMN => ["2019-01-01"],
        ]
        .unwrap();

        let err = CatalogCleaner.clean(df).unwrap_err();
        assert!(matches!(err, ReportError::ColumnNotFound(ref c) if c == COUNTRY_COLUMN));
    }
}
