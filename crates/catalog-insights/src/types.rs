use serde::{Deserialize, Serialize};

/// Column holding the content type ("Movie" / "TV Show").
pub const TYPE_COLUMN: &str = "type";
/// Comma-separated list of production countries.
pub const COUNTRY_COLUMN: &str = "country";
/// Free-form date text; normalized to a `Date` by the cleaner.
pub const DATE_ADDED_COLUMN: &str = "date_added";
/// Comma-separated list of genre labels.
pub const GENRES_COLUMN: &str = "listed_in";
/// Calendar year derived from the normalized `date_added`.
pub const YEAR_ADDED_COLUMN: &str = "year_added";

/// Columns a row must have a value in to survive cleaning.
pub const REQUIRED_COLUMNS: [&str; 3] = [TYPE_COLUMN, COUNTRY_COLUMN, DATE_ADDED_COLUMN];

/// An ordered sequence of `(label, count)` pairs.
///
/// Order is meaningful: it is the order the chart draws the bars in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub entries: Vec<(String, usize)>,
}

impl CategoryCounts {
    pub fn new(entries: Vec<(String, usize)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count for `label`, or `None` if it never appeared.
    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, count)| *count)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    /// Largest count, 0 when empty.
    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|(_, c)| *c).max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| *c).sum()
    }
}

/// Dense cross-tabulation of counts.
///
/// Every row label pairs with every column label; combinations that never
/// occurred hold an explicit 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossTab {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    /// `counts[row][column]`
    pub counts: Vec<Vec<usize>>,
}

impl CrossTab {
    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty() || self.column_labels.is_empty()
    }

    pub fn get(&self, row: &str, column: &str) -> Option<usize> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        let c = self.column_labels.iter().position(|l| l == column)?;
        Some(self.counts[r][c])
    }

    pub fn max_count(&self) -> usize {
        self.counts
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// What the cleaner removed and kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningSummary {
    pub rows_before: usize,
    /// Rows discarded for a missing `type`, `country` or `date_added`.
    pub dropped_missing: usize,
    /// Rows discarded because `date_added` matched no known format.
    pub dropped_unparseable_dates: usize,
    pub rows_after: usize,
    pub columns_after: usize,
}

/// Every aggregation the report draws.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationSet {
    pub by_type: CategoryCounts,
    pub top_countries: CategoryCounts,
    pub by_year: CategoryCounts,
    pub genre_by_type: CrossTab,
    pub top_genres: CategoryCounts,
}
