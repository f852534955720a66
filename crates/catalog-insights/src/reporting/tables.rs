//! Plain-text rendering of aggregation tables for dry runs.

use crate::types::{AggregationSet, CategoryCounts, CrossTab};
use crate::utils::format_count;
use std::fmt::Write;

/// Format every aggregation as an aligned text table.
pub fn format_tables(set: &AggregationSet) -> String {
    let mut out = String::new();
    push_counts(&mut out, "Content types", &set.by_type);
    push_counts(&mut out, "Top countries", &set.top_countries);
    push_counts(&mut out, "Titles added by year", &set.by_year);
    push_cross_tab(&mut out, "Genre vs type", &set.genre_by_type);
    push_counts(&mut out, "Top genres", &set.top_genres);
    out
}

fn push_counts(out: &mut String, heading: &str, counts: &CategoryCounts) {
    let _ = writeln!(out, "{heading}");
    if counts.is_empty() {
        let _ = writeln!(out, "  (none)\n");
        return;
    }

    let label_width = counts.labels().map(|l| l.chars().count()).max().unwrap_or(0);
    for (label, count) in &counts.entries {
        let _ = writeln!(out, "  {label:<label_width$}  {:>9}", format_count(*count));
    }
    out.push('\n');
}

fn push_cross_tab(out: &mut String, heading: &str, tab: &CrossTab) {
    let _ = writeln!(out, "{heading}");
    if tab.is_empty() {
        let _ = writeln!(out, "  (none)\n");
        return;
    }

    let label_width = tab
        .row_labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);
    let cell_width = tab
        .column_labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(7);

    let _ = write!(out, "  {:<label_width$}", "");
    for column in &tab.column_labels {
        let _ = write!(out, "  {column:>cell_width$}");
    }
    out.push('\n');

    for (label, row) in tab.row_labels.iter().zip(&tab.counts) {
        let _ = write!(out, "  {label:<label_width$}");
        for count in row {
            let _ = write!(out, "  {:>cell_width$}", format_count(*count));
        }
        out.push('\n');
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tables_lists_every_section() {
        let set = AggregationSet {
            by_type: CategoryCounts::new(vec![
                ("Movie".to_string(), 6131),
                ("TV Show".to_string(), 2676),
            ]),
            genre_by_type: CrossTab {
                row_labels: vec!["Dramas".to_string()],
                column_labels: vec!["Movie".to_string(), "TV Show".to_string()],
                counts: vec![vec![1, 0]],
            },
            ..Default::default()
        };

        let text = format_tables(&set);

        assert!(text.contains("Content types"));
        assert!(text.contains("6,131"));
        assert!(text.contains("Top countries\n  (none)"));
        assert!(text.contains("Genre vs type"));
        assert!(text.contains("TV Show"));
        assert!(text.contains("Top genres"));
    }

    #[test]
    fn test_cross_tab_rows_include_zeros() {
        let mut out = String::new();
        let tab = CrossTab {
            row_labels: vec!["Comedies".to_string()],
            column_labels: vec!["Movie".to_string(), "TV Show".to_string()],
            counts: vec![vec![0, 1]],
        };
        push_cross_tab(&mut out, "Grid", &tab);

        let row = out.lines().find(|l| l.contains("Comedies")).unwrap();
        let cells: Vec<&str> = row.split_whitespace().collect();
        assert_eq!(cells, vec!["Comedies", "0", "1"]);
    }
}
