//! Chart rendering with plotters.
//!
//! Every chart the report produces is described by a [`ChartKind`]: its
//! fixed output file name, its title and axis descriptions, and how its
//! bars are colored. [`ChartRenderer`] turns an [`AggregationSet`] into
//! the five PNG files under an output directory.

mod bars;
mod heatmap;
mod palette;

pub use bars::{BarChartStyle, Orientation, draw_bar_chart};
pub use heatmap::{draw_heatmap, heatmap_size};
pub use palette::{Palette, SKY_BLUE, heat_color, is_dark};

use crate::types::{AggregationSet, CategoryCounts};
use plotters::prelude::SegmentValue;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while drawing a chart.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save chart file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data for plotting: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, PlotError>;

/// The charts in a report, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    ContentType,
    TopCountries,
    ByYear,
    GenreByType,
    TopGenres,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::ContentType,
        ChartKind::TopCountries,
        ChartKind::ByYear,
        ChartKind::GenreByType,
        ChartKind::TopGenres,
    ];

    /// Stable name, also the output file stem.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ContentType => "content_type_distribution",
            Self::TopCountries => "top_countries",
            Self::ByYear => "content_added_by_year",
            Self::GenreByType => "genre_vs_type_heatmap",
            Self::TopGenres => "top_10_genres",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self.name())
    }

    /// Chart caption; the top-N charts name how many entries they show.
    pub fn title(&self, top_n: usize) -> String {
        match self {
            Self::ContentType => "Catalog Content: Movies vs TV Shows".to_string(),
            Self::TopCountries => format!("Top {top_n} Countries with Most Content"),
            Self::ByYear => "Content Added by Year".to_string(),
            Self::GenreByType => "Genre-wise Movie vs TV Show Distribution".to_string(),
            Self::TopGenres => format!("Top {top_n} Most Common Genres"),
        }
    }

    /// Bar layout under `title`, or `None` for the heatmap.
    fn bar_style<'a>(&self, title: &'a str) -> Option<BarChartStyle<'a>> {
        let style = match self {
            Self::ContentType => BarChartStyle {
                title,
                category_desc: "Content Type",
                value_desc: "Count",
                orientation: Orientation::Vertical,
                palette: Palette::Qualitative,
                annotate: true,
            },
            Self::TopCountries => BarChartStyle {
                title,
                category_desc: "Country",
                value_desc: "Number of Titles",
                orientation: Orientation::Horizontal,
                palette: Palette::Viridis,
                annotate: true,
            },
            Self::ByYear => BarChartStyle {
                title,
                category_desc: "Year",
                value_desc: "Number of Titles",
                orientation: Orientation::Vertical,
                palette: Palette::Solid(SKY_BLUE),
                annotate: false,
            },
            Self::TopGenres => BarChartStyle {
                title,
                category_desc: "Genre",
                value_desc: "Number of Titles",
                orientation: Orientation::Horizontal,
                palette: Palette::Mako,
                annotate: false,
            },
            Self::GenreByType => return None,
        };
        Some(style)
    }

    /// The bar data this chart draws from `set`, or `None` for the heatmap.
    fn counts<'a>(&self, set: &'a AggregationSet) -> Option<&'a CategoryCounts> {
        match self {
            Self::ContentType => Some(&set.by_type),
            Self::TopCountries => Some(&set.top_countries),
            Self::ByYear => Some(&set.by_year),
            Self::TopGenres => Some(&set.top_genres),
            Self::GenreByType => None,
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Draws report charts into one output directory.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    output_dir: PathBuf,
    size: (u32, u32),
    top_n: usize,
}

impl ChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, size: (u32, u32), top_n: usize) -> Self {
        Self {
            output_dir: output_dir.into(),
            size,
            top_n,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn path_for(&self, kind: ChartKind) -> PathBuf {
        self.output_dir.join(kind.file_name())
    }

    /// Draw one chart from `set`, overwriting any previous file.
    pub fn render(&self, kind: ChartKind, set: &AggregationSet) -> Result<PathBuf> {
        let path = self.path_for(kind);
        debug!("Rendering {} to {}", kind, path.display());

        let title = kind.title(self.top_n);
        match (kind.bar_style(&title), kind.counts(set)) {
            (Some(style), Some(counts)) => draw_bar_chart(counts, &style, self.size, &path)?,
            _ => draw_heatmap(&set.genre_by_type, &title, self.size, &path)?,
        }

        Ok(path)
    }
}

/// Axis label for segment `v` over `labels` in index order.
pub(crate) fn segment_label(v: &SegmentValue<i32>, labels: &[&str]) -> String {
    match v {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| labels.get(i))
            .map(|s| s.to_string())
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    }
}

/// Axis label for segment `v` when `labels[0]` sits in the last segment.
pub(crate) fn reversed_segment_label(v: &SegmentValue<i32>, labels: &[&str]) -> String {
    match v {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
            let Ok(i) = usize::try_from(*i) else {
                return String::new();
            };
            labels
                .len()
                .checked_sub(i + 1)
                .and_then(|j| labels.get(j))
                .map(|s| s.to_string())
                .unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    }
}
