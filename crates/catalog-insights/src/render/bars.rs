//! Vertical and horizontal bar charts over labeled counts.

use super::palette::Palette;
use super::{PlotError, Result, reversed_segment_label, segment_label};
use crate::types::CategoryCounts;
use crate::utils::format_count;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// Direction the bars grow in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Categories along the X axis, left to right.
    Vertical,
    /// Categories along the Y axis, first entry at the top.
    Horizontal,
}

/// Presentation of one bar chart.
#[derive(Debug, Clone, Copy)]
pub struct BarChartStyle<'a> {
    pub title: &'a str,
    pub category_desc: &'a str,
    pub value_desc: &'a str,
    pub orientation: Orientation,
    pub palette: Palette,
    /// Print each bar's exact count at its end.
    pub annotate: bool,
}

/// Draw `counts` as a bar chart and save it as a PNG at `output_path`.
///
/// Bars appear in the order of `counts`. Empty input is rejected before
/// any file is created.
pub fn draw_bar_chart(
    counts: &CategoryCounts,
    style: &BarChartStyle<'_>,
    size: (u32, u32),
    output_path: &Path,
) -> Result<()> {
    if counts.is_empty() {
        return Err(PlotError::InvalidData(format!(
            "'{}' has no bars to draw",
            style.title
        )));
    }

    match style.orientation {
        Orientation::Vertical => draw_vertical(counts, style, size, output_path),
        Orientation::Horizontal => draw_horizontal(counts, style, size, output_path),
    }
}

/// Upper end of the value axis, leaving headroom for annotations.
pub(crate) fn value_axis_max(counts: &CategoryCounts, annotate: bool) -> f64 {
    let max = counts.max_count().max(1) as f64;
    if annotate { max * 1.15 } else { max * 1.05 }
}

fn draw_vertical(
    counts: &CategoryCounts,
    style: &BarChartStyle<'_>,
    size: (u32, u32),
    output_path: &Path,
) -> Result<()> {
    let labels: Vec<&str> = counts.labels().collect();
    let bar_count = labels.len();
    let y_max = value_axis_max(counts, style.annotate);

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(style.title, ("sans-serif", 36))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d((0..bar_count as i32).into_segmented(), 0.0..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bar_count + 1)
        .x_label_formatter(&|v| segment_label(v, &labels))
        .y_label_formatter(&|v| format_count((*v).max(0.0).round() as usize))
        .x_desc(style.category_desc)
        .y_desc(style.value_desc)
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 24))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(counts.entries.iter().enumerate().map(|(i, (_, count))| {
            let color = style.palette.color(i, bar_count);
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i as i32), 0.0),
                    (SegmentValue::Exact(i as i32 + 1), *count as f64),
                ],
                color.filled(),
            );
            bar.set_margin(0, 0, 8, 8);
            bar
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    if style.annotate {
        let font = TextStyle::from(("sans-serif", 20).into_font())
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        let lift = y_max * 0.01;

        chart
            .draw_series(counts.entries.iter().enumerate().map(|(i, (_, count))| {
                Text::new(
                    format_count(*count),
                    (SegmentValue::CenterOf(i as i32), *count as f64 + lift),
                    font.clone(),
                )
            }))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

fn draw_horizontal(
    counts: &CategoryCounts,
    style: &BarChartStyle<'_>,
    size: (u32, u32),
    output_path: &Path,
) -> Result<()> {
    let labels: Vec<&str> = counts.labels().collect();
    let bar_count = labels.len();
    let x_max = value_axis_max(counts, style.annotate);
    // Entry 0 sits in the top segment.
    let row_of = |i: usize| (bar_count - 1 - i) as i32;

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(style.title, ("sans-serif", 36))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(260)
        .build_cartesian_2d(0.0..x_max, (0..bar_count as i32).into_segmented())
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(bar_count + 1)
        .y_label_formatter(&|v| reversed_segment_label(v, &labels))
        .x_label_formatter(&|v| format_count((*v).max(0.0).round() as usize))
        .x_desc(style.value_desc)
        .y_desc(style.category_desc)
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 24))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(counts.entries.iter().enumerate().map(|(i, (_, count))| {
            let color = style.palette.color(i, bar_count);
            let row = row_of(i);
            let mut bar = Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(row)),
                    (*count as f64, SegmentValue::Exact(row + 1)),
                ],
                color.filled(),
            );
            bar.set_margin(4, 4, 0, 0);
            bar
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    if style.annotate {
        let font = TextStyle::from(("sans-serif", 18).into_font())
            .pos(Pos::new(HPos::Left, VPos::Center));
        let gap = x_max * 0.01;

        chart
            .draw_series(counts.entries.iter().enumerate().map(|(i, (_, count))| {
                Text::new(
                    format_count(*count),
                    (*count as f64 + gap, SegmentValue::CenterOf(row_of(i))),
                    font.clone(),
                )
            }))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(orientation: Orientation) -> BarChartStyle<'static> {
        BarChartStyle {
            title: "Test Chart",
            category_desc: "Category",
            value_desc: "Count",
            orientation,
            palette: Palette::Qualitative,
            annotate: true,
        }
    }

    #[test]
    fn test_empty_counts_rejected_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");

        let result = draw_bar_chart(
            &CategoryCounts::default(),
            &style(Orientation::Vertical),
            (800, 600),
            &path,
        );

        assert!(matches!(result, Err(PlotError::InvalidData(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_value_axis_headroom() {
        let counts = CategoryCounts::new(vec![("a".to_string(), 100)]);
        assert!((value_axis_max(&counts, true) - 115.0).abs() < 1e-9);
        assert!((value_axis_max(&counts, false) - 105.0).abs() < 1e-9);

        let zeros = CategoryCounts::new(vec![("a".to_string(), 0)]);
        assert!(value_axis_max(&zeros, false) > 0.0);
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn test_draw_vertical_and_horizontal() {
        let dir = tempfile::tempdir().unwrap();
        let counts = CategoryCounts::new(vec![
            ("Movie".to_string(), 6131),
            ("TV Show".to_string(), 2676),
        ]);

        for (name, orientation) in [
            ("vertical.png", Orientation::Vertical),
            ("horizontal.png", Orientation::Horizontal),
        ] {
            let path = dir.path().join(name);
            draw_bar_chart(&counts, &style(orientation), (800, 600), &path).unwrap();
            assert!(path.exists());
        }
    }
}
