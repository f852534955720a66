use super::palette::{heat_color, is_dark};
use super::{PlotError, Result, reversed_segment_label, segment_label};
use crate::types::CrossTab;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// Vertical pixels reserved for the caption and X axis labels.
const FRAME_HEIGHT: u32 = 160;
/// Smallest readable row height.
const MIN_ROW_HEIGHT: u32 = 18;

/// Canvas size for a heatmap with `rows` rows: at least `size`, and tall
/// enough that every row stays legible.
pub fn heatmap_size(size: (u32, u32), rows: usize) -> (u32, u32) {
    let needed = FRAME_HEIGHT + MIN_ROW_HEIGHT * rows as u32;
    (size.0, size.1.max(needed))
}

/// Draw `tab` as an annotated heatmap and save it as a PNG.
///
/// Rows run top to bottom in `row_labels` order; every cell, zeros
/// included, carries its count.
pub fn draw_heatmap(tab: &CrossTab, title: &str, size: (u32, u32), output_path: &Path) -> Result<()> {
    if tab.is_empty() {
        return Err(PlotError::InvalidData(format!("'{title}' has no cells to draw")));
    }

    let row_labels: Vec<&str> = tab.row_labels.iter().map(String::as_str).collect();
    let column_labels: Vec<&str> = tab.column_labels.iter().map(String::as_str).collect();
    let rows = row_labels.len() as i32;
    let columns = column_labels.len() as i32;
    let max = tab.max_count();

    let size = heatmap_size(size, row_labels.len());
    let row_height = (size.1 - FRAME_HEIGHT) / rows as u32;
    let font_size = (row_height as f64 * 0.6).clamp(10.0, 22.0);

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 36))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(280)
        .build_cartesian_2d((0..columns).into_segmented(), (0..rows).into_segmented())
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(column_labels.len() + 1)
        .y_labels(row_labels.len() + 1)
        .x_label_formatter(&|v| segment_label(v, &column_labels))
        .y_label_formatter(&|v| reversed_segment_label(v, &row_labels))
        .label_style(("sans-serif", font_size.max(14.0)))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    // (column, segment row, count), first row in the top segment.
    let cells: Vec<(i32, i32, usize)> = tab
        .counts
        .iter()
        .enumerate()
        .flat_map(|(r, counts)| {
            let y = rows - 1 - r as i32;
            counts
                .iter()
                .enumerate()
                .map(move |(c, count)| (c as i32, y, *count))
        })
        .collect();

    chart
        .draw_series(cells.iter().map(|&(x, y, count)| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                    (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
                ],
                heat_color(count, max).filled(),
            )
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let font = TextStyle::from(("sans-serif", font_size).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));

    chart
        .draw_series(cells.iter().map(|&(x, y, count)| {
            let style = if is_dark(heat_color(count, max)) {
                font.color(&WHITE)
            } else {
                font.color(&BLACK)
            };
            Text::new(
                count.to_string(),
                (SegmentValue::CenterOf(x), SegmentValue::CenterOf(y)),
                style,
            )
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}
