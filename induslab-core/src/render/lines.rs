//! Employment line chart: one line per industry over the shared axis.

use crate::transform::EmploymentTable;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use plotters::prelude::*;
use std::path::Path;

pub fn render_employment_lines(table: &EmploymentTable, path: &Path) -> Result<()> {
    let first = *table
        .dates
        .first()
        .context("employment table has no dates")?;
    let last = *table
        .dates
        .last()
        .context("employment table has no dates")?;
    anyhow::ensure!(
        !table.columns.is_empty(),
        "employment table has no series columns"
    );

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for column in &table.columns {
        for &value in &column.values {
            y_min = y_min.min(value);
            y_max = y_max.max(value);
        }
    }
    anyhow::ensure!(y_min.is_finite(), "employment table has no values");
    let pad = ((y_max - y_min) * 0.05).max(1.0);
    let (y_min, y_max) = (y_min - pad, y_max + pad);

    let root = SVGBackend::new(path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Total Employees (in Thousands) by Industry - Illinois",
            ("sans-serif", 24),
        )
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(first..last, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|date: &NaiveDate| date.format("%Y").to_string())
        .y_desc("Employees (thousands)")
        .draw()?;

    // fixed palette order keyed to column position, never re-picked
    for (i, column) in table.columns.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(
                table
                    .dates
                    .iter()
                    .copied()
                    .zip(column.values.iter().copied()),
                color.stroke_width(2),
            ))?
            .label(column.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK.mix(0.4))
        .label_font(("sans-serif", 12))
        .draw()?;

    root.present()?;
    Ok(())
}
