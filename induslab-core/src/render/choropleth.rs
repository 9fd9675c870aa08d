//! Payroll choropleth over the continental US.

use super::format_magnitude;
use crate::data::StateShape;
use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};
use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;

// Lon/lat viewport that frames the lower 48.
const LON_RANGE: std::ops::Range<f64> = -125.0..-66.0;
const LAT_RANGE: std::ops::Range<f64> = 24.0..50.0;

/// Render the merged census frame as a filled-polygon map colored by
/// `value_column`, with a vertical colorbar on the right.
///
/// Rows whose postal code has no shape, or whose value is null, draw
/// nothing; everything else is a state polygon filled from the viridis
/// ramp scaled to the column's min/max.
pub fn render_choropleth(
    merged: &DataFrame,
    shapes: &HashMap<String, StateShape>,
    value_column: &str,
    path: &Path,
) -> Result<()> {
    let stusps = merged
        .column("STUSPS")
        .context("merged frame is missing STUSPS")?
        .str()?;
    let values = merged
        .column(value_column)
        .with_context(|| format!("merged frame is missing {value_column}"))?
        .cast(&DataType::Float64)?;
    let values = values.f64()?;

    let (min, max) = values
        .into_iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    anyhow::ensure!(min.is_finite(), "no values to map in column {value_column}");
    // degenerate single-value range still needs a nonzero span
    let max = if max > min { max } else { min + 1.0 };

    let root = SVGBackend::new(path, (1280, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let (map_area, legend_area) = root.split_horizontally(1150);

    let mut chart = ChartBuilder::on(&map_area)
        .caption("Total Payroll by State", ("sans-serif", 28))
        .margin(10)
        .build_cartesian_2d(LON_RANGE, LAT_RANGE)?;
    // no mesh: the map carries no axes

    for i in 0..merged.height() {
        let (Some(code), Some(value)) = (stusps.get(i), values.get(i)) else {
            continue;
        };
        let Some(shape) = shapes.get(code) else {
            continue;
        };
        let fill = ViridisRGB.get_color_normalized(value as f32, min as f32, max as f32);

        chart.draw_series(
            shape
                .rings
                .iter()
                .map(|ring| Polygon::new(ring.clone(), fill.mix(0.8).filled())),
        )?;
        chart.draw_series(shape.rings.iter().map(|ring| {
            let mut outline = ring.clone();
            if let Some(first) = outline.first().copied() {
                outline.push(first);
            }
            PathElement::new(outline, BLACK.stroke_width(1))
        }))?;
    }

    draw_colorbar(&legend_area, min, max)?;
    root.present()?;
    Ok(())
}

/// Vertical viridis colorbar with min / mid / max tick labels.
fn draw_colorbar(
    area: &DrawingArea<SVGBackend<'_>, plotters::coord::Shift>,
    min: f64,
    max: f64,
) -> Result<()> {
    let (width, height) = area.dim_in_pixel();
    let top = 80i32;
    let bottom = height as i32 - 80;
    let band = (bottom - top).max(1);
    let x0 = 10i32;
    let x1 = (width as i32 - 80).max(x0 + 12);

    const STEPS: i32 = 100;
    for step in 0..STEPS {
        let t0 = step as f32 / STEPS as f32;
        let t1 = (step + 1) as f32 / STEPS as f32;
        let y0 = bottom - (t1 * band as f32) as i32;
        let y1 = bottom - (t0 * band as f32) as i32;
        let color = ViridisRGB.get_color(step as f32 / (STEPS - 1) as f32);
        area.draw(&Rectangle::new([(x0, y0), (x1, y1)], color.filled()))
            .map_err(|e| anyhow::anyhow!("colorbar draw: {e}"))?;
    }

    let label_style = ("sans-serif", 13).into_text_style(area);
    for (t, value) in [(0.0, min), (0.5, (min + max) / 2.0), (1.0, max)] {
        let y = bottom - (t * band as f64) as i32;
        area.draw(&Text::new(
            format_magnitude(value),
            (x1 + 6, y - 6),
            label_style.clone(),
        ))
        .map_err(|e| anyhow::anyhow!("colorbar label draw: {e}"))?;
    }
    Ok(())
}
