//! Market-capitalization bar chart per GICS sector.

use super::format_magnitude;
use crate::data::CompanyRow;
use anyhow::Result;
use plotters::prelude::*;
use plotters::style::full_palette::BLUE_600;
use std::path::Path;

/// Sum the market-capitalization column per distinct sector label, in
/// first-seen order. Rows with a missing cap contribute nothing to their
/// sector's total.
pub fn aggregate_by_sector(companies: &[CompanyRow]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for company in companies {
        let cap = company.market_cap.unwrap_or(0.0);
        match totals
            .iter_mut()
            .find(|(sector, _)| sector == &company.sector)
        {
            Some((_, sum)) => *sum += cap,
            None => totals.push((company.sector.clone(), cap)),
        }
    }
    totals
}

/// Render one bar per sector with rotated category labels.
pub fn render_sector_bars(companies: &[CompanyRow], path: &Path) -> Result<()> {
    let totals = aggregate_by_sector(companies);
    anyhow::ensure!(!totals.is_empty(), "no company rows to aggregate");

    let peak = totals
        .iter()
        .map(|(_, total)| *total)
        .fold(0.0f64, f64::max);
    // all-missing caps still need a drawable axis
    let y_max = if peak > 0.0 { peak * 1.05 } else { 1.0 };

    let root = SVGBackend::new(path, (1000, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Total Market Cap by GICS Sector", ("sans-serif", 26))
        .margin(12)
        .x_label_area_size(230)
        .y_label_area_size(90)
        .build_cartesian_2d((0usize..totals.len()).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(totals.len())
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(i) if *i < totals.len() => totals[*i].0.clone(),
            _ => String::new(),
        })
        .x_label_style(
            ("sans-serif", 11)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_desc("Total Market Cap (USD)")
        .y_label_formatter(&|v| format_magnitude(*v))
        .draw()?;

    chart.draw_series(totals.iter().enumerate().map(|(i, (_, total))| {
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), *total),
            ],
            BLUE_600.filled(),
        );
        bar.set_margin(0, 0, 3, 3);
        bar
    }))?;

    root.present()?;
    Ok(())
}
