//! Pipeline orchestrator.
//!
//! Calls every stage strictly in sequence: three loaders, two cleaning
//! filters, the merge, the enrichment, the reshape, three renderers, and
//! the artifact export. No branching, no retries, no parallel fetches.
//! The first failure outside the per-ticker enrichment boundary aborts
//! the run.

use crate::clean;
use crate::config::PipelineConfig;
use crate::data::{self, LookupProgress, MarketDataProvider};
use crate::render;
use crate::report::{self, RunManifest};
use crate::transform;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// What the run produced, for the CLI summary.
#[derive(Debug)]
pub struct PipelineReport {
    pub run_dir: PathBuf,
    pub merged_states: usize,
    pub companies: usize,
    pub caps_resolved: usize,
    pub caps_missing: usize,
    pub employment_rows: usize,
    pub employment_series: usize,
}

pub fn run_pipeline(
    config: &PipelineConfig,
    provider: &dyn MarketDataProvider,
    progress: &dyn LookupProgress,
) -> Result<PipelineReport> {
    // fetch
    info!("loading census file {}", config.census_file.display());
    let census = data::load_census(&config.census_file)
        .with_context(|| format!("loading census file {}", config.census_file.display()))?;

    info!("loading boundaries {}", config.boundaries_file.display());
    let boundaries = data::load_boundaries(&config.boundaries_file)
        .with_context(|| format!("loading boundaries {}", config.boundaries_file.display()))?;

    let catalog = data::SeriesCatalog::illinois_industries();
    info!(
        "fetching {} employment series for {}..{}",
        catalog.len(),
        config.start_year,
        config.end_year
    );
    let raw_series =
        data::fetch_employment(&config.bls_key, &catalog, &config.start_year, &config.end_year)
            .context("fetching employment series")?;

    info!("fetching membership table from {}", config.membership_url);
    let mut companies =
        data::fetch_membership(&config.membership_url).context("fetching membership table")?;

    // clean
    let boundaries = clean::filter_continental(&boundaries).context("filtering boundaries")?;
    let census = clean::filter_census_totals(&census).context("filtering census totals")?;

    // transform
    let merged = transform::merge_census(&boundaries, &census).context("merging census")?;
    let summary = data::enrich_market_caps(&mut companies, provider, progress);
    let table = transform::reshape_employment(&raw_series, &catalog)
        .context("reshaping employment series")?;

    // render + export
    let run_dir = report::create_run_dir(&config.output_dir)?;

    render::render_choropleth(
        &merged,
        &boundaries.shapes,
        &config.payroll_column,
        &run_dir.join("payroll_map.svg"),
    )
    .context("rendering choropleth")?;
    render::render_sector_bars(&companies, &run_dir.join("sector_market_cap.svg"))
        .context("rendering sector bars")?;
    render::render_employment_lines(&table, &run_dir.join("employment_by_industry.svg"))
        .context("rendering employment lines")?;

    std::fs::write(
        run_dir.join("payroll_by_state.csv"),
        report::export_payroll_csv(&merged, &config.payroll_column)?,
    )?;
    std::fs::write(
        run_dir.join("sector_market_cap.csv"),
        report::export_sector_csv(&companies)?,
    )?;
    std::fs::write(
        run_dir.join("employment_by_industry.csv"),
        report::export_employment_csv(&table)?,
    )?;

    let manifest = RunManifest {
        timestamp: chrono::Utc::now(),
        config: config.clone(),
        merged_states: merged.height(),
        companies: companies.len(),
        caps_resolved: summary.resolved,
        caps_missing: summary.missing,
        employment_rows: table.dates.len(),
        employment_series: table.columns.len(),
    };
    report::write_manifest(&run_dir.join("manifest.json"), &manifest)?;

    info!("artifacts saved to {}", run_dir.display());

    Ok(PipelineReport {
        run_dir,
        merged_states: manifest.merged_states,
        companies: manifest.companies,
        caps_resolved: manifest.caps_resolved,
        caps_missing: manifest.caps_missing,
        employment_rows: manifest.employment_rows,
        employment_series: manifest.employment_series,
    })
}
