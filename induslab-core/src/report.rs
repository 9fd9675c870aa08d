//! Artifact export.
//!
//! One timestamped run directory per pipeline run, holding the three
//! rendered charts, the underlying tables as CSV, and a JSON manifest.

use crate::config::PipelineConfig;
use crate::data::CompanyRow;
use crate::transform::EmploymentTable;
use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// JSON manifest describing one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub config: PipelineConfig,
    pub merged_states: usize,
    pub companies: usize,
    pub caps_resolved: usize,
    pub caps_missing: usize,
    pub employment_rows: usize,
    pub employment_series: usize,
}

/// Create `{output_dir}/portrait_{timestamp}/` for this run's files.
pub fn create_run_dir(output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!("portrait_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"));
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;
    Ok(run_dir)
}

pub fn write_manifest(path: &Path, manifest: &RunManifest) -> Result<()> {
    let json =
        serde_json::to_string_pretty(manifest).context("failed to serialize run manifest")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write manifest to {}", path.display()))?;
    Ok(())
}

/// Merged census frame as CSV: postal code, state name, region code,
/// payroll value.
pub fn export_payroll_csv(merged: &DataFrame, payroll_column: &str) -> Result<String> {
    let stusps = merged.column("STUSPS")?.str()?;
    let names = merged.column("NAME")?.str()?;
    let statefps = merged.column("STATEFP")?.i64()?;
    let values = merged.column(payroll_column)?.cast(&DataType::Float64)?;
    let values = values.f64()?;

    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["STUSPS", "NAME", "STATEFP", payroll_column])?;
    for i in 0..merged.height() {
        wtr.write_record([
            stusps.get(i).unwrap_or("").to_string(),
            names.get(i).unwrap_or("").to_string(),
            statefps.get(i).map(|v| v.to_string()).unwrap_or_default(),
            values.get(i).map(|v| v.to_string()).unwrap_or_default(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Company table as CSV, one row per index member. A missing market cap
/// is an empty field.
pub fn export_sector_csv(companies: &[CompanyRow]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "Symbol",
        "Security",
        "GICS Sector",
        "GICS Sub-Industry",
        "Headquarters Location",
        "Date Added",
        "CIK",
        "Founded",
        "Market Capitalization",
    ])?;
    for company in companies {
        wtr.write_record([
            company.symbol.clone(),
            company.security.clone(),
            company.sector.clone(),
            company.sub_industry.clone(),
            company.headquarters.clone(),
            company.date_added.clone(),
            company.cik.clone(),
            company.founded.clone(),
            company
                .market_cap
                .map(|cap| cap.to_string())
                .unwrap_or_default(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Employment table as CSV: `date` column plus one column per industry.
pub fn export_employment_csv(table: &EmploymentTable) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["date".to_string()];
    header.extend(table.columns.iter().map(|c| c.label.clone()));
    wtr.write_record(&header)?;

    for (i, date) in table.dates.iter().enumerate() {
        let mut row = vec![date.to_string()];
        for column in &table.columns {
            row.push(
                column
                    .values
                    .get(i)
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            );
        }
        wtr.write_record(&row)?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}
