//! IndusLab CLI — industry data portraits of the continental US.
//!
//! One linear command: load the census, boundary, membership, and
//! employment datasets, clean and join them, render three charts, and
//! write the artifact bundle. Every parameter has a canonical default;
//! a TOML config file and per-field flags override it.

use anyhow::Result;
use clap::Parser;
use induslab_core::data::{
    DataError, MarketDataProvider, SilentProgress, StdoutProgress, YahooQuoteProvider,
};
use induslab_core::pipeline::PipelineReport;
use induslab_core::{run_pipeline, PipelineConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "induslab",
    about = "Industry data portraits: census payroll, S&P 500 sectors, BLS employment"
)]
struct Cli {
    /// Path to a TOML config file. The flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-delimited SUSB census file.
    #[arg(long)]
    census_file: Option<PathBuf>,

    /// GeoJSON state boundary file.
    #[arg(long)]
    boundaries_file: Option<PathBuf>,

    /// BLS v2 API registration key.
    #[arg(long)]
    bls_key: Option<String>,

    /// Index-membership page URL.
    #[arg(long)]
    url: Option<String>,

    /// Output directory for the artifact bundle.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Skip the per-ticker market-cap lookups (all caps stay missing).
    #[arg(long, default_value_t = false)]
    skip_market_caps: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(census_file) = cli.census_file {
        config.census_file = census_file;
    }
    if let Some(boundaries_file) = cli.boundaries_file {
        config.boundaries_file = boundaries_file;
    }
    if let Some(bls_key) = cli.bls_key {
        config.bls_key = bls_key;
    }
    if let Some(url) = cli.url {
        config.membership_url = url;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }

    let report = if cli.skip_market_caps {
        run_pipeline(&config, &OfflineProvider, &SilentProgress)?
    } else {
        run_pipeline(&config, &YahooQuoteProvider::new(), &StdoutProgress)?
    };

    print_summary(&report);
    Ok(())
}

/// Provider used with `--skip-market-caps`: answers "no figure" for
/// every symbol without touching the network.
struct OfflineProvider;

impl MarketDataProvider for OfflineProvider {
    fn name(&self) -> &str {
        "offline"
    }

    fn market_cap(&self, _symbol: &str) -> Result<Option<f64>, DataError> {
        Ok(None)
    }
}

fn print_summary(report: &PipelineReport) {
    println!();
    println!("=== Industry Data Portraits ===");
    println!("States mapped:      {}", report.merged_states);
    println!(
        "Companies:          {} ({} caps resolved, {} missing)",
        report.companies, report.caps_resolved, report.caps_missing
    );
    println!(
        "Employment table:   {} months x {} industries",
        report.employment_rows, report.employment_series
    );
    println!("Artifacts saved to: {}", report.run_dir.display());
}
