//! IndusLab Core — industry data portrait pipeline.
//!
//! Retrieves three public datasets, cleans and joins them, and renders
//! three static charts plus an artifact bundle:
//! - Census Bureau SUSB industry-by-state statistics → payroll choropleth
//! - S&P 500 index membership with live market caps → sector bar chart
//! - BLS employment time series → multi-industry line chart
//!
//! The pipeline is one fixed linear pass: fetch → clean → transform →
//! render → export. No caching, no retries, no concurrency. The only
//! recovery point is the per-ticker fault boundary inside the market-cap
//! enrichment loop.

pub mod clean;
pub mod config;
pub mod data;
pub mod html;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod transform;

pub use config::PipelineConfig;
pub use pipeline::{run_pipeline, PipelineReport};
