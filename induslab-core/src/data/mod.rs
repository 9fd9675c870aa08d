//! Dataset loaders and the shared data error type.
//!
//! Three independent sources feed the pipeline:
//! - the SUSB census file and the state boundary file ([`census`],
//!   [`boundaries`])
//! - the index-membership page ([`sectors`])
//! - the BLS employment API ([`employment`])
//!
//! plus the per-ticker market-capitalization lookup ([`market`]).
//! All network I/O is blocking and sequential.

pub mod boundaries;
pub mod census;
pub mod employment;
pub mod market;
pub mod sectors;

pub use boundaries::{load_boundaries, parse_boundaries, BoundarySet, StateShape};
pub use census::load_census;
pub use employment::{fetch_employment, RawObservation, RawSeries, SeriesCatalog};
pub use market::{
    enrich_market_caps, EnrichSummary, LookupProgress, MarketDataProvider, SilentProgress,
    StdoutProgress, YahooQuoteProvider,
};
pub use sectors::{fetch_membership, parse_membership_table, CompanyRow};

use polars::prelude::PolarsError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Structured error type for dataset loading and lookups.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("frame error: {0}")]
    Frame(#[from] PolarsError),

    #[error("series id missing from catalog: {0}")]
    UnknownSeries(String),
}

/// Blocking HTTP client shared by the loaders: 30 s timeout, browser-ish
/// user agent (some of the sources reject the default reqwest UA).
pub(crate) fn http_client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
        .build()
        .expect("failed to build HTTP client")
}
