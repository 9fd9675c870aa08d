//! Live market-capitalization lookups.
//!
//! The provider trait is the seam: tests substitute a canned source, the
//! production implementation queries Yahoo's v7 quote endpoint one symbol
//! at a time, single attempt each. A failed lookup leaves that row's cap
//! missing and the batch keeps going: one bad ticker never aborts the
//! remaining five hundred.

use super::sectors::CompanyRow;
use super::{http_client, DataError};
use log::warn;
use serde::Deserialize;

/// Source of market-capitalization figures, keyed by ticker symbol.
pub trait MarketDataProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Look up the market capitalization for one symbol.
    ///
    /// `Ok(None)` means the provider answered but carries no figure for
    /// this symbol; `Err` is a transport or format failure.
    fn market_cap(&self, symbol: &str) -> Result<Option<f64>, DataError>;
}

/// Yahoo Finance v7 quote API response.
#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    #[serde(rename = "quoteResponse")]
    quote_response: QuoteBody,
}

#[derive(Debug, Deserialize)]
struct QuoteBody {
    #[serde(default)]
    result: Vec<QuoteRecord>,
}

#[derive(Debug, Deserialize)]
struct QuoteRecord {
    #[serde(rename = "marketCap")]
    market_cap: Option<f64>,
}

/// Yahoo Finance quote provider.
pub struct YahooQuoteProvider {
    client: reqwest::blocking::Client,
}

impl YahooQuoteProvider {
    pub fn new() -> Self {
        Self {
            client: http_client(),
        }
    }

    fn quote_url(symbol: &str) -> String {
        format!("https://query2.finance.yahoo.com/v7/finance/quote?symbols={symbol}")
    }
}

impl Default for YahooQuoteProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataProvider for YahooQuoteProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn market_cap(&self, symbol: &str) -> Result<Option<f64>, DataError> {
        let url = Self::quote_url(symbol);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }
        let envelope: QuoteEnvelope = resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("quote response for {symbol}: {e}"))
        })?;
        Ok(envelope
            .quote_response
            .result
            .first()
            .and_then(|quote| quote.market_cap))
    }
}

/// Progress callbacks for the enrichment loop.
pub trait LookupProgress {
    /// Called before each symbol's lookup.
    fn on_start(&self, symbol: &str, index: usize, total: usize);

    /// Called when a symbol's lookup completes.
    fn on_complete(
        &self,
        symbol: &str,
        index: usize,
        total: usize,
        result: &Result<Option<f64>, DataError>,
    );

    /// Called once the whole batch is done.
    fn on_batch_complete(&self, resolved: usize, missing: usize, total: usize);
}

/// Progress reporter that prints to stdout.
pub struct StdoutProgress;

impl LookupProgress for StdoutProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        println!("[{}/{}] Looking up {symbol}...", index + 1, total);
    }

    fn on_complete(
        &self,
        symbol: &str,
        _index: usize,
        _total: usize,
        result: &Result<Option<f64>, DataError>,
    ) {
        match result {
            Ok(Some(cap)) => println!("  OK: {symbol} = {cap}"),
            Ok(None) => println!("  MISSING: {symbol}"),
            Err(e) => println!("  FAIL: {symbol}: {e}"),
        }
    }

    fn on_batch_complete(&self, resolved: usize, missing: usize, total: usize) {
        println!("\nLookups complete: {resolved}/{total} resolved, {missing} missing");
    }
}

/// Progress reporter that says nothing.
pub struct SilentProgress;

impl LookupProgress for SilentProgress {
    fn on_start(&self, _symbol: &str, _index: usize, _total: usize) {}
    fn on_complete(
        &self,
        _symbol: &str,
        _index: usize,
        _total: usize,
        _result: &Result<Option<f64>, DataError>,
    ) {
    }
    fn on_batch_complete(&self, _resolved: usize, _missing: usize, _total: usize) {}
}

/// Outcome of an enrichment batch.
#[derive(Debug)]
pub struct EnrichSummary {
    pub total: usize,
    pub resolved: usize,
    pub missing: usize,
    pub errors: Vec<(String, DataError)>,
}

/// Fill in the market-capitalization column, one lookup per company row.
///
/// Each lookup runs inside its own fault boundary: an error is logged and
/// recorded in the summary, the row keeps a missing cap, and the loop
/// continues with the next symbol.
pub fn enrich_market_caps(
    companies: &mut [CompanyRow],
    provider: &dyn MarketDataProvider,
    progress: &dyn LookupProgress,
) -> EnrichSummary {
    let total = companies.len();
    let mut resolved = 0;
    let mut missing = 0;
    let mut errors: Vec<(String, DataError)> = Vec::new();

    for (i, company) in companies.iter_mut().enumerate() {
        progress.on_start(&company.symbol, i, total);
        let result = provider.market_cap(&company.symbol);
        progress.on_complete(&company.symbol, i, total, &result);

        match result {
            Ok(Some(cap)) => {
                company.market_cap = Some(cap);
                resolved += 1;
            }
            Ok(None) => {
                company.market_cap = None;
                missing += 1;
            }
            Err(e) => {
                warn!(
                    "market cap lookup failed for {} via {}: {e}",
                    company.symbol,
                    provider.name()
                );
                company.market_cap = None;
                missing += 1;
                errors.push((company.symbol.clone(), e));
            }
        }
    }

    progress.on_batch_complete(resolved, missing, total);

    EnrichSummary {
        total,
        resolved,
        missing,
        errors,
    }
}
