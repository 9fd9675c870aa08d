//! BLS employment-series loader.
//!
//! One batched POST fetches every catalogued series over the configured
//! year window; eleven series over ten years sits comfortably inside the
//! API's single-call limits, so there is no chunking or pagination.
//!
//! The catalog (series id → display label) travels with the data as an
//! explicit value: the reshaper looks labels up by id, never by response
//! position.

use super::{http_client, DataError};
use serde::{Deserialize, Serialize};

const BLS_ENDPOINT: &str = "https://api.bls.gov/publicAPI/v2/timeseries/data/";

/// Ordered mapping from BLS series id to display label.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesCatalog {
    entries: Vec<(String, String)>,
}

impl SeriesCatalog {
    pub fn new<I, S, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(id, label)| (id.into(), label.into()))
                .collect(),
        }
    }

    /// The eleven Illinois statewide industry employment series.
    pub fn illinois_industries() -> Self {
        Self::new([
            ("SMU17000006562000001", "Health Care and Social Assistance"),
            ("SMU17000003000000001", "Manufacturing"),
            ("SMU17000001500000001", "Mining, Logging, and Construction"),
            ("SMU17000004200000001", "Retail Trade"),
            ("SMU17000004100000001", "Wholesale Trade"),
            ("SMU17000004340008901", "Transportation and Warehousing"),
            ("SMU17000004322000001", "Utilities"),
            ("SMU17000005552000001", "Finance and Insurance"),
            ("SMU17000005000000001", "Information"),
            (
                "SMU17000006054000001",
                "Professional, Scientific, and Technical Services",
            ),
            ("SMU17000005553000001", "Real Estate and Rental and Leasing"),
        ])
    }

    /// Series ids in catalog order (the request order).
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|(id, _)| id.as_str()).collect()
    }

    /// Display label for a series id.
    pub fn label(&self, series_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| id == series_id)
            .map(|(_, label)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Serialize)]
struct SeriesRequest<'a> {
    seriesid: Vec<&'a str>,
    startyear: &'a str,
    endyear: &'a str,
}

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    status: String,
    #[serde(default)]
    message: Vec<String>,
    #[serde(rename = "Results")]
    results: Option<SeriesResults>,
}

#[derive(Debug, Deserialize)]
struct SeriesResults {
    #[serde(default)]
    series: Vec<RawSeries>,
}

/// One series as returned by the API: observations newest-first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSeries {
    #[serde(rename = "seriesID")]
    pub series_id: String,
    pub data: Vec<RawObservation>,
}

/// A single observation. `period` is a month code like `M01`; `value`
/// arrives as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawObservation {
    pub year: String,
    pub period: String,
    pub value: String,
}

/// Fetch every catalogued series in one batched request.
///
/// The response may order series differently from the request; callers
/// must match series to labels by id via the catalog.
pub fn fetch_employment(
    key: &str,
    catalog: &SeriesCatalog,
    start_year: &str,
    end_year: &str,
) -> Result<Vec<RawSeries>, DataError> {
    let client = http_client();
    let body = SeriesRequest {
        seriesid: catalog.ids(),
        startyear: start_year,
        endyear: end_year,
    };

    let resp = client
        .post(BLS_ENDPOINT)
        .query(&[("registrationkey", key)])
        .json(&body)
        .send()
        .map_err(|e| DataError::Network(e.to_string()))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(DataError::HttpStatus {
            status: status.as_u16(),
            url: BLS_ENDPOINT.to_string(),
        });
    }

    let decoded: SeriesResponse = resp
        .json()
        .map_err(|e| DataError::ResponseFormatChanged(format!("employment response: {e}")))?;

    if decoded.status != "REQUEST_SUCCEEDED" {
        return Err(DataError::ResponseFormatChanged(format!(
            "employment request ended with status {}: {}",
            decoded.status,
            decoded.message.join("; ")
        )));
    }

    let results = decoded.results.ok_or_else(|| {
        DataError::ResponseFormatChanged("employment response has no Results block".into())
    })?;
    Ok(results.series)
}
