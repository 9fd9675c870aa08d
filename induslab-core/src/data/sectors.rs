//! Index-membership loader.
//!
//! Fetches the public membership page and extracts the first table body.
//! The layout is assumed fixed: eight columns in a known order, one
//! header row. A structural change is a hard error, not something this
//! loader repairs.

use super::{http_client, DataError};
use crate::html;

/// One index-member company, as scraped. The market capitalization is
/// filled in later by the enrichment pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRow {
    pub symbol: String,
    pub security: String,
    pub sector: String,
    pub sub_industry: String,
    pub headquarters: String,
    pub date_added: String,
    pub cik: String,
    pub founded: String,
    pub market_cap: Option<f64>,
}

const MEMBER_COLUMNS: usize = 8;

/// Fetch the membership page and parse its first table body.
pub fn fetch_membership(url: &str) -> Result<Vec<CompanyRow>, DataError> {
    let client = http_client();
    let resp = client
        .get(url)
        .send()
        .map_err(|e| DataError::Network(e.to_string()))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(DataError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let body = resp.text().map_err(|e| DataError::Network(e.to_string()))?;
    parse_membership_table(&body)
}

/// Parse the first `<tbody>` on the page into company rows.
///
/// The first row is the header and is discarded. Every following row must
/// carry at least the eight known cells, mapped positionally into
/// [`CompanyRow`].
pub fn parse_membership_table(page: &str) -> Result<Vec<CompanyRow>, DataError> {
    let tbody = html::slice_inside(page, "<tbody", "</tbody").ok_or_else(|| {
        DataError::ResponseFormatChanged("no <tbody> found on membership page".into())
    })?;

    let rows = html::inner_blocks(tbody, "tr");
    let mut companies = Vec::with_capacity(rows.len().saturating_sub(1));

    for row in rows.iter().skip(1) {
        let cells: Vec<String> = html::inner_blocks(row, "td")
            .into_iter()
            .map(html::cell_text)
            .collect();
        if cells.len() < MEMBER_COLUMNS {
            return Err(DataError::ResponseFormatChanged(format!(
                "membership row has {} cells, expected {MEMBER_COLUMNS}",
                cells.len()
            )));
        }
        let mut cells = cells.into_iter();
        companies.push(CompanyRow {
            symbol: cells.next().unwrap_or_default(),
            security: cells.next().unwrap_or_default(),
            sector: cells.next().unwrap_or_default(),
            sub_industry: cells.next().unwrap_or_default(),
            headquarters: cells.next().unwrap_or_default(),
            date_added: cells.next().unwrap_or_default(),
            cik: cells.next().unwrap_or_default(),
            founded: cells.next().unwrap_or_default(),
            market_cap: None,
        });
    }

    Ok(companies)
}
