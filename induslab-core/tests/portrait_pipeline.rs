//! Offline integration test for the clean → merge → reshape → render →
//! export chain. Network loaders are covered by unit tests against
//! canned payloads; here everything runs from synthetic inputs.

use induslab_core::clean::{filter_census_totals, filter_continental};
use induslab_core::data::{
    enrich_market_caps, parse_boundaries, CompanyRow, DataError, MarketDataProvider,
    RawObservation, RawSeries, SeriesCatalog, SilentProgress,
};
use induslab_core::render::{
    render_choropleth, render_employment_lines, render_sector_bars,
};
use induslab_core::report::{export_employment_csv, export_payroll_csv, export_sector_csv};
use induslab_core::transform::{merge_census, reshape_employment};
use polars::prelude::*;

const BOUNDARY_FIXTURE: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": {"STATEFP": "17", "STUSPS": "IL", "NAME": "Illinois"},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-91.5, 37.0], [-87.5, 37.0], [-87.5, 42.5], [-91.5, 42.5], [-91.5, 37.0]]]
            }
        },
        {
            "type": "Feature",
            "properties": {"STATEFP": "36", "STUSPS": "NY", "NAME": "New York"},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-79.7, 40.5], [-73.3, 40.5], [-73.3, 45.0], [-79.7, 45.0], [-79.7, 40.5]]]
            }
        },
        {
            "type": "Feature",
            "properties": {"STATEFP": "15", "STUSPS": "HI", "NAME": "Hawaii"},
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": [[[[-156.0, 19.5], [-155.0, 19.5], [-155.5, 20.2], [-156.0, 19.5]]]]
            }
        }
    ]
}"#;

fn census_fixture() -> DataFrame {
    df!(
        "STATEFP" => &[0i64, 17, 17, 36, 15],
        "ENTRSIZE" => &[1i64, 1, 2, 1, 1],
        "NAICS" => &["--", "--", "--", "--", "--"],
        "PAYR" => &[999_999i64, 250_000, 120_000, 400_000, 30_000],
    )
    .unwrap()
}

struct CannedProvider;

impl MarketDataProvider for CannedProvider {
    fn name(&self) -> &str {
        "canned"
    }

    fn market_cap(&self, symbol: &str) -> Result<Option<f64>, DataError> {
        match symbol {
            "AAA" => Ok(Some(2.0e12)),
            "BBB" => Ok(Some(5.0e11)),
            _ => Err(DataError::Network("no route to host".into())),
        }
    }
}

fn company(symbol: &str, sector: &str) -> CompanyRow {
    CompanyRow {
        symbol: symbol.into(),
        security: format!("{symbol} Corp"),
        sector: sector.into(),
        sub_industry: String::new(),
        headquarters: String::new(),
        date_added: String::new(),
        cik: String::new(),
        founded: String::new(),
        market_cap: None,
    }
}

fn obs(year: &str, period: &str, value: &str) -> RawObservation {
    RawObservation {
        year: year.into(),
        period: period.into(),
        value: value.into(),
    }
}

#[test]
fn census_chain_produces_a_continental_choropleth() {
    let boundaries = parse_boundaries(BOUNDARY_FIXTURE).unwrap();
    let boundaries = filter_continental(&boundaries).unwrap();
    let census = filter_census_totals(&census_fixture()).unwrap();
    let merged = merge_census(&boundaries, &census).unwrap();

    // HI dropped by the continental filter, nation row and ENTRSIZE=2
    // dropped by the census filter, so IL and NY survive the join
    assert_eq!(merged.height(), 2);
    // join output row order is not guaranteed, so compare as a set
    let mut codes: Vec<&str> = merged
        .column("STUSPS")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    codes.sort_unstable();
    assert_eq!(codes, vec!["IL", "NY"]);

    let dir = tempfile::tempdir().unwrap();
    let svg_path = dir.path().join("payroll_map.svg");
    render_choropleth(&merged, &boundaries.shapes, "PAYR", &svg_path).unwrap();

    let svg = std::fs::read_to_string(&svg_path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Total Payroll by State"));

    let csv = export_payroll_csv(&merged, "PAYR").unwrap();
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn sector_chain_survives_a_failing_ticker() {
    let mut companies = vec![
        company("AAA", "Information Technology"),
        company("BAD", "Information Technology"),
        company("BBB", "Energy"),
    ];
    let summary = enrich_market_caps(&mut companies, &CannedProvider, &SilentProgress);
    assert_eq!(summary.resolved, 2);
    assert_eq!(summary.missing, 1);

    let dir = tempfile::tempdir().unwrap();
    let svg_path = dir.path().join("sector_market_cap.svg");
    render_sector_bars(&companies, &svg_path).unwrap();
    assert!(std::fs::read_to_string(&svg_path)
        .unwrap()
        .contains("GICS Sector"));

    let csv = export_sector_csv(&companies).unwrap();
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn employment_chain_renders_a_chronological_line_chart() {
    let catalog = SeriesCatalog::new([("S1", "Manufacturing"), ("S2", "Retail Trade")]);
    let raw = vec![
        RawSeries {
            series_id: "S1".into(),
            data: vec![
                obs("2020", "M03", "570.0"),
                obs("2020", "M02", "565.5"),
                obs("2020", "M01", "560.0"),
            ],
        },
        RawSeries {
            series_id: "S2".into(),
            data: vec![
                obs("2020", "M03", "305.0"),
                obs("2020", "M02", "302.0"),
                obs("2020", "M01", "300.0"),
            ],
        },
    ];

    let table = reshape_employment(&raw, &catalog).unwrap();
    assert!(table.dates.windows(2).all(|w| w[0] < w[1]));

    let dir = tempfile::tempdir().unwrap();
    let svg_path = dir.path().join("employment_by_industry.svg");
    render_employment_lines(&table, &svg_path).unwrap();
    let svg = std::fs::read_to_string(&svg_path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Manufacturing"));

    let csv = export_employment_csv(&table).unwrap();
    assert_eq!(csv.lines().next().unwrap(), "date,Manufacturing,Retail Trade");
    assert_eq!(csv.lines().count(), 4);
}
