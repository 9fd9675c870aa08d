//! State boundary loader.
//!
//! Parses a GeoJSON `FeatureCollection` of cartographic state boundaries
//! via serde wire structs; GeoJSON is plain JSON, no geo stack needed.
//! Only what the pipeline uses survives: the FIPS code (kept as the
//! string the file carries; the merge step casts it), the postal
//! abbreviation, the state name, and polygon exterior rings keyed by
//! postal code for the choropleth.

use super::DataError;
use polars::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: FeatureProperties,
    geometry: FeatureGeometry,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    #[serde(rename = "STATEFP")]
    statefp: String,
    #[serde(rename = "STUSPS")]
    stusps: String,
    #[serde(rename = "NAME")]
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum FeatureGeometry {
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
}

/// One state's drawable outline: the exterior ring of each polygon part.
#[derive(Debug, Clone, PartialEq)]
pub struct StateShape {
    pub rings: Vec<Vec<(f64, f64)>>,
}

/// Boundary attributes plus geometry.
///
/// The frame side (`STATEFP` string, `STUSPS`, `NAME`) feeds the census
/// merge; the shape side feeds the choropleth, keyed by postal code since
/// that column survives the merge unchanged.
#[derive(Debug, Clone)]
pub struct BoundarySet {
    pub attrs: DataFrame,
    pub shapes: HashMap<String, StateShape>,
}

pub fn load_boundaries(path: &Path) -> Result<BoundarySet, DataError> {
    let content = std::fs::read_to_string(path).map_err(|e| DataError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_boundaries(&content)
}

pub fn parse_boundaries(geojson: &str) -> Result<BoundarySet, DataError> {
    let collection: FeatureCollection = serde_json::from_str(geojson)
        .map_err(|e| DataError::ResponseFormatChanged(format!("boundary GeoJSON: {e}")))?;

    let n = collection.features.len();
    let mut statefp = Vec::with_capacity(n);
    let mut stusps = Vec::with_capacity(n);
    let mut name = Vec::with_capacity(n);
    let mut shapes = HashMap::with_capacity(n);

    for feature in collection.features {
        shapes.insert(
            feature.properties.stusps.clone(),
            StateShape {
                rings: exterior_rings(&feature.geometry),
            },
        );
        statefp.push(feature.properties.statefp);
        stusps.push(feature.properties.stusps);
        name.push(feature.properties.name);
    }

    let attrs = DataFrame::new(vec![
        Series::new("STATEFP".into(), statefp).into_column(),
        Series::new("STUSPS".into(), stusps).into_column(),
        Series::new("NAME".into(), name).into_column(),
    ])?;

    Ok(BoundarySet { attrs, shapes })
}

/// Exterior ring of every polygon part. Interior rings (holes) are rare
/// in state outlines and are dropped.
fn exterior_rings(geometry: &FeatureGeometry) -> Vec<Vec<(f64, f64)>> {
    fn ring(points: &[[f64; 2]]) -> Vec<(f64, f64)> {
        points.iter().map(|p| (p[0], p[1])).collect()
    }
    match geometry {
        FeatureGeometry::Polygon { coordinates } => coordinates
            .first()
            .map(|outer| vec![ring(outer)])
            .unwrap_or_default(),
        FeatureGeometry::MultiPolygon { coordinates } => coordinates
            .iter()
            .filter_map(|polygon| polygon.first())
            .map(|outer| ring(outer))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"STATEFP": "17", "STUSPS": "IL", "NAME": "Illinois"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-91.5, 40.0], [-87.5, 40.0], [-87.5, 42.5], [-91.5, 40.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"STATEFP": "15", "STUSPS": "HI", "NAME": "Hawaii"},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[-156.0, 19.5], [-155.0, 19.5], [-155.5, 20.2], [-156.0, 19.5]]],
                        [[[-157.0, 21.0], [-156.5, 21.0], [-156.8, 21.5], [-157.0, 21.0]]]
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn parses_attributes_and_shapes() {
        let set = parse_boundaries(FIXTURE).unwrap();
        assert_eq!(set.attrs.height(), 2);
        assert_eq!(
            set.attrs.column("STUSPS").unwrap().str().unwrap().get(0),
            Some("IL")
        );
        // STATEFP stays a string until the merge casts it
        assert_eq!(
            set.attrs.column("STATEFP").unwrap().str().unwrap().get(0),
            Some("17")
        );

        let il = &set.shapes["IL"];
        assert_eq!(il.rings.len(), 1);
        assert_eq!(il.rings[0][0], (-91.5, 40.0));

        // one exterior ring per MultiPolygon part
        assert_eq!(set.shapes["HI"].rings.len(), 2);
    }

    #[test]
    fn malformed_geojson_is_a_format_error() {
        let result = parse_boundaries("{\"type\": \"FeatureCollection\"");
        assert!(matches!(
            result,
            Err(DataError::ResponseFormatChanged(_))
        ));
    }
}
