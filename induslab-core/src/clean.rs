//! Cleaning filters.
//!
//! Two straight-line predicates: continental-US scope for the boundary
//! set, and totals-only rows for the census frame. Both are pure (same
//! input, same output) and a missing column fails the step outright.

use crate::data::{BoundarySet, DataError};
use polars::prelude::*;

/// Postal codes excluded from the continental scope.
pub const NON_CONTINENTAL: [&str; 7] = ["HI", "VI", "MP", "GU", "AK", "AS", "PR"];

/// The `NAICS` sentinel marking the all-industries total row.
pub const ALL_INDUSTRIES: &str = "--";

/// Drop every boundary row (and its shape) whose postal code lies outside
/// the continental US. All other rows pass through unchanged.
pub fn filter_continental(boundaries: &BoundarySet) -> Result<BoundarySet, DataError> {
    let stusps = boundaries.attrs.column("STUSPS")?.str()?;
    let mask: BooleanChunked = stusps
        .into_iter()
        .map(|code| code.map(|c| !NON_CONTINENTAL.contains(&c)))
        .collect();

    let attrs = boundaries.attrs.filter(&mask)?;
    let shapes = boundaries
        .shapes
        .iter()
        .filter(|(code, _)| !NON_CONTINENTAL.contains(&code.as_str()))
        .map(|(code, shape)| (code.clone(), shape.clone()))
        .collect();

    Ok(BoundarySet { attrs, shapes })
}

/// Keep only state-level all-industries totals:
/// `STATEFP != 0` (drop the whole-nation aggregate), `ENTRSIZE == 1`
/// (all enterprise sizes combined), `NAICS == "--"` (all industries).
pub fn filter_census_totals(census: &DataFrame) -> Result<DataFrame, DataError> {
    let filtered = census
        .clone()
        .lazy()
        .filter(
            col("STATEFP")
                .neq(0)
                .and(col("ENTRSIZE").eq(1))
                .and(col("NAICS").eq(lit(ALL_INDUSTRIES))),
        )
        .collect()?;
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StateShape;
    use std::collections::HashMap;

    fn boundary_fixture() -> BoundarySet {
        let attrs = df!(
            "STATEFP" => &["17", "15", "02", "36"],
            "STUSPS" => &["IL", "HI", "AK", "NY"],
            "NAME" => &["Illinois", "Hawaii", "Alaska", "New York"],
        )
        .unwrap();
        let shapes: HashMap<String, StateShape> = ["IL", "HI", "AK", "NY"]
            .iter()
            .map(|code| {
                (
                    code.to_string(),
                    StateShape {
                        rings: vec![vec![(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)]],
                    },
                )
            })
            .collect();
        BoundarySet { attrs, shapes }
    }

    #[test]
    fn continental_filter_drops_the_excluded_territories() {
        let filtered = filter_continental(&boundary_fixture()).unwrap();

        let kept: Vec<Option<&str>> = filtered
            .attrs
            .column("STUSPS")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(kept, vec![Some("IL"), Some("NY")]);

        assert!(filtered.shapes.contains_key("IL"));
        assert!(filtered.shapes.contains_key("NY"));
        assert!(!filtered.shapes.contains_key("HI"));
        assert!(!filtered.shapes.contains_key("AK"));
    }

    #[test]
    fn continental_filter_passes_other_rows_unchanged() {
        let original = boundary_fixture();
        let filtered = filter_continental(&original).unwrap();
        assert_eq!(filtered.shapes["IL"], original.shapes["IL"]);
        assert_eq!(
            filtered.attrs.column("NAME").unwrap().str().unwrap().get(0),
            Some("Illinois")
        );
    }

    #[test]
    fn census_filter_keeps_only_state_level_totals() {
        let census = df!(
            "STATEFP" => &[0i64, 17, 17, 17, 36],
            "ENTRSIZE" => &[1i64, 1, 2, 1, 1],
            "NAICS" => &["--", "--", "--", "23", "--"],
            "PAYR" => &[9999i64, 250, 120, 40, 400],
        )
        .unwrap();

        let filtered = filter_census_totals(&census).unwrap();
        assert_eq!(filtered.height(), 2);
        assert!(filtered.height() <= census.height());

        let states: Vec<Option<i64>> = filtered
            .column("STATEFP")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(states, vec![Some(17), Some(36)]);
    }

    #[test]
    fn census_filter_without_expected_column_fails() {
        let census = df!("STATEFP" => &[17i64]).unwrap();
        assert!(filter_census_totals(&census).is_err());
    }

    #[test]
    fn cleaning_is_idempotent() {
        let census = df!(
            "STATEFP" => &[0i64, 17, 36],
            "ENTRSIZE" => &[1i64, 1, 1],
            "NAICS" => &["--", "--", "--"],
            "PAYR" => &[9999i64, 250, 400],
        )
        .unwrap();

        let once = filter_census_totals(&census).unwrap();
        let twice = filter_census_totals(&once).unwrap();
        assert!(once.equals(&twice));

        let boundaries = boundary_fixture();
        let once = filter_continental(&boundaries).unwrap();
        let twice = filter_continental(&once).unwrap();
        assert!(once.attrs.equals(&twice.attrs));
        assert_eq!(once.shapes.len(), twice.shapes.len());
    }
}
