//! Transform steps: census merge and employment reshape.

use crate::data::{BoundarySet, DataError, RawObservation, RawSeries, SeriesCatalog};
use chrono::NaiveDate;
use polars::prelude::*;

/// Inner-join cleaned boundaries with cleaned census totals on `STATEFP`.
///
/// The boundary frame carries `STATEFP` as the string the file ships; it
/// is cast to `Int64` here so the key matches the census side. Regions
/// present on one side only drop silently. Inner-join semantics, not
/// configurable.
pub fn merge_census(boundaries: &BoundarySet, census: &DataFrame) -> Result<DataFrame, DataError> {
    let attrs = boundaries
        .attrs
        .clone()
        .lazy()
        .with_column(col("STATEFP").cast(DataType::Int64));
    let merged = attrs
        .inner_join(census.clone().lazy(), col("STATEFP"), col("STATEFP"))
        .collect()?;
    Ok(merged)
}

/// Reshaped employment data: a shared chronological date axis plus one
/// value column per catalogued industry.
#[derive(Debug, Clone, PartialEq)]
pub struct EmploymentTable {
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<EmploymentColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmploymentColumn {
    pub label: String,
    pub values: Vec<f64>,
}

/// Pivot raw API series into a date-indexed table.
///
/// The date axis comes from the first series' `(year, period)` pairs:
/// the period code's numeric suffix is the month, the day is always 01.
/// The API returns observations newest-first; the table is chronological.
/// Series sharing that axis is an accepted precondition of the source,
/// not validated here. Column labels come from the catalog, looked up by
/// series id.
pub fn reshape_employment(
    raw: &[RawSeries],
    catalog: &SeriesCatalog,
) -> Result<EmploymentTable, DataError> {
    let first = raw.first().ok_or_else(|| {
        DataError::ResponseFormatChanged("employment response contains no series".into())
    })?;

    let mut dates = first
        .data
        .iter()
        .map(observation_date)
        .collect::<Result<Vec<_>, _>>()?;
    dates.reverse();

    let mut columns = Vec::with_capacity(raw.len());
    for series in raw {
        let label = catalog
            .label(&series.series_id)
            .ok_or_else(|| DataError::UnknownSeries(series.series_id.clone()))?;

        let mut values = series
            .data
            .iter()
            .map(|obs| {
                obs.value.parse::<f64>().map_err(|e| {
                    DataError::ResponseFormatChanged(format!(
                        "value {:?} in series {}: {e}",
                        obs.value, series.series_id
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        values.reverse();

        columns.push(EmploymentColumn {
            label: label.to_string(),
            values,
        });
    }

    Ok(EmploymentTable { dates, columns })
}

fn observation_date(obs: &RawObservation) -> Result<NaiveDate, DataError> {
    let year: i32 = obs.year.parse().map_err(|_| {
        DataError::ResponseFormatChanged(format!("unparseable year {:?}", obs.year))
    })?;
    let month: u32 = obs.period.get(1..).unwrap_or("").parse().map_err(|_| {
        DataError::ResponseFormatChanged(format!("unparseable period {:?}", obs.period))
    })?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        DataError::ResponseFormatChanged(format!(
            "no calendar date for year {year} period {}",
            obs.period
        ))
    })
}
