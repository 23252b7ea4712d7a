//! Typed result objects for the three query operations.
//!
//! Field order is part of the wire shape: the structs declare their fields
//! in output order and serde keeps it.

use crate::directory::DirectoryEntry;
use crate::query::Variable;
use crate::series::{summarize, FilledSeries, RangeSummary};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Result of a `qtype=stats` query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsObject {
    pub station: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub statistics: RangeSummary,
}

impl StatsObject {
    pub fn from_series(series: &FilledSeries, variable: Variable) -> Self {
        Self {
            station: series.station.clone(),
            kind: variable.description(),
            statistics: summarize(series, variable),
        }
    }
}

/// Result of a `qtype=data` query: one entry per calendar day in range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataObject {
    pub station: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: Vec<DataPoint>,
}

impl DataObject {
    pub fn from_series(series: &FilledSeries, variable: Variable) -> Self {
        Self {
            station: series.station.clone(),
            kind: variable.description(),
            data: series
                .days
                .iter()
                .map(|day| DataPoint {
                    date: day.date,
                    column: variable.column_name(),
                    value: day.value(variable),
                })
                .collect(),
        }
    }
}

/// One day of a data query, serialized as `{"date": "...", "prec": 0.5}`
/// with the value key named after the queried column and `null` for days
/// that stayed absent after forward-fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub date: chrono::NaiveDate,
    pub column: &'static str,
    pub value: Option<f64>,
}

impl Serialize for DataPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("date", &self.date.format("%Y-%m-%d").to_string())?;
        map.serialize_entry(self.column, &self.value)?;
        map.end()
    }
}

/// Result of a precipitation or temperature query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Stats(StatsObject),
    Data(DataObject),
}

/// Result of the station listing, shaped per the requested mode.
///
/// Both shapes derive from the same [`DirectoryEntry`] sequence, so they
/// always expose the identical station set and date ranges.
#[derive(Debug, Clone, PartialEq)]
pub enum StationsResponse {
    Json(Vec<DirectoryEntry>),
    Html(String),
}
