//! In-memory snapshot of the climate dataset: normalized measurement rows and
//! station metadata, rebuilt fresh for every query.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily observation for a station.
///
/// Dates are not guaranteed to be contiguous: days without an observation are
/// simply absent, not null-valued rows. At most one record exists per
/// `(station, date)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Station code this observation belongs to (e.g. "USC00519397").
    pub station: String,
    /// Calendar day of the observation.
    pub date: NaiveDate,
    /// Precipitation in inches, if recorded that day.
    pub prec: Option<f64>,
    /// Observed temperature in degrees Fahrenheit, if recorded that day.
    pub temp: Option<f64>,
}

/// Metadata for a single weather station.
///
/// The `station` code is unique and is the foreign key into the measurement
/// set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationMeta {
    /// The unique station code.
    pub station: String,
    /// Human-readable station name.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Elevation in feet.
    pub elevation: f64,
}

/// A read-only snapshot of both dataset tables.
///
/// Produced by [`crate::DatasetLoader::load`] (or built directly from rows,
/// which the tests and benches do). Measurements are kept sorted by
/// `(station, date)` so per-station scans see dates in ascending order.
#[derive(Debug, Clone)]
pub struct ClimateDataset {
    measurements: Vec<Measurement>,
    stations: Vec<StationMeta>,
}

impl ClimateDataset {
    /// Builds a snapshot from raw rows, sorting measurements by
    /// `(station, date)`.
    pub fn new(mut measurements: Vec<Measurement>, stations: Vec<StationMeta>) -> Self {
        measurements.sort_by(|a, b| a.station.cmp(&b.station).then(a.date.cmp(&b.date)));
        Self {
            measurements,
            stations,
        }
    }

    /// All measurement rows, sorted by `(station, date)`.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// All station metadata rows, in table order.
    pub fn stations(&self) -> &[StationMeta] {
        &self.stations
    }

    /// Whether `station` appears in the station metadata table.
    pub fn has_station(&self, station: &str) -> bool {
        self.stations.iter().any(|s| s.station == station)
    }

    /// The station's measurement rows in ascending date order.
    pub fn station_rows<'a>(&'a self, station: &'a str) -> impl Iterator<Item = &'a Measurement> {
        self.measurements.iter().filter(move |m| m.station == station)
    }

    /// Observed `(min_date, max_date)` for `station`, or `None` when the
    /// station has no measurement rows at all.
    pub fn date_bounds(&self, station: &str) -> Option<(NaiveDate, NaiveDate)> {
        let mut rows = self.station_rows(station);
        let first = rows.next()?.date;
        let last = rows.last().map_or(first, |m| m.date);
        Some((first, last))
    }
}
