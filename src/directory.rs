//! The station directory: station metadata joined with per-station coverage
//! statistics.

use crate::dataset::ClimateDataset;
use chrono::NaiveDate;
use serde::Serialize;

/// One station's metadata merged with its computed coverage statistics.
///
/// Serialized field order is the order the listing presents its columns in,
/// for both the JSON and the HTML shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryEntry {
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    /// First date with any observation for this station.
    pub start_date: NaiveDate,
    /// Last date with any observation for this station.
    pub end_date: NaiveDate,
    /// Share of days in `[start_date, end_date]` without a precipitation
    /// value, e.g. `"12.34%"`.
    pub prec_percent_missing: String,
    /// Same for temperature.
    pub temp_percent_missing: String,
}

/// Builds the directory: one entry per station that has observations, sorted
/// by station id ascending.
///
/// Stations present in the metadata table but absent from the measurement
/// set have no coverage to report and are omitted.
pub fn build_directory(dataset: &ClimateDataset) -> Vec<DirectoryEntry> {
    let mut entries: Vec<DirectoryEntry> = dataset
        .stations()
        .iter()
        .filter_map(|meta| {
            let (start_date, end_date) = dataset.date_bounds(&meta.station)?;
            let mut prec_count = 0usize;
            let mut temp_count = 0usize;
            for row in dataset.station_rows(&meta.station) {
                if row.prec.is_some() {
                    prec_count += 1;
                }
                if row.temp.is_some() {
                    temp_count += 1;
                }
            }
            let daterange_count = (end_date - start_date).num_days() as usize + 1;
            Some(DirectoryEntry {
                station: meta.station.clone(),
                name: meta.name.clone(),
                latitude: meta.latitude,
                longitude: meta.longitude,
                elevation: meta.elevation,
                start_date,
                end_date,
                prec_percent_missing: percent_missing(prec_count, daterange_count),
                temp_percent_missing: percent_missing(temp_count, daterange_count),
            })
        })
        .collect();
    entries.sort_by(|a, b| a.station.cmp(&b.station));
    entries
}

/// `1 - round(observed / span, 4)` as a 2-decimal percent string.
fn percent_missing(observed: usize, span: usize) -> String {
    let covered = (observed as f64 / span as f64 * 10_000.0).round() / 10_000.0;
    format!("{:.2}%", (1.0 - covered) * 100.0)
}
