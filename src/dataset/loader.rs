//! Reads the measurement and station tables from local Parquet or CSV files
//! and normalizes them into a [`ClimateDataset`].
//!
//! Normalization mirrors what the upstream dataset needs: the legacy column
//! names `prcp`/`tobs` are accepted alongside `prec`/`temp`, the internal
//! `id` row counter is ignored, and the date column is converted to
//! [`NaiveDate`] whether it arrives as a native date type or as a
//! `YYYY-MM-DD` string.

use crate::dataset::error::StorageError;
use crate::dataset::snapshot::{ClimateDataset, Measurement, StationMeta};
use chrono::NaiveDate;
use log::info;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tokio::task;

const MEASUREMENT_TABLE: &str = "measurement";
const STATION_TABLE: &str = "station";

/// Locations of the two dataset tables.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    /// Path to the measurement table (`.parquet` or `.csv`).
    pub measurements: PathBuf,
    /// Path to the station metadata table (`.parquet` or `.csv`).
    pub stations: PathBuf,
}

impl DatasetPaths {
    /// Resolves the default table files inside `dir`.
    ///
    /// Prefers `measurements.parquet`/`stations.parquet`, falling back to the
    /// `.csv` variants when the Parquet files are not present.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            measurements: pick_table(dir, "measurements"),
            stations: pick_table(dir, "stations"),
        }
    }
}

fn pick_table(dir: &Path, stem: &str) -> PathBuf {
    let parquet = dir.join(format!("{stem}.parquet"));
    if parquet.exists() {
        parquet
    } else {
        dir.join(format!("{stem}.csv"))
    }
}

/// Loads the full dataset from disk, once per call.
///
/// Each [`load`](DatasetLoader::load) performs a fresh read so queries never
/// observe shared mutable state. The blocking polars work runs on
/// [`tokio::task::spawn_blocking`].
pub struct DatasetLoader {
    paths: DatasetPaths,
}

impl DatasetLoader {
    pub fn new(paths: DatasetPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &DatasetPaths {
        &self.paths
    }

    /// Reads both tables and returns a normalized snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when a table file cannot be read, a required
    /// column is missing, or a value cannot be normalized (bad date, null
    /// key column).
    pub async fn load(&self) -> Result<ClimateDataset, StorageError> {
        let paths = self.paths.clone();
        task::spawn_blocking(move || load_blocking(&paths)).await?
    }
}

fn load_blocking(paths: &DatasetPaths) -> Result<ClimateDataset, StorageError> {
    let measurement_df = read_table(&paths.measurements)?;
    let station_df = read_table(&paths.stations)?;

    let measurements = extract_measurements(&measurement_df)?;
    let stations = extract_stations(&station_df)?;
    info!(
        "Loaded {} measurement rows and {} stations from {:?}",
        measurements.len(),
        stations.len(),
        paths.measurements.parent().unwrap_or(Path::new("")),
    );
    Ok(ClimateDataset::new(measurements, stations))
}

/// Reads a single table file, dispatching on the file extension.
fn read_table(path: &Path) -> Result<DataFrame, StorageError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("parquet") => LazyFrame::scan_parquet(path, Default::default())
            .map_err(|e| StorageError::TableRead(path.to_path_buf(), e))?
            .collect()
            .map_err(|e| StorageError::TableRead(path.to_path_buf(), e)),
        Some("csv") => CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| StorageError::TableRead(path.to_path_buf(), e))?
            .finish()
            .map_err(|e| StorageError::TableRead(path.to_path_buf(), e)),
        _ => Err(StorageError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn extract_measurements(df: &DataFrame) -> Result<Vec<Measurement>, StorageError> {
    let stations = str_values(df, MEASUREMENT_TABLE, "station", &["station"])?;
    let dates = date_values(df, MEASUREMENT_TABLE, "date", &["date"])?;
    let prec = f64_values(df, MEASUREMENT_TABLE, "prec", &["prec", "prcp"])?;
    let temp = f64_values(df, MEASUREMENT_TABLE, "temp", &["temp", "tobs"])?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        rows.push(Measurement {
            station: require(stations[i].clone(), MEASUREMENT_TABLE, "station", i)?,
            date: require(dates[i], MEASUREMENT_TABLE, "date", i)?,
            prec: prec[i],
            temp: temp[i],
        });
    }
    Ok(rows)
}

fn extract_stations(df: &DataFrame) -> Result<Vec<StationMeta>, StorageError> {
    let stations = str_values(df, STATION_TABLE, "station", &["station"])?;
    let names = str_values(df, STATION_TABLE, "name", &["name"])?;
    let latitudes = f64_values(df, STATION_TABLE, "latitude", &["latitude"])?;
    let longitudes = f64_values(df, STATION_TABLE, "longitude", &["longitude"])?;
    let elevations = f64_values(df, STATION_TABLE, "elevation", &["elevation"])?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        rows.push(StationMeta {
            station: require(stations[i].clone(), STATION_TABLE, "station", i)?,
            name: require(names[i].clone(), STATION_TABLE, "name", i)?,
            latitude: require(latitudes[i], STATION_TABLE, "latitude", i)?,
            longitude: require(longitudes[i], STATION_TABLE, "longitude", i)?,
            elevation: require(elevations[i], STATION_TABLE, "elevation", i)?,
        });
    }
    Ok(rows)
}

/// Looks a column up under its normalized name or any accepted alias.
fn column<'a>(
    df: &'a DataFrame,
    table: &'static str,
    canonical: &'static str,
    names: &[&str],
) -> Result<&'a Column, StorageError> {
    for name in names {
        if let Ok(col) = df.column(name) {
            return Ok(col);
        }
    }
    Err(StorageError::MissingColumn {
        table,
        column: canonical,
    })
}

fn str_values(
    df: &DataFrame,
    table: &'static str,
    canonical: &'static str,
    names: &[&str],
) -> Result<Vec<Option<String>>, StorageError> {
    let col = column(df, table, canonical, names)?;
    let ca = col.str().map_err(|e| StorageError::ColumnType {
        table,
        column: canonical,
        source: e,
    })?;
    Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
}

fn f64_values(
    df: &DataFrame,
    table: &'static str,
    canonical: &'static str,
    names: &[&str],
) -> Result<Vec<Option<f64>>, StorageError> {
    let col = column(df, table, canonical, names)?;
    let casted = col
        .cast(&DataType::Float64)
        .map_err(|e| StorageError::ColumnType {
            table,
            column: canonical,
            source: e,
        })?;
    let ca = casted.f64().map_err(|e| StorageError::ColumnType {
        table,
        column: canonical,
        source: e,
    })?;
    Ok(ca.into_iter().collect())
}

fn date_values(
    df: &DataFrame,
    table: &'static str,
    canonical: &'static str,
    names: &[&str],
) -> Result<Vec<Option<NaiveDate>>, StorageError> {
    let col = column(df, table, canonical, names)?;
    match col.dtype() {
        DataType::Date => {
            let ca = col.date().map_err(|e| StorageError::ColumnType {
                table,
                column: canonical,
                source: e,
            })?;
            Ok(ca.into_iter().map(|v| v.map(epoch_day)).collect())
        }
        DataType::String => {
            let ca = col.str().map_err(|e| StorageError::ColumnType {
                table,
                column: canonical,
                source: e,
            })?;
            ca.into_iter()
                .map(|v| match v {
                    None => Ok(None),
                    Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                        .map(Some)
                        .map_err(|_| StorageError::InvalidDate {
                            table,
                            value: raw.to_string(),
                        }),
                })
                .collect()
        }
        other => Err(StorageError::ColumnType {
            table,
            column: canonical,
            source: PolarsError::SchemaMismatch(
                format!("expected Date or String for '{canonical}', got {other:?}").into(),
            ),
        }),
    }
}

/// Converts polars' physical date representation (days since the Unix epoch).
fn epoch_day(days: i32) -> NaiveDate {
    NaiveDate::default() + chrono::Duration::days(days as i64)
}

fn require<T>(
    value: Option<T>,
    table: &'static str,
    column: &'static str,
    row: usize,
) -> Result<T, StorageError> {
    value.ok_or(StorageError::NullValue { table, column, row })
}
