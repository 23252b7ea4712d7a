//! The main entry point for querying the climate dataset.
//!
//! [`ClimateService`] exposes the three query operations (station listing,
//! precipitation, temperature) as builder methods. Every call loads a fresh
//! dataset snapshot, so requests are independent and safe to run in
//! parallel.

use crate::dataset::{DatasetLoader, DatasetPaths};
use crate::directory::build_directory;
use crate::error::ClimateError;
use crate::query::{resolve_mode, validate, OutputMode, QueryParams, QueryType, Variable};
use crate::render;
use crate::response::{DataObject, QueryResponse, StationsResponse, StatsObject};
use crate::series::fill_range;
use bon::bon;
use std::path::PathBuf;

/// Read-only query client over the climate dataset.
///
/// # Examples
///
/// ```no_run
/// use hawaii_climate::{ClimateService, ClimateError};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), ClimateError> {
/// let service = ClimateService::new("data");
///
/// let stats = service
///     .precipitation()
///     .qtype("stats")
///     .station("USC00519397")
///     .from_date("2012-01-01")
///     .to_date("2012-12-31")
///     .call()
///     .await?;
/// println!("{}", serde_json::to_string_pretty(&stats).unwrap());
/// # Ok(())
/// # }
/// ```
pub struct ClimateService {
    loader: DatasetLoader,
}

#[bon]
impl ClimateService {
    /// Creates a service reading the default table files inside `data_dir`
    /// (`measurements.parquet`/`stations.parquet`, or the `.csv` variants).
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_paths(DatasetPaths::from_dir(data_dir.into()))
    }

    /// Creates a service reading explicitly configured table files.
    pub fn with_paths(paths: DatasetPaths) -> Self {
        Self {
            loader: DatasetLoader::new(paths),
        }
    }

    /// Lists all stations with their metadata and coverage statistics.
    ///
    /// # Arguments
    ///
    /// * `.mode(&str)` / `.maybe_mode(Option<&str>)`: **required by the
    ///   operation** (`json` or `html`), but accepted as an option so a
    ///   frontend can pass the raw query parameter through and get the
    ///   proper validation error back.
    ///
    /// # Errors
    ///
    /// [`ClimateError::Validation`] with `MissingOrInvalidMode` when `mode`
    /// is absent or unknown; [`ClimateError::Storage`] when the dataset
    /// cannot be read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use hawaii_climate::{ClimateService, ClimateError, StationsResponse};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), ClimateError> {
    /// let service = ClimateService::new("data");
    /// match service.stations().mode("json").call().await? {
    ///     StationsResponse::Json(entries) => println!("{} stations", entries.len()),
    ///     StationsResponse::Html(table) => println!("{table}"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn stations(&self, mode: Option<&str>) -> Result<StationsResponse, ClimateError> {
        let mode = resolve_mode(mode)?;
        let dataset = self.loader.load().await?;
        let entries = build_directory(&dataset);
        Ok(match mode {
            OutputMode::Json => StationsResponse::Json(entries),
            OutputMode::Html => StationsResponse::Html(render::stations_table(&entries)),
        })
    }

    /// Queries precipitation for one station.
    ///
    /// All arguments arrive as raw query-string values; validation and
    /// defaulting happen against the loaded dataset. `qtype` and `station`
    /// are required by the operation, `from_date`/`to_date` default to the
    /// station's observed record.
    ///
    /// # Errors
    ///
    /// [`ClimateError::Validation`] for any parameter problem (see
    /// [`crate::ValidationError`]); [`ClimateError::Storage`] when the
    /// dataset cannot be read.
    #[builder]
    pub async fn precipitation(
        &self,
        qtype: Option<&str>,
        station: Option<&str>,
        from_date: Option<&str>,
        to_date: Option<&str>,
    ) -> Result<QueryResponse, ClimateError> {
        self.query(Variable::Precipitation, &raw_params(qtype, station, from_date, to_date))
            .await
    }

    /// Queries temperature for one station. Same shape as
    /// [`precipitation`](Self::precipitation), different value column.
    #[builder]
    pub async fn temperature(
        &self,
        qtype: Option<&str>,
        station: Option<&str>,
        from_date: Option<&str>,
        to_date: Option<&str>,
    ) -> Result<QueryResponse, ClimateError> {
        self.query(Variable::Temperature, &raw_params(qtype, station, from_date, to_date))
            .await
    }

    /// Validates and executes one measurement query.
    ///
    /// This is the non-builder core behind [`precipitation`](Self::precipitation)
    /// and [`temperature`](Self::temperature).
    pub async fn query(
        &self,
        variable: Variable,
        params: &QueryParams,
    ) -> Result<QueryResponse, ClimateError> {
        let dataset = self.loader.load().await?;
        let resolved = validate(params, &dataset)?;
        let series = fill_range(
            &dataset,
            &resolved.station,
            resolved.from_date,
            resolved.to_date,
        );
        Ok(match resolved.qtype {
            QueryType::Stats => QueryResponse::Stats(StatsObject::from_series(&series, variable)),
            QueryType::Data => QueryResponse::Data(DataObject::from_series(&series, variable)),
        })
    }
}

fn raw_params(
    qtype: Option<&str>,
    station: Option<&str>,
    from_date: Option<&str>,
    to_date: Option<&str>,
) -> QueryParams {
    QueryParams {
        qtype: qtype.map(str::to_string),
        station: station.map(str::to_string),
        from_date: from_date.map(str::to_string),
        to_date: to_date.map(str::to_string),
    }
}
