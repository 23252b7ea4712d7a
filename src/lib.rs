mod dataset;
mod directory;
mod error;
mod query;
mod render;
mod response;
mod series;
mod service;

pub use error::ClimateError;
pub use service::ClimateService;

pub use dataset::{ClimateDataset, DatasetLoader, DatasetPaths, Measurement, StationMeta};
pub use dataset::StorageError;

pub use query::{DateParam, OutputMode, QueryParams, QueryType, ResolvedQuery, Variable};
pub use query::{resolve_mode, validate, ValidationError};

pub use series::{fill_range, summarize, FilledDay, FilledSeries, QuantilePoint, RangeSummary};

pub use directory::{build_directory, DirectoryEntry};
pub use render::{error_fragment, stations_table};
pub use response::{DataObject, DataPoint, QueryResponse, StationsResponse, StatsObject};
