pub mod error;
pub mod loader;
pub mod snapshot;

pub use error::StorageError;
pub use loader::{DatasetLoader, DatasetPaths};
pub use snapshot::{ClimateDataset, Measurement, StationMeta};
