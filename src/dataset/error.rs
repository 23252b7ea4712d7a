use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read table file '{0}'")]
    TableRead(PathBuf, #[source] PolarsError),

    #[error("Unsupported table format for '{0}', expected .parquet or .csv")]
    UnsupportedFormat(PathBuf),

    #[error("Required column '{column}' not found in the {table} table")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("Column '{column}' in the {table} table has an unexpected type")]
    ColumnType {
        table: &'static str,
        column: &'static str,
        #[source]
        source: PolarsError,
    },

    #[error("Unparseable date '{value}' in the {table} table")]
    InvalidDate { table: &'static str, value: String },

    #[error("Null '{column}' value at row {row} of the {table} table")]
    NullValue {
        table: &'static str,
        column: &'static str,
        row: usize,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
