use crate::dataset::StorageError;
use crate::query::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClimateError {
    /// The recoverable validation failure, if that is what this error is.
    ///
    /// Frontends use this to distinguish "explain the query problem to the
    /// caller" from "surface a server error".
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            ClimateError::Validation(e) => Some(e),
            ClimateError::Storage(_) => None,
        }
    }
}
