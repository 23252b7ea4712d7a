pub mod error;
pub mod params;
pub mod validator;

pub use error::{DateParam, ValidationError};
pub use params::{OutputMode, QueryParams, QueryType, ResolvedQuery, Variable};
pub use validator::{resolve_mode, validate};
