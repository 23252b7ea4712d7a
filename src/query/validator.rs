//! Resolves raw query parameters against the live dataset.
//!
//! Checks run in a fixed order and stop at the first failure, so later
//! checks may assume earlier ones passed: `qtype`, then `station`, then the
//! station's observed date bounds, then `from_date`, then `to_date`.

use crate::dataset::ClimateDataset;
use crate::query::error::{DateParam, ValidationError};
use crate::query::params::{OutputMode, QueryParams, QueryType, ResolvedQuery};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validates `params` against `dataset`, producing a fully defaulted
/// [`ResolvedQuery`].
///
/// Defaults: an absent `from_date` resolves to the station's first observed
/// date, an absent `to_date` to its last. The `to_date`-after-`from_date`
/// ordering check fires only when `to_date` was explicitly supplied; a
/// defaulted `to_date` is accepted as-is. This asymmetry is long-standing
/// behavior, kept for compatibility.
///
/// # Errors
///
/// The first failing check wins; see [`ValidationError`] for the variants.
pub fn validate(
    params: &QueryParams,
    dataset: &ClimateDataset,
) -> Result<ResolvedQuery, ValidationError> {
    let qtype = match params.qtype.as_deref() {
        Some(raw) => {
            QueryType::parse(raw).ok_or_else(|| ValidationError::MissingOrInvalidQtype {
                value: Some(raw.to_string()),
            })?
        }
        None => return Err(ValidationError::MissingOrInvalidQtype { value: None }),
    };

    let station = match params.station.as_deref() {
        Some(raw) if dataset.has_station(raw) => raw,
        Some(raw) => {
            return Err(ValidationError::MissingOrInvalidStation {
                value: Some(raw.to_string()),
            })
        }
        None => return Err(ValidationError::MissingOrInvalidStation { value: None }),
    };

    // A station with metadata but no observations has no resolvable bounds,
    // so no query against it can be valid.
    let (min_date, max_date) = dataset.date_bounds(station).ok_or_else(|| {
        ValidationError::MissingOrInvalidStation {
            value: Some(station.to_string()),
        }
    })?;

    let from_date = match params.from_date.as_deref() {
        None => min_date,
        Some(raw) => {
            let parsed = parse_date(raw, DateParam::FromDate)?;
            if parsed < min_date {
                return Err(ValidationError::FromDateOutOfRange {
                    value: raw.to_string(),
                    min_date,
                    station: station.to_string(),
                });
            }
            parsed
        }
    };

    let to_date = match params.to_date.as_deref() {
        None => max_date,
        Some(raw) => {
            let parsed = parse_date(raw, DateParam::ToDate)?;
            if parsed > max_date {
                return Err(ValidationError::ToDateOutOfRange {
                    value: raw.to_string(),
                    max_date,
                    station: station.to_string(),
                });
            }
            if parsed <= from_date {
                return Err(ValidationError::ToDateNotAfterFromDate {
                    from_date,
                    to_date: parsed,
                });
            }
            parsed
        }
    };

    Ok(ResolvedQuery {
        qtype,
        station: station.to_string(),
        from_date,
        to_date,
    })
}

/// Validates the `mode` parameter of the station listing.
pub fn resolve_mode(mode: Option<&str>) -> Result<OutputMode, ValidationError> {
    match mode {
        Some(raw) => OutputMode::parse(raw).ok_or_else(|| ValidationError::MissingOrInvalidMode {
            value: Some(raw.to_string()),
        }),
        None => Err(ValidationError::MissingOrInvalidMode { value: None }),
    }
}

fn parse_date(raw: &str, param: DateParam) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| ValidationError::InvalidDateFormat {
        param,
        value: raw.to_string(),
    })
}
