//! Structured validation failures.
//!
//! Every variant carries the offending parameter and value as data; the
//! `Display` messages here are plain text. HTML fragments for frontends are
//! produced separately by [`crate::render`].

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Which date parameter a format failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateParam {
    FromDate,
    ToDate,
}

impl DateParam {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateParam::FromDate => "from_date",
            DateParam::ToDate => "to_date",
        }
    }
}

impl fmt::Display for DateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recoverable query-validation failure.
///
/// Validation stops at the first failure; no variant represents an
/// accumulation. All of these surface to the caller as an explanatory
/// message rather than a generic error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `qtype` was absent or not one of `stats`/`data`.
    #[error("{}; valid qtypes are 'stats' and 'data'", param_issue("qtype", .value))]
    MissingOrInvalidQtype { value: Option<String> },

    /// `station` was absent or does not appear in the station set.
    #[error(
        "{}; see the stations listing for valid stations",
        param_issue("station", .value)
    )]
    MissingOrInvalidStation { value: Option<String> },

    /// A supplied date did not parse as `YYYY-MM-DD`.
    #[error("invalid {param} format: '{value}'")]
    InvalidDateFormat { param: DateParam, value: String },

    /// `from_date` predates the station's first observation.
    #[error(
        "invalid from_date '{value}': from_date must occur on or after the \
         first available date {min_date} for station {station}"
    )]
    FromDateOutOfRange {
        value: String,
        min_date: NaiveDate,
        station: String,
    },

    /// `to_date` postdates the station's last observation.
    #[error(
        "invalid to_date '{value}': to_date must occur on or before the \
         last available date {max_date} for station {station}"
    )]
    ToDateOutOfRange {
        value: String,
        max_date: NaiveDate,
        station: String,
    },

    /// An explicitly supplied `to_date` was not strictly after the resolved
    /// `from_date`. Only fires when `to_date` is explicit; a defaulted
    /// `to_date` skips this check, a long-standing quirk kept for
    /// compatibility.
    #[error(
        "to_date must occur after from_date (from_date = '{from_date}' and \
         to_date = '{to_date}')"
    )]
    ToDateNotAfterFromDate {
        from_date: NaiveDate,
        to_date: NaiveDate,
    },

    /// `mode` was absent or not one of `json`/`html` on the station listing.
    #[error("{}; valid modes are 'json' and 'html'", param_issue("mode", .value))]
    MissingOrInvalidMode { value: Option<String> },
}

fn param_issue(param: &str, value: &Option<String>) -> String {
    match value {
        Some(v) => format!("invalid {param} '{v}'"),
        None => format!("you must specify the {param} for this query"),
    }
}
