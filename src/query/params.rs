//! Typed query parameters: the raw inputs a frontend hands over, the enums
//! they resolve to, and the fully resolved query the validator produces.

use bon::Builder;
use chrono::NaiveDate;
use std::fmt;

/// Raw, unvalidated query parameters as they arrive from a query string.
///
/// All fields are optional; [`crate::validate`] decides which absences are
/// defaults and which are errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct QueryParams {
    /// Requested query type, `stats` or `data`.
    pub qtype: Option<String>,
    /// Station code to query.
    pub station: Option<String>,
    /// Inclusive start date, `YYYY-MM-DD`. Defaults to the station's first
    /// available date.
    pub from_date: Option<String>,
    /// Inclusive end date, `YYYY-MM-DD`. Defaults to the station's last
    /// available date.
    pub to_date: Option<String>,
}

/// What a measurement query should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    /// Descriptive statistics over the requested range.
    Stats,
    /// The raw (gap-filled) daily series.
    Data,
}

impl QueryType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "stats" => Some(QueryType::Stats),
            "data" => Some(QueryType::Data),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Stats => "stats",
            QueryType::Data => "data",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output shape for the station listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputMode {
    Json,
    Html,
}

impl OutputMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "json" => Some(OutputMode::Json),
            "html" => Some(OutputMode::Html),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Json => "json",
            OutputMode::Html => "html",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The measured variable a query targets.
///
/// Selects which value column of the measurement set flows through the range
/// filler and summarizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    Precipitation,
    Temperature,
}

impl Variable {
    /// The normalized measurement column this variable reads.
    pub fn column_name(&self) -> &'static str {
        match self {
            Variable::Precipitation => "prec",
            Variable::Temperature => "temp",
        }
    }

    /// Human-readable name, used as the `type` field of result objects.
    pub fn description(&self) -> &'static str {
        match self {
            Variable::Precipitation => "precipitation",
            Variable::Temperature => "temperature",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A validated, fully defaulted query, ready for execution.
///
/// Only [`crate::validate`] produces these. Holding one guarantees the
/// station exists and both dates lie within its observed record (subject to
/// the documented `to_date` defaulting quirk).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuery {
    pub qtype: QueryType,
    pub station: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}
