//! Descriptive statistics over a filled range: mean, decile quantiles and
//! missing-value accounting.

use crate::query::Variable;
use crate::series::filler::FilledSeries;
use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;

/// The 11 probability points reported for every summary, labelled the way
/// the result object spells them.
const QUANTILE_POINTS: [(&str, f64); 11] = [
    ("min", 0.0),
    ("10th", 0.1),
    ("20th", 0.2),
    ("30th", 0.3),
    ("40th", 0.4),
    ("50th", 0.5),
    ("60th", 0.6),
    ("70th", 0.7),
    ("80th", 0.8),
    ("90th", 0.9),
    ("max", 1.0),
];

/// One labelled quantile, serialized as a single-entry object such as
/// `{"10th": 0.42}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantilePoint {
    pub label: &'static str,
    /// `None` (JSON `null`) when the range holds no values at all.
    pub value: Option<f64>,
}

impl Serialize for QuantilePoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.label, &self.value)?;
        map.end()
    }
}

/// Descriptive statistics for one variable over a filled range.
///
/// Immutable once computed. All statistics are taken over the filled series,
/// not the raw sparse measurements, so a carried-forward value counts on
/// every day it covers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSummary {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    /// Length of the filled series: the inclusive day count of the range.
    pub days_in_range: usize,
    pub value_count: usize,
    pub missing_value_count: usize,
    /// `missing_value_count / days_in_range`, e.g. `"12.34%"`.
    pub missing_value_percent: String,
    /// Mean over present values, 3 decimals; `None` when nothing is present.
    pub mean: Option<f64>,
    pub percentiles: Vec<QuantilePoint>,
}

/// Summarizes one variable of a filled series.
///
/// Quantiles use linear interpolation between order statistics and, like the
/// mean, ignore absent days. Values are rounded to 3 decimal places.
pub fn summarize(series: &FilledSeries, variable: Variable) -> RangeSummary {
    let days_in_range = series.len();
    let mut values: Vec<f64> = series
        .days
        .iter()
        .filter_map(|day| day.value(variable))
        .collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let missing_value_count = days_in_range - values.len();
    let mean = if values.is_empty() {
        None
    } else {
        Some(round3(values.iter().sum::<f64>() / values.len() as f64))
    };
    let percentiles = QUANTILE_POINTS
        .iter()
        .map(|&(label, q)| QuantilePoint {
            label,
            value: quantile_sorted(&values, q).map(round3),
        })
        .collect();

    RangeSummary {
        from_date: series.from_date,
        to_date: series.to_date,
        days_in_range,
        value_count: values.len(),
        missing_value_count,
        missing_value_percent: percent(missing_value_count, days_in_range),
        mean,
        percentiles,
    }
}

/// Linear-interpolation quantile over an ascending slice.
///
/// `q` must lie in `[0, 1]`; an empty slice has no quantiles.
fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let weight = position - lower as f64;
    Some(sorted[lower] + weight * (sorted[upper] - sorted[lower]))
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn percent(part: usize, whole: usize) -> String {
    let fraction = if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    };
    format!("{:.2}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::filler::FilledDay;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(values: Vec<Option<f64>>) -> FilledSeries {
        let from_date = date(2012, 1, 1);
        let days = values
            .iter()
            .enumerate()
            .map(|(i, v)| FilledDay {
                date: from_date + chrono::Duration::days(i as i64),
                prec: *v,
                temp: None,
            })
            .collect::<Vec<_>>();
        let to_date = days.last().map_or(from_date, |d| d.date);
        FilledSeries {
            station: "USC00519397".to_string(),
            from_date,
            to_date,
            days,
        }
    }

    #[test]
    fn quantiles_interpolate_linearly() {
        let summary = summarize(
            &series(vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
            Variable::Precipitation,
        );
        let value = |label: &str| {
            summary
                .percentiles
                .iter()
                .find(|p| p.label == label)
                .unwrap()
                .value
        };
        assert_eq!(value("min"), Some(1.0));
        assert_eq!(value("10th"), Some(1.3));
        assert_eq!(value("50th"), Some(2.5));
        assert_eq!(value("90th"), Some(3.7));
        assert_eq!(value("max"), Some(4.0));
        assert_eq!(summary.mean, Some(2.5));
    }

    #[test]
    fn quantiles_are_monotone() {
        let summary = summarize(
            &series(vec![
                Some(0.3),
                None,
                Some(0.05),
                Some(1.2),
                Some(0.0),
                None,
                Some(0.71),
            ]),
            Variable::Precipitation,
        );
        let values: Vec<f64> = summary.percentiles.iter().filter_map(|p| p.value).collect();
        assert_eq!(values.len(), 11);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn missing_and_value_counts_partition_the_range() {
        let summary = summarize(
            &series(vec![Some(0.1), None, None, Some(0.4)]),
            Variable::Precipitation,
        );
        assert_eq!(summary.days_in_range, 4);
        assert_eq!(summary.value_count, 2);
        assert_eq!(summary.missing_value_count, 2);
        assert_eq!(
            summary.value_count + summary.missing_value_count,
            summary.days_in_range
        );
        assert_eq!(summary.missing_value_percent, "50.00%");
    }

    #[test]
    fn percent_has_two_decimals() {
        let summary = summarize(
            &series(vec![None, Some(0.1), Some(0.2)]),
            Variable::Precipitation,
        );
        assert_eq!(summary.missing_value_percent, "33.33%");
    }

    #[test]
    fn all_missing_series_has_null_statistics() {
        let summary = summarize(&series(vec![None, None]), Variable::Precipitation);
        assert_eq!(summary.value_count, 0);
        assert_eq!(summary.missing_value_count, 2);
        assert_eq!(summary.missing_value_percent, "100.00%");
        assert_eq!(summary.mean, None);
        assert!(summary.percentiles.iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn single_value_collapses_all_quantiles() {
        let summary = summarize(&series(vec![Some(0.5)]), Variable::Precipitation);
        assert!(summary
            .percentiles
            .iter()
            .all(|p| p.value == Some(0.5)));
        assert_eq!(summary.mean, Some(0.5));
    }

    #[test]
    fn values_are_rounded_to_three_decimals() {
        let summary = summarize(
            &series(vec![Some(0.1), Some(0.2), Some(0.2)]),
            Variable::Precipitation,
        );
        // 0.5 / 3 = 0.166666...
        assert_eq!(summary.mean, Some(0.167));
    }

    #[test]
    fn quantile_point_serializes_as_single_entry_object() {
        let json = serde_json::to_string(&QuantilePoint {
            label: "10th",
            value: Some(0.42),
        })
        .unwrap();
        assert_eq!(json, r#"{"10th":0.42}"#);

        let json = serde_json::to_string(&QuantilePoint {
            label: "max",
            value: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"max":null}"#);
    }
}
