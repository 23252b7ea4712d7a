//! Gap-filling of sparse daily measurements onto a continuous calendar index.

use crate::dataset::ClimateDataset;
use crate::query::Variable;
use chrono::NaiveDate;

/// One day of a [`FilledSeries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilledDay {
    pub date: NaiveDate,
    /// Precipitation, forward-filled. `None` until the first in-range
    /// observation.
    pub prec: Option<f64>,
    /// Temperature, forward-filled independently of precipitation.
    pub temp: Option<f64>,
}

impl FilledDay {
    /// The value of the requested variable on this day.
    pub fn value(&self, variable: Variable) -> Option<f64> {
        match variable {
            Variable::Precipitation => self.prec,
            Variable::Temperature => self.temp,
        }
    }
}

/// A continuous daily series spanning every calendar day of a query range.
///
/// Gaps in the underlying measurement set are filled by carrying forward the
/// nearest earlier observed value; days before the first in-range
/// observation stay absent.
#[derive(Debug, Clone, PartialEq)]
pub struct FilledSeries {
    pub station: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub days: Vec<FilledDay>,
}

impl FilledSeries {
    /// Number of days in the series. Equals the inclusive day count between
    /// `from_date` and `to_date` whenever `from_date <= to_date`.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Builds the filled series for `station` over `[from_date, to_date]`
/// inclusive.
///
/// Each value column is forward-filled independently using the last
/// non-missing observation at or before that day within the range. A range
/// with zero observed rows yields an entirely absent-valued series, and
/// `from_date == to_date` yields a single day. A `from_date` after
/// `to_date` yields an empty series.
pub fn fill_range(
    dataset: &ClimateDataset,
    station: &str,
    from_date: NaiveDate,
    to_date: NaiveDate,
) -> FilledSeries {
    let mut rows = dataset
        .station_rows(station)
        .filter(|m| m.date >= from_date && m.date <= to_date)
        .peekable();

    let capacity = (to_date - from_date).num_days().max(0) as usize + 1;
    let mut days = Vec::with_capacity(capacity);
    let mut last_prec = None;
    let mut last_temp = None;

    for date in from_date.iter_days().take_while(|d| *d <= to_date) {
        // Rows are date-sorted; anything behind the cursor is a duplicate
        // date and gets skipped.
        while rows.peek().is_some_and(|row| row.date < date) {
            rows.next();
        }
        if let Some(row) = rows.peek() {
            if row.date == date {
                if row.prec.is_some() {
                    last_prec = row.prec;
                }
                if row.temp.is_some() {
                    last_temp = row.temp;
                }
                rows.next();
            }
        }
        days.push(FilledDay {
            date,
            prec: last_prec,
            temp: last_temp,
        });
    }

    FilledSeries {
        station: station.to_string(),
        from_date,
        to_date,
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Measurement, StationMeta};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn meta(station: &str) -> StationMeta {
        StationMeta {
            station: station.to_string(),
            name: format!("{station}, HI US"),
            latitude: 21.27,
            longitude: -157.82,
            elevation: 3.0,
        }
    }

    fn dataset(rows: Vec<Measurement>) -> ClimateDataset {
        ClimateDataset::new(rows, vec![meta("USC00519397")])
    }

    fn row(d: NaiveDate, prec: Option<f64>, temp: Option<f64>) -> Measurement {
        Measurement {
            station: "USC00519397".to_string(),
            date: d,
            prec,
            temp,
        }
    }

    #[test]
    fn carries_values_across_gaps() {
        // Observations on 01-01 (0.5) and 01-03 (1.0) only; 01-02 repeats
        // the prior value.
        let ds = dataset(vec![
            row(date(2012, 1, 1), Some(0.5), None),
            row(date(2012, 1, 3), Some(1.0), None),
        ]);
        let series = fill_range(&ds, "USC00519397", date(2012, 1, 1), date(2012, 1, 3));

        let prec: Vec<Option<f64>> = series.days.iter().map(|d| d.prec).collect();
        assert_eq!(prec, vec![Some(0.5), Some(0.5), Some(1.0)]);
    }

    #[test]
    fn length_equals_inclusive_day_count() {
        let ds = dataset(vec![row(date(2012, 1, 5), Some(0.1), Some(70.0))]);
        let series = fill_range(&ds, "USC00519397", date(2012, 1, 1), date(2012, 1, 31));
        assert_eq!(series.len(), 31);
        assert_eq!(series.days.first().unwrap().date, date(2012, 1, 1));
        assert_eq!(series.days.last().unwrap().date, date(2012, 1, 31));
    }

    #[test]
    fn days_before_first_observation_stay_absent() {
        let ds = dataset(vec![row(date(2012, 1, 5), Some(0.1), Some(70.0))]);
        let series = fill_range(&ds, "USC00519397", date(2012, 1, 1), date(2012, 1, 7));

        assert!(series.days[..4].iter().all(|d| d.prec.is_none()));
        assert_eq!(series.days[4].prec, Some(0.1));
        assert_eq!(series.days[6].prec, Some(0.1));
    }

    #[test]
    fn observations_before_the_range_do_not_leak_in() {
        // A value on 01-01 must not seed a range starting 01-10.
        let ds = dataset(vec![row(date(2012, 1, 1), Some(9.9), Some(99.0))]);
        let series = fill_range(&ds, "USC00519397", date(2012, 1, 10), date(2012, 1, 12));
        assert!(series.days.iter().all(|d| d.prec.is_none() && d.temp.is_none()));
    }

    #[test]
    fn columns_fill_independently() {
        // temp present on day 1 only, prec on day 2 only.
        let ds = dataset(vec![
            row(date(2012, 1, 1), None, Some(65.0)),
            row(date(2012, 1, 2), Some(0.2), None),
        ]);
        let series = fill_range(&ds, "USC00519397", date(2012, 1, 1), date(2012, 1, 3));

        assert_eq!(series.days[0].prec, None);
        assert_eq!(series.days[0].temp, Some(65.0));
        assert_eq!(series.days[1].prec, Some(0.2));
        assert_eq!(series.days[1].temp, Some(65.0));
        assert_eq!(series.days[2].prec, Some(0.2));
        assert_eq!(series.days[2].temp, Some(65.0));
    }

    #[test]
    fn observed_row_with_missing_value_keeps_the_carry() {
        // 01-02 has a row whose prec cell is empty; the carry from 01-01
        // still applies.
        let ds = dataset(vec![
            row(date(2012, 1, 1), Some(0.3), Some(60.0)),
            row(date(2012, 1, 2), None, Some(61.0)),
        ]);
        let series = fill_range(&ds, "USC00519397", date(2012, 1, 1), date(2012, 1, 2));
        assert_eq!(series.days[1].prec, Some(0.3));
        assert_eq!(series.days[1].temp, Some(61.0));
    }

    #[test]
    fn single_day_range() {
        let ds = dataset(vec![row(date(2012, 1, 1), Some(0.5), Some(68.0))]);
        let series = fill_range(&ds, "USC00519397", date(2012, 1, 1), date(2012, 1, 1));
        assert_eq!(series.len(), 1);
        assert_eq!(series.days[0].prec, Some(0.5));
    }

    #[test]
    fn range_with_no_observations_is_all_absent() {
        let ds = dataset(vec![]);
        let series = fill_range(&ds, "USC00519397", date(2012, 1, 1), date(2012, 1, 3));
        assert_eq!(series.len(), 3);
        assert!(series.days.iter().all(|d| d.prec.is_none()));
    }

    #[test]
    fn inverted_range_is_empty() {
        let ds = dataset(vec![row(date(2012, 1, 1), Some(0.5), None)]);
        let series = fill_range(&ds, "USC00519397", date(2012, 1, 5), date(2012, 1, 1));
        assert!(series.is_empty());
    }
}
