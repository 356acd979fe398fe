//! Reducers collapse a series to a single scalar.
//!
//! Null points are dropped before reducing. A series with no non-null
//! points reduces to `None`, which the condition treats as no data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use alertcond_core::{Series, Value};

/// Supported reducer kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReducerKind {
    Avg,
    Sum,
    Min,
    Max,
    Count,
    CountNonNull,
    Last,
    Median,
    Diff,
    DiffAbs,
    PercentDiff,
    PercentDiffAbs,
}

impl ReducerKind {
    pub const ALL: [ReducerKind; 12] = [
        ReducerKind::Avg,
        ReducerKind::Sum,
        ReducerKind::Min,
        ReducerKind::Max,
        ReducerKind::Count,
        ReducerKind::CountNonNull,
        ReducerKind::Last,
        ReducerKind::Median,
        ReducerKind::Diff,
        ReducerKind::DiffAbs,
        ReducerKind::PercentDiff,
        ReducerKind::PercentDiffAbs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReducerKind::Avg => "avg",
            ReducerKind::Sum => "sum",
            ReducerKind::Min => "min",
            ReducerKind::Max => "max",
            ReducerKind::Count => "count",
            ReducerKind::CountNonNull => "count_non_null",
            ReducerKind::Last => "last",
            ReducerKind::Median => "median",
            ReducerKind::Diff => "diff",
            ReducerKind::DiffAbs => "diff_abs",
            ReducerKind::PercentDiff => "percent_diff",
            ReducerKind::PercentDiffAbs => "percent_diff_abs",
        }
    }

    /// Reduce a series to one scalar, or `None` when it has no non-null points.
    pub fn reduce(&self, series: &Series) -> Option<f64> {
        let values: Vec<f64> = series.non_null_values().collect();
        let (&first, &last) = (values.first()?, values.last()?);
        let n = values.len() as f64;

        let reduced = match self {
            ReducerKind::Avg => values.iter().sum::<f64>() / n,
            ReducerKind::Sum => values.iter().sum(),
            ReducerKind::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            ReducerKind::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            // Legacy `count` includes null points.
            ReducerKind::Count => series.len() as f64,
            ReducerKind::CountNonNull => n,
            ReducerKind::Last => last,
            ReducerKind::Median => median(values),
            ReducerKind::Diff => last - first,
            ReducerKind::DiffAbs => (last - first).abs(),
            ReducerKind::PercentDiff => percent_diff(first, last),
            ReducerKind::PercentDiffAbs => percent_diff(first, last).abs(),
        };
        Some(reduced)
    }

    /// Reduce any result value. Numbers bypass the reducer; `NoData` is `None`.
    pub fn reduce_value(&self, value: &Value) -> Option<f64> {
        match value {
            Value::Series(series) => self.reduce(series),
            Value::Number(number) => number.value,
            Value::NoData => None,
        }
    }
}

fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

/// Change relative to the first value, in percent. Non-finite when `first` is zero.
fn percent_diff(first: f64, last: f64) -> f64 {
    (last - first) / first.abs() * 100.0
}

impl fmt::Display for ReducerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReducerKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ReducerKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown reducer: '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alertcond_core::Number;
    use chrono::{Duration, TimeZone, Utc};

    fn series(values: &[Option<f64>]) -> Series {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut s = Series::default();
        for (i, v) in values.iter().enumerate() {
            s.push(t0 + Duration::minutes(i as i64), *v);
        }
        s
    }

    #[test]
    fn basic_reducers() {
        let s = series(&[Some(30.0), Some(40.0)]);
        assert_eq!(ReducerKind::Avg.reduce(&s), Some(35.0));
        assert_eq!(ReducerKind::Min.reduce(&s), Some(30.0));
        assert_eq!(ReducerKind::Max.reduce(&s), Some(40.0));
        assert_eq!(ReducerKind::Diff.reduce(&s), Some(10.0));
        assert_eq!(ReducerKind::Sum.reduce(&s), Some(70.0));
        assert_eq!(ReducerKind::Last.reduce(&s), Some(40.0));
    }

    #[test]
    fn nulls_are_dropped() {
        let s = series(&[None, Some(10.0), None, Some(4.0), None]);
        assert_eq!(ReducerKind::Avg.reduce(&s), Some(7.0));
        assert_eq!(ReducerKind::Diff.reduce(&s), Some(-6.0));
        assert_eq!(ReducerKind::DiffAbs.reduce(&s), Some(6.0));
        assert_eq!(ReducerKind::Count.reduce(&s), Some(5.0));
        assert_eq!(ReducerKind::CountNonNull.reduce(&s), Some(2.0));
        assert_eq!(ReducerKind::Last.reduce(&s), Some(4.0));
    }

    #[test]
    fn empty_or_all_null_is_none_for_every_kind() {
        let empty = series(&[]);
        let nulls = series(&[None, None]);
        for kind in ReducerKind::ALL {
            assert_eq!(kind.reduce(&empty), None, "{} on empty", kind);
            assert_eq!(kind.reduce(&nulls), None, "{} on all-null", kind);
        }
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(ReducerKind::Median.reduce(&series(&[Some(3.0), Some(1.0), Some(2.0)])), Some(2.0));
        assert_eq!(
            ReducerKind::Median.reduce(&series(&[Some(4.0), Some(1.0), Some(3.0), Some(2.0)])),
            Some(2.5)
        );
    }

    #[test]
    fn percent_diff_uses_first_value() {
        let s = series(&[Some(50.0), Some(25.0)]);
        assert_eq!(ReducerKind::PercentDiff.reduce(&s), Some(-50.0));
        assert_eq!(ReducerKind::PercentDiffAbs.reduce(&s), Some(50.0));

        let from_zero = series(&[Some(0.0), Some(5.0)]);
        assert_eq!(ReducerKind::PercentDiff.reduce(&from_zero), Some(f64::INFINITY));
    }

    #[test]
    fn numbers_bypass_reducer() {
        let n = Value::Number(Number::new(None, Some(5.0)));
        assert_eq!(ReducerKind::Diff.reduce_value(&n), Some(5.0));
        assert_eq!(ReducerKind::Avg.reduce_value(&Value::Number(Number::default())), None);
        assert_eq!(ReducerKind::Avg.reduce_value(&Value::NoData), None);
    }

    #[test]
    fn parse_round_trips_every_kind() {
        for kind in ReducerKind::ALL {
            assert_eq!(kind.as_str().parse::<ReducerKind>(), Ok(kind));
        }
        assert!("mode".parse::<ReducerKind>().is_err());
    }
}
