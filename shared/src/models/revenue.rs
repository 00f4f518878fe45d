//! Revenue reporting periods and the time windows they cover
//!
//! All date arithmetic for reporting lives here. Periods map to half-open
//! windows `[start, end)`; ad-hoc listings use an inclusive window that runs
//! from midnight of the first day to 23:59:59 of the last.

use chrono::{DateTime, Days, Months, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::{parse_iso_date, parse_month, InvalidDate};

/// Reporting period for revenue aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevenuePeriod {
    Daily,
    Weekly,
    Monthly,
    Annual,
}

impl RevenuePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevenuePeriod::Daily => "daily",
            RevenuePeriod::Weekly => "weekly",
            RevenuePeriod::Monthly => "monthly",
            RevenuePeriod::Annual => "annual",
        }
    }

    /// Query parameter that anchors this period
    pub fn required_parameter(&self) -> &'static str {
        match self {
            RevenuePeriod::Daily => "date",
            RevenuePeriod::Weekly => "week_start",
            RevenuePeriod::Monthly => "month",
            RevenuePeriod::Annual => "year",
        }
    }
}

impl std::fmt::Display for RevenuePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anchors supplied alongside a period; only the one the period needs is read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodParams {
    pub date: Option<String>,
    pub week_start: Option<String>,
    /// `YYYY-MM`
    pub month: Option<String>,
    pub year: Option<i32>,
}

/// Whether the end instant belongs to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndBound {
    Inclusive,
    Exclusive,
}

/// A time interval over `created_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub end_bound: EndBound,
}

impl TimeWindow {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start
            && match self.end_bound {
                EndBound::Inclusive => at <= self.end,
                EndBound::Exclusive => at < self.end,
            }
    }

    /// SQL comparison operator for the upper bound
    pub fn end_operator(&self) -> &'static str {
        match self.end_bound {
            EndBound::Inclusive => "<=",
            EndBound::Exclusive => "<",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("{parameter} is required for {period} revenue")]
    MissingParameter {
        period: RevenuePeriod,
        parameter: &'static str,
    },

    #[error(transparent)]
    InvalidDate(#[from] InvalidDate),

    #[error("date out of supported range")]
    OutOfRange,
}

/// Half-open window covered by a reporting period
pub fn window_for(period: RevenuePeriod, params: &PeriodParams) -> Result<TimeWindow, WindowError> {
    let missing = || WindowError::MissingParameter {
        period,
        parameter: period.required_parameter(),
    };

    let (start, end) = match period {
        RevenuePeriod::Daily => {
            let day = parse_iso_date(present(&params.date).ok_or_else(missing)?)?;
            (day, day.checked_add_days(Days::new(1)))
        }
        RevenuePeriod::Weekly => {
            let first = parse_iso_date(present(&params.week_start).ok_or_else(missing)?)?;
            (first, first.checked_add_days(Days::new(7)))
        }
        RevenuePeriod::Monthly => {
            let first = parse_month(present(&params.month).ok_or_else(missing)?)?;
            (first, first.checked_add_months(Months::new(1)))
        }
        RevenuePeriod::Annual => {
            let year = params.year.ok_or_else(missing)?;
            let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(WindowError::OutOfRange)?;
            (first, year.checked_add(1).and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)))
        }
    };

    let end = end.ok_or(WindowError::OutOfRange)?;

    Ok(TimeWindow {
        start: at_time(start, 0, 0, 0)?,
        end: at_time(end, 0, 0, 0)?,
        end_bound: EndBound::Exclusive,
    })
}

/// Inclusive window from `start_date` 00:00:00 through `end_date` 23:59:59.
///
/// Any time-of-day carried by either input is discarded.
pub fn inclusive_day_range(start_date: &str, end_date: &str) -> Result<TimeWindow, WindowError> {
    let first = parse_iso_date(start_date)?;
    let last = parse_iso_date(end_date)?;

    Ok(TimeWindow {
        start: at_time(first, 0, 0, 0)?,
        end: at_time(last, 23, 59, 59)?,
        end_bound: EndBound::Inclusive,
    })
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn at_time(date: NaiveDate, hour: u32, min: u32, sec: u32) -> Result<DateTime<Utc>, WindowError> {
    date.and_hms_opt(hour, min, sec)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or(WindowError::OutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_daily_window() {
        let params = PeriodParams { date: Some("2024-01-05".into()), ..Default::default() };
        let window = window_for(RevenuePeriod::Daily, &params).unwrap();
        assert_eq!(window.start, utc(2024, 1, 5, 0, 0, 0));
        assert_eq!(window.end, utc(2024, 1, 6, 0, 0, 0));
        assert_eq!(window.end_bound, EndBound::Exclusive);
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let params = PeriodParams { month: Some("2023-12".into()), ..Default::default() };
        let window = window_for(RevenuePeriod::Monthly, &params).unwrap();
        assert_eq!(window.start, utc(2023, 12, 1, 0, 0, 0));
        assert_eq!(window.end, utc(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_blank_parameter_counts_as_missing() {
        let params = PeriodParams { week_start: Some("  ".into()), ..Default::default() };
        let err = window_for(RevenuePeriod::Weekly, &params).unwrap_err();
        assert_eq!(
            err,
            WindowError::MissingParameter { period: RevenuePeriod::Weekly, parameter: "week_start" }
        );
    }

    #[test]
    fn test_inclusive_range_end_of_day() {
        let window = inclusive_day_range("2024-01-01", "2024-01-05").unwrap();
        assert!(window.contains(utc(2024, 1, 5, 23, 59, 59)));
        assert!(!window.contains(utc(2024, 1, 6, 0, 0, 0)));
        assert_eq!(window.end_operator(), "<=");
    }
}
