//! Revenue window tests
//!
//! Reporting periods resolve to half-open windows starting at midnight UTC.
//! Date-range listings use an inclusive window ending at 23:59:59.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use shared::{
    inclusive_day_range, window_for, EndBound, PeriodParams, RevenuePeriod, TimeWindow,
    WindowError,
};

fn utc(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, mi, s).unwrap()
}

fn daily(date: &str) -> Result<TimeWindow, WindowError> {
    window_for(
        RevenuePeriod::Daily,
        &PeriodParams {
            date: Some(date.to_string()),
            ..Default::default()
        },
    )
}

fn monthly(month: &str) -> Result<TimeWindow, WindowError> {
    window_for(
        RevenuePeriod::Monthly,
        &PeriodParams {
            month: Some(month.to_string()),
            ..Default::default()
        },
    )
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_daily_window() {
        let window = daily("2024-03-10").unwrap();
        assert_eq!(window.start, utc(2024, 3, 10, 0, 0, 0));
        assert_eq!(window.end, utc(2024, 3, 11, 0, 0, 0));
        assert_eq!(window.end_bound, EndBound::Exclusive);
    }

    #[test]
    fn test_daily_ignores_time_component() {
        let window = daily("2024-03-10T17:45:00").unwrap();
        assert_eq!(window.start, utc(2024, 3, 10, 0, 0, 0));
    }

    #[test]
    fn test_weekly_window_spans_seven_days() {
        let window = window_for(
            RevenuePeriod::Weekly,
            &PeriodParams {
                week_start: Some("2024-12-29".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(window.start, utc(2024, 12, 29, 0, 0, 0));
        assert_eq!(window.end, utc(2025, 1, 5, 0, 0, 0));
    }

    #[test]
    fn test_monthly_window_leap_february() {
        let window = monthly("2024-02").unwrap();
        assert_eq!(window.start, utc(2024, 2, 1, 0, 0, 0));
        assert_eq!(window.end, utc(2024, 3, 1, 0, 0, 0));
        assert!(window.contains(utc(2024, 2, 29, 23, 59, 59)));
        assert!(!window.contains(utc(2024, 3, 1, 0, 0, 0)));
    }

    #[test]
    fn test_monthly_window_rolls_into_next_year() {
        let window = monthly("2023-12").unwrap();
        assert_eq!(window.end, utc(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_annual_window() {
        let window = window_for(
            RevenuePeriod::Annual,
            &PeriodParams {
                year: Some(2023),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(window.start, utc(2023, 1, 1, 0, 0, 0));
        assert_eq!(window.end, utc(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_annual_reads_year_not_week_start() {
        let result = window_for(
            RevenuePeriod::Annual,
            &PeriodParams {
                week_start: Some("2023-01-02".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(
            result,
            Err(WindowError::MissingParameter {
                period: RevenuePeriod::Annual,
                parameter: "year",
            })
        );
    }

    #[test]
    fn test_missing_parameter_per_period() {
        let params = PeriodParams::default();
        for (period, parameter) in [
            (RevenuePeriod::Daily, "date"),
            (RevenuePeriod::Weekly, "week_start"),
            (RevenuePeriod::Monthly, "month"),
            (RevenuePeriod::Annual, "year"),
        ] {
            assert_eq!(
                window_for(period, &params),
                Err(WindowError::MissingParameter { period, parameter })
            );
        }
    }

    #[test]
    fn test_blank_parameter_counts_as_missing() {
        assert!(matches!(
            daily("   "),
            Err(WindowError::MissingParameter { .. })
        ));
    }

    #[test]
    fn test_malformed_dates_rejected() {
        assert!(matches!(daily("2024-13-01"), Err(WindowError::InvalidDate(_))));
        assert!(matches!(daily("10/03/2024"), Err(WindowError::InvalidDate(_))));
        assert!(matches!(monthly("2024-2-30"), Err(WindowError::InvalidDate(_))));
        assert!(matches!(monthly("February"), Err(WindowError::InvalidDate(_))));
    }

    #[test]
    fn test_other_period_parameters_are_ignored() {
        let window = window_for(
            RevenuePeriod::Daily,
            &PeriodParams {
                date: Some("2024-05-01".to_string()),
                month: Some("not a month".to_string()),
                year: Some(1),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(window.start, utc(2024, 5, 1, 0, 0, 0));
    }

    #[test]
    fn test_inclusive_range_covers_last_day() {
        let window = inclusive_day_range("2024-01-01", "2024-01-31").unwrap();

        assert_eq!(window.end_bound, EndBound::Inclusive);
        assert_eq!(window.end_operator(), "<=");
        assert!(window.contains(utc(2024, 1, 1, 0, 0, 0)));
        assert!(window.contains(utc(2024, 1, 31, 23, 59, 59)));
        assert!(!window.contains(utc(2024, 2, 1, 0, 0, 0)));
    }

    #[test]
    fn test_inclusive_range_drops_time_of_day() {
        let window = inclusive_day_range("2024-01-01T12:00:00", "2024-01-02T08:30:00Z").unwrap();
        assert_eq!(window.start, utc(2024, 1, 1, 0, 0, 0));
        assert_eq!(window.end, utc(2024, 1, 2, 23, 59, 59));
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let window = inclusive_day_range("2024-02-10", "2024-02-01").unwrap();
        assert!(!window.contains(utc(2024, 2, 5, 12, 0, 0)));
    }

    #[test]
    fn test_period_serde_names() {
        let period: RevenuePeriod = serde_json::from_str("\"annual\"").unwrap();
        assert_eq!(period, RevenuePeriod::Annual);
        assert!(serde_json::from_str::<RevenuePeriod>("\"hourly\"").is_err());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (1990i32..2100, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A daily window is exactly 24 hours starting at midnight
        #[test]
        fn prop_daily_window_is_one_day(date in date_strategy()) {
            let window = daily(&date.format("%Y-%m-%d").to_string()).unwrap();

            prop_assert_eq!(window.end - window.start, Duration::days(1));
            prop_assert_eq!(window.start.date_naive(), date);
            prop_assert!(window.contains(window.start));
            prop_assert!(!window.contains(window.end));
        }

        /// A monthly window starts on the 1st and ends on the 1st of the next month
        #[test]
        fn prop_monthly_window_bounds(date in date_strategy()) {
            let window = monthly(&date.format("%Y-%m").to_string()).unwrap();
            let start = window.start.date_naive();
            let end = window.end.date_naive();

            prop_assert_eq!(start.day(), 1);
            prop_assert_eq!(end.day(), 1);
            prop_assert_eq!(start.month(), date.month());
            prop_assert_eq!(end.month(), date.month() % 12 + 1);
        }

        /// Consecutive days partition time: every instant lands in exactly one window
        #[test]
        fn prop_daily_windows_do_not_overlap(
            date in date_strategy(),
            seconds in 0i64..86_400
        ) {
            let today = daily(&date.format("%Y-%m-%d").to_string()).unwrap();
            let next = daily(&date.succ_opt().unwrap().format("%Y-%m-%d").to_string()).unwrap();
            let at = today.start + Duration::seconds(seconds);

            prop_assert!(today.contains(at));
            prop_assert!(!next.contains(at));
            prop_assert_eq!(today.end, next.start);
        }

        /// An inclusive range over one day holds every second of that day
        #[test]
        fn prop_single_day_range_is_inclusive(
            date in date_strategy(),
            seconds in 0i64..86_400
        ) {
            let day = date.format("%Y-%m-%d").to_string();
            let window = inclusive_day_range(&day, &day).unwrap();
            let at = window.start + Duration::seconds(seconds);

            prop_assert!(window.contains(at));
            prop_assert!(!window.contains(window.start + Duration::days(1)));
        }
    }
}
