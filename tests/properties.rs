//! Property tests for the accrual walk.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use runtime_accrual::calculation::calculate_accrual;
use runtime_accrual::models::{AccrualQuery, DayOfWeek, ShiftBlock, ShiftCalendar};

/// Spans the 2026 DST transitions of both calendars below.
const SPAN_MINUTES: i64 = 60 * 24 * 400;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

fn instant(minutes: i64) -> DateTime<Utc> {
    base() + Duration::minutes(minutes)
}

fn accrued(calendar: &ShiftCalendar, from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    calculate_accrual(Some(calendar), &AccrualQuery::new(from, to))
        .unwrap()
        .accumulated_minutes
}

fn new_york_nights() -> ShiftCalendar {
    ShiftCalendar::new("America/New_York")
        .with_days(
            &[
                DayOfWeek::Monday,
                DayOfWeek::Tuesday,
                DayOfWeek::Wednesday,
                DayOfWeek::Thursday,
                DayOfWeek::Friday,
            ],
            vec![ShiftBlock::new("21:30", "06:15").with_break("23:45", "00:15")],
        )
        .with_day(DayOfWeek::Sunday, vec![ShiftBlock::new("01:30", "03:30")])
}

fn london_days() -> ShiftCalendar {
    ShiftCalendar::new("Europe/London").with_days(
        &DayOfWeek::ALL,
        vec![
            ShiftBlock::new("06:00", "14:00").with_break("10:00", "10:20"),
            ShiftBlock::new("14:00", "22:00").with_break("21:50", "22:10"),
        ],
    )
}

fn any_calendar() -> impl Strategy<Value = ShiftCalendar> {
    prop_oneof![Just(new_york_nights()), Just(london_days())]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn accrual_is_bounded_by_elapsed_time(
        calendar in any_calendar(),
        from in 0..SPAN_MINUTES,
        length in 0i64..(60 * 24 * 10),
    ) {
        let minutes = accrued(&calendar, instant(from), instant(from + length));
        prop_assert!(minutes >= 0);
        prop_assert!(minutes <= length);
    }

    #[test]
    fn accrual_is_monotone_in_to(
        calendar in any_calendar(),
        from in 0..SPAN_MINUTES,
        first in 0i64..(60 * 24 * 5),
        extra_seconds in 0i64..(60 * 60 * 24 * 3),
    ) {
        let from = instant(from);
        let to = from + Duration::minutes(first);
        let later = to + Duration::seconds(extra_seconds);
        prop_assert!(accrued(&calendar, from, to) <= accrued(&calendar, from, later));
    }

    #[test]
    fn accrual_is_additive_at_minute_boundaries(
        calendar in any_calendar(),
        from in 0..SPAN_MINUTES,
        first in 0i64..(60 * 24 * 4),
        second in 0i64..(60 * 24 * 4),
    ) {
        let a = instant(from);
        let b = instant(from + first);
        let c = instant(from + first + second);
        prop_assert_eq!(
            accrued(&calendar, a, b) + accrued(&calendar, b, c),
            accrued(&calendar, a, c)
        );
    }

    #[test]
    fn accrual_is_idempotent(
        calendar in any_calendar(),
        from in 0..SPAN_MINUTES,
        length in 0i64..(60 * 24 * 10),
    ) {
        let query = AccrualQuery::new(instant(from), instant(from + length)).with_breakdown();
        let first = calculate_accrual(Some(&calendar), &query).unwrap();
        let second = calculate_accrual(Some(&calendar), &query).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn midnight_split_sums_to_full_block(
        start_hour in 12u32..24,
        start_minute in 0u32..60,
        end_hour in 0u32..12,
        end_minute in 0u32..60,
    ) {
        let start = format!("{:02}:{:02}", start_hour, start_minute);
        let end = format!("{:02}:{:02}", end_hour, end_minute);
        let calendar = ShiftCalendar::new("UTC")
            .with_day(DayOfWeek::Monday, vec![ShiftBlock::new(start, end)]);

        // Sunday 2026-01-11 through Wednesday 2026-01-14
        let query = AccrualQuery::new(
            Utc.with_ymd_and_hms(2026, 1, 11, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 14, 0, 0, 0).unwrap(),
        )
        .with_breakdown();
        let result = calculate_accrual(Some(&calendar), &query).unwrap();

        let expected = i64::from((24 - start_hour) * 60 + end_hour * 60 + end_minute) - i64::from(start_minute);
        prop_assert_eq!(result.accumulated_minutes, expected);

        let days = result.breakdown.unwrap();
        let monday = days.iter().find(|d| d.weekday == DayOfWeek::Monday).unwrap();
        let tuesday = days.iter().find(|d| d.weekday == DayOfWeek::Tuesday).unwrap();
        prop_assert_eq!(monday.minutes_worked + tuesday.minutes_worked, expected);
        prop_assert_eq!(tuesday.carry_in_minutes, i64::from(end_hour * 60 + end_minute));
    }
}
