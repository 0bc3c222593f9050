//! Shift accrual calculation.
//!
//! Walks the local calendar days touched by a query, in order, and sums the
//! net working minutes of every active block. Each day is an independent pure
//! computation made of two parts:
//!
//! 1. the day's own blocks, clipped at the start of the following day;
//! 2. the after-midnight remainder of the previous day's blocks that cross
//!    midnight.
//!
//! Both parts meet at the same anchored midnight instant, so a block that
//! crosses midnight is split exactly once with no overlap and no gap.

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{AccrualQuery, AccrualResult, BlockContribution, DayBreakdown, DayOfWeek, ShiftCalendar};

use super::anchoring::{anchor, start_of_day};
use super::validation::{ResolvedBlock, ResolvedBreak, ResolvedCalendar, resolve_calendar};
use super::window::{Window, covered_seconds, whole_minutes};

/// Calculates the working minutes inside a query interval.
///
/// The calendar is validated in full before any day is computed. Without a
/// calendar nothing accrues; a query with `from > to` accrues nothing either.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidTimeZone`] or
/// [`crate::error::EngineError::InvalidTimeOfDay`] when the calendar is malformed.
///
/// # Example
///
/// ```
/// use runtime_accrual::calculation::calculate_accrual;
/// use runtime_accrual::models::{AccrualQuery, DayOfWeek, ShiftBlock, ShiftCalendar};
/// use chrono::{TimeZone, Utc};
///
/// let calendar = ShiftCalendar::new("UTC").with_day(
///     DayOfWeek::Monday,
///     vec![ShiftBlock::new("08:00", "16:00").with_break("12:00", "13:00")],
/// );
/// // 2026-01-12 is a Monday
/// let query = AccrualQuery::new(
///     Utc.with_ymd_and_hms(2026, 1, 12, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2026, 1, 13, 0, 0, 0).unwrap(),
/// );
/// let result = calculate_accrual(Some(&calendar), &query).unwrap();
/// assert_eq!(result.accumulated_minutes, 420);
/// ```
pub fn calculate_accrual(
    calendar: Option<&ShiftCalendar>,
    query: &AccrualQuery,
) -> EngineResult<AccrualResult> {
    match calendar {
        Some(calendar) => {
            let resolved = resolve_calendar(calendar)?;
            Ok(accrue(&resolved, query))
        }
        None => Ok(empty_result(query)),
    }
}

/// Runs the day walk over an already validated calendar.
pub fn accrue(calendar: &ResolvedCalendar, query: &AccrualQuery) -> AccrualResult {
    if query.is_degenerate() {
        return empty_result(query);
    }

    let tz = calendar.time_zone();
    let range = Window::new(query.from, query.to);
    let first = query.from.with_timezone(&tz).date_naive();
    let last = query.to.with_timezone(&tz).date_naive();

    let (accumulated_minutes, days) = first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| accrue_day(calendar, date, &range))
        .fold((0, Vec::new()), |(total, mut days), day| {
            let total = total + day.minutes_worked;
            if query.include_breakdown {
                days.push(day);
            }
            (total, days)
        });

    debug!(
        from = %query.from,
        to = %query.to,
        first_day = %first,
        last_day = %last,
        accumulated_minutes,
        "accrual complete"
    );

    AccrualResult {
        accumulated_minutes,
        breakdown: query.include_breakdown.then_some(days),
    }
}

/// Computes the minutes attributed to one local calendar day within `range`.
///
/// # Example
///
/// ```
/// use runtime_accrual::calculation::{Window, accrue_day, resolve_calendar};
/// use runtime_accrual::models::{DayOfWeek, ShiftBlock, ShiftCalendar};
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let calendar = ShiftCalendar::new("UTC").with_days(
///     &DayOfWeek::ALL,
///     vec![ShiftBlock::new("22:00", "06:00")],
/// );
/// let resolved = resolve_calendar(&calendar).unwrap();
/// let range = Window::new(
///     Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
/// );
///
/// let day = accrue_day(&resolved, NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(), &range);
/// assert_eq!(day.minutes_worked, 480);
/// assert_eq!(day.carry_in_minutes, 360);
/// ```
pub fn accrue_day(calendar: &ResolvedCalendar, date: NaiveDate, range: &Window) -> DayBreakdown {
    let tz = calendar.time_zone();
    let weekday = DayOfWeek::from(date.weekday());

    let mut contributing_blocks = same_day(calendar, date, range);
    contributing_blocks.extend(carried_in(calendar, date, range));

    let minutes_worked = contributing_blocks.iter().map(|c| c.net_minutes).sum();
    let carry_in_minutes = contributing_blocks
        .iter()
        .filter(|c| c.carry_in)
        .map(|c| c.net_minutes)
        .sum();

    debug!(
        date = %date,
        weekday = %weekday,
        zone = ?tz,
        minutes_worked,
        carry_in_minutes,
        "day accrued"
    );

    DayBreakdown {
        date,
        weekday,
        minutes_worked,
        carry_in_minutes,
        contributing_blocks,
    }
}

/// Where a block's contribution comes from.
#[derive(Debug, Clone, Copy)]
struct Origin {
    weekday: DayOfWeek,
    base_date: NaiveDate,
    carry_in: bool,
}

/// The day's own blocks, each cut off at the start of the next day.
fn same_day(calendar: &ResolvedCalendar, date: NaiveDate, range: &Window) -> Vec<BlockContribution> {
    let tz = calendar.time_zone();
    let next_day_start = start_of_day(next_date(date), tz);
    let origin = Origin {
        weekday: DayOfWeek::from(date.weekday()),
        base_date: date,
        carry_in: false,
    };

    calendar
        .blocks(origin.weekday)
        .iter()
        .filter_map(|block| {
            let span = anchor_block(block, date, tz);
            let own_part = Window::new(span.start, span.end.min(next_day_start));
            contribution(block, origin, own_part, range, tz)
        })
        .collect()
}

/// The after-midnight remainder of the previous day's crossing blocks.
fn carried_in(calendar: &ResolvedCalendar, date: NaiveDate, range: &Window) -> Vec<BlockContribution> {
    let Some(previous) = date.pred_opt() else {
        return Vec::new();
    };

    let tz = calendar.time_zone();
    let day_start = start_of_day(date, tz);
    let origin = Origin {
        weekday: DayOfWeek::from(previous.weekday()),
        base_date: previous,
        carry_in: true,
    };

    calendar
        .blocks(origin.weekday)
        .iter()
        .filter_map(|block| {
            let span = anchor_block(block, previous, tz);
            if span.end <= day_start {
                return None;
            }
            let remainder = Window::new(span.start.max(day_start), span.end);
            contribution(block, origin, remainder, range, tz)
        })
        .collect()
}

/// Clips `window` to the query range and removes overlapping break time.
fn contribution(
    block: &ResolvedBlock,
    origin: Origin,
    window: Window,
    range: &Window,
    tz: Tz,
) -> Option<BlockContribution> {
    let counted = window.clip(range)?;
    let gross_minutes = whole_minutes(counted.seconds());
    let break_minutes = whole_minutes(covered_seconds(
        block
            .breaks
            .iter()
            .filter_map(|b| anchor_break(b, origin.base_date, tz).clip(&counted))
            .collect(),
    ));

    Some(BlockContribution {
        weekday_of_origin: origin.weekday,
        block_index: block.index,
        name: block.name.clone(),
        start: counted.start,
        end: counted.end,
        gross_minutes,
        break_minutes,
        net_minutes: (gross_minutes - break_minutes).max(0),
        carry_in: origin.carry_in,
    })
}

/// The full span of a block starting on `base`, ending the next day if it crosses midnight.
fn anchor_block(block: &ResolvedBlock, base: NaiveDate, tz: Tz) -> Window {
    let end_date = if block.crosses_midnight() {
        next_date(base)
    } else {
        base
    };
    Window::new(anchor(block.start, base, tz), anchor(block.end, end_date, tz))
}

/// Anchors a break on its block's base date; `end <= start` ends it the next day.
fn anchor_break(brk: &ResolvedBreak, base: NaiveDate, tz: Tz) -> Window {
    let end_date = if brk.end <= brk.start {
        next_date(base)
    } else {
        base
    };
    Window::new(anchor(brk.start, base, tz), anchor(brk.end, end_date, tz))
}

fn next_date(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(NaiveDate::MAX)
}

fn empty_result(query: &AccrualQuery) -> AccrualResult {
    AccrualResult {
        breakdown: query.include_breakdown.then(Vec::new),
        ..AccrualResult::zero()
    }
}
