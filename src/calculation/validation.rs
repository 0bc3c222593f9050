//! Calendar validation.
//!
//! Parses every time-of-day string and the time zone of a [`ShiftCalendar`]
//! up front, producing a [`ResolvedCalendar`] the accrual walk can use without
//! any further failure modes. The first offending field is reported.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use chrono_tz::Tz;

use crate::error::{EngineError, EngineResult};
use crate::models::{DayOfWeek, ShiftBlock, ShiftCalendar};

use super::anchoring::parse_time_zone;

/// A parsed break. `end <= start` means the break crosses midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedBreak {
    /// Local start time.
    pub start: NaiveTime,
    /// Local end time.
    pub end: NaiveTime,
}

/// A parsed, active shift block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBlock {
    /// Position of the block in its day schedule.
    pub index: usize,
    /// Optional block label.
    pub name: Option<String>,
    /// Local start time.
    pub start: NaiveTime,
    /// Local end time.
    pub end: NaiveTime,
    /// Breaks taken during the block.
    pub breaks: Vec<ResolvedBreak>,
}

impl ResolvedBlock {
    /// True when the block ends on the calendar day after it starts.
    pub fn crosses_midnight(&self) -> bool {
        self.end <= self.start
    }
}

/// A validated calendar: known time zone, parsed times, inactive blocks dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCalendar {
    time_zone: Tz,
    days: BTreeMap<DayOfWeek, Vec<ResolvedBlock>>,
}

impl ResolvedCalendar {
    /// The calendar's time zone.
    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// The active blocks starting on `day`; empty when the day has no schedule.
    pub fn blocks(&self, day: DayOfWeek) -> &[ResolvedBlock] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Parses a local time of day in `HH:MM` or `HH:MM:SS` form.
///
/// # Example
///
/// ```
/// use runtime_accrual::calculation::parse_time_of_day;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_time_of_day("06:30"), NaiveTime::from_hms_opt(6, 30, 0));
/// assert_eq!(parse_time_of_day("23:59:59"), NaiveTime::from_hms_opt(23, 59, 59));
/// assert_eq!(parse_time_of_day("24:00"), None);
/// ```
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

/// Validates a calendar and resolves it for calculation.
///
/// Inactive blocks are validated too, then dropped.
///
/// # Errors
///
/// - [`EngineError::InvalidTimeZone`] if the zone is not a known IANA name
/// - [`EngineError::InvalidTimeOfDay`] for the first unparseable block or break time
///
/// # Example
///
/// ```
/// use runtime_accrual::calculation::resolve_calendar;
/// use runtime_accrual::models::{DayOfWeek, ShiftBlock, ShiftCalendar};
///
/// let calendar = ShiftCalendar::new("UTC")
///     .with_day(DayOfWeek::Monday, vec![ShiftBlock::new("22:00", "06:00")]);
/// let resolved = resolve_calendar(&calendar).unwrap();
/// assert!(resolved.blocks(DayOfWeek::Monday)[0].crosses_midnight());
/// assert!(resolved.blocks(DayOfWeek::Tuesday).is_empty());
/// ```
pub fn resolve_calendar(calendar: &ShiftCalendar) -> EngineResult<ResolvedCalendar> {
    let time_zone = parse_time_zone(&calendar.time_zone)?;

    let mut days = BTreeMap::new();
    for (day, schedule) in &calendar.days {
        let mut blocks = Vec::with_capacity(schedule.blocks.len());
        for (index, block) in schedule.blocks.iter().enumerate() {
            let resolved = resolve_block(*day, index, block)?;
            if block.active {
                blocks.push(resolved);
            }
        }
        days.insert(*day, blocks);
    }

    Ok(ResolvedCalendar { time_zone, days })
}

fn resolve_block(day: DayOfWeek, index: usize, block: &ShiftBlock) -> EngineResult<ResolvedBlock> {
    let parse = |field: String, value: &str| {
        parse_time_of_day(value).ok_or_else(|| EngineError::InvalidTimeOfDay {
            day,
            block: index,
            field,
            value: value.to_string(),
        })
    };

    let start = parse("start".to_string(), &block.start)?;
    let end = parse("end".to_string(), &block.end)?;

    let breaks = block
        .breaks
        .iter()
        .enumerate()
        .map(|(i, b)| {
            Ok(ResolvedBreak {
                start: parse(format!("breaks[{}].start", i), &b.start)?,
                end: parse(format!("breaks[{}].end", i), &b.end)?,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(ResolvedBlock {
        index,
        name: block.name.clone(),
        start,
        end,
        breaks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_parse_time_of_day_formats() {
        assert_eq!(parse_time_of_day("08:00"), Some(time(8, 0)));
        assert_eq!(parse_time_of_day("08:00:00"), Some(time(8, 0)));
        assert_eq!(parse_time_of_day(" 17:45 "), Some(time(17, 45)));
        assert_eq!(
            parse_time_of_day("07:15:30"),
            NaiveTime::from_hms_opt(7, 15, 30)
        );
    }

    #[test]
    fn test_parse_time_of_day_rejects_garbage() {
        assert_eq!(parse_time_of_day(""), None);
        assert_eq!(parse_time_of_day("8am"), None);
        assert_eq!(parse_time_of_day("12:60"), None);
        assert_eq!(parse_time_of_day("25:00"), None);
    }

    #[test]
    fn test_resolve_drops_inactive_blocks() {
        let calendar = ShiftCalendar::new("UTC").with_day(
            DayOfWeek::Friday,
            vec![
                ShiftBlock::new("06:00", "14:00").inactive(),
                ShiftBlock::new("14:00", "22:00").named("late"),
            ],
        );
        let resolved = resolve_calendar(&calendar).unwrap();
        let blocks = resolved.blocks(DayOfWeek::Friday);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].index, 1);
        assert_eq!(blocks[0].name.as_deref(), Some("late"));
    }

    #[test]
    fn test_resolve_rejects_unknown_zone() {
        let calendar = ShiftCalendar::new("Europe/Atlantis");
        let err = resolve_calendar(&calendar).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTimeZone { .. }));
    }

    #[test]
    fn test_resolve_reports_offending_block_field() {
        let calendar = ShiftCalendar::new("UTC").with_day(
            DayOfWeek::Wednesday,
            vec![
                ShiftBlock::new("06:00", "14:00"),
                ShiftBlock::new("14:00", "2200"),
            ],
        );
        match resolve_calendar(&calendar).unwrap_err() {
            EngineError::InvalidTimeOfDay {
                day,
                block,
                field,
                value,
            } => {
                assert_eq!(day, DayOfWeek::Wednesday);
                assert_eq!(block, 1);
                assert_eq!(field, "end");
                assert_eq!(value, "2200");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_reports_offending_break() {
        let calendar = ShiftCalendar::new("UTC").with_day(
            DayOfWeek::Monday,
            vec![
                ShiftBlock::new("08:00", "16:00")
                    .with_break("10:00", "10:15")
                    .with_break("12:00", "noon"),
            ],
        );
        match resolve_calendar(&calendar).unwrap_err() {
            EngineError::InvalidTimeOfDay { field, value, .. } => {
                assert_eq!(field, "breaks[1].end");
                assert_eq!(value, "noon");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_inactive_blocks_are_still_validated() {
        let calendar = ShiftCalendar::new("UTC").with_day(
            DayOfWeek::Sunday,
            vec![ShiftBlock::new("xx", "06:00").inactive()],
        );
        assert!(resolve_calendar(&calendar).is_err());
    }

    #[test]
    fn test_equal_start_and_end_crosses_midnight() {
        let calendar = ShiftCalendar::new("UTC")
            .with_day(DayOfWeek::Monday, vec![ShiftBlock::new("08:00", "08:00")]);
        let resolved = resolve_calendar(&calendar).unwrap();
        assert!(resolved.blocks(DayOfWeek::Monday)[0].crosses_midnight());
    }
}
