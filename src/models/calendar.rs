//! Shift calendar model and related types.
//!
//! A [`ShiftCalendar`] describes the recurring weekly working pattern of an
//! asset: for each weekday an optional [`DaySchedule`] made of [`ShiftBlock`]s,
//! each of which may contain [`BreakInterval`]s. Times of day are kept as the
//! raw strings supplied by the caller and are only parsed during validation,
//! so a malformed calendar is rejected as a whole before any calculation runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A day of the week, used as the key of a calendar's day schedules.
///
/// # Example
///
/// ```
/// use runtime_accrual::models::DayOfWeek;
/// use chrono::Weekday;
///
/// assert_eq!(DayOfWeek::from(Weekday::Sat), DayOfWeek::Saturday);
/// assert_eq!(DayOfWeek::Saturday.to_string(), "saturday");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl DayOfWeek {
    /// All seven days, Monday first.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
            chrono::Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        };
        write!(f, "{}", name)
    }
}

/// An unpaid pause inside a [`ShiftBlock`].
///
/// Like blocks, a break whose `end` is not after its `start` crosses midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakInterval {
    /// Local time of day the break starts, `HH:MM` or `HH:MM:SS`.
    pub start: String,
    /// Local time of day the break ends, `HH:MM` or `HH:MM:SS`.
    pub end: String,
}

/// One continuous work period within a day.
///
/// If `end <= start` the block crosses midnight and ends on the following
/// calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftBlock {
    /// Optional human readable label, echoed in diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Local time of day the block starts, `HH:MM` or `HH:MM:SS`.
    pub start: String,
    /// Local time of day the block ends, `HH:MM` or `HH:MM:SS`.
    pub end: String,
    /// Inactive blocks contribute nothing and are skipped entirely.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Breaks taken during the block.
    #[serde(default)]
    pub breaks: Vec<BreakInterval>,
}

fn default_active() -> bool {
    true
}

impl ShiftBlock {
    /// Creates an active block with no breaks.
    ///
    /// # Example
    ///
    /// ```
    /// use runtime_accrual::models::ShiftBlock;
    ///
    /// let block = ShiftBlock::new("08:00", "16:00").with_break("12:00", "13:00");
    /// assert!(block.active);
    /// assert_eq!(block.breaks.len(), 1);
    /// ```
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            name: None,
            start: start.into(),
            end: end.into(),
            active: true,
            breaks: Vec::new(),
        }
    }

    /// Adds a break to the block.
    pub fn with_break(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.breaks.push(BreakInterval {
            start: start.into(),
            end: end.into(),
        });
        self
    }

    /// Sets the block label.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Marks the block inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// The blocks worked on one weekday. Blocks are not assumed to be sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Work blocks starting on this weekday.
    #[serde(default)]
    pub blocks: Vec<ShiftBlock>,
}

/// The weekly recurring working pattern for an asset (or a group of assets).
///
/// A weekday without an entry has no working time.
///
/// # Example
///
/// ```
/// use runtime_accrual::models::{DayOfWeek, ShiftBlock, ShiftCalendar};
///
/// let calendar = ShiftCalendar::new("America/Sao_Paulo")
///     .with_day(DayOfWeek::Monday, vec![ShiftBlock::new("08:00", "16:00")]);
/// assert!(calendar.day(DayOfWeek::Monday).is_some());
/// assert!(calendar.day(DayOfWeek::Sunday).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCalendar {
    /// Identifier used when the calendar is loaded from configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// IANA time zone name, e.g. `America/Sao_Paulo`.
    pub time_zone: String,
    /// Day schedules keyed by weekday.
    #[serde(default)]
    pub days: BTreeMap<DayOfWeek, DaySchedule>,
}

impl ShiftCalendar {
    /// Creates an empty calendar in the given time zone.
    pub fn new(time_zone: impl Into<String>) -> Self {
        Self {
            id: None,
            time_zone: time_zone.into(),
            days: BTreeMap::new(),
        }
    }

    /// Sets the schedule for a weekday, replacing any existing one.
    pub fn with_day(mut self, day: DayOfWeek, blocks: Vec<ShiftBlock>) -> Self {
        self.days.insert(day, DaySchedule { blocks });
        self
    }

    /// Sets the same schedule on every weekday in `days`.
    pub fn with_days(mut self, days: &[DayOfWeek], blocks: Vec<ShiftBlock>) -> Self {
        for day in days {
            self.days.insert(
                *day,
                DaySchedule {
                    blocks: blocks.clone(),
                },
            );
        }
        self
    }

    /// Returns the schedule for a weekday, if one is defined.
    pub fn day(&self, day: DayOfWeek) -> Option<&DaySchedule> {
        self.days.get(&day)
    }
}
