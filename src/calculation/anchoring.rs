//! Local-time anchoring.
//!
//! Converts a local time of day on a calendar date in an IANA time zone into
//! an absolute instant, applying whatever UTC offset the zone uses on that
//! date. Daylight saving transitions are resolved deterministically:
//!
//! - an ambiguous local time (clocks fall back) resolves to its earliest
//!   occurrence;
//! - a nonexistent local time (clocks spring forward) resolves to the instant
//!   the clocks jump, i.e. the first valid instant after the gap.
//!
//! Both rules keep anchoring monotone: a later local time on the same date
//! never anchors to an earlier instant.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

/// Parses an IANA time zone identifier.
///
/// # Example
///
/// ```
/// use runtime_accrual::calculation::parse_time_zone;
///
/// assert!(parse_time_zone("America/Sao_Paulo").is_ok());
/// assert!(parse_time_zone("Atlantis/Lost_City").is_err());
/// ```
pub fn parse_time_zone(zone: &str) -> EngineResult<Tz> {
    zone.parse::<Tz>().map_err(|_| EngineError::InvalidTimeZone {
        zone: zone.to_string(),
    })
}

/// Anchors `time_of_day` on `date` in `tz` to an absolute instant.
///
/// # Example
///
/// ```
/// use runtime_accrual::calculation::anchor;
/// use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
/// use chrono_tz::America::Sao_Paulo;
///
/// let instant = anchor(
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     Sao_Paulo,
/// );
/// assert_eq!(instant, Utc.with_ymd_and_hms(2026, 1, 12, 11, 0, 0).unwrap());
/// ```
pub fn anchor(time_of_day: NaiveTime, date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let local = date.and_time(time_of_day);
    match tz.from_local_datetime(&local) {
        LocalResult::Single(instant) => instant.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => {
            debug!(local = %local, zone = ?tz, "ambiguous local time, using earliest occurrence");
            earliest.with_timezone(&Utc)
        }
        LocalResult::None => {
            let instant = skip_gap(local, tz);
            debug!(local = %local, zone = ?tz, instant = %instant, "nonexistent local time, using end of gap");
            instant
        }
    }
}

/// Anchors local midnight of `date`, the instant the calendar day begins.
pub fn start_of_day(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    anchor(NaiveTime::MIN, date, tz)
}

/// Finds the transition instant that swallowed `local`.
///
/// Reading `local` with the offset in force after the transition gives an
/// instant before the jump; reading it with the earlier offset gives one after.
/// The transition lies between the two and is located to the second.
fn skip_gap(local: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    let shifted = |delta: Duration| local.checked_add_signed(delta).unwrap_or(local);

    let before = local_offset_seconds(tz, shifted(Duration::days(-1)));
    let after = local_offset_seconds(tz, shifted(Duration::days(1)));

    let mut low = shifted(Duration::seconds(-i64::from(after)));
    let mut high = shifted(Duration::seconds(-i64::from(before)));

    while high - low > Duration::seconds(1) {
        let mid = low + (high - low) / 2;
        if utc_offset_seconds(tz, mid) == before {
            low = mid;
        } else {
            high = mid;
        }
    }

    Utc.from_utc_datetime(&high)
}

fn local_offset_seconds(tz: Tz, local: NaiveDateTime) -> i32 {
    match tz.offset_from_local_datetime(&local).earliest() {
        Some(offset) => offset.fix().local_minus_utc(),
        None => utc_offset_seconds(tz, local),
    }
}

fn utc_offset_seconds(tz: Tz, utc: NaiveDateTime) -> i32 {
    tz.offset_from_utc_datetime(&utc).fix().local_minus_utc()
}
