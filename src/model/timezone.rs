// File: ./src/model/timezone.rs
//! Anchors wall-clock hours and minutes to absolute instants.
//!
//! Only the construction of an instant from a wall-clock time depends on
//! the zone; all arithmetic afterwards happens on UTC instants.
use crate::error::ParseError;
use crate::model::evaluator::{EvalContext, WallClock};
use crate::model::intent::{DEFAULT_MEETING_MINUTES, MeetingIntent};
use chrono::{DateTime, Duration, LocalResult, Offset, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

pub fn parse_time_zone(name: &str) -> Result<Tz, ParseError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ParseError::UnknownTimeZone(name.to_string()))
}

/// Drops seconds and sub-second precision.
pub fn truncate_to_minute(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .with_second(0)
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(instant)
}

/// Builds the instant at `clock` on the calendar day `reference` falls on
/// in `tz`.
///
/// A time repeated by a DST fall-back resolves to the earlier instant. A
/// time skipped by a spring-forward gap keeps the offset from before the
/// gap, which lands it past the gap by the gap's length.
pub fn wall_clock_instant(
    reference: DateTime<Utc>,
    tz: Tz,
    clock: WallClock,
) -> Result<DateTime<Utc>, ParseError> {
    let local_date = reference.with_timezone(&tz).date_naive();
    let naive = local_date
        .and_hms_opt(clock.hour, clock.minute, 0)
        .ok_or_else(|| {
            ParseError::range(format!(
                "{:02}:{:02} is not a valid time of day",
                clock.hour, clock.minute
            ))
        })?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            let before = tz
                .from_local_datetime(&(naive - Duration::hours(3)))
                .earliest()
                .ok_or_else(|| {
                    ParseError::range(format!("{} does not exist in {}", naive, tz.name()))
                })?;
            let offset_secs = i64::from(before.offset().fix().local_minus_utc());
            log::debug!(
                "{} falls in a DST gap in {}, using offset {}s",
                naive,
                tz.name(),
                offset_secs
            );
            Ok(Utc.from_utc_datetime(&(naive - Duration::seconds(offset_secs))))
        }
    }
}

/// Turns the evaluated context into the final intent.
///
/// Login and logout intents are returned untouched.
pub fn resolve(
    ctx: EvalContext,
    reference: DateTime<Utc>,
    tz: Tz,
) -> Result<MeetingIntent, ParseError> {
    let EvalContext { state, mut intent } = ctx;
    if intent.is_login || intent.is_logout {
        return Ok(intent);
    }

    intent.start = match state.start {
        Some(clock) if !intent.is_now => wall_clock_instant(reference, tz, clock)?,
        _ => truncate_to_minute(reference),
    };

    intent.end = if let Some(minutes) = state.duration_minutes {
        add_minutes(intent.start, minutes)?
    } else if let Some(clock) = state.finish {
        wall_clock_instant(reference, tz, clock)?
    } else {
        add_minutes(intent.start, DEFAULT_MEETING_MINUTES)?
    };

    Ok(intent)
}

fn add_minutes(start: DateTime<Utc>, minutes: i64) -> Result<DateTime<Utc>, ParseError> {
    Duration::try_minutes(minutes)
        .and_then(|d| start.checked_add_signed(d))
        .ok_or_else(|| ParseError::range(format!("A duration of {} minutes is too long", minutes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;
    use chrono_tz::Asia::Singapore;

    fn clock(hour: u32, minute: u32) -> WallClock {
        WallClock { hour, minute }
    }

    #[test]
    fn test_truncate_to_minute() {
        let t = Utc
            .with_ymd_and_hms(2023, 6, 19, 14, 7, 42)
            .unwrap()
            .with_nanosecond(123_456_789)
            .unwrap();
        assert_eq!(
            truncate_to_minute(t),
            Utc.with_ymd_and_hms(2023, 6, 19, 14, 7, 0).unwrap()
        );
    }

    #[test]
    fn test_calendar_day_comes_from_the_zone() {
        // 22:00 UTC on the 26th is already 06:00 on the 27th in Singapore.
        let reference = Utc.with_ymd_and_hms(2023, 4, 26, 22, 0, 0).unwrap();
        let start = wall_clock_instant(reference, Singapore, clock(10, 0)).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2023, 4, 27, 2, 0, 0).unwrap());
    }

    #[test]
    fn test_summer_and_winter_offsets() {
        let summer = Utc.with_ymd_and_hms(2023, 7, 19, 12, 0, 0).unwrap();
        assert_eq!(
            wall_clock_instant(summer, New_York, clock(10, 0)).unwrap(),
            Utc.with_ymd_and_hms(2023, 7, 19, 14, 0, 0).unwrap()
        );
        let winter = Utc.with_ymd_and_hms(2023, 1, 19, 12, 0, 0).unwrap();
        assert_eq!(
            wall_clock_instant(winter, New_York, clock(10, 0)).unwrap(),
            Utc.with_ymd_and_hms(2023, 1, 19, 15, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_spring_forward_gap_moves_forward() {
        // 02:30 does not exist in New York on 2023-03-12; it becomes 03:30 EDT.
        let reference = Utc.with_ymd_and_hms(2023, 3, 12, 12, 0, 0).unwrap();
        let start = wall_clock_instant(reference, New_York, clock(2, 30)).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2023, 3, 12, 7, 30, 0).unwrap());
    }

    #[test]
    fn test_fall_back_ambiguity_takes_earlier() {
        // 01:30 happens twice in New York on 2023-11-05; the EDT one wins.
        let reference = Utc.with_ymd_and_hms(2023, 11, 5, 12, 0, 0).unwrap();
        let start = wall_clock_instant(reference, New_York, clock(1, 30)).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2023, 11, 5, 5, 30, 0).unwrap());
    }

    #[test]
    fn test_unknown_zone() {
        assert_eq!(
            parse_time_zone("Mars/Olympus_Mons"),
            Err(ParseError::UnknownTimeZone("Mars/Olympus_Mons".into()))
        );
        assert_eq!(parse_time_zone("Etc/UTC").unwrap(), chrono_tz::Etc::UTC);
    }
}
