//! Calendar-day bucketing for post timestamps
//!
//! Streaks, daily titles and the early-adopter window all work on calendar
//! days. Which calendar a post falls on depends on the configured offset:
//! - `Local`: the machine's timezone (what the upload screen shows)
//! - `Fixed`: a fixed UTC offset, for reproducible runs and tests

use chrono::{DateTime, Days, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayResolver {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl DayResolver {
    /// Build from a configured offset in minutes. Out-of-range offsets fall back to local time.
    pub fn from_offset_minutes(minutes: Option<i32>) -> Self {
        match minutes.and_then(|m| FixedOffset::east_opt(m.saturating_mul(60))) {
            Some(offset) => Self::Fixed(offset),
            None => Self::Local,
        }
    }

    /// Wall-clock date and time of an instant on this calendar
    pub fn local_datetime<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> NaiveDateTime {
        match self {
            Self::Local => instant.with_timezone(&Local).naive_local(),
            Self::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }

    /// Calendar day an instant falls on
    pub fn day_of<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> NaiveDate {
        self.local_datetime(instant).date()
    }

    /// The instant the day after `day` begins on this calendar
    pub fn next_midnight(&self, day: NaiveDate) -> DateTime<Utc> {
        let next = day
            .checked_add_days(Days::new(1))
            .unwrap_or(day)
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default();
        let resolved = match self {
            Self::Local => Local.from_local_datetime(&next).earliest().map(|dt| dt.with_timezone(&Utc)),
            Self::Fixed(offset) => offset.from_local_datetime(&next).earliest().map(|dt| dt.with_timezone(&Utc)),
        };
        resolved.unwrap_or_else(|| next.and_utc())
    }
}

/// Day key stored in the database ("YYYY-MM-DD")
pub fn day_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}
