use std::ops::{Add, Sub};

use chrono::{Datelike, Local, TimeZone, Timelike, Weekday};

use crate::shared::time::Duration;

/// A point in time expressed as Unix seconds.
///
/// [`Time`](super::time::Time) models a time-of-day offset within a single
/// static schedule (seconds since midnight, as GTFS itself does);
/// `Timestamp` models an absolute instant, which is what the live timetable,
/// McRAPTOR's labels, and every HTTP-facing time field actually need, since
/// a live trip or a journey search can span into the next calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl From<i64> for Timestamp {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        Duration::from_seconds((self.0 - rhs.0).max(0) as u32)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs.as_seconds() as i64)
    }
}

impl Timestamp {
    pub fn now() -> Self {
        Self(Local::now().timestamp())
    }

    pub const fn from_unix(secs: i64) -> Self {
        Self(secs)
    }

    pub const fn as_unix(&self) -> i64 {
        self.0
    }

    /// Today's local weekday, used to index a [`RoutePattern`](crate::timetable::RoutePattern)'s schedule.
    pub fn weekday(&self) -> Weekday {
        Local
            .timestamp_opt(self.0, 0)
            .single()
            .map(|dt| dt.weekday())
            .unwrap_or(Weekday::Mon)
    }

    /// Minutes since local midnight on the same day as this instant.
    pub fn minutes_since_midnight(&self) -> i64 {
        let dt = Local.timestamp_opt(self.0, 0).single();
        match dt {
            Some(dt) => (dt.num_seconds_from_midnight() / 60) as i64,
            None => 0,
        }
    }

    /// Parses an `HH:MM` string as occurring today (local time).
    pub fn from_hms_today(hms: &str) -> Option<Self> {
        let mut parts = hms.split(':');
        let hour: u32 = parts.next()?.parse().ok()?;
        let minute: u32 = parts.next()?.parse().ok()?;
        let today = Local::now().date_naive();
        let dt = today.and_hms_opt(hour, minute, 0)?;
        Local.from_local_datetime(&dt).single().map(|dt| Self(dt.timestamp()))
    }
}
