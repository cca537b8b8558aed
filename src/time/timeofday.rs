use std::fmt;

use chrono::{
    NaiveTime,
    TimeDelta,
    Timelike
};

const NANOS_PER_SECOND: f64 = 1e9;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unable to parse '{0}' as a time of day (expected HH:MM or HH:MM:SS)")]
pub struct ParseTimeOfDayError(pub String);

/// Parses a wall-clock time written as `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`.
pub fn parse_time_of_day(time_str: &str) -> Result<NaiveTime, ParseTimeOfDayError> {
    let trimmed = time_str.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| ParseTimeOfDayError(trimmed.to_owned()))
}

/// Length of a time interval in seconds, keeping the sub-second part.
#[inline]
pub fn seconds(delta: TimeDelta) -> f64 {
    delta
        .num_nanoseconds()
        .map_or(delta.num_seconds() as f64, |nanos| nanos as f64 / NANOS_PER_SECOND)
}

#[inline]
pub fn seconds_between(start: NaiveTime, end: NaiveTime) -> f64 {
    seconds(end - start)
}

/// Formats a time so that `parse_time_of_day` reads back the same value.
pub struct TimeOfDay(pub NaiveTime);

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.nanosecond() == 0 {
            write!(f, "{}", self.0.format("%H:%M:%S"))
        } else {
            write!(f, "{}", self.0.format("%H:%M:%S%.f"))
        }
    }
}
