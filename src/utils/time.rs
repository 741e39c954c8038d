use chrono::{DateTime, Duration, TimeZone, Utc};

pub const MILLIS_PER_HOUR: i64 = 60 * 60 * 1000;
pub const MILLIS_PER_MINUTE: i64 = 60 * 1000;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Textual layout used for instants in exports and listings (`yyyy-MM-dd HH:mm:ss`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// This is the standard way of converting a duration to a string in screentime.
///
/// Hours and minutes use truncating division, so 59 seconds are `0 hours, 0 minutes` and negative
/// durations keep their sign on each component.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.num_milliseconds();
    let hours = millis / MILLIS_PER_HOUR;
    let minutes = (millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
    format!("{hours} hours, {minutes} minutes")
}

/// Number of the fixed-size day an instant falls into, counted from the unix epoch. This is not
/// aligned to the local calendar day.
pub fn day_bucket(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis().div_euclid(MILLIS_PER_DAY)
}

pub fn format_timestamp<Tz: TimeZone>(instant: DateTime<Utc>, timezone: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant
        .with_timezone(timezone)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}
