use chrono::{DateTime, SecondsFormat, Utc};

/// Processing clock of a task instance, in milliseconds since the Unix epoch.
pub type TimeStamp = i64;

/// Renders a clock value for humans, e.g. `2024-01-01T00:00:00.150Z`.
///
/// Values outside chrono's representable range fall back to the raw number.
pub fn format_time_stamp(time_stamp: TimeStamp) -> String {
    match DateTime::<Utc>::from_timestamp_millis(time_stamp) {
        Some(date_time) => date_time.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => format!("{}ms", time_stamp),
    }
}
