//! Relative "N мин/ч/д назад" labels for log rows.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Shown when a record has no usable timestamp.
pub const UNKNOWN_TIME: &str = "—";

/// Buckets an elapsed duration into minutes, hours or days, flooring each.
///
/// Under an hour reads in minutes, under a day in hours, anything older in
/// days. Timestamps from the future clamp to zero.
pub fn relative_time_label(elapsed: Duration) -> String {
    let minutes = elapsed.num_minutes().max(0);
    if minutes < 60 {
        return format!("{minutes} мин назад");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours} ч назад");
    }
    format!("{} д назад", hours / 24)
}

/// Parses the timestamps the bot writes.
///
/// Accepts RFC 3339 and offset-less ISO-8601 (read as UTC), with or without
/// fractional seconds.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Label for an optional raw timestamp as seen at `now`.
pub fn time_label(created_at: Option<&str>, now: DateTime<Utc>) -> String {
    created_at
        .and_then(parse_timestamp)
        .map(|at| relative_time_label(now - at))
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}
