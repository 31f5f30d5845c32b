use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Accepts a plain calendar date (`2024-05-01`) or an RFC 3339 timestamp, in
/// which case the calendar date as written is used.
pub fn parse_activity_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Parses an `HH:MM` clock time.
pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

/// Minutes from `start` to `end`, both taken on `date`, wrapped into a single
/// day so an end before the start counts as crossing midnight.
///
/// Returns 0 when either time is missing or unparsable.
pub fn duration_minutes(date: NaiveDate, start: Option<&str>, end: Option<&str>) -> i32 {
    let (Some(start), Some(end)) = (start.and_then(parse_clock_time), end.and_then(parse_clock_time)) else {
        return 0;
    };

    let start = NaiveDateTime::new(date, start);
    let end = NaiveDateTime::new(date, end);
    let minutes = (end - start).num_minutes().rem_euclid(MINUTES_PER_DAY);

    // always in 0..1440
    minutes as i32
}
