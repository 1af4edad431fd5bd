use serde_json::Value;
use time::format_description::well_known::{Iso8601, Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Formats a timestamp the way pages display it, e.g. `Sun Oct 18 10:04:00 2026`.
pub fn display_timestamp(ts: OffsetDateTime) -> String {
    let fmt = format_description!(
        "[weekday repr:short] [month repr:short] [day padding:space] [hour]:[minute]:[second] [year]"
    );
    ts.to_offset(UtcOffset::UTC)
        .format(fmt)
        .unwrap_or_else(|_| ts.unix_timestamp().to_string())
}

/// Parses a `state.lastchange` value.
///
/// ISO-8601 / RFC 3339 strings are the canonical form; RFC 2822 strings and
/// Unix epoch seconds (as a number or numeric string) are accepted for older
/// feeds. Returns `None` when nothing matches; callers keep the raw value.
pub fn parse_lastchange(raw: &Value) -> Option<OffsetDateTime> {
    match raw {
        Value::Number(n) => from_epoch(n.as_f64()?),
        Value::String(s) => parse_text(s.trim()),
        _ => None,
    }
}

pub fn normalize_lastchange(raw: &Value) -> Option<String> {
    parse_lastchange(raw).map(display_timestamp)
}

fn parse_text(s: &str) -> Option<OffsetDateTime> {
    if s.is_empty() {
        return None;
    }
    if let Ok(ts) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(ts);
    }
    if let Ok(ts) = OffsetDateTime::parse(s, &Iso8601::DEFAULT) {
        return Some(ts);
    }
    if let Ok(ts) = OffsetDateTime::parse(s, &Rfc2822) {
        return Some(ts);
    }

    // Offset-less forms are taken as UTC.
    let naive = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    ];
    for fmt in naive {
        if let Ok(ts) = PrimitiveDateTime::parse(s, fmt) {
            return Some(ts.assume_utc());
        }
    }
    if let Ok(day) = Date::parse(s, format_description!("[year]-[month]-[day]")) {
        return Some(day.midnight().assume_utc());
    }

    s.parse::<f64>().ok().and_then(from_epoch)
}

fn from_epoch(secs: f64) -> Option<OffsetDateTime> {
    if !secs.is_finite() {
        return None;
    }
    let nanos = (secs * 1_000_000_000.0).round() as i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
}
