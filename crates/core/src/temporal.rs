//! Date arithmetic shared by every analyzer.
//!
//! Nothing in here reads the system clock: the reference instant is always a
//! parameter so that analyses are reproducible.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// Sentinel returned for missing/unparsable dates.
///
/// Large enough to fall outside every urgency window.
pub const FAR_FUTURE_DAYS: i64 = 999;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Whole days from `reference` until `target`, rounded up.
///
/// Negative when `target` is already in the past. `None` (missing or
/// malformed date upstream) yields [`FAR_FUTURE_DAYS`].
pub fn days_until(target: Option<DateTime<Utc>>, reference: DateTime<Utc>) -> i64 {
    match target {
        Some(target) => ceil_days(target - reference),
        None => FAR_FUTURE_DAYS,
    }
}

/// Whole days elapsed from `past` to `reference`, rounded up.
///
/// `None` when there is no recorded date.
pub fn days_since(past: Option<DateTime<Utc>>, reference: DateTime<Utc>) -> Option<i64> {
    past.map(|p| ceil_days(reference - p))
}

fn ceil_days(delta: chrono::TimeDelta) -> i64 {
    let days = (delta.num_milliseconds() as f64 / MILLIS_PER_DAY).ceil();
    // -0.0 casts to 0
    days as i64
}

/// Parse a data-store date.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
}

/// Serde helper: deserialize an optional date leniently.
///
/// Non-string values and unparsable strings become `None` instead of failing
/// the whole record.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => parse_date(&s),
        _ => None,
    })
}
