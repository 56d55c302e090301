use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

// =============================================================================
// PARSING BOUNDARY
// Every untyped sheet value passes through here before it becomes an f64 or
// a date. Nothing in this module fails loudly: bad input is `None`.
// =============================================================================

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Best-effort numeric salvage.
///
/// JSON numbers are taken as-is. Strings keep only digits, `.` and `-`
/// before parsing, so `"$1,234.50"` becomes `1234.5` and `"19%"` becomes `19`.
/// Anything that does not end up as a finite number is `None`.
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => salvage_number(s),
        _ => None,
    }
}

fn salvage_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    // A misplaced '-' (e.g. "2024-01-05") fails the parse and drops the value.
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a date-like value into a UTC instant.
///
/// Strings may be plain dates, RFC 3339 timestamps or naive date-times.
/// Non-zero JSON numbers are read as epoch milliseconds.
pub fn to_instant(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(s) => parse_date_text(s.trim()),
        Value::Number(n) => {
            let millis = n.as_f64().filter(|v| v.is_finite() && *v != 0.0)?;
            if millis.abs() > i64::MAX as f64 {
                return None;
            }
            DateTime::from_timestamp_millis(millis.trunc() as i64).map(|dt| dt.naive_utc())
        }
        _ => None,
    }
}

/// Calendar day (UTC) of a date-like value.
pub fn to_date(value: &Value) -> Option<NaiveDate> {
    to_instant(value).map(|instant| instant.date())
}

fn parse_date_text(text: &str) -> Option<NaiveDateTime> {
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Missing, null, or whitespace-only.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Text form of a scalar cell, `None` when blank or not a scalar.
pub fn raw_text(value: Option<&Value>) -> Option<String> {
    if is_blank(value) {
        return None;
    }
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
