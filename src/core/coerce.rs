use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Day number of 1970-01-01 in the 1900 date system used by the feed's
/// spreadsheet export. Serial 1 decodes to 1899-12-31, preserving the
/// historical leap-year-1900 quirk.
pub const UNIX_EPOCH_SERIAL: f64 = 25_569.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Decodes a spreadsheet day-count serial into a wall-clock datetime.
///
/// The calendar components are taken from the UTC representation of the
/// computed instant and returned as a naive datetime. The decoded date for a
/// given serial is therefore identical on every host, whatever its timezone
/// offset: serial 45292 is 2024-01-01 everywhere.
pub fn from_spreadsheet_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let millis = ((serial - UNIX_EPOCH_SERIAL) * MILLIS_PER_DAY).round();
    if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis as i64).map(|dt| dt.naive_utc())
}

/// Parses `D/M/Y`, `D/M/Y H:M` or `D/M/Y H:M:S`. Day-first only; the date
/// segment must split into exactly three integer parts. Missing time
/// components default to zero. No ISO, no month-first.
pub fn from_day_first_text(raw: &str) -> Option<NaiveDateTime> {
    let mut halves = raw.trim().splitn(2, ' ');
    let date_part = halves.next()?;
    let time_part = halves.next();

    let fields: Vec<&str> = date_part.split('/').collect();
    if fields.len() != 3 {
        return None;
    }
    let day: u32 = fields[0].trim().parse().ok()?;
    let month: u32 = fields[1].trim().parse().ok()?;
    let year: i32 = fields[2].trim().parse().ok()?;

    let (hour, minute, second) = match time_part {
        Some(time) => parse_time(time)?,
        None => (0, 0, 0),
    };

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

fn parse_time(raw: &str) -> Option<(u32, u32, u32)> {
    let mut parts = raw.trim().split(':');
    let hour = parts.next()?.trim().parse().ok()?;
    let minute = match parts.next() {
        Some(part) => part.trim().parse().ok()?,
        None => 0,
    };
    let second = match parts.next() {
        Some(part) => part.trim().parse().ok()?,
        None => 0,
    };
    Some((hour, minute, second))
}

fn from_serial_text(raw: &str) -> Option<NaiveDateTime> {
    raw.parse::<f64>().ok().and_then(from_spreadsheet_serial)
}

type Strategy = fn(&str) -> Option<NaiveDateTime>;

/// Tried in order; first success wins. A value that parses as a finite
/// number is always a serial, so the day-first grammar only ever sees text
/// that failed numeric parsing.
const STRATEGIES: [Strategy; 2] = [from_serial_text, from_day_first_text];

pub fn coerce_date_text(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    STRATEGIES.iter().find_map(|parse| parse(raw))
}

/// Coerces a raw JSON cell. Numbers go straight to the serial decoder;
/// strings run the strategy chain; anything else is absent.
pub fn coerce_date_value(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Number(n) => n.as_f64().and_then(from_spreadsheet_serial),
        Value::String(s) => coerce_date_text(s),
        _ => None,
    }
}

/// Finite float from a JSON cell; absent (never zero) otherwise.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
