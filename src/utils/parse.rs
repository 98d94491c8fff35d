//! Parse-with-default helpers for loosely typed persisted values.
//!
//! Recurrence settings historically arrive as numbers, numeric strings, or
//! arrays of either. Every silent fallback lives here so the defaults stay
//! auditable and testable in isolation.

use serde_json::Value;

/// Fallback weekday when the stored value is not a valid index (Friday).
pub const DEFAULT_WEEKDAY: u32 = 5;
/// Fallback day interval when the stored value is unparsable or not positive.
pub const DEFAULT_INTERVAL_DAYS: i64 = 10;

/// Reduces an array to its first element; scalars pass through unchanged.
pub fn scalar(value: &Value) -> &Value {
    match value {
        Value::Array(items) => items.first().unwrap_or(&Value::Null),
        other => other,
    }
}

/// Parses an integer from a number or numeric string, if possible.
pub fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Weekday index 0-6 (Sunday = 0), defaulting to Friday for anything else.
pub fn weekday_or_default(value: &Value) -> u32 {
    match parse_int(scalar(value)) {
        Some(day @ 0..=6) => day as u32,
        _ => DEFAULT_WEEKDAY,
    }
}

/// Positive day interval, defaulting to ten days when unparsable or <= 0.
pub fn interval_or_default(value: &Value) -> i64 {
    match parse_int(scalar(value)) {
        Some(days) if days > 0 => days,
        _ => DEFAULT_INTERVAL_DAYS,
    }
}

/// Days of month from a scalar or array; unparsable or non-positive entries
/// are dropped. Values above a month's length clamp during scheduling.
pub fn month_days(value: &Value) -> Vec<u32> {
    let raw = match value {
        Value::Array(items) => items.iter().collect::<Vec<_>>(),
        other => vec![other],
    };
    let mut days: Vec<u32> = raw
        .into_iter()
        .filter_map(parse_int)
        .filter(|day| *day >= 1)
        .map(|day| day as u32)
        .collect();
    days.sort_unstable();
    days.dedup();
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_takes_first_array_element() {
        assert_eq!(parse_int(scalar(&json!([7, 8]))), Some(7));
        assert_eq!(parse_int(scalar(&json!(9))), Some(9));
        assert_eq!(parse_int(scalar(&json!([]))), None);
    }

    #[test]
    fn parse_int_accepts_numeric_strings() {
        assert_eq!(parse_int(&json!("15")), Some(15));
        assert_eq!(parse_int(&json!(" 3 ")), Some(3));
        assert_eq!(parse_int(&json!("abc")), None);
        assert_eq!(parse_int(&json!(null)), None);
    }

    #[test]
    fn weekday_defaults_to_friday() {
        assert_eq!(weekday_or_default(&json!(3)), 3);
        assert_eq!(weekday_or_default(&json!("0")), 0);
        assert_eq!(weekday_or_default(&json!(9)), DEFAULT_WEEKDAY);
        assert_eq!(weekday_or_default(&json!("soon")), DEFAULT_WEEKDAY);
        assert_eq!(weekday_or_default(&json!(-1)), DEFAULT_WEEKDAY);
    }

    #[test]
    fn interval_defaults_to_ten_days() {
        assert_eq!(interval_or_default(&json!(14)), 14);
        assert_eq!(interval_or_default(&json!("30")), 30);
        assert_eq!(interval_or_default(&json!(0)), DEFAULT_INTERVAL_DAYS);
        assert_eq!(interval_or_default(&json!(-5)), DEFAULT_INTERVAL_DAYS);
        assert_eq!(interval_or_default(&json!("x")), DEFAULT_INTERVAL_DAYS);
    }

    #[test]
    fn month_days_normalizes_scalars_and_arrays() {
        assert_eq!(month_days(&json!(5)), vec![5]);
        assert_eq!(month_days(&json!(["20", 5, 5])), vec![5, 20]);
        assert_eq!(month_days(&json!(["x", 0, 31])), vec![31]);
    }
}
