// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tolerant conversion of loosely typed wire values.
//!
//! Every function returns `None` instead of failing: empty strings, non-numeric
//! text, overflow and non-finite floats are all "absent".

use serde_json::Value;

/// 2^63, the exclusive upper bound of i64
const I64_UPPER_EXCLUSIVE: f64 = 9_223_372_036_854_775_808.0;

/// Render a scalar as text. Arrays, objects and null are absent.
pub fn parse_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a 64-bit integer from a JSON number or numeric string
pub fn parse_long(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().and_then(|u| i64::try_from(u).ok()))
            .or_else(|| n.as_f64().and_then(integral_f64)),
        Value::String(s) => parse_long_str(s),
        _ => None,
    }
}

/// Parse a 32-bit integer; values that do not fit are absent
pub fn parse_int(value: &Value) -> Option<i32> {
    parse_long(value).and_then(|v| i32::try_from(v).ok())
}

/// Parse a finite floating-point number
pub fn parse_double(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn parse_long_str(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Accept floats that carry an exact integer value (e.g. `3600.0`)
fn integral_f64(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= -I64_UPPER_EXCLUSIVE && f < I64_UPPER_EXCLUSIVE {
        Some(f as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_numbers_and_numeric_strings() {
        assert_eq!(parse_int(&json!(10)), Some(10));
        assert_eq!(parse_int(&json!("10")), Some(10));
        assert_eq!(parse_int(&json!("  -3 ")), Some(-3));
        assert_eq!(parse_long(&json!("3600")), Some(3600));
        assert_eq!(parse_long(&json!(3600.0)), Some(3600));
        assert_eq!(parse_double(&json!("12.5")), Some(12.5));
        assert_eq!(parse_double(&json!(7)), Some(7.0));
    }

    #[test]
    fn malformed_values_are_absent() {
        assert_eq!(parse_int(&json!("")), None);
        assert_eq!(parse_int(&json!("   ")), None);
        assert_eq!(parse_int(&json!("invalid_number")), None);
        assert_eq!(parse_long(&json!("also_invalid")), None);
        assert_eq!(parse_double(&json!("Lorem ipsum")), None);
        assert_eq!(parse_int(&json!(null)), None);
        assert_eq!(parse_int(&json!(true)), None);
        assert_eq!(parse_int(&json!([1])), None);
    }

    #[test]
    fn fractional_values_are_not_truncated() {
        assert_eq!(parse_int(&json!(12.5)), None);
        assert_eq!(parse_long(&json!("12.5")), None);
    }

    #[test]
    fn overflow_is_absent() {
        assert_eq!(parse_int(&json!("3000000000")), None);
        assert_eq!(parse_long(&json!("3000000000")), Some(3_000_000_000));
        assert_eq!(parse_long(&json!(u64::MAX)), None);
        assert_eq!(parse_long(&json!("99999999999999999999")), None);
    }

    #[test]
    fn non_finite_doubles_are_absent() {
        assert_eq!(parse_double(&json!("NaN")), None);
        assert_eq!(parse_double(&json!("inf")), None);
    }

    #[test]
    fn text_accepts_scalars_only() {
        assert_eq!(parse_text(&json!("abc")), Some("abc".to_string()));
        assert_eq!(parse_text(&json!(15)), Some("15".to_string()));
        assert_eq!(parse_text(&json!(false)), Some("false".to_string()));
        assert_eq!(parse_text(&json!(null)), None);
        assert_eq!(parse_text(&json!({"a": 1})), None);
    }
}
