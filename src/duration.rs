//! Compact duration notation used by activity records
//!
//! Accepts an optional sign followed by one or more `<number><unit>` groups,
//! e.g. `45m`, `1h30m`, `1.5h` or `-10m`. A bare `0` is also accepted.
//! Supported units are `ns`, `us` (`µs`, `μs`), `ms`, `s`, `m` and `h`.

use chrono::Duration;
use thiserror::Error;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SECOND: u64 = 1_000_000_000;
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;

/// Largest magnitude a signed 64-bit nanosecond count can hold (for negatives)
const MAX_MAGNITUDE: u64 = 1 << 63;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,
    #[error("expected a number in {0:?}")]
    MissingNumber(String),
    #[error("missing unit in {0:?}")]
    MissingUnit(String),
    #[error("unknown unit {unit:?} in {input:?}")]
    UnknownUnit { unit: String, input: String },
    #[error("duration {0:?} is out of range")]
    Overflow(String),
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

fn is_number_char(c: char) -> bool {
    c == '.' || c.is_ascii_digit()
}

/// Splits the leading run of ASCII digits off `s`, returning its value.
/// `None` means the digits overflow `u64`.
fn leading_int(s: &str) -> (Option<u64>, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: Option<u64> = Some(0);
    for digit in s[..end].bytes() {
        value = value
            .and_then(|v| v.checked_mul(10))
            .and_then(|v| v.checked_add(u64::from(digit - b'0')));
    }
    (value, &s[end..])
}

/// Splits the leading run of fraction digits off `s`.
/// Digits past `u64` precision are consumed but ignored.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    let mut scale = 1.0;
    let mut saturated = false;
    for digit in s[..end].bytes() {
        if saturated {
            continue;
        }
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit - b'0')))
        {
            Some(next) => {
                value = next;
                scale *= 10.0;
            }
            None => saturated = true,
        }
    }
    (value, scale, &s[end..])
}

/// Parse a compact duration such as `45m` or `1h30m`
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let mut rest = input;
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Ok(Duration::zero());
    }
    if rest.is_empty() {
        return Err(DurationError::Empty);
    }

    let overflow = || DurationError::Overflow(input.to_string());
    let mut total: u64 = 0;

    while !rest.is_empty() {
        if !rest.starts_with(is_number_char) {
            return Err(DurationError::MissingNumber(input.to_string()));
        }

        let before = rest.len();
        let (whole, after_int) = leading_int(rest);
        let whole = whole.ok_or_else(overflow)?;
        let has_int = after_int.len() != before;
        rest = after_int;

        let mut fraction = 0;
        let mut scale = 1.0;
        let mut has_fraction = false;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (f, s, after_frac) = leading_fraction(after_dot);
            has_fraction = after_frac.len() != after_dot.len();
            fraction = f;
            scale = s;
            rest = after_frac;
        }
        if !has_int && !has_fraction {
            return Err(DurationError::MissingNumber(input.to_string()));
        }

        let unit_end = rest.find(is_number_char).unwrap_or(rest.len());
        if unit_end == 0 {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        let unit = &rest[..unit_end];
        rest = &rest[unit_end..];
        let nanos = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        let mut value = whole.checked_mul(nanos).ok_or_else(overflow)?;
        if value > MAX_MAGNITUDE {
            return Err(overflow());
        }
        if fraction > 0 {
            value += (fraction as f64 * (nanos as f64 / scale)) as u64;
            if value > MAX_MAGNITUDE {
                return Err(overflow());
            }
        }
        total = total.checked_add(value).ok_or_else(overflow)?;
        if total > MAX_MAGNITUDE {
            return Err(overflow());
        }
    }

    let signed = if negative {
        -(total as i128)
    } else {
        total as i128
    };
    let nanos = i64::try_from(signed).map_err(|_| overflow())?;
    Ok(Duration::nanoseconds(nanos))
}

/// Duration as fractional hours
pub fn as_hours(duration: &Duration) -> f64 {
    split_by(duration, NANOS_PER_HOUR)
}

/// Duration as fractional minutes
pub fn as_minutes(duration: &Duration) -> f64 {
    split_by(duration, NANOS_PER_MINUTE)
}

fn split_by(duration: &Duration, unit_nanos: u64) -> f64 {
    let unit = unit_nanos as i64;
    match duration.num_nanoseconds() {
        Some(nanos) => (nanos / unit) as f64 + (nanos % unit) as f64 / unit as f64,
        None => duration.num_milliseconds() as f64 / (unit / NANOS_PER_MILLI as i64) as f64,
    }
}

/// Strictly positive durations only
pub fn is_positive(duration: &Duration) -> bool {
    *duration > Duration::zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_units() {
        assert_eq!(parse_duration("45m").unwrap(), Duration::minutes(45));
        assert_eq!(parse_duration("2h").unwrap(), Duration::hours(2));
        assert_eq!(parse_duration("90s").unwrap(), Duration::seconds(90));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::milliseconds(250));
        assert_eq!(parse_duration("10us").unwrap(), Duration::microseconds(10));
        assert_eq!(parse_duration("10µs").unwrap(), Duration::microseconds(10));
        assert_eq!(parse_duration("7ns").unwrap(), Duration::nanoseconds(7));
    }

    #[test]
    fn test_parse_compound_and_fractional() {
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::minutes(90));
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::minutes(90));
        assert_eq!(parse_duration(".5h").unwrap(), Duration::minutes(30));
        assert_eq!(parse_duration("2.h").unwrap(), Duration::hours(2));
        assert_eq!(parse_duration("1h0m30s").unwrap(), Duration::seconds(3630));
    }

    #[test]
    fn test_parse_sign_and_zero() {
        assert_eq!(parse_duration("0").unwrap(), Duration::zero());
        assert_eq!(parse_duration("-0").unwrap(), Duration::zero());
        assert_eq!(parse_duration("0m").unwrap(), Duration::zero());
        assert_eq!(parse_duration("-10m").unwrap(), Duration::minutes(-10));
        assert_eq!(parse_duration("+10m").unwrap(), Duration::minutes(10));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert_eq!(parse_duration(""), Err(DurationError::Empty));
        assert_eq!(parse_duration("-"), Err(DurationError::Empty));
        assert!(matches!(parse_duration("45"), Err(DurationError::MissingUnit(_))));
        assert!(matches!(parse_duration("m"), Err(DurationError::MissingNumber(_))));
        assert!(matches!(parse_duration("."), Err(DurationError::MissingNumber(_))));
        assert!(matches!(parse_duration(" 45m"), Err(DurationError::MissingNumber(_))));
        assert!(matches!(
            parse_duration("45x"),
            Err(DurationError::UnknownUnit { .. })
        ));
        assert!(matches!(
            parse_duration("45 m"),
            Err(DurationError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn test_parse_overflow() {
        assert!(matches!(
            parse_duration("9999999999999999999999h"),
            Err(DurationError::Overflow(_))
        ));
        assert!(matches!(
            parse_duration("3000000h"),
            Err(DurationError::Overflow(_))
        ));
    }

    #[test]
    fn test_fractional_views() {
        let d = parse_duration("30m").unwrap();
        assert_eq!(as_hours(&d), 0.5);
        assert_eq!(as_minutes(&d), 30.0);

        let d = parse_duration("1h15m").unwrap();
        assert_eq!(as_hours(&d), 1.25);
        assert_eq!(as_minutes(&d), 75.0);

        assert!(is_positive(&d));
        assert!(!is_positive(&Duration::zero()));
        assert!(!is_positive(&Duration::minutes(-1)));
    }
}
