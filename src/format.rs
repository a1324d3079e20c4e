//! Formatting Helpers
//!
//! Money is stored in minor units (cents); dates arrive as Unix seconds.

use std::fmt::Display;

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};
use serde_json::Value;

use crate::error::{UtilError, UtilResult};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Lenient numeric coercion, following JS `Number()` for numbers and
/// strings. `None` stands for NaN; infinities are kept.
pub trait AsAmount {
    fn as_amount(&self) -> Option<f64>;
}

macro_rules! impl_as_amount_int {
    ($($ty:ty),*) => {
        $(impl AsAmount for $ty {
            fn as_amount(&self) -> Option<f64> {
                Some(*self as f64)
            }
        })*
    };
}

impl_as_amount_int!(i32, i64, u32, u64);

impl AsAmount for f64 {
    fn as_amount(&self) -> Option<f64> {
        (!self.is_nan()).then_some(*self)
    }
}

impl AsAmount for f32 {
    fn as_amount(&self) -> Option<f64> {
        f64::from(*self).as_amount()
    }
}

impl AsAmount for str {
    fn as_amount(&self) -> Option<f64> {
        parse_js_number(self)
    }
}

/// String to number the way JS `Number()` reads it: surrounding whitespace
/// ignored, empty means 0, `Infinity` and `0x`/`0o`/`0b` literals accepted
fn parse_js_number(raw: &str) -> Option<f64> {
    let text = raw.trim();
    match text {
        "" => return Some(0.0),
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            if digits.is_empty() {
                return None;
            }
            return digits.chars().try_fold(0.0_f64, |acc, c| {
                c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
            });
        }
    }

    // Rust also accepts "inf" and "nan" spellings
    if text.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    text.parse::<f64>().ok()
}

impl AsAmount for String {
    fn as_amount(&self) -> Option<f64> {
        self.as_str().as_amount()
    }
}

impl AsAmount for Value {
    fn as_amount(&self) -> Option<f64> {
        match self {
            Value::Null => Some(0.0),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.as_amount(),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl<T: AsAmount> AsAmount for Option<T> {
    fn as_amount(&self) -> Option<f64> {
        match self {
            Some(v) => v.as_amount(),
            None => Some(0.0),
        }
    }
}

impl<T: AsAmount + ?Sized> AsAmount for &T {
    fn as_amount(&self) -> Option<f64> {
        (**self).as_amount()
    }
}

/// Two decimals like JS `toFixed(2)`: exact ties round away from zero
/// where `{:.2}` would round to even
fn to_fixed_2(x: f64) -> String {
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // A tie on the third decimal is only representable as an odd multiple of 1/8
    let is_tie = (x * 8.0).fract() == 0.0 && (x * 4.0).fract() != 0.0;
    if !is_tie {
        return format!("{:.2}", x);
    }

    let cents = (x.abs() * 100.0).ceil() as u64;
    let sign = if x < 0.0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, cents / 100, cents % 100)
}

/// Minor units to a two-decimal major amount; zero and non-numeric give "0.00"
pub fn cost_format(cost: impl AsAmount) -> String {
    match cost.as_amount() {
        Some(amount) if amount != 0.0 => to_fixed_2(amount / 100.0),
        _ => "0.00".to_string(),
    }
}

/// Major units to minor units, rounded to the nearest cent.
/// `None` when the input is not a number or does not fit an `i64`.
pub fn cost_stripe(cost: impl AsAmount) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    let minor = (cost.as_amount()? * 100.0).round();
    (minor.is_finite() && (-LIMIT..LIMIT).contains(&minor)).then_some(minor as i64)
}

/// "10.50 USD"
pub fn cost_with_currency(cost: impl AsAmount, currency: &str) -> String {
    format!("{} {}", cost_format(cost), currency)
}

fn to_datetime(timestamp: i64) -> UtilResult<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| UtilError::InvalidInput(format!("timestamp {} out of range", timestamp)))
}

fn day_month_year<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTH_NAMES[date.month0() as usize],
        date.year()
    )
}

/// "D Mon YYYY, HH:MM:SS" in the given timezone
pub fn format_date_in<Tz>(timestamp: i64, tz: &Tz) -> UtilResult<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let date = to_datetime(timestamp)?.with_timezone(tz);
    Ok(format!("{}, {}", day_month_year(&date), date.format("%H:%M:%S")))
}

/// "D Mon YYYY, <time>" in local time. In the browser the time part
/// follows the user's locale.
#[cfg(target_arch = "wasm32")]
pub fn format_date(timestamp: i64) -> UtilResult<String> {
    let date = to_datetime(timestamp)?.with_timezone(&Local);
    Ok(format!(
        "{}, {}",
        day_month_year(&date),
        crate::browser::locale_time_string(timestamp)
    ))
}

/// "D Mon YYYY, HH:MM:SS" in local time
#[cfg(not(target_arch = "wasm32"))]
pub fn format_date(timestamp: i64) -> UtilResult<String> {
    format_date_in(timestamp, &Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use serde_json::json;

    #[test]
    fn test_cost_format() {
        assert_eq!(cost_format(0), "0.00");
        assert_eq!(cost_format(1050), "10.50");
        assert_eq!(cost_format(1), "0.01");
        assert_eq!(cost_format(-250), "-2.50");
        assert_eq!(cost_format(123456789_i64), "1234567.89");
    }

    #[test]
    fn test_cost_format_lenient_input() {
        assert_eq!(cost_format("1050"), "10.50");
        assert_eq!(cost_format(" 99 "), "0.99");
        assert_eq!(cost_format("abc"), "0.00");
        assert_eq!(cost_format(""), "0.00");
        assert_eq!(cost_format(f64::NAN), "0.00");
        assert_eq!(cost_format(None::<i64>), "0.00");
        assert_eq!(cost_format(&json!(2599)), "25.99");
        assert_eq!(cost_format(&json!({"amount": 1})), "0.00");
    }

    #[test]
    fn test_cost_format_ties_round_up() {
        assert_eq!(cost_format(12.5), "0.13");
        assert_eq!(cost_format(-12.5), "-0.13");
        assert_eq!(cost_format(37.5), "0.38");
        assert_eq!(cost_format(312.5), "3.13");
        assert_eq!(cost_format(25), "0.25");
        assert_eq!(cost_format(1050), "10.50");
    }

    #[test]
    fn test_cost_format_non_finite() {
        assert_eq!(cost_format(f64::INFINITY), "Infinity");
        assert_eq!(cost_format(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(cost_format("Infinity"), "Infinity");
        assert_eq!(cost_format("inf"), "0.00");
        assert_eq!(cost_format("NaN"), "0.00");
    }

    #[test]
    fn test_cost_format_radix_literals() {
        assert_eq!(cost_format("0x10"), "0.16");
        assert_eq!(cost_format("0b1010"), "0.10");
        assert_eq!(cost_format("0o17"), "0.15");
        assert_eq!(cost_format("0x"), "0.00");
        assert_eq!(cost_format("0x+1"), "0.00");
        assert_eq!(cost_format("1e3"), "10.00");
    }

    #[test]
    fn test_cost_stripe_out_of_range() {
        assert_eq!(cost_stripe(f64::INFINITY), None);
        assert_eq!(cost_stripe("-Infinity"), None);
        assert_eq!(cost_stripe(1e300), None);
        assert_eq!(cost_stripe("0x10"), Some(1600));
    }

    #[test]
    fn test_cost_stripe() {
        assert_eq!(cost_stripe(10.5), Some(1050));
        assert_eq!(cost_stripe(19.99), Some(1999));
        assert_eq!(cost_stripe("12.30"), Some(1230));
        assert_eq!(cost_stripe(0), Some(0));
        assert_eq!(cost_stripe("twelve"), None);
    }

    #[test]
    fn test_cost_with_currency() {
        assert_eq!(cost_with_currency(1050, "USD"), "10.50 USD");
        assert_eq!(cost_with_currency(0, "EUR"), "0.00 EUR");
    }

    #[test]
    fn test_format_date_epoch() {
        let formatted = format_date_in(0, &Utc).unwrap();
        assert!(formatted.starts_with("1 Jan 1970, "));
        assert_eq!(formatted, "1 Jan 1970, 00:00:00");
    }

    #[test]
    fn test_format_date_offset() {
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(format_date_in(0, &new_york).unwrap(), "31 Dec 1969, 19:00:00");
        assert_eq!(
            format_date_in(1_700_000_000, &Utc).unwrap(),
            "14 Nov 2023, 22:13:20"
        );
    }

    #[test]
    fn test_format_date_local() {
        assert!(format_date(0).unwrap().contains(", "));
    }

    #[test]
    fn test_format_date_out_of_range() {
        assert!(matches!(format_date_in(i64::MAX, &Utc), Err(UtilError::InvalidInput(_))));
    }
}
