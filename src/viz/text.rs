//! Label formatting.

use chrono::Month;

/// Full English month name for a zero-based index (0 = January).
/// Out-of-range indices yield an empty string.
pub fn month_name(index: u32) -> &'static str {
    index
        .checked_add(1)
        .and_then(|m| u8::try_from(m).ok())
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("")
}

/// Round to one decimal, ties away from zero (`0.25` → `0.3`).
/// `{:.1}` alone rounds exact binary ties to even.
fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// One decimal place, e.g. `-0.5`.
pub fn fmt_fixed1(v: f64) -> String {
    format!("{:.1}", round1(v))
}

/// Temperature label with one decimal and the Celsius sign, e.g. `7.5 ℃`.
pub fn fmt_celsius(v: f64) -> String {
    format!("{:.1} ℃", round1(v))
}
