//! Raw text fields to integers.

/// A (day, month, year) triple as typed by the user.
///
/// `None` marks a field that was left empty or held no number. Nothing here
/// is checked against the calendar; see [`crate::validate::validate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateInput {
    pub day: Option<i32>,
    pub month: Option<i32>,
    pub year: Option<i32>,
}

impl DateInput {
    pub fn new(day: i32, month: i32, year: i32) -> Self {
        Self {
            day: Some(day),
            month: Some(month),
            year: Some(year),
        }
    }

    pub fn from_fields(day: &str, month: &str, year: &str) -> Self {
        Self {
            day: parse_field(day),
            month: parse_field(month),
            year: parse_field(year),
        }
    }
}

/// Reads the leading integer of a text field.
///
/// Surrounding whitespace is skipped, a single `+` or `-` is accepted, and
/// parsing stops at the first non-digit ("12th" reads as 12). Returns `None`
/// when no digit is found. Values beyond `i32` saturate.
pub fn parse_field(raw: &str) -> Option<i32> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i32 = 0;
    let mut seen = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        let digit = i32::from(b - b'0');
        value = value
            .saturating_mul(10)
            .saturating_add(if negative { -digit } else { digit });
    }

    seen.then_some(value)
}
