//! Birth date validation.
//!
//! Checks run in three stages:
//!   1. every field must be present (zero counts as empty),
//!   2. independent range checks on day, month and year,
//!   3. the triple must name a real calendar day that is not after `today`.
//!
//! A stage only runs when the previous one recorded no errors.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::input::DateInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Day,
    Month,
    Year,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Day, Field::Month, Field::Year];

    pub fn name(self) -> &'static str {
        match self {
            Field::Day => "day",
            Field::Month => "month",
            Field::Year => "year",
        }
    }
}

/// A problem with a single input field. `Display` is the message shown next
/// to that field.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("This field is required")]
    MissingField,

    #[error("{}", range_message(.0))]
    OutOfRange(Field),

    #[error("Must be a valid date")]
    InvalidCalendarDate,

    #[error("Must be in the past")]
    FutureDate,
}

fn range_message(field: &Field) -> &'static str {
    match field {
        Field::Day => "Must be a valid day",
        Field::Month => "Must be a valid month",
        Field::Year => "Must be in the past",
    }
}

impl Serialize for FieldError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<Field, FieldError>,
    /// The accepted birth date; `Some` exactly when `is_valid` is true.
    #[serde(skip)]
    pub birth_date: Option<NaiveDate>,
}

impl ValidationResult {
    fn rejected(errors: BTreeMap<Field, FieldError>) -> Self {
        Self {
            is_valid: false,
            errors,
            birth_date: None,
        }
    }

    fn accepted(birth_date: NaiveDate) -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
            birth_date: Some(birth_date),
        }
    }

    pub fn error(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }
}

/// Validates a user-entered birth date against `today`.
pub fn validate(input: &DateInput, today: NaiveDate) -> ValidationResult {
    let mut errors = BTreeMap::new();

    let day = present(input.day);
    let month = present(input.month);
    let year = present(input.year);

    for (field, value) in Field::ALL.into_iter().zip([day, month, year]) {
        if value.is_none() {
            errors.insert(field, FieldError::MissingField);
        }
    }

    let (Some(day), Some(month), Some(year)) = (day, month, year) else {
        return ValidationResult::rejected(errors);
    };

    if !(1..=31).contains(&day) {
        errors.insert(Field::Day, FieldError::OutOfRange(Field::Day));
    }
    if !(1..=12).contains(&month) {
        errors.insert(Field::Month, FieldError::OutOfRange(Field::Month));
    }
    if year > today.year() {
        errors.insert(Field::Year, FieldError::OutOfRange(Field::Year));
    }
    if !errors.is_empty() {
        return ValidationResult::rejected(errors);
    }

    // Years chrono cannot represent have no date to compare with today.
    let Some(date) = rolled_date(day, month, year) else {
        errors.insert(Field::Day, FieldError::InvalidCalendarDate);
        return ValidationResult::rejected(errors);
    };

    if !round_trips(date, day, month, year) {
        errors.insert(Field::Day, FieldError::InvalidCalendarDate);
    }

    // Same year but a later month or day. An impossible day is checked after
    // rolling over, so June 31 is compared as July 1.
    if date > today {
        errors.insert(Field::Year, FieldError::FutureDate);
    }

    if errors.is_empty() {
        ValidationResult::accepted(date)
    } else {
        ValidationResult::rejected(errors)
    }
}

fn present(value: Option<i32>) -> Option<i32> {
    value.filter(|&v| v != 0)
}

/// The calendar day `day - 1` days after the first of `month`, so an
/// out-of-month day rolls into the next month (April 31 becomes May 1).
///
/// Years are taken literally. Unlike browser `Date`, years 1-99 are not
/// shifted into the 1900s.
fn rolled_date(day: i32, month: i32, year: i32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, 1)?;
    first.checked_add_days(Days::new(u64::try_from(day - 1).ok()?))
}

/// Whether reading `date` back yields the entered day, month and year.
fn round_trips(date: NaiveDate, day: i32, month: i32, year: i32) -> bool {
    date.day() as i32 == day && date.month() as i32 == month && date.year() == year
}
