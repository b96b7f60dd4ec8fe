//! Years, months and days between a birth date and "today".
//!
//! Fields are subtracted one by one and negatives are carried: a negative day
//! count borrows the length of the month before `today`, a negative month
//! count borrows twelve months from the years. Month lengths come from chrono,
//! so leap years need no special casing.
//!
//! [`compute_age`] refuses a birth date after `today`.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;

/// Years, months and days elapsed since a birth date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Age {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AgeError {
    #[error("Birth date cannot be in the future")]
    FutureBirthDate,
}

impl Serialize for AgeError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Computes the age of someone born on `birthdate` as of `today`.
///
/// Fails only when `birthdate` lies after `today`. Validation normally rules
/// that out before we get here, but the guard stays so a caller that skips
/// validation still cannot get a negative age.
pub fn compute_age(birthdate: NaiveDate, today: NaiveDate) -> Result<Age, AgeError> {
    if birthdate > today {
        return Err(AgeError::FutureBirthDate);
    }

    let mut years = today.year() - birthdate.year();
    let mut months = today.month() as i32 - birthdate.month() as i32;
    let mut days = today.day() as i32 - birthdate.day() as i32;

    // Fix day underflow
    if days < 0 {
        months -= 1;

        let prev_len = days_in_previous_month(today) as i32;
        days += prev_len;

        // Still negative when the birth day lies past the end of that month
        // (Jan 30 seen from March 1); count from the month's last day instead.
        if days < 0 {
            days = today.day() as i32 + prev_len - (birthdate.day() as i32).min(prev_len);
        }
    }

    // Fix month underflow
    if months < 0 {
        years -= 1;
        months += 12;
    }

    Ok(Age {
        years,
        months,
        days,
    })
}

/// Length of the month immediately before `today`'s month (28–31 depending on
/// month & leap year), taken from the calendar as "day 0" of today's month.
pub fn days_in_previous_month(today: NaiveDate) -> u32 {
    today
        .with_day(1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        // Only NaiveDate::MIN has no predecessor; a borrow can never happen there.
        .unwrap_or(31)
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

fn plural(n: i32) -> &'static str {
    if n == 1 { "" } else { "s" }
}
