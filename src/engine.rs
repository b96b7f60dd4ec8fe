use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::age::{Age, AgeError, compute_age};
use crate::clock::Clock;
use crate::input::DateInput;
use crate::validate::{Field, FieldError, validate};

/// Outcome of one form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Submission {
    /// One or more fields need correcting.
    Invalid { errors: BTreeMap<Field, FieldError> },
    /// Input passed validation but the age could not be computed.
    Rejected { error: AgeError },
    Computed { age: Age },
}

impl Submission {
    pub fn age(&self) -> Option<Age> {
        match self {
            Submission::Computed { age } => Some(*age),
            _ => None,
        }
    }
}

pub struct AgeEngine<C> {
    clock: C,
}

impl<C: Clock> AgeEngine<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Validates `input` and computes the age against a single reading of
    /// the clock.
    pub fn submit(&self, input: &DateInput) -> Submission {
        let today = self.clock.today();
        submit_at(input, today)
    }
}

/// [`AgeEngine::submit`] with an explicit "today".
pub fn submit_at(input: &DateInput, today: NaiveDate) -> Submission {
    let validation = validate(input, today);
    let Some(birth_date) = validation.birth_date else {
        debug!(?input, %today, errors = validation.errors.len(), "birth date rejected");
        return Submission::Invalid {
            errors: validation.errors,
        };
    };

    match compute_age(birth_date, today) {
        Ok(age) => {
            debug!(%birth_date, %today, %age, "age computed");
            Submission::Computed { age }
        }
        Err(error) => {
            warn!(%birth_date, %today, "validated birth date is after today");
            Submission::Rejected { error }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::clock::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct CountingClock {
        date: NaiveDate,
        reads: Cell<u32>,
    }

    impl Clock for CountingClock {
        fn today(&self) -> NaiveDate {
            self.reads.set(self.reads.get() + 1);
            self.date
        }
    }

    #[test]
    fn reads_clock_once_per_submission() {
        let clock = CountingClock {
            date: date(2024, 6, 15),
            reads: Cell::new(0),
        };
        let engine = AgeEngine::new(&clock);
        engine.submit(&DateInput::new(29, 2, 2000));
        assert_eq!(clock.reads.get(), 1);
        engine.submit(&DateInput::new(31, 2, 2000));
        assert_eq!(clock.reads.get(), 2);
    }

    #[test]
    fn computes_age_for_valid_input() {
        let engine = AgeEngine::new(FixedClock(date(2024, 6, 15)));
        let submission = engine.submit(&DateInput::new(29, 2, 2000));
        assert_eq!(
            submission.age(),
            Some(Age {
                years: 24,
                months: 3,
                days: 17
            })
        );
    }

    #[test]
    fn invalid_input_carries_field_errors() {
        let engine = AgeEngine::new(FixedClock(date(2024, 6, 15)));
        let submission = engine.submit(&DateInput::from_fields("", "5", "2000"));
        let Submission::Invalid { errors } = submission else {
            panic!("expected invalid submission, got {submission:?}");
        };
        assert_eq!(errors.get(&Field::Day), Some(&FieldError::MissingField));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn serializes_with_status_tag() {
        let submission = submit_at(&DateInput::new(29, 2, 2000), date(2024, 6, 15));
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "computed",
                "age": { "years": 24, "months": 3, "days": 17 }
            })
        );

        let rejected = Submission::Rejected {
            error: AgeError::FutureBirthDate,
        };
        assert_eq!(
            serde_json::to_value(&rejected).unwrap(),
            serde_json::json!({
                "status": "rejected",
                "error": "Birth date cannot be in the future"
            })
        );
    }
}
