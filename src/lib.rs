//! Age in years, months and days from a day/month/year birth date.
//!
//! [`validate::validate`] checks the raw triple against the calendar and
//! "today", [`age::compute_age`] does the borrow arithmetic, and
//! [`engine::AgeEngine`] ties both to a single reading of a [`clock::Clock`].
//! The remaining modules belong to the terminal front end.

pub mod age;
pub mod animation;
pub mod clock;
pub mod config;
pub mod engine;
pub mod input;
pub mod report;
pub mod validate;

pub use age::{Age, AgeError, compute_age};
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{AgeEngine, Submission};
pub use input::DateInput;
pub use validate::{Field, FieldError, ValidationResult, validate};
