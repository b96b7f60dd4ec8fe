//! Terminal rendering of results and field errors.
//!
//! Rows are dot-aligned to a fixed width so redrawn counters keep their shape:
//!
//! ```text
//! age -----------------------
//! years: ................. 24
//! months: ................. 3
//! days: .................. 17
//! ```

use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::age::{Age, AgeError};
use crate::engine::Submission;
use crate::validate::{Field, FieldError};

pub const ALIGN_WIDTH: usize = 26;

pub fn build_row(key: &str, value: &str, align_width: usize) -> String {
    let key_part = format!("{key}: ");
    let base_len = key_part.len() + value.len();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => format!("{} ", ".".repeat(n - 1)),
    };

    format!("{key_part}{dots}{value}")
}

pub fn build_header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(base.len());
    format!("{base}{}", "-".repeat(dash_count))
}

/// Header plus one row per counter, newline terminated.
pub fn render_counters(age: &Age) -> String {
    let mut out = build_header_line("age", ALIGN_WIDTH);
    out.push('\n');
    for (key, value) in [("years", age.years), ("months", age.months), ("days", age.days)] {
        out.push_str(&build_row(key, &value.to_string(), ALIGN_WIDTH));
        out.push('\n');
    }
    out
}

pub fn render_errors(errors: &BTreeMap<Field, FieldError>) -> String {
    let mut out = build_header_line("invalid date", ALIGN_WIDTH);
    out.push('\n');
    for (field, error) in errors {
        out.push_str(&format!("{}: {error}\n", field.name()));
    }
    out
}

pub fn render_rejection(error: &AgeError) -> String {
    format!("error: {error}\n")
}

/// Final, non-animated report for a submission.
pub fn render_submission(submission: &Submission) -> String {
    match submission {
        Submission::Invalid { errors } => render_errors(errors),
        Submission::Rejected { error } => render_rejection(error),
        Submission::Computed { age } => format!("{}{age}\n", render_counters(age)),
    }
}

/// Draws the counters in place, moving the cursor back over the previous
/// frame before each redraw.
pub struct CounterDisplay<W: Write> {
    out: W,
    drawn_lines: usize,
}

impl<W: Write> CounterDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            drawn_lines: 0,
        }
    }

    pub fn draw(&mut self, age: &Age) -> io::Result<()> {
        if self.drawn_lines > 0 {
            write!(self.out, "\x1b[{}A", self.drawn_lines)?;
        }
        let frame = render_counters(age);
        for line in frame.lines() {
            // Clear leftovers from a wider previous frame.
            writeln!(self.out, "\x1b[2K{line}")?;
        }
        self.drawn_lines = frame.lines().count();
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
