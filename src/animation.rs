//! Count-up effect for the result counters.
//!
//! Purely cosmetic: every counter finishes on the exact computed value, and
//! nothing here feeds back into the age calculation.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval, sleep};

use crate::age::Age;

/// Easing curve that starts fast and settles slowly: `1 - (1 - p)^4`.
/// `progress` is clamped to `[0, 1]`.
pub fn ease_out_quart(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(4)
}

/// Counter value `elapsed` into a count from `start` to `end` lasting
/// `duration`.
pub fn counter_value(start: i32, end: i32, elapsed: Duration, duration: Duration) -> i32 {
    let progress = if duration.is_zero() {
        1.0
    } else {
        elapsed.as_secs_f64() / duration.as_secs_f64()
    };
    let range = f64::from(end) - f64::from(start);
    (f64::from(start) + range * ease_out_quart(progress)).round() as i32
}

/// Frame-by-frame values of one counter, sampled every `frame`.
///
/// The last item is always `end`.
#[derive(Debug, Clone)]
pub struct CountUp {
    start: i32,
    end: i32,
    duration: Duration,
    frame: Duration,
    elapsed: Duration,
    done: bool,
}

impl CountUp {
    pub fn new(start: i32, end: i32, duration: Duration, frame: Duration) -> Self {
        // A zero frame would never advance; jump straight to the end instead.
        let frame = if frame.is_zero() { duration } else { frame };
        Self {
            start,
            end,
            duration,
            frame,
            elapsed: Duration::ZERO,
            done: false,
        }
    }
}

impl Iterator for CountUp {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if self.done {
            return None;
        }
        if self.elapsed >= self.duration || self.frame.is_zero() {
            self.done = true;
            return Some(self.end);
        }
        let value = counter_value(self.start, self.end, self.elapsed, self.duration);
        self.elapsed += self.frame;
        Some(value)
    }
}

/// Timing of the three result counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Pause before the counters start moving.
    pub delay: Duration,
    pub frame: Duration,
    pub years: Duration,
    pub months: Duration,
    pub days: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(200),
            frame: Duration::from_millis(16),
            years: Duration::from_millis(1000),
            months: Duration::from_millis(1200),
            days: Duration::from_millis(1400),
        }
    }
}

impl Timing {
    pub fn with_frame(mut self, frame: Duration) -> Self {
        self.frame = frame;
        self
    }

    fn longest(&self) -> Duration {
        self.years.max(self.months).max(self.days)
    }

    /// Counter values `elapsed` after the counters started.
    pub fn frame_at(&self, age: Age, elapsed: Duration) -> Age {
        Age {
            years: counter_value(0, age.years, elapsed, self.years),
            months: counter_value(0, age.months, elapsed, self.months),
            days: counter_value(0, age.days, elapsed, self.days),
        }
    }
}

/// Counts all three counters up from zero to `age`, handing each frame to
/// `draw`. The final call always receives `age` itself.
pub async fn animate<F>(age: Age, timing: Timing, mut draw: F)
where
    F: FnMut(Age),
{
    draw(Age {
        years: 0,
        months: 0,
        days: 0,
    });
    sleep(timing.delay).await;

    if timing.frame.is_zero() {
        draw(age);
        return;
    }

    let started = Instant::now();
    let mut ticker = interval(timing.frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let elapsed = started.elapsed();
        if elapsed >= timing.longest() {
            draw(age);
            return;
        }
        draw(timing.frame_at(age, elapsed));
    }
}
