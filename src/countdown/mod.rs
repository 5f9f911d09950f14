//! Countdown Engine
//!
//! Time remaining until the ceremony, decomposed into days, hours, minutes
//! and seconds. The state is always derived from two instants and never
//! stored; [`CountdownTicker`] recomputes it on a fixed cadence for a view.

pub mod ticker;

pub use ticker::CountdownTicker;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time remaining until the target instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CountdownState {
    pub days: i64,
    /// 0-23
    pub hours: u32,
    /// 0-59
    pub minutes: u32,
    /// 0-59
    pub seconds: u32,
    /// Set once the target instant has been reached; all fields are then zero
    #[serde(default)]
    pub has_passed: bool,
}

impl CountdownState {
    /// Decompose a remaining duration given in milliseconds.
    ///
    /// Non-positive durations clamp to zero with `has_passed` set.
    pub fn from_millis(diff: i64) -> Self {
        if diff <= 0 {
            return Self::passed();
        }

        Self {
            days: diff / MS_PER_DAY,
            hours: ((diff / MS_PER_HOUR) % 24) as u32,
            minutes: ((diff / MS_PER_MINUTE) % 60) as u32,
            seconds: ((diff / MS_PER_SECOND) % 60) as u32,
            has_passed: false,
        }
    }

    /// State shown after the event has started
    pub fn passed() -> Self {
        Self {
            has_passed: true,
            ..Default::default()
        }
    }

    /// Whole seconds represented by the four fields
    pub fn total_seconds(&self) -> i64 {
        self.days * 86_400
            + i64::from(self.hours) * 3_600
            + i64::from(self.minutes) * 60
            + i64::from(self.seconds)
    }
}

impl fmt::Display for CountdownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_passed {
            return write!(f, "The big day is here");
        }
        write!(
            f,
            "{} days, {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Countdown to a fixed target instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    target: DateTime<Utc>,
}

impl Countdown {
    pub fn new(target: DateTime<Utc>) -> Self {
        Self { target }
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Compute the remaining time as seen at `now`
    pub fn tick(&self, now: DateTime<Utc>) -> CountdownState {
        CountdownState::from_millis((self.target - now).num_milliseconds())
    }

    /// Compute the remaining time as of the current wall clock
    pub fn now(&self) -> CountdownState {
        self.tick(Utc::now())
    }
}
