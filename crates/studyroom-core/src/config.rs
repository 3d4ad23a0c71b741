//! Session configuration.
//!
//! Interval lengths are fixed for this version:
//! - study: 25 minutes
//! - break: 5 minutes
//! - big break: 15 minutes
//! - tick period: 1 second
//!
//! Only the total study budget comes from the user, as whole minutes.

use serde::Serialize;
use std::time::Duration;

use crate::error::ConfigError;

/// Every `BIG_BREAK_EVERY`-th completed study interval earns a big break.
pub const BIG_BREAK_EVERY: u32 = 4;

const DEFAULT_STUDY_MIN: u64 = 25;
const DEFAULT_BREAK_MIN: u64 = 5;
const DEFAULT_BIG_BREAK_MIN: u64 = 15;
const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Fixed durations for one session.
///
/// Validated at construction; a `SessionConfig` never holds a zero duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionConfig {
    study: Duration,
    short_break: Duration,
    big_break: Duration,
    total_budget: Duration,
    tick_period: Duration,
}

impl SessionConfig {
    /// Build a configuration from explicit durations.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if any duration is zero.
    pub fn new(
        study: Duration,
        short_break: Duration,
        big_break: Duration,
        total_budget: Duration,
        tick_period: Duration,
    ) -> Result<Self, ConfigError> {
        let fields = [
            ("study", study),
            ("short_break", short_break),
            ("big_break", big_break),
            ("total_budget", total_budget),
            ("tick_period", tick_period),
        ];
        for (key, value) in fields {
            if value.is_zero() {
                return Err(ConfigError::invalid(key, "duration must be positive"));
            }
        }
        Ok(Self {
            study,
            short_break,
            big_break,
            total_budget,
            tick_period,
        })
    }

    /// The fixed 25/5/15 schedule with a budget of `minutes`.
    pub fn with_total_minutes(minutes: u64) -> Result<Self, ConfigError> {
        let secs = minutes
            .checked_mul(60)
            .ok_or_else(|| ConfigError::invalid("total_budget", "too many minutes"))?;
        Self::new(
            Duration::from_secs(DEFAULT_STUDY_MIN * 60),
            Duration::from_secs(DEFAULT_BREAK_MIN * 60),
            Duration::from_secs(DEFAULT_BIG_BREAK_MIN * 60),
            Duration::from_secs(secs),
            DEFAULT_TICK,
        )
    }

    pub fn study(&self) -> Duration {
        self.study
    }

    pub fn short_break(&self) -> Duration {
        self.short_break
    }

    pub fn big_break(&self) -> Duration {
        self.big_break
    }

    pub fn total_budget(&self) -> Duration {
        self.total_budget
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }
}

/// Parse the answer to the "total study time" prompt.
///
/// # Errors
/// `ParseFailed` for anything that is not an integer, `InvalidValue` for
/// zero or negative minutes.
pub fn parse_total_minutes(input: &str) -> Result<u64, ConfigError> {
    let trimmed = input.trim();
    let minutes: i64 = trimmed.parse().map_err(|_| {
        ConfigError::ParseFailed(format!("'{trimmed}' is not a whole number of minutes"))
    })?;
    if minutes <= 0 {
        return Err(ConfigError::invalid(
            "total_budget",
            format!("{minutes} minutes is not a positive study time"),
        ));
    }
    Ok(minutes as u64)
}
