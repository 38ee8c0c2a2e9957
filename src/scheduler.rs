//! Time gate around the expensive classifier call.

use crate::{constants::DETECTION_INTERVAL_SECS, Error, Result};
use std::time::{Duration, Instant};

/// Decides when the next classification may run.
///
/// The schedule is strictly periodic: callers mark a fire whether or not the
/// classification succeeded, so a failing classifier is retried only on the
/// next interval.
#[derive(Debug, Clone)]
pub struct DetectionScheduler {
    interval: Duration,
    last_fire: Instant,
}

impl DetectionScheduler {
    /// Scheduler with the default interval, counting from `start`
    #[must_use]
    pub fn new(start: Instant) -> Self {
        Self {
            interval: Duration::from_secs_f64(DETECTION_INTERVAL_SECS),
            last_fire: start,
        }
    }

    /// Scheduler with a custom interval in seconds
    ///
    /// # Errors
    ///
    /// Returns an error if `interval_secs` is not a positive finite number
    pub fn with_interval(start: Instant, interval_secs: f64) -> Result<Self> {
        if !interval_secs.is_finite() || interval_secs <= 0.0 {
            return Err(Error::Config(format!(
                "Detection interval must be positive, got {interval_secs}"
            )));
        }
        Ok(Self {
            interval: Duration::from_secs_f64(interval_secs),
            last_fire: start,
        })
    }

    /// True once at least one interval has elapsed since the last fire
    #[must_use]
    pub fn should_fire(&self, now: Instant) -> bool {
        now.checked_duration_since(self.last_fire)
            .is_some_and(|elapsed| elapsed >= self.interval)
    }

    /// Record that a classification was attempted at `now`
    pub fn mark_fired(&mut self, now: Instant) {
        self.last_fire = now;
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn last_fire(&self) -> Instant {
        self.last_fire
    }

    /// Remaining wait before the scheduler fires again
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Duration {
        (self.last_fire + self.interval).saturating_duration_since(now)
    }
}
