//! Race options and configuration.

use std::time::Duration;

use crate::constants::{DEFAULT_TICK_DELTA, DEFAULT_TICK_INTERVAL, MAX_TICK_INTERVAL};
use crate::error::RaceError;

/// Simulation knobs for one race.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceOptions {
    /// Raw progress added per tick, in (0, 1].
    pub delta: f64,
    /// Pause between two ticks of a worker.
    pub tick_interval: Duration,
    /// Seed for the profile assignment (`None` = entropy).
    pub seed: Option<u64>,
    /// Complete a participant as soon as its eased position saturates.
    pub snap_on_saturation: bool,
}

impl Default for RaceOptions {
    fn default() -> Self {
        Self {
            delta: DEFAULT_TICK_DELTA,
            tick_interval: DEFAULT_TICK_INTERVAL,
            seed: None,
            snap_on_saturation: false,
        }
    }
}

impl RaceOptions {
    /// Normalize options, applying defaults where values are zero.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.delta == 0.0 {
            self.delta = DEFAULT_TICK_DELTA;
        }
        if self.tick_interval.is_zero() {
            self.tick_interval = DEFAULT_TICK_INTERVAL;
        }
        self
    }

    /// Reject values the workers cannot run with.
    pub fn validate(&self) -> Result<(), RaceError> {
        if !(self.delta > 0.0 && self.delta <= 1.0) {
            return Err(RaceError::Config(format!(
                "tick delta must be in (0, 1], got {}",
                self.delta
            )));
        }
        if self.tick_interval > MAX_TICK_INTERVAL {
            return Err(RaceError::Config(format!(
                "tick interval must be at most {MAX_TICK_INTERVAL:?}, got {:?}",
                self.tick_interval
            )));
        }
        Ok(())
    }
}
