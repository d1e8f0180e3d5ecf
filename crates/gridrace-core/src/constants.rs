//! Constants for race pacing and configuration.

use std::time::Duration;

/// Number of participants in a race.
pub const PARTICIPANT_COUNT: usize = 4;

/// Raw progress added to a participant on every tick.
pub const DEFAULT_TICK_DELTA: f64 = 0.001;

/// Pause between two ticks of a worker.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(5);

/// Longest a worker blocks on the start gate before re-checking its stop token.
pub const START_WAIT_INTERVAL: Duration = Duration::from_millis(5);

/// Upper bound accepted for the tick interval.
pub const MAX_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Distance from the finish line below which progress is snapped to exactly 1.0.
///
/// Repeated addition of a delta such as 0.001 drifts by a few ULPs; the snap
/// makes 1000 ticks of 0.001 land on the line.
pub const COMPLETION_TOLERANCE: f64 = 1e-9;

/// Minimum progress change (1%) before a worker reports an update.
pub const PROGRESS_REPORT_THRESHOLD: f64 = 0.01;

/// Number of confetti particles spawned when the race ends.
pub const CONFETTI_COUNT: usize = 100;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// The race did not finish before its deadline.
    pub const ERROR_TIMEOUT: i32 = 2;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Race cancelled by user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}
