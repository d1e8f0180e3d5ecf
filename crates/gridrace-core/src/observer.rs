//! Observer pattern for race events.
//!
//! Workers call observers from their own threads, so observers must be
//! `Send + Sync`. High-frequency progress is filtered per worker by a
//! [`ReportThrottle`] before it reaches any observer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::participant::ParticipantId;
use crate::progress::ProgressUpdate;

/// Receiver of race events.
pub trait RaceObserver: Send + Sync {
    /// A participant moved far enough to be worth reporting.
    fn on_progress(&self, update: &ProgressUpdate);

    /// The race was won. Called exactly once per race, by the winning worker.
    fn on_finish(&self, winner: ParticipantId);
}

/// Per-worker progress filter, lock-free so it can sit in the tick loop.
///
/// Stores the last reported progress as `f64` bits.
#[derive(Debug)]
pub struct ReportThrottle {
    last: AtomicU64,
    threshold: f64,
}

impl ReportThrottle {
    /// Create a throttle with the given reporting threshold.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            last: AtomicU64::new(0),
            threshold,
        }
    }

    /// Check if progress has changed enough to warrant reporting.
    ///
    /// Reaching the line always reports.
    #[inline]
    #[must_use]
    pub fn should_report(&self, progress: f64) -> bool {
        let current = f64::from_bits(self.last.load(Ordering::Relaxed));
        progress >= 1.0 || (progress - current) >= self.threshold
    }

    /// Record `progress` as reported.
    pub fn mark(&self, progress: f64) {
        self.last.store(progress.to_bits(), Ordering::Relaxed);
    }
}

/// Fan-out observer forwarding every event to all registered observers.
pub struct ObserverSet {
    observers: RwLock<Vec<Arc<dyn RaceObserver>>>,
}

impl ObserverSet {
    /// Create a new set with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Register an observer.
    pub fn register(&self, observer: Arc<dyn RaceObserver>) {
        self.observers.write().push(observer);
    }
}

impl Default for ObserverSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RaceObserver for ObserverSet {
    fn on_progress(&self, update: &ProgressUpdate) {
        for observer in self.observers.read().iter() {
            observer.on_progress(update);
        }
    }

    fn on_finish(&self, winner: ParticipantId) {
        for observer in self.observers.read().iter() {
            observer.on_finish(winner);
        }
    }
}
