//! Shared race state: the one-shot start and the at-most-once finish.
//!
//! The finished flag and the winner live in one atomic word, so no reader can
//! ever observe "finished" without a winner or a winner without "finished".

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use serde::Serialize;
use tracing::{debug, info};

use crate::participant::ParticipantId;

/// Value of the finish word while nobody has won.
const NO_WINNER: u64 = u64::MAX;

/// Coarse race phase, derived from the coordinator flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RacePhase {
    NotStarted,
    Running,
    Finished,
}

/// Race state shared between the workers and the presentation loop.
///
/// `NotStarted --try_start--> Running --try_finish--> Finished`. Neither
/// transition can be undone.
#[derive(Debug)]
pub struct RaceCoordinator {
    started: AtomicBool,
    finish: AtomicU64,
    gate: Mutex<bool>,
    gate_cv: Condvar,
}

impl RaceCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: AtomicBool::new(false),
            finish: AtomicU64::new(NO_WINNER),
            gate: Mutex::new(false),
            gate_cv: Condvar::new(),
        }
    }

    /// Flip the race to running.
    ///
    /// Returns `true` only for the call that performed the transition. Wakes
    /// every worker parked on the start gate.
    pub fn try_start(&self) -> bool {
        let won = self
            .started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if won {
            let mut open = self.gate.lock();
            *open = true;
            drop(open);
            self.gate_cv.notify_all();
            info!("race started");
        }
        won
    }

    /// Declare `id` the winner if nobody has been declared yet.
    ///
    /// Exactly one call over the coordinator's lifetime returns `true`.
    pub fn try_finish(&self, id: ParticipantId) -> bool {
        match self.finish.compare_exchange(
            NO_WINNER,
            u64::from(id.0),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                info!(winner = %id, "race finished");
                true
            }
            Err(current) => {
                debug!(participant = %id, winner = current, "finish already claimed");
                false
            }
        }
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finish.load(Ordering::Acquire) != NO_WINNER
    }

    /// The declared winner; `Some` exactly when the race is finished.
    #[must_use]
    pub fn winner(&self) -> Option<ParticipantId> {
        match self.finish.load(Ordering::Acquire) {
            NO_WINNER => None,
            raw => u32::try_from(raw).ok().map(ParticipantId),
        }
    }

    #[must_use]
    pub fn phase(&self) -> RacePhase {
        if self.is_finished() {
            RacePhase::Finished
        } else if self.is_started() {
            RacePhase::Running
        } else {
            RacePhase::NotStarted
        }
    }

    /// Block until the race starts or `timeout` elapses.
    ///
    /// Returns whether the race has started. The gate lock is released while
    /// waiting.
    pub fn wait_for_start(&self, timeout: Duration) -> bool {
        if self.is_started() {
            return true;
        }
        let mut open = self.gate.lock();
        if !*open {
            let _ = self.gate_cv.wait_for(&mut open, timeout);
        }
        *open
    }
}

impl Default for RaceCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
