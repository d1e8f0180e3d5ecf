//! A single participant and the lock-free lane snapshot it publishes.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::constants::COMPLETION_TOLERANCE;
use crate::coordinator::RaceCoordinator;
use crate::motion::MotionProfile;

/// Identifier of a participant, unique within one race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Point-in-time copy of a lane, as seen by a reader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneSnapshot {
    pub progress: f64,
    pub position: f64,
    pub ticks: u64,
}

impl LaneSnapshot {
    /// Whether the participant had reached the line when the snapshot was taken.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Lock-free publication slot for one participant.
///
/// Written only by the owning participant; read by any number of threads.
/// Each field is individually atomic, so a reader may see a progress value
/// one tick newer than the position next to it.
#[derive(Debug, Default)]
pub struct LaneState {
    progress: AtomicU64,
    position: AtomicU64,
    ticks: AtomicU64,
}

impl LaneState {
    /// Create an empty lane at the start line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn publish(&self, progress: f64, position: f64, ticks: u64) {
        self.position.store(position.to_bits(), Ordering::Relaxed);
        self.ticks.store(ticks, Ordering::Relaxed);
        self.progress.store(progress.to_bits(), Ordering::Release);
    }

    /// Read the latest published values.
    #[must_use]
    pub fn snapshot(&self) -> LaneSnapshot {
        let progress = f64::from_bits(self.progress.load(Ordering::Acquire));
        LaneSnapshot {
            progress,
            position: f64::from_bits(self.position.load(Ordering::Relaxed)),
            ticks: self.ticks.load(Ordering::Relaxed),
        }
    }
}

/// One racer: raw progress plus the curve that shapes its display position.
///
/// Not thread-safe; a participant is owned by exactly one worker. Readers go
/// through [`Participant::lane`].
#[derive(Debug)]
pub struct Participant {
    id: ParticipantId,
    profile: MotionProfile,
    progress: f64,
    position: f64,
    ticks: u64,
    snap_on_saturation: bool,
    lane: Arc<LaneState>,
}

impl Participant {
    /// Create a participant at the start line.
    #[must_use]
    pub fn new(id: ParticipantId, profile: MotionProfile) -> Self {
        Self {
            id,
            profile,
            progress: 0.0,
            position: 0.0,
            ticks: 0,
            snap_on_saturation: false,
            lane: Arc::new(LaneState::new()),
        }
    }

    /// Treat a saturated eased position as reaching the line.
    ///
    /// With this set, a participant whose curve reaches 1.0 early (the
    /// overshoot curve does from about 64% progress) completes at that tick.
    #[must_use]
    pub fn with_snap_on_saturation(mut self, snap: bool) -> Self {
        self.snap_on_saturation = snap;
        self
    }

    /// Advance by `delta` unless the race is over or this participant is done.
    ///
    /// Returns whether the participant moved.
    pub fn update(&mut self, race: &RaceCoordinator, delta: f64) -> bool {
        if race.is_finished() || self.is_complete() {
            return false;
        }

        let mut progress = (self.progress + delta.max(0.0)).min(1.0);
        if 1.0 - progress <= COMPLETION_TOLERANCE {
            progress = 1.0;
        }

        let eased = self.profile.apply(progress);
        if self.snap_on_saturation && eased >= 1.0 {
            progress = 1.0;
        }

        self.progress = progress;
        self.position = if progress >= 1.0 { 1.0 } else { eased };
        self.ticks += 1;
        self.lane.publish(self.progress, self.position, self.ticks);
        true
    }

    /// Whether the participant has reached the line.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    #[must_use]
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    #[must_use]
    pub fn profile(&self) -> MotionProfile {
        self.profile
    }

    /// Raw progress in [0, 1].
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Eased display position. May be slightly negative for the overshoot curve.
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Shared handle on this participant's published snapshot.
    #[must_use]
    pub fn lane(&self) -> Arc<LaneState> {
        Arc::clone(&self.lane)
    }
}
