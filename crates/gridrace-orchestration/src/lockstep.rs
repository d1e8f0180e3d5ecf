//! Deterministic race driver: every participant ticks once per round.
//!
//! No threads and no sleeps. A round first moves every participant in the
//! given order, then lets the ones on the line claim the finish in that same
//! order, so ties resolve to whichever participant comes first in the round.

use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use gridrace_core::constants::PROGRESS_REPORT_THRESHOLD;
use gridrace_core::coordinator::RaceCoordinator;
use gridrace_core::error::RaceError;
use gridrace_core::lineup::Lineup;
use gridrace_core::observer::{RaceObserver, ReportThrottle};
use gridrace_core::observers::NoOpObserver;
use gridrace_core::options::RaceOptions;
use gridrace_core::participant::{Participant, ParticipantId};

use crate::interfaces::{EntrantResult, RaceSummary};
use crate::worker::{advance, attempt_finish, WorkerExit, WorkerReport};

/// Upper bound on rounds, far beyond what any valid delta needs.
const MAX_ROUNDS: u64 = 10_000_000;

struct Slot {
    participant: Participant,
    throttle: ReportThrottle,
    exit: Option<WorkerExit>,
}

/// Single-threaded race that advances participants in lockstep.
pub struct LockstepRace {
    lineup: Lineup,
    race: RaceCoordinator,
    slots: Vec<Slot>,
    delta: f64,
    observer: Arc<dyn RaceObserver>,
    rounds: u64,
}

impl LockstepRace {
    /// Build a race at the start line. The race is not started yet.
    pub fn new(lineup: &Lineup, opts: &RaceOptions) -> Result<Self, RaceError> {
        Self::with_observer(lineup, opts, Arc::new(NoOpObserver::new()))
    }

    pub fn with_observer(
        lineup: &Lineup,
        opts: &RaceOptions,
        observer: Arc<dyn RaceObserver>,
    ) -> Result<Self, RaceError> {
        let opts = opts.clone().normalize();
        opts.validate()?;
        let slots = lineup
            .participants(opts.snap_on_saturation)
            .into_iter()
            .map(|participant| Slot {
                participant,
                throttle: ReportThrottle::new(PROGRESS_REPORT_THRESHOLD),
                exit: None,
            })
            .collect();
        Ok(Self {
            lineup: lineup.clone(),
            race: RaceCoordinator::new(),
            slots,
            delta: opts.delta,
            observer,
            rounds: 0,
        })
    }

    /// Open the start gate. Returns whether this call started the race.
    pub fn start(&self) -> bool {
        self.race.try_start()
    }

    #[must_use]
    pub fn coordinator(&self) -> &RaceCoordinator {
        &self.race
    }

    /// Rounds played so far.
    #[must_use]
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    #[must_use]
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.slots
            .iter()
            .map(|s| &s.participant)
            .find(|p| p.id() == id)
    }

    /// Play one round in `order`. Ids not in the race are ignored.
    ///
    /// Returns the winner if the finish was claimed during this round. Does
    /// nothing before the start or after the finish.
    pub fn step(&mut self, order: &[ParticipantId]) -> Option<ParticipantId> {
        if !self.race.is_started() || self.race.is_finished() {
            return None;
        }
        self.rounds += 1;

        let indices: Vec<usize> = order
            .iter()
            .filter_map(|id| self.slots.iter().position(|s| s.participant.id() == *id))
            .collect();

        for &i in &indices {
            let slot = &mut self.slots[i];
            advance(
                &mut slot.participant,
                &self.race,
                self.delta,
                self.observer.as_ref(),
                &slot.throttle,
            );
        }

        let mut winner = None;
        for &i in &indices {
            let slot = &mut self.slots[i];
            if slot.exit.is_some() {
                continue;
            }
            slot.exit = attempt_finish(&slot.participant, &self.race, self.observer.as_ref());
            if slot.exit == Some(WorkerExit::Won) {
                winner = Some(slot.participant.id());
            }
        }
        winner
    }

    /// Play one round in a random order drawn from `rng`.
    pub fn step_shuffled(&mut self, rng: &mut StdRng) -> Option<ParticipantId> {
        let mut order = self.ids();
        order.shuffle(rng);
        self.step(&order)
    }

    /// Start if needed and play rounds in a fixed order until someone wins.
    pub fn run_to_finish(&mut self, order: &[ParticipantId]) -> Result<RaceSummary, RaceError> {
        self.run_with(|race| race.step(order))
    }

    /// Start if needed and play shuffled rounds until someone wins.
    ///
    /// The same seed always picks the same winner.
    pub fn run_seeded(&mut self, seed: u64) -> Result<RaceSummary, RaceError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.run_with(|race| race.step_shuffled(&mut rng))
    }

    fn run_with<F>(&mut self, mut round: F) -> Result<RaceSummary, RaceError>
    where
        F: FnMut(&mut Self) -> Option<ParticipantId>,
    {
        let begin = Instant::now();
        self.start();
        while !self.race.is_finished() {
            if self.rounds >= MAX_ROUNDS || self.slots.is_empty() {
                return Err(RaceError::Config(format!(
                    "no winner after {} rounds",
                    self.rounds
                )));
            }
            round(self);
        }
        debug!(rounds = self.rounds, winner = ?self.race.winner(), "lockstep race done");
        self.summary(begin.elapsed())
    }

    fn ids(&self) -> Vec<ParticipantId> {
        self.slots.iter().map(|s| s.participant.id()).collect()
    }

    fn summary(&self, elapsed: std::time::Duration) -> Result<RaceSummary, RaceError> {
        let winner = self.race.winner().ok_or(RaceError::Cancelled)?;
        let entrants = self
            .lineup
            .entrants()
            .iter()
            .zip(&self.slots)
            .map(|(entrant, slot)| {
                let report = WorkerReport {
                    id: slot.participant.id(),
                    exit: slot.exit.unwrap_or(WorkerExit::Halted),
                    progress: slot.participant.progress(),
                    position: slot.participant.position(),
                    ticks: slot.participant.ticks(),
                };
                EntrantResult::new(*entrant, &report)
            })
            .collect();
        Ok(RaceSummary {
            winner,
            seed: self.lineup.seed(),
            entrants,
            elapsed,
        })
    }
}
