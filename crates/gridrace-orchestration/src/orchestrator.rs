//! Threaded race execution: one worker thread per participant.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use gridrace_core::constants::START_WAIT_INTERVAL;
use gridrace_core::coordinator::RaceCoordinator;
use gridrace_core::error::RaceError;
use gridrace_core::lineup::{Entrant, Lineup};
use gridrace_core::observer::RaceObserver;
use gridrace_core::options::RaceOptions;
use gridrace_core::participant::LaneState;
use gridrace_core::progress::{CancellationToken, TimeoutCancellationToken};

use crate::interfaces::{EntrantResult, RaceSummary};
use crate::worker::{Worker, WorkerReport};

/// Read-only view of one lane for renderers.
#[derive(Debug, Clone)]
pub struct Lane {
    pub entrant: Entrant,
    pub state: Arc<LaneState>,
}

/// A race whose workers are running (or parked on the start gate).
///
/// Dropping the handle cancels and joins every worker.
pub struct RaceHandle {
    lineup: Lineup,
    race: Arc<RaceCoordinator>,
    lanes: Vec<Lane>,
    cancel: CancellationToken,
    workers: Vec<JoinHandle<WorkerReport>>,
    started_at: Option<Instant>,
}

/// Spawn one worker per entrant, parked until [`RaceHandle::start`].
///
/// If any spawn fails, the workers spawned so far are cancelled and joined
/// and the race is never started.
pub fn launch_race(
    lineup: &Lineup,
    opts: &RaceOptions,
    observer: Arc<dyn RaceObserver>,
    cancel: CancellationToken,
) -> Result<RaceHandle, RaceError> {
    let opts = opts.clone().normalize();
    opts.validate()?;

    let race = Arc::new(RaceCoordinator::new());
    let mut lanes = Vec::with_capacity(lineup.entrants().len());
    let mut workers = Vec::with_capacity(lineup.entrants().len());

    for (participant, entrant) in lineup
        .participants(opts.snap_on_saturation)
        .into_iter()
        .zip(lineup.entrants())
    {
        let id = participant.id();
        lanes.push(Lane {
            entrant: *entrant,
            state: participant.lane(),
        });

        let worker = Worker::new(
            participant,
            Arc::clone(&race),
            Arc::clone(&observer),
            cancel.clone(),
            opts.delta,
            opts.tick_interval,
        );
        let spawned = thread::Builder::new()
            .name(format!("racer-{}", id.0))
            .spawn(move || worker.run());

        match spawned {
            Ok(handle) => workers.push(handle),
            Err(source) => {
                warn!(participant = %id, error = %source, "worker spawn failed");
                cancel.cancel();
                for handle in workers {
                    let _ = handle.join();
                }
                return Err(RaceError::WorkerSpawn { id: id.0, source });
            }
        }
    }

    debug!(workers = workers.len(), seed = ?lineup.seed(), "race launched");
    Ok(RaceHandle {
        lineup: lineup.clone(),
        race,
        lanes,
        cancel,
        workers,
        started_at: None,
    })
}

impl RaceHandle {
    /// Open the start gate. Idempotent; returns whether this call started the race.
    pub fn start(&mut self) -> bool {
        let started = self.race.try_start();
        if started {
            self.started_at = Some(Instant::now());
        }
        started
    }

    #[must_use]
    pub fn coordinator(&self) -> &Arc<RaceCoordinator> {
        &self.race
    }

    #[must_use]
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    #[must_use]
    pub fn lineup(&self) -> &Lineup {
        &self.lineup
    }

    /// Time since the start gate opened.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at.map_or(Duration::ZERO, |t| t.elapsed())
    }

    /// Ask every worker to stop at its next check.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether the shared token was cancelled, by [`stop`](Self::stop) or from outside.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Block until every worker has exited, then summarize.
    ///
    /// Fails with [`RaceError::Cancelled`] when the workers stopped before a
    /// winner was declared.
    pub fn join(mut self) -> Result<RaceSummary, RaceError> {
        let elapsed = self.elapsed();
        let reports = self.join_workers()?;

        let winner = self.race.winner().ok_or(RaceError::Cancelled)?;
        let entrants = self
            .lanes
            .iter()
            .zip(&reports)
            .map(|(lane, report)| EntrantResult::new(lane.entrant, report))
            .collect();

        info!(%winner, ?elapsed, "race complete");
        Ok(RaceSummary {
            winner,
            seed: self.lineup.seed(),
            entrants,
            elapsed,
        })
    }

    /// Wait for the race to finish, giving up after `timeout`.
    ///
    /// On timeout the workers are stopped and joined before returning
    /// [`RaceError::Timeout`]. Cancellation through the shared token ends the
    /// wait early with [`RaceError::Cancelled`].
    pub fn wait(self, timeout: Duration) -> Result<RaceSummary, RaceError> {
        let deadline = TimeoutCancellationToken::with_token(self.cancel.clone(), timeout);
        loop {
            if self.race.is_finished() || self.workers.iter().all(JoinHandle::is_finished) {
                return self.join();
            }
            if let Err(err) = deadline.check_cancelled() {
                self.stop();
                let _ = self.join();
                return Err(err);
            }
            thread::sleep(START_WAIT_INTERVAL);
        }
    }

    fn join_workers(&mut self) -> Result<Vec<WorkerReport>, RaceError> {
        let mut reports = Vec::with_capacity(self.workers.len());
        let mut panicked = None;
        for (handle, lane) in self.workers.drain(..).zip(&self.lanes) {
            match handle.join() {
                Ok(report) => reports.push(report),
                Err(_) => {
                    warn!(participant = %lane.entrant.id, "worker panicked");
                    panicked.get_or_insert(lane.entrant.id.0);
                }
            }
        }
        match panicked {
            Some(id) => Err(RaceError::WorkerPanicked(id)),
            None => Ok(reports),
        }
    }
}

impl Drop for RaceHandle {
    fn drop(&mut self) {
        if self.workers.is_empty() {
            return;
        }
        self.cancel.cancel();
        let _ = self.join_workers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::WorkerExit;
    use gridrace_core::observers::{ChannelObserver, NoOpObserver, RaceEvent};
    use gridrace_core::participant::ParticipantId;

    fn fast_opts() -> RaceOptions {
        RaceOptions {
            delta: 0.05,
            tick_interval: Duration::from_millis(1),
            seed: Some(5),
            ..RaceOptions::default()
        }
    }

    #[test]
    fn race_produces_exactly_one_winner() {
        let lineup = Lineup::assign(Some(5));
        let mut handle = launch_race(
            &lineup,
            &fast_opts(),
            Arc::new(NoOpObserver::new()),
            CancellationToken::new(),
        )
        .unwrap();
        assert!(handle.start());
        assert!(!handle.start());

        let summary = handle.wait(Duration::from_secs(30)).unwrap();
        let winners = summary
            .entrants
            .iter()
            .filter(|e| e.exit == WorkerExit::Won)
            .count();
        assert_eq!(winners, 1);
        assert_eq!(summary.winner_entry().unwrap().progress, 1.0);
        assert_eq!(summary.seed, Some(5));
    }

    #[test]
    fn no_progress_before_start() {
        let lineup = Lineup::assign(Some(1));
        let handle = launch_race(
            &lineup,
            &fast_opts(),
            Arc::new(NoOpObserver::new()),
            CancellationToken::new(),
        )
        .unwrap();
        thread::sleep(Duration::from_millis(30));
        for lane in handle.lanes() {
            assert_eq!(lane.state.snapshot().progress, 0.0);
        }
        assert!(!handle.coordinator().is_started());
    }

    #[test]
    fn stop_before_start_is_cancelled() {
        let lineup = Lineup::assign(Some(2));
        let handle = launch_race(
            &lineup,
            &fast_opts(),
            Arc::new(NoOpObserver::new()),
            CancellationToken::new(),
        )
        .unwrap();
        handle.stop();
        assert!(matches!(handle.join(), Err(RaceError::Cancelled)));
    }

    #[test]
    fn outside_cancel_is_visible_on_handle() {
        let cancel = CancellationToken::new();
        let handle = launch_race(
            &Lineup::assign(Some(6)),
            &fast_opts(),
            Arc::new(NoOpObserver::new()),
            cancel.clone(),
        )
        .unwrap();
        assert!(!handle.is_cancelled());
        cancel.cancel();
        assert!(handle.is_cancelled());
        assert!(matches!(handle.join(), Err(RaceError::Cancelled)));
    }

    #[test]
    fn unstarted_race_times_out() {
        let lineup = Lineup::assign(Some(3));
        let handle = launch_race(
            &lineup,
            &fast_opts(),
            Arc::new(NoOpObserver::new()),
            CancellationToken::new(),
        )
        .unwrap();
        assert!(matches!(
            handle.wait(Duration::from_millis(20)),
            Err(RaceError::Timeout(_))
        ));
    }

    #[test]
    fn invalid_options_are_rejected() {
        let opts = RaceOptions {
            delta: 2.0,
            ..RaceOptions::default()
        };
        let result = launch_race(
            &Lineup::assign(None),
            &opts,
            Arc::new(NoOpObserver::new()),
            CancellationToken::new(),
        );
        assert!(matches!(result, Err(RaceError::Config(_))));
    }

    #[test]
    fn finish_event_is_sent_once() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut handle = launch_race(
            &Lineup::assign(Some(8)),
            &fast_opts(),
            Arc::new(ChannelObserver::new(tx)),
            CancellationToken::new(),
        )
        .unwrap();
        handle.start();
        let summary = handle.wait(Duration::from_secs(30)).unwrap();

        let finishes: Vec<ParticipantId> = rx
            .try_iter()
            .filter_map(|event| match event {
                RaceEvent::Finished(id) => Some(id),
                RaceEvent::Progress(_) => None,
            })
            .collect();
        assert_eq!(finishes, vec![summary.winner]);
    }

    #[test]
    fn drop_joins_parked_workers() {
        let cancel = CancellationToken::new();
        let handle = launch_race(
            &Lineup::assign(Some(4)),
            &fast_opts(),
            Arc::new(NoOpObserver::new()),
            cancel.clone(),
        )
        .unwrap();
        drop(handle);
        assert!(cancel.is_cancelled());
    }
}
