//! The per-participant worker loop.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, trace};

use gridrace_core::constants::{PROGRESS_REPORT_THRESHOLD, START_WAIT_INTERVAL};
use gridrace_core::coordinator::RaceCoordinator;
use gridrace_core::observer::{RaceObserver, ReportThrottle};
use gridrace_core::participant::{Participant, ParticipantId};
use gridrace_core::progress::{CancellationToken, ProgressUpdate};

/// Why a worker stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkerExit {
    /// Reached the line and claimed the finish.
    Won,
    /// Reached the line after another participant claimed the finish.
    Lost,
    /// Saw the race finished before reaching the line.
    Halted,
    /// Stopped by the cancellation token.
    Cancelled,
}

/// Final state of one worker, returned from its thread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkerReport {
    pub id: ParticipantId,
    pub exit: WorkerExit,
    pub progress: f64,
    pub position: f64,
    pub ticks: u64,
}

impl WorkerReport {
    fn of(participant: &Participant, exit: WorkerExit) -> Self {
        Self {
            id: participant.id(),
            exit,
            progress: participant.progress(),
            position: participant.position(),
            ticks: participant.ticks(),
        }
    }
}

/// Move `participant` one tick and report it if the throttle allows.
pub(crate) fn advance(
    participant: &mut Participant,
    race: &RaceCoordinator,
    delta: f64,
    observer: &dyn RaceObserver,
    throttle: &ReportThrottle,
) -> bool {
    if !participant.update(race, delta) {
        return false;
    }
    trace!(participant = %participant.id(), progress = participant.progress(), "tick");

    if throttle.should_report(participant.progress()) {
        throttle.mark(participant.progress());
        observer.on_progress(&ProgressUpdate::new(
            participant.id(),
            participant.profile(),
            participant.progress(),
            participant.position(),
            participant.ticks(),
        ));
    }
    true
}

/// Claim the finish for a participant on the line.
///
/// Returns `None` while the participant is still racing. The winner fires
/// the one-time `on_finish` event; a loser exits quietly.
pub(crate) fn attempt_finish(
    participant: &Participant,
    race: &RaceCoordinator,
    observer: &dyn RaceObserver,
) -> Option<WorkerExit> {
    if !participant.is_complete() {
        return None;
    }
    if race.try_finish(participant.id()) {
        observer.on_finish(participant.id());
        Some(WorkerExit::Won)
    } else {
        debug!(participant = %participant.id(), "crossed the line after the winner");
        Some(WorkerExit::Lost)
    }
}

/// Drives one participant on its own thread.
pub struct Worker {
    participant: Participant,
    race: Arc<RaceCoordinator>,
    observer: Arc<dyn RaceObserver>,
    cancel: CancellationToken,
    delta: f64,
    tick_interval: Duration,
    throttle: ReportThrottle,
}

impl Worker {
    #[must_use]
    pub fn new(
        participant: Participant,
        race: Arc<RaceCoordinator>,
        observer: Arc<dyn RaceObserver>,
        cancel: CancellationToken,
        delta: f64,
        tick_interval: Duration,
    ) -> Self {
        Self {
            participant,
            race,
            observer,
            cancel,
            delta,
            tick_interval,
            throttle: ReportThrottle::new(PROGRESS_REPORT_THRESHOLD),
        }
    }

    /// Run until the participant wins, loses, the race ends, or the token fires.
    pub fn run(mut self) -> WorkerReport {
        let exit = loop {
            if self.cancel.is_cancelled() {
                break WorkerExit::Cancelled;
            }
            if self.race.is_finished() {
                break WorkerExit::Halted;
            }
            if !self.race.is_started() {
                self.race.wait_for_start(START_WAIT_INTERVAL);
                continue;
            }

            advance(
                &mut self.participant,
                &self.race,
                self.delta,
                self.observer.as_ref(),
                &self.throttle,
            );
            if let Some(exit) = attempt_finish(&self.participant, &self.race, self.observer.as_ref())
            {
                break exit;
            }

            std::thread::sleep(self.tick_interval);
        };

        debug!(
            participant = %self.participant.id(),
            ?exit,
            ticks = self.participant.ticks(),
            "worker stopped"
        );
        WorkerReport::of(&self.participant, exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridrace_core::motion::MotionProfile;
    use gridrace_core::observers::NoOpObserver;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Recorder {
        progress: AtomicUsize,
        finishes: AtomicUsize,
    }

    impl RaceObserver for Recorder {
        fn on_progress(&self, _update: &ProgressUpdate) {
            self.progress.fetch_add(1, Ordering::Relaxed);
        }

        fn on_finish(&self, _winner: ParticipantId) {
            self.finishes.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn worker(race: &Arc<RaceCoordinator>, observer: Arc<dyn RaceObserver>, cancel: &CancellationToken) -> Worker {
        Worker::new(
            Participant::new(ParticipantId(0), MotionProfile::EaseInSine),
            Arc::clone(race),
            observer,
            cancel.clone(),
            0.1,
            Duration::from_millis(1),
        )
    }

    #[test]
    fn lone_worker_wins() {
        let race = Arc::new(RaceCoordinator::new());
        race.try_start();
        let recorder = Arc::new(Recorder::default());
        let report = worker(&race, recorder.clone(), &CancellationToken::new()).run();

        assert_eq!(report.exit, WorkerExit::Won);
        assert_eq!(report.progress, 1.0);
        assert_eq!(report.ticks, 10);
        assert_eq!(race.winner(), Some(ParticipantId(0)));
        assert_eq!(recorder.finishes.load(Ordering::Relaxed), 1);
        assert!(recorder.progress.load(Ordering::Relaxed) >= 1);
    }

    #[test]
    fn worker_halts_when_race_already_finished() {
        let race = Arc::new(RaceCoordinator::new());
        race.try_start();
        race.try_finish(ParticipantId(3));
        let report = worker(&race, Arc::new(NoOpObserver::new()), &CancellationToken::new()).run();
        assert_eq!(report.exit, WorkerExit::Halted);
        assert_eq!(report.ticks, 0);
    }

    #[test]
    fn cancelled_worker_never_moves() {
        let race = Arc::new(RaceCoordinator::new());
        let cancel = CancellationToken::new();
        cancel.cancel();
        let report = worker(&race, Arc::new(NoOpObserver::new()), &cancel).run();
        assert_eq!(report.exit, WorkerExit::Cancelled);
        assert_eq!(report.progress, 0.0);
    }

    #[test]
    fn worker_waits_for_start() {
        let race = Arc::new(RaceCoordinator::new());
        let cancel = CancellationToken::new();
        let handle = {
            let w = worker(&race, Arc::new(NoOpObserver::new()), &cancel);
            std::thread::spawn(move || w.run())
        };
        std::thread::sleep(Duration::from_millis(30));
        assert!(!race.is_finished());
        race.try_start();
        let report = handle.join().unwrap();
        assert_eq!(report.exit, WorkerExit::Won);
    }

    #[test]
    fn attempt_finish_loser_is_quiet() {
        let race = RaceCoordinator::new();
        race.try_start();
        let recorder = Recorder::default();
        let mut p = Participant::new(ParticipantId(1), MotionProfile::EaseOutSine);
        assert_eq!(attempt_finish(&p, &race, &recorder), None);

        p.update(&race, 1.0);
        race.try_finish(ParticipantId(0));
        assert_eq!(attempt_finish(&p, &race, &recorder), Some(WorkerExit::Lost));
        assert_eq!(recorder.finishes.load(Ordering::Relaxed), 0);
        assert_eq!(race.winner(), Some(ParticipantId(0)));
    }
}
