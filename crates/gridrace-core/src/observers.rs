//! Concrete observer implementations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crossbeam_channel::Sender;
use tracing::{debug, info};

use crate::observer::RaceObserver;
use crate::participant::ParticipantId;
use crate::progress::ProgressUpdate;

/// Event forwarded by a [`ChannelObserver`].
#[derive(Debug, Clone)]
pub enum RaceEvent {
    Progress(ProgressUpdate),
    Finished(ParticipantId),
}

/// Observer that sends events through a channel.
///
/// Progress is sent with `try_send` and dropped when the channel is full; the
/// finish event uses a blocking send so it is never lost.
pub struct ChannelObserver {
    sender: Sender<RaceEvent>,
}

impl ChannelObserver {
    /// Create a new channel observer.
    #[must_use]
    pub fn new(sender: Sender<RaceEvent>) -> Self {
        Self { sender }
    }
}

impl RaceObserver for ChannelObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        let _ = self.sender.try_send(RaceEvent::Progress(update.clone()));
    }

    fn on_finish(&self, winner: ParticipantId) {
        // Receiver gone means nobody is left to celebrate.
        let _ = self.sender.send(RaceEvent::Finished(winner));
    }
}

/// Observer that logs race events with temporal throttling.
pub struct LoggingObserver {
    epoch: Instant,
    min_interval_ms: u64,
    last_time: AtomicU64,
}

impl LoggingObserver {
    /// Create a new logging observer with the given minimum interval.
    #[must_use]
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            epoch: Instant::now(),
            min_interval_ms,
            last_time: AtomicU64::new(0),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn elapsed_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}

impl RaceObserver for LoggingObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        let now = self.elapsed_ms();
        let last = self.last_time.load(Ordering::Relaxed);
        if last != 0 && now.saturating_sub(last) < self.min_interval_ms && !update.is_complete() {
            return;
        }
        self.last_time.store(now.max(1), Ordering::Relaxed);

        if update.is_complete() {
            info!(participant = %update.id, ticks = update.tick, "crossed the line");
        } else {
            debug!(
                participant = %update.id,
                profile = %update.profile,
                progress = format!("{:.1}%", update.progress * 100.0),
                position = format!("{:.3}", update.position),
                "progress"
            );
        }
    }

    fn on_finish(&self, winner: ParticipantId) {
        info!(%winner, "winner declared");
    }
}

/// Null object: discards every event.
pub struct NoOpObserver;

impl NoOpObserver {
    /// Create a new no-op observer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl RaceObserver for NoOpObserver {
    fn on_progress(&self, _update: &ProgressUpdate) {}

    fn on_finish(&self, _winner: ParticipantId) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::MotionProfile;

    fn update(progress: f64) -> ProgressUpdate {
        ProgressUpdate::new(ParticipantId(1), MotionProfile::EaseOutSine, progress, progress, 3)
    }

    #[test]
    fn noop_observer_does_nothing() {
        let observer = NoOpObserver::default();
        observer.on_progress(&update(0.5));
        observer.on_finish(ParticipantId(0));
    }

    #[test]
    fn channel_observer_sends_progress() {
        let (tx, rx) = crossbeam_channel::bounded(10);
        let observer = ChannelObserver::new(tx);
        observer.on_progress(&update(0.5));
        match rx.try_recv() {
            Ok(RaceEvent::Progress(u)) => assert_eq!(u.id, ParticipantId(1)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn channel_observer_sends_finish() {
        let (tx, rx) = crossbeam_channel::bounded(10);
        let observer = ChannelObserver::new(tx);
        observer.on_finish(ParticipantId(3));
        assert!(matches!(rx.try_recv(), Ok(RaceEvent::Finished(ParticipantId(3)))));
    }

    #[test]
    fn channel_observer_full_channel_drops_progress() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let observer = ChannelObserver::new(tx);
        observer.on_progress(&update(0.02));
        observer.on_progress(&update(0.05));
        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn channel_observer_disconnected_does_not_panic() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        drop(rx);
        let observer = ChannelObserver::new(tx);
        observer.on_progress(&update(0.5));
        observer.on_finish(ParticipantId(0));
    }

    #[test]
    fn logging_observer_throttles_without_panicking() {
        let observer = LoggingObserver::new(60_000);
        observer.on_progress(&update(0.05));
        observer.on_progress(&update(0.10));
        observer.on_progress(&update(1.0));
        observer.on_finish(ParticipantId(1));
    }
}
