//! Bridge between race workers and TUI messages.

use crossbeam_channel::Sender;

use gridrace_core::observer::RaceObserver;
use gridrace_core::participant::ParticipantId;
use gridrace_core::progress::ProgressUpdate;

use crate::messages::TuiMessage;

/// Race observer that forwards worker events to the TUI channel.
///
/// Runs on worker threads. Lane positions are read from snapshots by the
/// model, so only the line crossing is logged; the finish is always delivered.
pub struct TuiBridgeObserver {
    tx: Sender<TuiMessage>,
}

impl TuiBridgeObserver {
    #[must_use]
    pub fn new(tx: Sender<TuiMessage>) -> Self {
        Self { tx }
    }
}

impl RaceObserver for TuiBridgeObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        if update.is_complete() {
            let _ = self.tx.try_send(TuiMessage::Log(format!(
                "{} crossed the line after {} ticks",
                update.id, update.tick
            )));
        }
    }

    fn on_finish(&self, winner: ParticipantId) {
        let _ = self.tx.send(TuiMessage::Finished { winner });
    }
}
