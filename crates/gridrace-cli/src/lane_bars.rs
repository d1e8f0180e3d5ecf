//! One indicatif progress bar per lane, fed by worker events.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

use gridrace_core::lineup::Lineup;
use gridrace_core::observer::RaceObserver;
use gridrace_core::participant::ParticipantId;
use gridrace_core::progress::ProgressUpdate;

use crate::ui::bar_color;

/// Bar resolution; display positions are scaled to this length.
const BAR_LENGTH: u64 = 1000;

/// Live lane display for headless races.
pub struct LaneBars {
    multi: MultiProgress,
    bars: Vec<(ParticipantId, ProgressBar)>,
}

impl LaneBars {
    /// Bars drawn to stderr.
    #[must_use]
    pub fn new(lineup: &Lineup) -> Self {
        Self::with_target(lineup, ProgressDrawTarget::stderr())
    }

    /// Bars that are never drawn, for quiet output and tests.
    #[must_use]
    pub fn hidden(lineup: &Lineup) -> Self {
        Self::with_target(lineup, ProgressDrawTarget::hidden())
    }

    fn with_target(lineup: &Lineup, target: ProgressDrawTarget) -> Self {
        let multi = MultiProgress::with_draw_target(target);
        let bars = lineup
            .entrants()
            .iter()
            .map(|entrant| {
                let bar = multi.add(ProgressBar::new(BAR_LENGTH));
                let template = format!(
                    "{{prefix:<10}} [{{bar:40.{}/black}}] {{msg}}",
                    bar_color(entrant.name)
                );
                if let Ok(style) = ProgressStyle::default_bar().template(&template) {
                    bar.set_style(style.progress_chars("=>-"));
                }
                bar.set_prefix(format!("{} {}", entrant.name, entrant.id));
                bar.set_message(entrant.profile.name());
                (entrant.id, bar)
            })
            .collect();
        Self { multi, bars }
    }

    fn bar(&self, id: ParticipantId) -> Option<&ProgressBar> {
        self.bars.iter().find(|(bar_id, _)| *bar_id == id).map(|(_, bar)| bar)
    }

    /// Current bar position of a lane, in `0..=1000`.
    #[must_use]
    pub fn position(&self, id: ParticipantId) -> Option<u64> {
        self.bar(id).map(ProgressBar::position)
    }

    /// Stop drawing, leaving the final state on screen.
    pub fn finish(&self) {
        for (_, bar) in &self.bars {
            bar.abandon();
        }
        let _ = self.multi.clear();
    }
}

/// Map a display position to a bar offset; the overshoot dip draws as zero.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scaled(position: f64) -> u64 {
    (position.clamp(0.0, 1.0) * BAR_LENGTH as f64).round() as u64
}

impl RaceObserver for LaneBars {
    fn on_progress(&self, update: &ProgressUpdate) {
        if let Some(bar) = self.bar(update.id) {
            bar.set_position(scaled(update.position));
        }
    }

    fn on_finish(&self, winner: ParticipantId) {
        if let Some(bar) = self.bar(winner) {
            bar.set_position(BAR_LENGTH);
            bar.set_message("winner!");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridrace_core::motion::MotionProfile;

    fn update(id: u32, position: f64) -> ProgressUpdate {
        ProgressUpdate::new(ParticipantId(id), MotionProfile::EaseInOutBack, 0.2, position, 200)
    }

    #[test]
    fn scaled_clamps() {
        assert_eq!(scaled(-0.1), 0);
        assert_eq!(scaled(0.5), 500);
        assert_eq!(scaled(1.2), BAR_LENGTH);
    }

    #[test]
    fn progress_moves_matching_bar() {
        let bars = LaneBars::hidden(&Lineup::assign(Some(1)));
        bars.on_progress(&update(2, 0.25));
        assert_eq!(bars.position(ParticipantId(2)), Some(250));
        assert_eq!(bars.position(ParticipantId(0)), Some(0));
    }

    #[test]
    fn negative_position_draws_at_start() {
        let bars = LaneBars::hidden(&Lineup::assign(Some(1)));
        bars.on_progress(&update(1, -0.08));
        assert_eq!(bars.position(ParticipantId(1)), Some(0));
    }

    #[test]
    fn finish_fills_winner_bar() {
        let bars = LaneBars::hidden(&Lineup::assign(Some(1)));
        bars.on_finish(ParticipantId(3));
        assert_eq!(bars.position(ParticipantId(3)), Some(BAR_LENGTH));
        bars.finish();
    }

    #[test]
    fn unknown_lane_is_ignored() {
        let bars = LaneBars::hidden(&Lineup::assign(Some(1)));
        bars.on_progress(&update(9, 0.5));
        assert_eq!(bars.position(ParticipantId(9)), None);
    }
}
