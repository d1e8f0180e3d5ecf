//! Orchestration interfaces and result types.

use std::time::Duration;

use serde::{Serialize, Serializer};

use gridrace_core::lineup::Entrant;
use gridrace_core::participant::ParticipantId;

use crate::worker::{WorkerExit, WorkerReport};

/// Trait for presenting race results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present a finished race.
    fn present_summary(&self, summary: &RaceSummary);

    /// Present an error.
    fn present_error(&self, error: &str);
}

/// Outcome of one lane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntrantResult {
    #[serde(flatten)]
    pub entrant: Entrant,
    pub exit: WorkerExit,
    pub progress: f64,
    pub position: f64,
    pub ticks: u64,
}

impl EntrantResult {
    #[must_use]
    pub fn new(entrant: Entrant, report: &WorkerReport) -> Self {
        Self {
            entrant,
            exit: report.exit,
            progress: report.progress,
            position: report.position,
            ticks: report.ticks,
        }
    }
}

/// Result of a completed race.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceSummary {
    pub winner: ParticipantId,
    pub seed: Option<u64>,
    pub entrants: Vec<EntrantResult>,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl RaceSummary {
    /// The winning lane.
    #[must_use]
    pub fn winner_entry(&self) -> Option<&EntrantResult> {
        self.entrants.iter().find(|e| e.entrant.id == self.winner)
    }

    /// Winner's display name, falling back to its id.
    #[must_use]
    pub fn winner_name(&self) -> String {
        self.winner_entry()
            .map_or_else(|| self.winner.to_string(), |e| e.entrant.name.to_string())
    }
}

fn serialize_millis<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridrace_core::lineup::Lineup;
    use gridrace_core::motion::MotionProfile;

    fn summary() -> RaceSummary {
        let lineup = Lineup::with_profiles(MotionProfile::ALL, Some(11));
        let entrants = lineup
            .entrants()
            .iter()
            .map(|&entrant| {
                let won = entrant.id == ParticipantId(2);
                EntrantResult::new(
                    entrant,
                    &WorkerReport {
                        id: entrant.id,
                        exit: if won { WorkerExit::Won } else { WorkerExit::Lost },
                        progress: 1.0,
                        position: 1.0,
                        ticks: 1000,
                    },
                )
            })
            .collect();
        RaceSummary {
            winner: ParticipantId(2),
            seed: lineup.seed(),
            entrants,
            elapsed: Duration::from_millis(1500),
        }
    }

    #[test]
    fn winner_lookup() {
        let s = summary();
        assert_eq!(s.winner_entry().unwrap().exit, WorkerExit::Won);
        assert_eq!(s.winner_name(), "Red");
    }

    #[test]
    fn summary_json_shape() {
        let json: serde_json::Value = serde_json::to_value(summary()).unwrap();
        assert_eq!(json["winner"], 2);
        assert_eq!(json["seed"], 11);
        assert_eq!(json["elapsed_ms"], 1500);
        assert_eq!(json["entrants"][2]["name"], "Red");
        assert_eq!(json["entrants"][2]["profile"], "ease-in-out-back");
        assert_eq!(json["entrants"][2]["exit"], "won");
    }
}
