//! # gridrace-core
//!
//! Core library for the gridrace four-lane race simulation: motion profiles,
//! participants, and the lock-free coordinator that declares exactly one
//! winner no matter how many workers cross the line at once.

pub mod constants;
pub mod coordinator;
pub mod error;
pub mod lineup;
pub mod motion;
pub mod observer;
pub mod observers;
pub mod options;
pub mod participant;
pub mod progress;

// Re-exports
pub use constants::{exit_codes, PARTICIPANT_COUNT, PROGRESS_REPORT_THRESHOLD};
pub use coordinator::{RaceCoordinator, RacePhase};
pub use error::RaceError;
pub use lineup::{Entrant, Lineup};
pub use motion::MotionProfile;
pub use observer::{ObserverSet, RaceObserver, ReportThrottle};
pub use options::RaceOptions;
pub use participant::{LaneSnapshot, LaneState, Participant, ParticipantId};
pub use progress::{CancellationToken, ProgressUpdate, TimeoutCancellationToken};
