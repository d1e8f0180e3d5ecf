//! # gridrace-orchestration
//!
//! Race execution: threaded workers behind a start gate, and a deterministic
//! lockstep driver for reproducible runs.

pub mod interfaces;
pub mod lockstep;
pub mod orchestrator;
pub mod worker;

pub use interfaces::{EntrantResult, RaceSummary, ResultPresenter};
pub use lockstep::LockstepRace;
pub use orchestrator::{launch_race, Lane, RaceHandle};
pub use worker::{Worker, WorkerExit, WorkerReport};
