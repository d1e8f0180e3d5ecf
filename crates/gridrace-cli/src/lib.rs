//! # gridrace-cli
//!
//! Headless race output: lane progress bars, result presentation, and shell
//! completion.

pub mod completion;
pub mod lane_bars;
pub mod output;
pub mod presenter;
pub mod ui;

pub use lane_bars::LaneBars;
pub use presenter::{CLIResultPresenter, OutputMode};
