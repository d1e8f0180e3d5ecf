//! # gridrace-tui
//!
//! Interactive race screen using ratatui with Elm architecture.

pub mod bridge;
pub mod celebration;
pub mod confetti;
pub mod footer;
pub mod header;
pub mod keymap;
pub mod logs;
pub mod messages;
pub mod model;
pub mod styles;
pub mod track;

pub use bridge::TuiBridgeObserver;
pub use logs::LogPanel;
pub use messages::TuiMessage;
pub use model::{Mode, TuiApp};
