//! TUI message types (Elm Messages).

use gridrace_core::participant::ParticipantId;

use crate::keymap::KeyAction;

/// Messages that drive the TUI update cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum TuiMessage {
    /// The start gate opened.
    Started,
    /// The finish was claimed.
    Finished { winner: ParticipantId },
    /// Log line for the side panel.
    Log(String),
    /// Frame tick; advances animations.
    Tick,
    /// Terminal resize event.
    Resize { width: u16, height: u16 },
    /// Key press event forwarded from the event loop.
    KeyPress(KeyAction),
}
