use serde::{Deserialize, Serialize};

/// Every input to a session is an Event.
///
/// Keyboard commands, signals, scheduler ticks and terminal resizes are
/// merged into one ordered queue and handed to the engine one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// User pressed `s`.
    Start,
    /// User pressed `q`, Ctrl+C or the process got SIGINT.
    Quit,
    /// One tick period has passed.
    Tick,
    /// The terminal was resized. Engine no-op; the renderer redraws.
    Resize { cols: u16, rows: u16 },
}
