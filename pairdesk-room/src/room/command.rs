use pairdesk_core::{Problem, RoomTab, Snapshot};

/// Commands the UI sends into the room event loop.
#[derive(Debug, Clone)]
pub enum RoomCommand {
    /// Switch the shared active tab.
    SetTab(RoomTab),

    /// Pick the problem both participants work on.
    SelectProblem(Problem),

    /// Replace the shared code buffer.
    EditCode(String),

    /// Switch the shared editor language.
    SetLanguage(String),

    /// The local whiteboard changed; relay (throttled).
    WhiteboardChanged(Snapshot),

    /// Flip microphone enablement. No renegotiation.
    ToggleMute,

    /// Flip camera enablement. No renegotiation.
    ToggleVideo,

    /// Leave the room and tear everything down.
    Leave,
}
