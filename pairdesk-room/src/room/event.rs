use pairdesk_core::PeerId;

/// Notifications the room event loop publishes for the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    /// Media is flowing to/from this peer.
    PeerConnected(PeerId),

    /// The peer disconnected or its link failed.
    PeerLeft(PeerId),

    /// A remote media track became available in the shared track map.
    RemoteTrack(PeerId),

    /// New microphone enablement after a toggle.
    MuteChanged(bool),

    /// New camera enablement after a toggle.
    VideoChanged(bool),

    /// Elapsed session time, once per tick interval.
    Tick(u64),

    /// Unrecoverable room failure; the session is over.
    Fatal(String),

    /// The session ended and teardown ran.
    Closed,
}
