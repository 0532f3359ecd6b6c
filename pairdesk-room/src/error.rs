use pairdesk_core::RoomId;
use thiserror::Error;

/// Errors surfaced by the room session layer.
///
/// Setup failures (session fetch, transport connect) are fatal to the room.
/// Stale-message conditions never reach this type; they are logged and
/// dropped where they occur. Teardown is best-effort and does not fail.
#[derive(Debug, Error)]
pub enum RoomError {
    #[error("failed to fetch session for room {room}: {reason}")]
    SessionFetch { room: RoomId, reason: String },

    #[error("signaling transport error: {0}")]
    Transport(String),

    #[error("signal codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("webrtc error: {0}")]
    WebRtc(#[from] webrtc::Error),

    #[error("room session already closed")]
    Closed,
}
