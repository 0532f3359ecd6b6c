use crate::error::RoomError;
use async_trait::async_trait;
use pairdesk_core::{Problem, RoomId};
use serde::{Deserialize, Serialize};

/// Initial room data served by the platform backend
/// (`GET /api/interview/session/:roomID`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    #[serde(default)]
    pub problem: Option<Problem>,
}

/// Seam for the session REST collaborator. The backend owns sessions; the
/// room layer only fetches the initial projection during join, and a fetch
/// failure is fatal to the room.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    async fn fetch_session(&self, room_id: &RoomId) -> Result<SessionInfo, RoomError>;
}
