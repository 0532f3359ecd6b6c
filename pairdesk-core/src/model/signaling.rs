use crate::model::peer::PeerId;
use crate::model::problem::{Problem, ProblemId};
use crate::model::room::RoomId;
use crate::model::shared_state::RoomTab;
use crate::model::whiteboard::Snapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }
}

/// Everything the client sends to the relay. Peer-addressed variants carry
/// the remote identity in `target`; the relay routes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ClientSignal {
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: RoomId },
    #[serde(rename_all = "camelCase")]
    Offer { target: PeerId, sdp: String },
    #[serde(rename_all = "camelCase")]
    Answer { target: PeerId, sdp: String },
    #[serde(rename_all = "camelCase")]
    IceCandidate {
        target: PeerId,
        candidate: String,
        sdp_mid: Option<String>,
        sdp_m_line_index: Option<u16>,
    },
    #[serde(rename_all = "camelCase")]
    TabChange { room_id: RoomId, tab: RoomTab },
    #[serde(rename_all = "camelCase")]
    SelectProblem {
        room_id: RoomId,
        problem_id: ProblemId,
    },
    #[serde(rename_all = "camelCase")]
    CodeChange { room_id: RoomId, code: String },
    #[serde(rename_all = "camelCase")]
    LanguageChange { room_id: RoomId, language: String },
    #[serde(rename_all = "camelCase")]
    TldrawChanged { room_id: RoomId, snapshot: Snapshot },
}

/// Everything the relay sends back. Peer-to-peer variants carry the origin
/// identity in `sender`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ServerSignal {
    #[serde(rename_all = "camelCase")]
    UserJoined { socket_id: PeerId },
    #[serde(rename_all = "camelCase")]
    OfferReceived { sender: PeerId, sdp: String },
    #[serde(rename_all = "camelCase")]
    AnswerReceived { sender: PeerId, sdp: String },
    #[serde(rename_all = "camelCase")]
    IceCandidateReceived {
        sender: PeerId,
        candidate: String,
        sdp_mid: Option<String>,
        sdp_m_line_index: Option<u16>,
    },
    #[serde(rename_all = "camelCase")]
    TabChanged { tab: RoomTab },
    #[serde(rename_all = "camelCase")]
    ProblemSelected { problem: Problem },
    #[serde(rename_all = "camelCase")]
    CodeChanged { code: String },
    #[serde(rename_all = "camelCase")]
    LanguageChanged { language: String },
    #[serde(rename_all = "camelCase")]
    TldrawUpdate { snapshot: Snapshot },
}
