use pairdesk_core::PeerId;
use std::sync::Arc;
use webrtc::track::track_remote::TrackRemote;

/// Events a peer connection reports back into the room event loop. All
/// registry mutation happens there, never inside connection callbacks.
pub enum PeerEvent {
    /// A local ICE candidate is ready to be forwarded to the remote side.
    CandidateReady {
        peer_id: PeerId,
        candidate: String,
        sdp_mid: Option<String>,
        sdp_m_line_index: Option<u16>,
    },
    /// The remote side started sending a media track.
    TrackReceived {
        peer_id: PeerId,
        track: Arc<TrackRemote>,
    },
    /// Negotiation finished and media is flowing.
    LinkConnected { peer_id: PeerId },
    /// The connection failed or the remote side went away.
    LinkClosed { peer_id: PeerId },
}
