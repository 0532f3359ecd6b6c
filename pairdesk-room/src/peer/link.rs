use crate::error::RoomError;
use crate::media::LocalMedia;
use crate::peer::PeerEvent;
use pairdesk_core::{IceServerConfig, PeerId};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::rtp_transceiver::RTCRtpTransceiver;
use webrtc::rtp_transceiver::rtp_receiver::RTCRtpReceiver;
use webrtc::track::track_remote::TrackRemote;

/// Per-connection negotiation progress. `Closed` is terminal; nothing
/// transitions out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    New,
    HasLocalOffer,
    HasRemoteOffer,
    Negotiated,
    Connected,
    Closed,
}

/// One media link to one remote participant.
///
/// Every local track is attached inside `new`, so a link can never produce
/// a negotiation message before its tracks are in place.
pub struct PeerLink {
    pub peer_id: PeerId,
    pc: Arc<RTCPeerConnection>,
}

impl PeerLink {
    pub async fn new(
        peer_id: PeerId,
        ice_servers: &[IceServerConfig],
        media: &LocalMedia,
        event_tx: mpsc::Sender<PeerEvent>,
    ) -> Result<Self, RoomError> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut m)?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: ice_servers
                .iter()
                .map(|s| RTCIceServer {
                    urls: s.urls.clone(),
                    username: s.username.clone().unwrap_or_default(),
                    credential: s.credential.clone().unwrap_or_default(),
                })
                .collect(),
            ..Default::default()
        };

        let pc = Arc::new(api.new_peer_connection(rtc_config).await?);

        let state_tx = event_tx.clone();
        let state_peer = peer_id.clone();
        pc.on_peer_connection_state_change(Box::new(move |s: RTCPeerConnectionState| {
            let tx = state_tx.clone();
            let peer_id = state_peer.clone();

            Box::pin(async move {
                info!("Connection state for {}: {:?}", peer_id, s);
                match s {
                    RTCPeerConnectionState::Connected => {
                        let _ = tx.send(PeerEvent::LinkConnected { peer_id }).await;
                    }
                    RTCPeerConnectionState::Failed
                    | RTCPeerConnectionState::Disconnected
                    | RTCPeerConnectionState::Closed => {
                        let _ = tx.send(PeerEvent::LinkClosed { peer_id }).await;
                    }
                    _ => {}
                }
            })
        }));

        let ice_tx = event_tx.clone();
        let ice_peer = peer_id.clone();
        pc.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();
            let peer_id = ice_peer.clone();

            Box::pin(async move {
                let Some(candidate) = c else { return };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                let _ = tx
                    .send(PeerEvent::CandidateReady {
                        peer_id,
                        candidate: init.candidate,
                        sdp_mid: init.sdp_mid,
                        sdp_m_line_index: init.sdp_mline_index,
                    })
                    .await;
            })
        }));

        let track_tx = event_tx.clone();
        let track_peer = peer_id.clone();
        pc.on_track(Box::new(
            move |track: Arc<TrackRemote>,
                  _receiver: Arc<RTCRtpReceiver>,
                  _transceiver: Arc<RTCRtpTransceiver>| {
                let tx = track_tx.clone();
                let peer_id = track_peer.clone();

                Box::pin(async move {
                    info!("Remote track from {}: {}", peer_id, track.kind());
                    let _ = tx.send(PeerEvent::TrackReceived { peer_id, track }).await;
                })
            },
        ));

        // Attach-before-negotiate: every local track goes in before the
        // first offer or answer can exist.
        for track in media.tracks() {
            pc.add_track(track).await?;
        }

        Ok(Self { peer_id, pc })
    }

    /// Create a local offer and install it as the local description.
    pub async fn create_offer(&self) -> Result<String, RoomError> {
        let offer = self.pc.create_offer(None).await?;
        self.pc.set_local_description(offer.clone()).await?;
        Ok(offer.sdp)
    }

    /// Apply a remote offer.
    pub async fn set_remote_offer(&self, sdp: String) -> Result<(), RoomError> {
        let desc = RTCSessionDescription::offer(sdp)?;
        self.pc.set_remote_description(desc).await?;
        Ok(())
    }

    /// Create a local answer and install it as the local description.
    pub async fn create_answer(&self) -> Result<String, RoomError> {
        let answer = self.pc.create_answer(None).await?;
        self.pc.set_local_description(answer.clone()).await?;
        Ok(answer.sdp)
    }

    /// Apply a remote answer.
    pub async fn set_remote_answer(&self, sdp: String) -> Result<(), RoomError> {
        let desc = RTCSessionDescription::answer(sdp)?;
        self.pc.set_remote_description(desc).await?;
        Ok(())
    }

    /// Apply a remote trickle-ICE candidate.
    pub async fn add_ice_candidate(
        &self,
        candidate: String,
        sdp_mid: Option<String>,
        sdp_m_line_index: Option<u16>,
    ) -> Result<(), RoomError> {
        let init = RTCIceCandidateInit {
            candidate,
            sdp_mid,
            sdp_mline_index: sdp_m_line_index,
            ..Default::default()
        };
        self.pc.add_ice_candidate(init).await?;
        Ok(())
    }

    pub async fn close(&self) -> Result<(), RoomError> {
        self.pc.close().await?;
        Ok(())
    }
}
