use anyhow::Result;
use pairdesk_room::{LocalMedia, PeerEvent, PeerRegistry, SignalingTransport};
use std::sync::Arc;
use tokio::sync::mpsc;
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::rtp_transceiver::rtp_codec::RTPCodecType;

use super::MockSignaling;

/// A registry wired to a capturing mock transport, with local media already
/// attached. No ICE servers: everything stays on the local host.
pub fn create_test_registry() -> (
    PeerRegistry,
    MockSignaling,
    mpsc::UnboundedReceiver<pairdesk_core::ClientSignal>,
    mpsc::Receiver<PeerEvent>,
) {
    let (signaling, signal_rx) = MockSignaling::new();
    let (peer_tx, peer_rx) = mpsc::channel(256);

    let mut registry = PeerRegistry::new(
        vec![],
        Arc::new(signaling.clone()) as Arc<dyn SignalingTransport>,
        peer_tx,
    );
    registry.set_media(Arc::new(LocalMedia::new()));

    (registry, signaling, signal_rx, peer_rx)
}

/// Same as [`create_test_registry`] but without local media, for the
/// media-not-ready paths.
pub fn create_test_registry_without_media() -> (
    PeerRegistry,
    MockSignaling,
    mpsc::UnboundedReceiver<pairdesk_core::ClientSignal>,
    mpsc::Receiver<PeerEvent>,
) {
    let (signaling, signal_rx) = MockSignaling::new();
    let (peer_tx, peer_rx) = mpsc::channel(256);

    let registry = PeerRegistry::new(
        vec![],
        Arc::new(signaling.clone()) as Arc<dyn SignalingTransport>,
        peer_tx,
    );

    (registry, signaling, signal_rx, peer_rx)
}

/// Produce a valid audio offer SDP from a throwaway in-process connection,
/// for exercising the answering path.
pub async fn sample_remote_offer() -> Result<String> {
    let mut m = MediaEngine::default();
    m.register_default_codecs()?;
    let registry = register_default_interceptors(Registry::new(), &mut m)?;

    let api = APIBuilder::new()
        .with_media_engine(m)
        .with_interceptor_registry(registry)
        .build();

    let pc = api.new_peer_connection(RTCConfiguration::default()).await?;
    pc.add_transceiver_from_kind(RTPCodecType::Audio, None)
        .await?;

    let offer = pc.create_offer(None).await?;
    let sdp = offer.sdp.clone();
    pc.close().await?;

    Ok(sdp)
}
