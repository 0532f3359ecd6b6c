use crate::error::RoomError;
use crate::media::LocalMedia;
use crate::peer::{PeerEvent, PeerRegistry};
use crate::room::{RoomCommand, RoomConfig, RoomEvent};
use crate::session::SessionBackend;
use crate::sync::SharedStateSync;
use crate::transport::{SignalingTransport, TransportEvent};
use crate::whiteboard::{WhiteboardHandle, WhiteboardRelay};
use dashmap::DashMap;
use pairdesk_core::{
    ClientSignal, PeerId, RoomId, ServerSignal, SharedChange, SharedState, Snapshot,
};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{error, info, warn};
use webrtc::track::track_remote::TrackRemote;

/// Everything the UI needs to drive and observe a live room session.
pub struct RoomHandle {
    pub commands: mpsc::Sender<RoomCommand>,
    pub events: mpsc::UnboundedReceiver<RoomEvent>,
    pub shared_state: watch::Receiver<SharedState>,
    /// Remote whiteboard snapshots, drained on the renderer's frame cadence.
    pub whiteboard: mpsc::UnboundedReceiver<Snapshot>,
    /// Live projection of remote media tracks, keyed by peer.
    pub remote_tracks: Arc<DashMap<PeerId, Arc<TrackRemote>>>,
}

/// Top-level orchestrator of one room session.
///
/// Owns the local media, the peer registry, the shared-state replica and
/// the whiteboard relay, and runs the single event loop every one of them
/// is mutated on. One controller per room entry; leaving discards it.
pub struct RoomController {
    room_id: RoomId,
    media: Arc<LocalMedia>,
    registry: PeerRegistry,
    sync: SharedStateSync,
    whiteboard: WhiteboardHandle,
    signaling: Arc<dyn SignalingTransport>,
    command_rx: mpsc::Receiver<RoomCommand>,
    transport_rx: mpsc::Receiver<TransportEvent>,
    peer_rx: mpsc::Receiver<PeerEvent>,
    event_tx: mpsc::UnboundedSender<RoomEvent>,
    tick_interval: std::time::Duration,
    active: bool,
}

impl RoomController {
    /// Join `room_id`: fetch the initial session projection, announce
    /// ourselves on the signaling channel and wire up the session parts.
    ///
    /// The registry only comes into existence here, with local media
    /// already in hand, so negotiation can never run before tracks can be
    /// attached. The caller spawns the returned controller's [`run`] loop.
    ///
    /// [`run`]: RoomController::run
    pub async fn join(
        room_id: RoomId,
        config: RoomConfig,
        media: LocalMedia,
        backend: Arc<dyn SessionBackend>,
        signaling: Arc<dyn SignalingTransport>,
        transport_rx: mpsc::Receiver<TransportEvent>,
    ) -> Result<(Self, RoomHandle), RoomError> {
        let session = backend.fetch_session(&room_id).await?;
        info!(
            "Joining room {} (problem preselected: {})",
            room_id,
            session.problem.is_some()
        );

        signaling
            .send(ClientSignal::JoinRoom {
                room_id: room_id.clone(),
            })
            .await?;

        let media = Arc::new(media);
        let (peer_tx, peer_rx) = mpsc::channel(256);
        let (command_tx, command_rx) = mpsc::channel(100);
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut registry =
            PeerRegistry::new(config.ice_servers.clone(), signaling.clone(), peer_tx);
        registry.set_media(media.clone());
        let remote_tracks = registry.remote_tracks();

        let initial = SharedState {
            selected_problem: session.problem,
            ..SharedState::default()
        };
        let (sync, state_rx) = SharedStateSync::new(room_id.clone(), initial, signaling.clone());

        let (whiteboard, whiteboard_rx) = WhiteboardRelay::spawn(
            room_id.clone(),
            signaling.clone(),
            config.whiteboard_throttle,
        );

        let controller = Self {
            room_id,
            media,
            registry,
            sync,
            whiteboard,
            signaling,
            command_rx,
            transport_rx,
            peer_rx,
            event_tx,
            tick_interval: config.tick_interval,
            active: true,
        };

        let handle = RoomHandle {
            commands: command_tx,
            events: event_rx,
            shared_state: state_rx,
            whiteboard: whiteboard_rx,
            remote_tracks,
        };

        Ok((controller, handle))
    }

    /// The session event loop. Runs until the user leaves or the signaling
    /// connection dies, then tears the session down.
    pub async fn run(mut self) {
        info!("Room {} event loop started", self.room_id);

        let started = Instant::now();
        let mut tick = tokio::time::interval(self.tick_interval);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(cmd) => {
                            if self.handle_command(cmd).await {
                                break;
                            }
                        }
                        None => break,
                    }
                }

                evt = self.transport_rx.recv() => {
                    match evt {
                        Some(TransportEvent::Signal(signal)) => {
                            self.handle_signal(signal).await;
                        }
                        Some(TransportEvent::Closed) | None => {
                            warn!("Signaling connection lost, ending session");
                            let _ = self
                                .event_tx
                                .send(RoomEvent::Fatal("signaling connection lost".to_owned()));
                            break;
                        }
                    }
                }

                evt = self.peer_rx.recv() => {
                    if let Some(evt) = evt {
                        self.handle_peer_event(evt).await;
                    }
                }

                _ = tick.tick() => {
                    let _ = self
                        .event_tx
                        .send(RoomEvent::Tick(started.elapsed().as_secs()));
                }
            }
        }

        self.leave().await;
        let _ = self.event_tx.send(RoomEvent::Closed);
        info!("Room {} event loop finished", self.room_id);
    }

    /// Returns true when the user asked to leave.
    async fn handle_command(&mut self, cmd: RoomCommand) -> bool {
        match cmd {
            RoomCommand::SetTab(tab) => {
                self.apply_local(SharedChange::Tab(tab)).await;
            }
            RoomCommand::SelectProblem(problem) => {
                self.apply_local(SharedChange::Problem(problem)).await;
            }
            RoomCommand::EditCode(code) => {
                self.apply_local(SharedChange::Code(code)).await;
            }
            RoomCommand::SetLanguage(language) => {
                self.apply_local(SharedChange::Language(language)).await;
            }
            RoomCommand::WhiteboardChanged(snapshot) => {
                self.whiteboard.publish(snapshot);
            }
            RoomCommand::ToggleMute => {
                let enabled = self.media.toggle_mute();
                let _ = self.event_tx.send(RoomEvent::MuteChanged(enabled));
            }
            RoomCommand::ToggleVideo => {
                let enabled = self.media.toggle_video();
                let _ = self.event_tx.send(RoomEvent::VideoChanged(enabled));
            }
            RoomCommand::Leave => return true,
        }

        false
    }

    async fn apply_local(&mut self, change: SharedChange) {
        if let Err(e) = self.sync.apply_local(change).await {
            error!("Failed to broadcast shared-state change: {}", e);
        }
    }

    async fn handle_signal(&mut self, signal: ServerSignal) {
        match signal {
            ServerSignal::UserJoined { socket_id } => {
                info!("Peer {} joined room {}", socket_id, self.room_id);
                if let Err(e) = self.registry.initiate_offer(&socket_id).await {
                    error!("Failed to offer to {}: {}", socket_id, e);
                }
            }
            ServerSignal::OfferReceived { sender, sdp } => {
                if let Err(e) = self.registry.accept_offer(&sender, sdp).await {
                    error!("Failed to answer offer from {}: {}", sender, e);
                }
            }
            ServerSignal::AnswerReceived { sender, sdp } => {
                if let Err(e) = self.registry.apply_answer(&sender, sdp).await {
                    error!("Failed to apply answer from {}: {}", sender, e);
                }
            }
            ServerSignal::IceCandidateReceived {
                sender,
                candidate,
                sdp_mid,
                sdp_m_line_index,
            } => {
                if let Err(e) = self
                    .registry
                    .apply_ice_candidate(&sender, candidate, sdp_mid, sdp_m_line_index)
                    .await
                {
                    error!("Failed to apply ICE candidate from {}: {}", sender, e);
                }
            }
            ServerSignal::TldrawUpdate { snapshot } => {
                self.whiteboard.apply_remote(snapshot);
            }
            other => {
                self.sync.apply_remote(&other);
            }
        }
    }

    async fn handle_peer_event(&mut self, event: PeerEvent) {
        match event {
            PeerEvent::CandidateReady {
                peer_id,
                candidate,
                sdp_mid,
                sdp_m_line_index,
            } => {
                if let Err(e) = self
                    .signaling
                    .send(ClientSignal::IceCandidate {
                        target: peer_id.clone(),
                        candidate,
                        sdp_mid,
                        sdp_m_line_index,
                    })
                    .await
                {
                    error!("Failed to forward ICE candidate to {}: {}", peer_id, e);
                }
            }
            PeerEvent::TrackReceived { peer_id, track } => {
                self.registry.insert_remote_track(&peer_id, track);
                let _ = self.event_tx.send(RoomEvent::RemoteTrack(peer_id));
            }
            PeerEvent::LinkConnected { peer_id } => {
                self.registry.mark_connected(&peer_id);
                let _ = self.event_tx.send(RoomEvent::PeerConnected(peer_id));
            }
            PeerEvent::LinkClosed { peer_id } => {
                self.registry.remove(&peer_id).await;
                let _ = self.event_tx.send(RoomEvent::PeerLeft(peer_id));
            }
        }
    }

    /// Ordered teardown: signaling first, then local tracks, then peer
    /// links. Every step runs even if an earlier one failed, and running it
    /// twice is harmless.
    async fn leave(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        info!("Leaving room {}", self.room_id);
        self.signaling.close().await;
        self.media.disable_all();
        self.whiteboard.shutdown();
        self.registry.teardown().await;
    }
}
