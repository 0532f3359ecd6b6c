use crate::error::RoomError;
use crate::media::LocalMedia;
use crate::peer::{LinkState, PeerEvent, PeerLink};
use crate::transport::SignalingTransport;
use dashmap::DashMap;
use pairdesk_core::{ClientSignal, IceServerConfig, PeerId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use webrtc::track::track_remote::TrackRemote;

struct PeerEntry {
    link: PeerLink,
    state: LinkState,
}

/// Owns one [`PeerLink`] per remote identity.
///
/// There is never more than one entry per identity: a duplicate join closes
/// the old link before the new one is stored. The registry is created per
/// room session and discarded on leave; all mutation happens on the room
/// event-loop task.
pub struct PeerRegistry {
    links: HashMap<PeerId, PeerEntry>,
    media: Option<Arc<LocalMedia>>,
    ice_servers: Vec<IceServerConfig>,
    signaling: Arc<dyn SignalingTransport>,
    peer_tx: mpsc::Sender<PeerEvent>,
    remote_tracks: Arc<DashMap<PeerId, Arc<TrackRemote>>>,
}

impl PeerRegistry {
    pub fn new(
        ice_servers: Vec<IceServerConfig>,
        signaling: Arc<dyn SignalingTransport>,
        peer_tx: mpsc::Sender<PeerEvent>,
    ) -> Self {
        Self {
            links: HashMap::new(),
            media: None,
            ice_servers,
            signaling,
            peer_tx,
            remote_tracks: Arc::new(DashMap::new()),
        }
    }

    /// Hand the registry the local media. Until this happens no connection
    /// can be created.
    pub fn set_media(&mut self, media: Arc<LocalMedia>) {
        self.media = Some(media);
    }

    /// Allocate a connection for `remote` with every local track attached.
    ///
    /// Returns `false` without doing anything when local media is not yet
    /// available; callers must not negotiate in that case. An existing
    /// entry for `remote` is treated as a stale duplicate join: the old
    /// link is closed first, then overwritten.
    pub async fn create_connection(&mut self, remote: &PeerId) -> Result<bool, RoomError> {
        let Some(media) = self.media.clone() else {
            debug!("No local media yet, ignoring connection request for {}", remote);
            return Ok(false);
        };

        if let Some(stale) = self.links.remove(remote) {
            warn!("Duplicate join from {}, closing stale link", remote);
            let _ = stale.link.close().await;
            self.remote_tracks.remove(remote);
        }

        let link = PeerLink::new(
            remote.clone(),
            &self.ice_servers,
            &media,
            self.peer_tx.clone(),
        )
        .await?;

        self.links.insert(
            remote.clone(),
            PeerEntry {
                link,
                state: LinkState::New,
            },
        );

        Ok(true)
    }

    /// Start negotiation towards `remote`: create the connection, produce a
    /// local offer and send it addressed to `remote`.
    pub async fn initiate_offer(&mut self, remote: &PeerId) -> Result<(), RoomError> {
        if !self.create_connection(remote).await? {
            return Ok(());
        }
        let Some(entry) = self.links.get_mut(remote) else {
            return Ok(());
        };

        let sdp = entry.link.create_offer().await?;
        entry.state = LinkState::HasLocalOffer;
        info!("Sending offer to {}", remote);

        self.signaling
            .send(ClientSignal::Offer {
                target: remote.clone(),
                sdp,
            })
            .await
    }

    /// Answer an inbound offer from `remote`.
    pub async fn accept_offer(&mut self, remote: &PeerId, offer: String) -> Result<(), RoomError> {
        if !self.create_connection(remote).await? {
            return Ok(());
        }
        let Some(entry) = self.links.get_mut(remote) else {
            return Ok(());
        };

        entry.link.set_remote_offer(offer).await?;
        entry.state = LinkState::HasRemoteOffer;

        let sdp = entry.link.create_answer().await?;
        entry.state = LinkState::Negotiated;
        info!("Sending answer to {}", remote);

        self.signaling
            .send(ClientSignal::Answer {
                target: remote.clone(),
                sdp,
            })
            .await
    }

    /// Apply an answer from `remote`. Stale answers (no such link) are
    /// dropped with a warning.
    pub async fn apply_answer(&mut self, remote: &PeerId, answer: String) -> Result<(), RoomError> {
        let Some(entry) = self.links.get_mut(remote) else {
            warn!("Dropping answer from unknown peer {}", remote);
            return Ok(());
        };

        entry.link.set_remote_answer(answer).await?;
        entry.state = LinkState::Negotiated;
        Ok(())
    }

    /// Apply a trickle-ICE candidate from `remote`. Empty candidates and
    /// candidates for unknown links are dropped with a warning.
    pub async fn apply_ice_candidate(
        &mut self,
        remote: &PeerId,
        candidate: String,
        sdp_mid: Option<String>,
        sdp_m_line_index: Option<u16>,
    ) -> Result<(), RoomError> {
        if candidate.is_empty() {
            warn!("Dropping empty ICE candidate from {}", remote);
            return Ok(());
        }
        let Some(entry) = self.links.get(remote) else {
            warn!("Dropping ICE candidate from unknown peer {}", remote);
            return Ok(());
        };

        entry
            .link
            .add_ice_candidate(candidate, sdp_mid, sdp_m_line_index)
            .await
    }

    /// Record that media is flowing on the link to `remote`.
    pub fn mark_connected(&mut self, remote: &PeerId) {
        if let Some(entry) = self.links.get_mut(remote)
            && entry.state != LinkState::Closed
        {
            entry.state = LinkState::Connected;
        }
    }

    /// Publish a remote track for UI consumption.
    pub fn insert_remote_track(&self, remote: &PeerId, track: Arc<TrackRemote>) {
        self.remote_tracks.insert(remote.clone(), track);
    }

    /// Drop the link to `remote`, closing it.
    pub async fn remove(&mut self, remote: &PeerId) {
        self.remote_tracks.remove(remote);
        let Some(entry) = self.links.remove(remote) else {
            return;
        };
        let _ = entry.link.close().await;
        info!("Removed peer {}", remote);
    }

    /// Close every link and clear the registry. Best-effort and idempotent;
    /// called on room exit.
    pub async fn teardown(&mut self) {
        self.remote_tracks.clear();
        for (peer_id, entry) in self.links.drain() {
            if let Err(e) = entry.link.close().await {
                debug!("Ignoring close error for {} during teardown: {}", peer_id, e);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn contains(&self, remote: &PeerId) -> bool {
        self.links.contains_key(remote)
    }

    pub fn state_of(&self, remote: &PeerId) -> Option<LinkState> {
        self.links.get(remote).map(|e| e.state)
    }

    pub fn peers(&self) -> Vec<PeerId> {
        self.links.keys().cloned().collect()
    }

    /// Shared projection of remote tracks, safe to hand to the UI.
    pub fn remote_tracks(&self) -> Arc<DashMap<PeerId, Arc<TrackRemote>>> {
        self.remote_tracks.clone()
    }
}
