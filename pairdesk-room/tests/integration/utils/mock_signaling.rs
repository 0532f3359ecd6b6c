use async_trait::async_trait;
use pairdesk_core::{ClientSignal, PeerId};
use pairdesk_room::{RoomError, SignalingTransport};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, mpsc};

/// Mock transport that captures every outgoing signal.
#[derive(Clone)]
pub struct MockSignaling {
    /// Channel delivering captured signals as they happen.
    tx: mpsc::UnboundedSender<ClientSignal>,
    /// All captured signals (for after-the-fact verification).
    signals: Arc<Mutex<Vec<ClientSignal>>>,
    close_calls: Arc<AtomicUsize>,
}

impl MockSignaling {
    /// Create a new MockSignaling and its receiver channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ClientSignal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let signaling = Self {
            tx,
            signals: Arc::new(Mutex::new(Vec::new())),
            close_calls: Arc::new(AtomicUsize::new(0)),
        };
        (signaling, rx)
    }

    pub async fn sent(&self) -> Vec<ClientSignal> {
        self.signals.lock().await.clone()
    }

    /// All SDP offers addressed to a specific peer.
    pub async fn offers_for(&self, target: &PeerId) -> Vec<String> {
        self.signals
            .lock()
            .await
            .iter()
            .filter_map(|s| match s {
                ClientSignal::Offer { target: id, sdp } if id == target => Some(sdp.clone()),
                _ => None,
            })
            .collect()
    }

    /// All SDP answers addressed to a specific peer.
    pub async fn answers_for(&self, target: &PeerId) -> Vec<String> {
        self.signals
            .lock()
            .await
            .iter()
            .filter_map(|s| match s {
                ClientSignal::Answer { target: id, sdp } if id == target => Some(sdp.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn close_count(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SignalingTransport for MockSignaling {
    async fn send(&self, signal: ClientSignal) -> Result<(), RoomError> {
        tracing::debug!("[MockSignaling] send {:?}", signal);
        self.signals.lock().await.push(signal.clone());
        let _ = self.tx.send(signal);
        Ok(())
    }

    async fn close(&self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
    }
}
