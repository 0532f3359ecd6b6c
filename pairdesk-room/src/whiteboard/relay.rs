use crate::transport::SignalingTransport;
use pairdesk_core::{ClientSignal, RoomId, Snapshot};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error};

/// Bridges the embedded whiteboard's change stream to the transport.
///
/// Outbound snapshots are throttled to one emission per interval; bursts
/// collapse to the latest snapshot. Inbound snapshots are queued on a
/// channel the renderer drains on its own frame cadence, and only the last
/// applied snapshot matters — the canvas library owns its own consistency,
/// this relay just transports opaque blobs.
pub struct WhiteboardRelay;

pub struct WhiteboardHandle {
    local_tx: mpsc::UnboundedSender<Snapshot>,
    inbound_tx: mpsc::UnboundedSender<Snapshot>,
    task: JoinHandle<()>,
}

impl WhiteboardRelay {
    /// Spawn the outbound throttle task. Returns the handle and the channel
    /// of inbound snapshots for the renderer.
    pub fn spawn(
        room_id: RoomId,
        signaling: Arc<dyn SignalingTransport>,
        throttle: Duration,
    ) -> (WhiteboardHandle, mpsc::UnboundedReceiver<Snapshot>) {
        let (local_tx, mut local_rx) = mpsc::unbounded_channel::<Snapshot>();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel::<Snapshot>();

        let task = tokio::spawn(async move {
            let mut next_allowed = Instant::now();

            while let Some(mut snapshot) = local_rx.recv().await {
                tokio::time::sleep_until(next_allowed).await;

                // Coalesce everything that piled up during the quiet
                // period; only the newest snapshot goes out.
                while let Ok(newer) = local_rx.try_recv() {
                    snapshot = newer;
                }

                debug!("Relaying whiteboard snapshot ({} bytes)", snapshot.len());
                if let Err(e) = signaling
                    .send(ClientSignal::TldrawChanged {
                        room_id: room_id.clone(),
                        snapshot,
                    })
                    .await
                {
                    error!("Failed to relay whiteboard snapshot: {}", e);
                    break;
                }

                next_allowed = Instant::now() + throttle;
            }
        });

        (
            WhiteboardHandle {
                local_tx,
                inbound_tx,
                task,
            },
            inbound_rx,
        )
    }
}

impl WhiteboardHandle {
    /// Queue a locally drawn snapshot for (throttled) broadcast.
    pub fn publish(&self, snapshot: Snapshot) {
        let _ = self.local_tx.send(snapshot);
    }

    /// Forward a remote snapshot to the renderer queue.
    pub fn apply_remote(&self, snapshot: Snapshot) {
        let _ = self.inbound_tx.send(snapshot);
    }

    /// Stop the throttle task. Called on room exit so no timer outlives the
    /// session.
    pub fn shutdown(&self) {
        self.task.abort();
    }
}

impl Drop for WhiteboardHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
