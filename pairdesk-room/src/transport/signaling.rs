use crate::error::RoomError;
use async_trait::async_trait;
use pairdesk_core::ClientSignal;

/// Outbound half of the signaling channel. The room layer only ever writes
/// through this trait; the concrete wire (WebSocket, in-process test
/// channel) lives behind it.
#[async_trait]
pub trait SignalingTransport: Send + Sync {
    /// Send one signal to the relay.
    async fn send(&self, signal: ClientSignal) -> Result<(), RoomError>;

    /// Tear the channel down. Must be safe to call more than once.
    async fn close(&self);
}
