use pairdesk_room::{RoomEvent, TransportEvent};

use super::{create_test_room, wait_for_event};
use crate::init_tracing;

#[tokio::test]
async fn test_transport_loss_ends_session() {
    init_tracing();

    let (mut handle, signaling, _wire_rx, transport_tx) = create_test_room().await;

    transport_tx
        .send(TransportEvent::Closed)
        .await
        .expect("transport channel open");

    // No reconnect policy: the session reports the failure and ends.
    wait_for_event(&mut handle.events, |e| matches!(e, RoomEvent::Fatal(_))).await;
    wait_for_event(&mut handle.events, |e| matches!(e, RoomEvent::Closed)).await;
    assert_eq!(signaling.close_count(), 1);
}
