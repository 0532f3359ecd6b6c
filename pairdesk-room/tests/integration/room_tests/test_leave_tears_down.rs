use pairdesk_room::{RoomCommand, RoomEvent};
use std::time::Duration;

use super::{create_test_room, wait_for_event};
use crate::init_tracing;

#[tokio::test]
async fn test_leave_tears_down_in_order() {
    init_tracing();

    let (mut handle, signaling, _wire_rx, _transport_tx) = create_test_room().await;

    handle
        .commands
        .send(RoomCommand::Leave)
        .await
        .expect("command channel open");

    let evt = wait_for_event(&mut handle.events, |e| matches!(e, RoomEvent::Closed)).await;
    assert_eq!(evt, RoomEvent::Closed);

    // The transport was closed exactly once, and the event loop is gone.
    assert_eq!(signaling.close_count(), 1);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(handle.commands.is_closed());
}
