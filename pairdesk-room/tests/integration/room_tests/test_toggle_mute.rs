use pairdesk_core::{ClientSignal, PeerId, ServerSignal};
use pairdesk_room::{RoomCommand, RoomEvent, TransportEvent};

use super::{create_test_room, wait_for_event, wait_for_signal};
use crate::init_tracing;

#[tokio::test]
async fn test_toggle_mute_does_not_renegotiate() {
    init_tracing();

    let (mut handle, signaling, mut wire_rx, transport_tx) = create_test_room().await;

    // Establish one peer first so there is something a renegotiation could
    // disturb.
    transport_tx
        .send(TransportEvent::Signal(ServerSignal::UserJoined {
            socket_id: PeerId::from("p1"),
        }))
        .await
        .expect("transport channel open");
    wait_for_signal(&mut wire_rx, |s| matches!(s, ClientSignal::Offer { .. })).await;

    let offers_before = signaling.offers_for(&PeerId::from("p1")).await.len();

    handle
        .commands
        .send(RoomCommand::ToggleMute)
        .await
        .expect("command channel open");
    let evt = wait_for_event(&mut handle.events, |e| {
        matches!(e, RoomEvent::MuteChanged(_))
    })
    .await;
    assert_eq!(evt, RoomEvent::MuteChanged(false));

    handle
        .commands
        .send(RoomCommand::ToggleMute)
        .await
        .expect("command channel open");
    let evt = wait_for_event(&mut handle.events, |e| {
        matches!(e, RoomEvent::MuteChanged(_))
    })
    .await;
    assert_eq!(evt, RoomEvent::MuteChanged(true));

    // No new offer or answer came out of either toggle.
    assert_eq!(
        signaling.offers_for(&PeerId::from("p1")).await.len(),
        offers_before
    );
    assert!(
        signaling
            .sent()
            .await
            .iter()
            .all(|s| !matches!(s, ClientSignal::Answer { .. })),
        "mute toggling must not renegotiate"
    );
}
