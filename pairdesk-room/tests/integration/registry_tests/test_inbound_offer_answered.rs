use pairdesk_core::PeerId;
use pairdesk_room::LinkState;

use crate::init_tracing;
use crate::utils::{create_test_registry, sample_remote_offer};

#[tokio::test]
async fn test_inbound_offer_answered() {
    init_tracing();

    let (mut registry, signaling, _signal_rx, _peer_rx) = create_test_registry();
    let remote = PeerId::from("p1");

    let offer = sample_remote_offer()
        .await
        .expect("failed to build remote offer");

    registry
        .accept_offer(&remote, offer)
        .await
        .expect("accepting a valid offer should succeed");

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.state_of(&remote), Some(LinkState::Negotiated));

    let answers = signaling.answers_for(&remote).await;
    assert_eq!(answers.len(), 1, "exactly one answer for p1");
    assert!(answers[0].contains("v=0"));
}
