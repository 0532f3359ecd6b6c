use pairdesk_core::{ClientSignal, PeerId};
use pairdesk_room::LinkState;

use crate::init_tracing;
use crate::utils::create_test_registry;

#[tokio::test]
async fn test_offer_on_user_joined() {
    init_tracing();

    let (mut registry, signaling, _signal_rx, _peer_rx) = create_test_registry();
    let remote = PeerId::from("p1");

    registry
        .initiate_offer(&remote)
        .await
        .expect("offer should succeed");

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.state_of(&remote), Some(LinkState::HasLocalOffer));

    let offers = signaling.offers_for(&remote).await;
    assert_eq!(offers.len(), 1, "exactly one offer for p1");
    assert!(!offers[0].is_empty());

    // Nothing else went out; the offer is the whole conversation so far.
    let sent = signaling.sent().await;
    assert!(
        sent.iter()
            .all(|s| matches!(s, ClientSignal::Offer { .. })),
        "only offers expected, got {:?}",
        sent
    );
}
