use pairdesk_core::PeerId;
use pairdesk_room::LinkState;

use crate::init_tracing;
use crate::utils::create_test_registry;

#[tokio::test]
async fn test_duplicate_join_keeps_single_entry() {
    init_tracing();

    let (mut registry, signaling, _signal_rx, _peer_rx) = create_test_registry();
    let remote = PeerId::from("p1");

    registry
        .initiate_offer(&remote)
        .await
        .expect("first offer should succeed");
    registry
        .initiate_offer(&remote)
        .await
        .expect("duplicate join should be recoverable");

    // The stale link was closed and replaced; never two entries.
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.state_of(&remote), Some(LinkState::HasLocalOffer));
    assert_eq!(signaling.offers_for(&remote).await.len(), 2);
}
