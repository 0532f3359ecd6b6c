use pairdesk_core::PeerId;

use crate::init_tracing;
use crate::utils::create_test_registry;

#[tokio::test]
async fn test_teardown_idempotent() {
    init_tracing();

    let (mut registry, _signaling, _signal_rx, _peer_rx) = create_test_registry();

    registry
        .initiate_offer(&PeerId::from("p1"))
        .await
        .expect("offer to p1 should succeed");
    registry
        .initiate_offer(&PeerId::from("p2"))
        .await
        .expect("offer to p2 should succeed");
    assert_eq!(registry.len(), 2);

    registry.teardown().await;
    assert!(registry.is_empty());
    assert!(registry.remote_tracks().is_empty());

    // Second teardown on an already-empty registry: still fine.
    registry.teardown().await;
    assert!(registry.is_empty());
}
