use pairdesk_core::{Problem, RoomId, ServerSignal, SharedChange, SharedState};
use pairdesk_room::{SharedStateSync, SignalingTransport};
use std::sync::Arc;

use crate::init_tracing;
use crate::utils::MockSignaling;

#[tokio::test]
async fn test_last_writer_wins_per_field() {
    init_tracing();

    let (signaling, _rx) = MockSignaling::new();
    let (mut sync, _state_rx) = SharedStateSync::new(
        RoomId::from("room-1"),
        SharedState::default(),
        Arc::new(signaling.clone()) as Arc<dyn SignalingTransport>,
    );

    sync.apply_local(SharedChange::Code("local draft".to_owned()))
        .await
        .expect("local apply should succeed");

    // A remote edit processed later simply overwrites the field.
    sync.apply_remote(&ServerSignal::CodeChanged {
        code: "remote draft".to_owned(),
    });
    assert_eq!(sync.state().code, "remote draft");

    // Other fields are untouched by the overwrite.
    assert_eq!(sync.state().language, "javascript");

    sync.apply_remote(&ServerSignal::ProblemSelected {
        problem: Problem::new("two-sum", "Two Sum"),
    });
    assert_eq!(
        sync.state().selected_problem.as_ref().map(|p| p.id.as_str()),
        Some("two-sum")
    );

    // Exactly the one local edit went out.
    assert_eq!(signaling.sent().await.len(), 1);
}
