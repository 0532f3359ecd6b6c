use crate::error::RoomError;
use crate::transport::SignalingTransport;
use pairdesk_core::{ClientSignal, RoomId, ServerSignal, SharedChange, SharedState};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Keeps this participant's replica of the room-wide UI state and
/// propagates local edits.
///
/// Local edits apply immediately (optimistic) and then broadcast; remote
/// updates apply without re-broadcasting, so an update can never echo back
/// through the room. There is no versioning: the last message processed
/// wins per field, which is fine between two cooperating participants and
/// is a documented simplification, not a consistency guarantee.
pub struct SharedStateSync {
    room_id: RoomId,
    state: SharedState,
    state_tx: watch::Sender<SharedState>,
    signaling: Arc<dyn SignalingTransport>,
}

impl SharedStateSync {
    pub fn new(
        room_id: RoomId,
        initial: SharedState,
        signaling: Arc<dyn SignalingTransport>,
    ) -> (Self, watch::Receiver<SharedState>) {
        let (state_tx, state_rx) = watch::channel(initial.clone());
        (
            Self {
                room_id,
                state: initial,
                state_tx,
                signaling,
            },
            state_rx,
        )
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Apply a local edit and broadcast it.
    pub async fn apply_local(&mut self, change: SharedChange) -> Result<(), RoomError> {
        let signal = match change {
            SharedChange::Tab(tab) => {
                self.state.active_tab = tab;
                ClientSignal::TabChange {
                    room_id: self.room_id.clone(),
                    tab,
                }
            }
            SharedChange::Problem(problem) => {
                let problem_id = problem.id.clone();
                self.state.selected_problem = Some(problem);
                ClientSignal::SelectProblem {
                    room_id: self.room_id.clone(),
                    problem_id,
                }
            }
            SharedChange::Code(code) => {
                self.state.code = code.clone();
                ClientSignal::CodeChange {
                    room_id: self.room_id.clone(),
                    code,
                }
            }
            SharedChange::Language(language) => {
                self.state.language = language.clone();
                ClientSignal::LanguageChange {
                    room_id: self.room_id.clone(),
                    language,
                }
            }
        };

        self.publish();
        self.signaling.send(signal).await
    }

    /// Apply a remote-origin update. Never re-emits. Returns `false` for
    /// signals that are not shared-state updates so the caller can route
    /// them elsewhere.
    pub fn apply_remote(&mut self, signal: &ServerSignal) -> bool {
        match signal {
            ServerSignal::TabChanged { tab } => {
                debug!("Remote tab change: {:?}", tab);
                self.state.active_tab = *tab;
            }
            ServerSignal::ProblemSelected { problem } => {
                debug!("Remote problem selection: {}", problem.id);
                self.state.selected_problem = Some(problem.clone());
            }
            ServerSignal::CodeChanged { code } => {
                self.state.code = code.clone();
            }
            ServerSignal::LanguageChanged { language } => {
                self.state.language = language.clone();
            }
            _ => return false,
        }

        self.publish();
        true
    }

    fn publish(&self) {
        let _ = self.state_tx.send(self.state.clone());
    }
}
