mod peer;
mod problem;
mod room;
mod shared_state;
mod signaling;
mod whiteboard;

pub use peer::PeerId;
pub use problem::{Problem, ProblemId};
pub use room::RoomId;
pub use shared_state::{RoomTab, SharedChange, SharedState};
pub use signaling::{ClientSignal, IceServerConfig, ServerSignal};
pub use whiteboard::Snapshot;
