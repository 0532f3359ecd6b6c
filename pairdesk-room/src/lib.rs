pub mod error;
pub mod media;
pub mod peer;
pub mod room;
pub mod session;
pub mod sync;
pub mod transport;
pub mod whiteboard;

pub use error::RoomError;
pub use media::LocalMedia;
pub use peer::{LinkState, PeerEvent, PeerLink, PeerRegistry};
pub use room::{RoomCommand, RoomConfig, RoomController, RoomEvent, RoomHandle};
pub use session::{SessionBackend, SessionInfo};
pub use sync::SharedStateSync;
pub use transport::{SignalingTransport, TransportEvent, WsTransport};
pub use whiteboard::{WhiteboardHandle, WhiteboardRelay};
