pub use pairdesk_core::model::{PeerId, RoomId};

pub mod model {
    pub use pairdesk_core::model::*;
}

#[cfg(feature = "room")]
pub mod room {
    pub use pairdesk_room::*;
}
