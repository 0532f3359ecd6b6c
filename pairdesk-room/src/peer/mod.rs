mod link;
mod peer_event;
mod registry;

pub use link::*;
pub use peer_event::*;
pub use registry::*;
