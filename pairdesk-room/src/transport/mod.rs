mod signaling;
mod transport_event;
mod ws;

pub use signaling::*;
pub use transport_event::*;
pub use ws::*;
