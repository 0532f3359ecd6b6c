mod shared_state_sync;

pub use shared_state_sync::*;
