use pairdesk_core::IceServerConfig;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RoomConfig {
    pub ice_servers: Vec<IceServerConfig>,

    /// Minimum spacing between outbound whiteboard snapshots.
    pub whiteboard_throttle: Duration,

    /// Cadence of the elapsed-time tick.
    pub tick_interval: Duration,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            ice_servers: vec![IceServerConfig::stun("stun:stun.l.google.com:19302")],
            whiteboard_throttle: Duration::from_millis(50),
            tick_interval: Duration::from_secs(1),
        }
    }
}
