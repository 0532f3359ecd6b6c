use pairdesk_core::ServerSignal;

/// Inbound traffic delivered into the room event loop.
#[derive(Debug)]
pub enum TransportEvent {
    Signal(ServerSignal),
    /// The underlying connection is gone. Fatal to the room; there is no
    /// reconnect policy (the session simply ends).
    Closed,
}
