//! RealtimeTransport port - the delivery seam over live connections.
//!
//! The router and the application handlers never talk to sockets; they hand
//! routed messages to this trait. Any publish/subscribe-capable
//! bidirectional channel qualifies as an implementation.
//!
//! Methods are synchronous by design: delivery enqueues onto bounded
//! per-connection queues, so callers never hold membership state across an
//! await and a slow client sheds messages instead of stalling the fan-out
//! (guaranteed delivery is an explicit non-goal).

use crate::domain::foundation::{ConnectionId, RealtimeError};
use crate::domain::messages::ServerMessage;
use crate::domain::rooms::RoomKey;

/// Outbound message delivery over whatever transport is wired in.
pub trait RealtimeTransport: Send + Sync {
    /// Sends a message to one connection.
    ///
    /// Fails with `UnknownConnection` when the connection is no longer
    /// registered; the message is dropped.
    fn send(&self, connection: ConnectionId, message: ServerMessage)
        -> Result<(), RealtimeError>;

    /// Sends a message to every current member of a room.
    ///
    /// An unknown or empty room is a no-op. Returns the number of
    /// connections the message was enqueued for.
    fn broadcast_to_room(&self, room: &RoomKey, message: ServerMessage) -> usize;
}
