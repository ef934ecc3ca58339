//! WsTransport - `RealtimeTransport` implementation over the registry.

use std::sync::Arc;

use crate::domain::foundation::{ConnectionId, RealtimeError};
use crate::domain::messages::ServerMessage;
use crate::domain::rooms::RoomKey;
use crate::ports::RealtimeTransport;

use super::registry::ConnectionRegistry;

/// Delivers routed messages through the live WebSocket connections.
#[derive(Clone)]
pub struct WsTransport {
    registry: Arc<ConnectionRegistry>,
}

impl WsTransport {
    /// Creates a transport over a shared registry.
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }
}

impl RealtimeTransport for WsTransport {
    fn send(
        &self,
        connection: ConnectionId,
        message: ServerMessage,
    ) -> Result<(), RealtimeError> {
        self.registry.send(connection, message)
    }

    fn broadcast_to_room(&self, room: &RoomKey, message: ServerMessage) -> usize {
        self.registry.broadcast_to_room(room, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn transport_forwards_to_registry_members() {
        let registry = Arc::new(ConnectionRegistry::new());
        let transport = WsTransport::new(registry.clone());

        let (tx, mut rx) = mpsc::channel(4);
        let conn = registry.register(tx);
        registry.join_room(conn, RoomKey::General).unwrap();

        let delivered = transport.broadcast_to_room(
            &RoomKey::General,
            ServerMessage::Connected {
                message: "hello".to_string(),
            },
        );

        assert_eq!(delivered, 1);
        assert_eq!(rx.recv().await.unwrap().event_name(), "connected");
    }
}
