//! Connection registry: live connections, announcements, room membership.
//!
//! One `std::sync::Mutex` guards both the connection table and the
//! `RoomDirectory`. Every membership operation validates the connection and
//! mutates the directory under that same lock, so a join racing a disconnect
//! either sees the connection and lands before teardown (and is then undone
//! by `remove_connection_everywhere`) or sees it gone and is rejected with
//! `UnknownConnection` - membership can never be resurrected after teardown.
//!
//! Nothing awaits while the lock is held; outbound delivery uses `try_send`
//! onto each connection's bounded queue after sender handles are cloned out.

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Mutex;

use tokio::sync::mpsc;

use crate::domain::foundation::{ConnectionId, RealtimeError, UnitId};
use crate::domain::messages::ServerMessage;
use crate::domain::rooms::{RoomDirectory, RoomKey};

/// Sender half of a connection's outbound queue.
pub type OutboundSender = mpsc::Sender<ServerMessage>;

struct ConnectionEntry {
    sender: OutboundSender,
    announced: Option<UnitId>,
}

struct RegistryInner {
    connections: HashMap<ConnectionId, ConnectionEntry>,
    directory: RoomDirectory,
}

/// Tracks every live connection and its room memberships.
pub struct ConnectionRegistry {
    inner: Mutex<RegistryInner>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                connections: HashMap::new(),
                directory: RoomDirectory::new(),
            }),
        }
    }

    /// Registers a new connection and assigns its identifier.
    pub fn register(&self, sender: OutboundSender) -> ConnectionId {
        let id = ConnectionId::new();
        let mut inner = self.lock();
        inner.connections.insert(
            id,
            ConnectionEntry {
                sender,
                announced: None,
            },
        );
        tracing::debug!(connection = %id, total = inner.connections.len(), "connection registered");
        id
    }

    /// Records which unit a connection speaks for.
    ///
    /// Re-announcing the same unit id is a no-op; announcing a different one
    /// is rejected and the prior announcement is kept.
    pub fn announce(&self, connection: ConnectionId, unit: UnitId) -> Result<(), RealtimeError> {
        let mut inner = self.lock();
        let entry = inner
            .connections
            .get_mut(&connection)
            .ok_or(RealtimeError::UnknownConnection(connection))?;

        match &entry.announced {
            None => {
                entry.announced = Some(unit);
                Ok(())
            }
            Some(existing) if *existing == unit => Ok(()),
            Some(existing) => Err(RealtimeError::AlreadyAnnounced {
                connection,
                existing: existing.clone(),
                requested: unit,
            }),
        }
    }

    /// The unit a connection has announced, if any.
    pub fn announced_unit(&self, connection: ConnectionId) -> Option<UnitId> {
        self.lock()
            .connections
            .get(&connection)
            .and_then(|entry| entry.announced.clone())
    }

    /// Adds a connection to a room. Idempotent.
    pub fn join_room(&self, connection: ConnectionId, room: RoomKey) -> Result<(), RealtimeError> {
        let mut inner = self.lock();
        if !inner.connections.contains_key(&connection) {
            return Err(RealtimeError::UnknownConnection(connection));
        }
        inner.directory.join(room, connection);
        Ok(())
    }

    /// Removes a connection from a room. Idempotent; absence is not an error.
    pub fn leave_room(&self, connection: ConnectionId, room: &RoomKey) -> Result<(), RealtimeError> {
        let mut inner = self.lock();
        if !inner.connections.contains_key(&connection) {
            return Err(RealtimeError::UnknownConnection(connection));
        }
        inner.directory.leave(room, connection);
        Ok(())
    }

    /// Every room the connection currently belongs to.
    pub fn rooms_for(&self, connection: ConnectionId) -> Result<HashSet<RoomKey>, RealtimeError> {
        let inner = self.lock();
        if !inner.connections.contains_key(&connection) {
            return Err(RealtimeError::UnknownConnection(connection));
        }
        Ok(inner.directory.rooms_for(connection))
    }

    /// Tears down a connection: removes it from every room, then forgets it.
    ///
    /// Processed to completion under one lock acquisition; idempotent for
    /// already-unregistered connections.
    pub fn unregister(&self, connection: ConnectionId) {
        let mut inner = self.lock();
        inner.directory.remove_connection_everywhere(connection);
        if inner.connections.remove(&connection).is_some() {
            tracing::debug!(
                connection = %connection,
                total = inner.connections.len(),
                "connection unregistered"
            );
        }
    }

    /// Enqueues a message for one connection.
    pub fn send(
        &self,
        connection: ConnectionId,
        message: ServerMessage,
    ) -> Result<(), RealtimeError> {
        let sender = {
            let inner = self.lock();
            inner
                .connections
                .get(&connection)
                .map(|entry| entry.sender.clone())
                .ok_or(RealtimeError::UnknownConnection(connection))?
        };
        deliver(&sender, connection, message);
        Ok(())
    }

    /// Enqueues a message for every member of a room.
    ///
    /// Returns the number of connections the message was enqueued for; an
    /// unknown or empty room delivers to nobody.
    pub fn broadcast_to_room(&self, room: &RoomKey, message: ServerMessage) -> usize {
        let targets: Vec<(ConnectionId, OutboundSender)> = {
            let inner = self.lock();
            inner
                .directory
                .members(room)
                .into_iter()
                .filter_map(|id| {
                    inner
                        .connections
                        .get(&id)
                        .map(|entry| (id, entry.sender.clone()))
                })
                .collect()
        };

        for (connection, sender) in &targets {
            deliver(sender, *connection, message.clone());
        }
        targets.len()
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.lock().connections.len()
    }

    /// Current members of a room, for diagnostics and tests.
    pub fn members(&self, room: &RoomKey) -> HashSet<ConnectionId> {
        self.lock().directory.members(room)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RegistryInner> {
        // Lock poisoning would mean a panic while holding membership state;
        // recover with the data as-is rather than cascading the panic.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-blocking delivery onto a bounded queue. A full queue drops the
/// message for that slow client; a closed queue means the writer task is
/// already gone and teardown will follow.
fn deliver(sender: &OutboundSender, connection: ConnectionId, message: ServerMessage) {
    match sender.try_send(message) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(msg)) => {
            tracing::warn!(
                connection = %connection,
                event = msg.event_name(),
                "outbound queue full, dropping message"
            );
        }
        Err(mpsc::error::TrySendError::Closed(_)) => {
            tracing::debug!(connection = %connection, "outbound queue closed");
        }
    }
}
