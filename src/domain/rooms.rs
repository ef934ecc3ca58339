//! Room keys and the pure membership directory.
//!
//! A room is a named broadcast group. Two categories exist: the `general`
//! room for broadcast traffic, and one `user:<unit_id>` room per issued unit
//! for targeted push notifications.
//!
//! `RoomDirectory` is pure in-memory state: no I/O, no locking of its own.
//! The connection registry owns the single mutex around it, which keeps the
//! whole membership layer free of suspension points.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::foundation::{ConnectionId, UnitId};

/// Identifier of a broadcast room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum RoomKey {
    /// All clients interested in broadcast traffic.
    General,
    /// The private notification channel of one unit.
    Unit(UnitId),
}

impl RoomKey {
    /// The per-unit room for a given unit id.
    pub fn unit(id: impl Into<UnitId>) -> Self {
        RoomKey::Unit(id.into())
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomKey::General => write!(f, "general"),
            RoomKey::Unit(id) => write!(f, "user:{}", id),
        }
    }
}

impl From<RoomKey> for String {
    fn from(key: RoomKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for RoomKey {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s == "general" {
            return Ok(RoomKey::General);
        }
        match s.split_once(':') {
            Some(("user", id)) if !id.is_empty() => Ok(RoomKey::Unit(UnitId::new(id))),
            _ => Err(format!("invalid room key '{}'", s)),
        }
    }
}

/// In-memory index of room membership.
///
/// Membership is a set per room: joining twice is idempotent, leaving an
/// unjoined room is a no-op. Rooms are created lazily on first join and
/// garbage-collected when their last member leaves; correctness never
/// depends on that collection happening.
#[derive(Debug, Default)]
pub struct RoomDirectory {
    rooms: HashMap<RoomKey, HashSet<ConnectionId>>,
    /// Reverse index for O(1) full teardown on disconnect.
    memberships: HashMap<ConnectionId, HashSet<RoomKey>>,
}

impl RoomDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection to a room, creating the room if absent.
    pub fn join(&mut self, room: RoomKey, connection: ConnectionId) {
        self.rooms
            .entry(room.clone())
            .or_default()
            .insert(connection);
        self.memberships.entry(connection).or_default().insert(room);
    }

    /// Removes a connection from a room. No effect if already absent.
    pub fn leave(&mut self, room: &RoomKey, connection: ConnectionId) {
        if let Some(members) = self.rooms.get_mut(room) {
            members.remove(&connection);
            if members.is_empty() {
                self.rooms.remove(room);
            }
        }
        if let Some(rooms) = self.memberships.get_mut(&connection) {
            rooms.remove(room);
            if rooms.is_empty() {
                self.memberships.remove(&connection);
            }
        }
    }

    /// Current members of a room; empty set for an unknown room.
    pub fn members(&self, room: &RoomKey) -> HashSet<ConnectionId> {
        self.rooms.get(room).cloned().unwrap_or_default()
    }

    /// Every room a connection currently belongs to.
    pub fn rooms_for(&self, connection: ConnectionId) -> HashSet<RoomKey> {
        self.memberships
            .get(&connection)
            .cloned()
            .unwrap_or_default()
    }

    /// Removes a connection from every room it belongs to.
    ///
    /// Used by registry teardown; after this returns no room holds a
    /// reference to the connection.
    pub fn remove_connection_everywhere(&mut self, connection: ConnectionId) {
        if let Some(rooms) = self.memberships.remove(&connection) {
            for room in rooms {
                if let Some(members) = self.rooms.get_mut(&room) {
                    members.remove(&connection);
                    if members.is_empty() {
                        self.rooms.remove(&room);
                    }
                }
            }
        }
    }

    /// Number of rooms with at least one member.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
