//! Error taxonomy for the real-time core.
//!
//! Propagation policy:
//! - Membership errors (`UnknownConnection`) are local and non-fatal; callers
//!   log a warning and drop the offending message.
//! - Routing errors (`UnrecognizedEventTag`, `InvalidEventPayload`) are
//!   surfaced - a silent gap in notification delivery is worse than a visible
//!   one.
//! - Storage errors (`StorageUnavailable`) are reported to the single
//!   requester only, never broadcast.
//!
//! No error in this taxonomy ever takes down the process for one bad message.

use thiserror::Error;

use super::{ConnectionId, UnitId};

/// Errors raised by the real-time membership, routing, and sync layers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RealtimeError {
    /// A connection tried to announce a unit id after already announcing a
    /// different one. The prior announcement is kept.
    #[error("connection {connection} already announced as {existing}, rejected re-announce as {requested}")]
    AlreadyAnnounced {
        connection: ConnectionId,
        existing: UnitId,
        requested: UnitId,
    },

    /// A message referenced a connection that is no longer registered.
    #[error("unknown connection {0}")]
    UnknownConnection(ConnectionId),

    /// A domain event carried a tag outside the routing dispatch table.
    /// Programming error on the producer side; surfaced, never dropped
    /// silently.
    #[error("unrecognized event tag '{0}'")]
    UnrecognizedEventTag(String),

    /// A recognized event tag arrived with a payload that does not decode.
    #[error("invalid payload for event '{tag}': {reason}")]
    InvalidEventPayload { tag: String, reason: String },

    /// The storage collaborator failed to answer a sync read.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}
