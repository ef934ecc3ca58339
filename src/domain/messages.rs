//! The wire protocol spoken to connected clients.
//!
//! Every message is JSON discriminated by an `event` field, mirroring the
//! named-event shape of the original Socket.IO protocol. The payload shapes
//! here are a compatibility contract: downstream UIs pattern-match on both
//! field names and message text, so they change only deliberately.

use serde::{Deserialize, Serialize};

use super::foundation::{IncidentId, UnitId};
use super::incident::{CallTypeRecord, IncidentRecord, TimelineEntry};
use crate::domain::events::CallTypeAction;

// ============================================
// Client -> Server Messages
// ============================================

/// Control messages a client may send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Announce a unit id and join its private notification room.
    JoinUserRoom { user_id: UnitId },

    /// Join the general broadcast room.
    JoinGeneralRoom,

    /// Leave a unit's private room (the announcement itself is kept).
    LeaveUserRoom { user_id: UnitId },

    /// Request a snapshot of all active incidents.
    RequestIncidentSync,

    /// Connection liveness probe.
    Ping,
}

// ============================================
// Server -> Client Messages
// ============================================

/// Every message the server can send to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established.
    Connected { message: String },

    /// Liveness probe response.
    Pong { timestamp: String },

    /// Snapshot of all active incidents, sent only to an explicit requester.
    IncidentSync { incidents: Vec<IncidentRecord> },

    /// An error local to this client's request.
    Error { message: String },

    /// A new incident, broadcast to the general room as the full record.
    IncidentCreated(IncidentRecord),

    /// A unit announced it is responding, broadcast to the general room.
    UnitResponse(UnitResponseNotice),

    /// A responding unit changed status, broadcast to the general room.
    StatusUpdate(StatusNotice),

    /// A timeline entry was appended, broadcast to the general room.
    TimelineUpdate(TimelineNotice),

    /// The call-type catalog changed, broadcast to the general room.
    CallTypeUpdate(CallTypeNotice),

    /// A unit was renamed, broadcast to the general room.
    UnitNameUpdate(UnitNameNotice),

    /// A targeted, user-facing alert delivered to a unit's private room.
    PushNotification(PushNotification),
}

impl ServerMessage {
    /// The wire event name, for logging.
    pub fn event_name(&self) -> &'static str {
        match self {
            ServerMessage::Connected { .. } => "connected",
            ServerMessage::Pong { .. } => "pong",
            ServerMessage::IncidentSync { .. } => "incident_sync",
            ServerMessage::Error { .. } => "error",
            ServerMessage::IncidentCreated(_) => "incident_created",
            ServerMessage::UnitResponse(_) => "unit_response",
            ServerMessage::StatusUpdate(_) => "status_update",
            ServerMessage::TimelineUpdate(_) => "timeline_update",
            ServerMessage::CallTypeUpdate(_) => "call_type_update",
            ServerMessage::UnitNameUpdate(_) => "unit_name_update",
            ServerMessage::PushNotification(_) => "push_notification",
        }
    }
}

/// Broadcast payload for a unit response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitResponseNotice {
    pub message: String,
    pub incident_id: IncidentId,
    pub user_id: UnitId,
    pub unit_number: String,
}

/// Broadcast payload for a unit status change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusNotice {
    pub message: String,
    pub incident_id: IncidentId,
    pub user_id: UnitId,
    pub status: String,
}

/// Broadcast payload for a timeline append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineNotice {
    pub incident_id: IncidentId,
    pub entry: TimelineEntry,
    pub user_id: UnitId,
}

/// Broadcast payload for a call-type catalog change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallTypeNotice {
    pub action: CallTypeAction,
    pub call_type: CallTypeRecord,
    pub admin_user: UnitId,
}

/// Broadcast payload for a unit rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitNameNotice {
    pub unit_id: UnitId,
    pub new_name: String,
    pub admin_user: UnitId,
}

/// Category of a push notification, matched on by client UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PushKind {
    NewIncident,
    UnitResponse,
    ResourceRequest,
}

/// An actionable alert routed to a specific unit's private room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushNotification {
    #[serde(rename = "type")]
    pub kind: PushKind,
    pub title: String,
    pub message: String,
    pub incident_id: IncidentId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}
