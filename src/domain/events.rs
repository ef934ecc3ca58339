//! Domain events announced by the real-time layer.
//!
//! A `DispatchEvent` describes a state change that a collaborator has already
//! persisted - events are never produced speculatively before commit. The
//! CRUD handlers construct the typed variants directly; `from_envelope`
//! exists for collaborators that hand over `(tag, payload)` pairs.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::foundation::{IncidentId, RealtimeError, UnitId};
use super::incident::{CallTypeRecord, IncidentRecord, TimelineEntry};

/// Every event tag the routing table recognizes, in spec order.
pub const EVENT_TAGS: &[&str] = &[
    "incident_created",
    "unit_responded",
    "status_updated",
    "timeline_updated",
    "call_type_updated",
    "unit_name_updated",
];

/// Administrative action on the call-type catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallTypeAction {
    Added,
    Removed,
}

/// An immutable record of a committed state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum DispatchEvent {
    /// A new incident was created.
    IncidentCreated(IncidentRecord),

    /// A unit marked itself responding to an incident.
    UnitResponded {
        incident_id: IncidentId,
        user_id: UnitId,
        unit_number: String,
        incident_type: String,
    },

    /// A responding unit changed status (`on_scene`, `clear`).
    StatusUpdated {
        incident_id: IncidentId,
        user_id: UnitId,
        status: String,
    },

    /// An entry was appended to an incident's timeline.
    TimelineUpdated {
        incident_id: IncidentId,
        entry: TimelineEntry,
        user_id: UnitId,
    },

    /// An administrator added or removed a call type.
    CallTypeUpdated {
        action: CallTypeAction,
        call_type: CallTypeRecord,
        admin_user: UnitId,
    },

    /// An administrator renamed a unit.
    UnitNameUpdated {
        unit_id: UnitId,
        new_name: String,
        admin_user: UnitId,
    },
}

impl DispatchEvent {
    /// The routing tag for this event.
    pub fn tag(&self) -> &'static str {
        match self {
            DispatchEvent::IncidentCreated(_) => "incident_created",
            DispatchEvent::UnitResponded { .. } => "unit_responded",
            DispatchEvent::StatusUpdated { .. } => "status_updated",
            DispatchEvent::TimelineUpdated { .. } => "timeline_updated",
            DispatchEvent::CallTypeUpdated { .. } => "call_type_updated",
            DispatchEvent::UnitNameUpdated { .. } => "unit_name_updated",
        }
    }

    /// Decodes a `(tag, payload)` pair handed over by a collaborator.
    ///
    /// An unknown tag is a routing error distinct from a malformed payload:
    /// the former means the producer and the routing table disagree, the
    /// latter means a recognized producer sent something it should not have.
    pub fn from_envelope(tag: &str, payload: JsonValue) -> Result<Self, RealtimeError> {
        if !EVENT_TAGS.contains(&tag) {
            return Err(RealtimeError::UnrecognizedEventTag(tag.to_string()));
        }

        let mut object = match payload {
            JsonValue::Object(map) => map,
            other => {
                return Err(RealtimeError::InvalidEventPayload {
                    tag: tag.to_string(),
                    reason: format!("expected object payload, got {}", type_name(&other)),
                })
            }
        };
        object.insert("tag".to_string(), JsonValue::String(tag.to_string()));

        serde_json::from_value(JsonValue::Object(object)).map_err(|e| {
            RealtimeError::InvalidEventPayload {
                tag: tag.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
