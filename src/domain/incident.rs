//! Incident, timeline, and call-type records.
//!
//! These serialize identically to the REST representation served by the CRUD
//! collaborators, so a sync snapshot and a REST response are byte-compatible
//! for the same record.

use serde::{Deserialize, Serialize};

use super::foundation::{IncidentId, Timestamp, UnitId};

/// Lifecycle status of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Active,
    Cleared,
}

/// A full incident record as persisted by the storage collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub id: IncidentId,
    pub incident_type: String,
    pub location: String,
    pub address: String,
    /// 1 = high, 2 = medium, 3 = low.
    pub priority: i32,
    pub units_requested: i32,
    #[serde(default)]
    pub pertinent_details: String,
    pub created_by: UnitId,
    pub created_at: Timestamp,
    pub status: IncidentStatus,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default)]
    pub responding_units: Vec<RespondingUnit>,
}

/// Kind of a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEntryKind {
    Note,
    Photo,
    ResourceRequest,
    StatusUpdate,
}

/// One entry in an incident's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: u32,
    pub timestamp: Timestamp,
    #[serde(rename = "type")]
    pub kind: TimelineEntryKind,
    pub content: String,
    pub user: UnitId,
}

/// A unit currently or previously responding to an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RespondingUnit {
    pub user_id: UnitId,
    pub unit_number: String,
    /// `responding`, `on_scene`, or `clear`.
    pub status: String,
    pub responded_at: Timestamp,
    pub on_scene_at: Option<Timestamp>,
    pub cleared_at: Option<Timestamp>,
}

/// A call type maintained by administrators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallTypeRecord {
    pub id: i64,
    pub name: String,
    pub default_priority: i32,
    pub created_by: UnitId,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_incident(id: i64, status: IncidentStatus) -> IncidentRecord {
        IncidentRecord {
            id: IncidentId::new(id),
            incident_type: "Structure Fire".to_string(),
            location: "123 Main St".to_string(),
            address: "123 Main St, Springfield".to_string(),
            priority: 1,
            units_requested: 3,
            pertinent_details: String::new(),
            created_by: UnitId::new("DISPATCH-1"),
            created_at: Timestamp::now(),
            status,
            timeline: Vec::new(),
            responding_units: Vec::new(),
        }
    }

    #[test]
    fn incident_serializes_with_rest_field_names() {
        let incident = sample_incident(7, IncidentStatus::Active);
        let json = serde_json::to_value(&incident).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["incident_type"], "Structure Fire");
        assert_eq!(json["status"], "active");
        assert!(json["timeline"].as_array().unwrap().is_empty());
        assert!(json["responding_units"].as_array().unwrap().is_empty());
    }

    #[test]
    fn timeline_entry_kind_uses_type_key() {
        let entry = TimelineEntry {
            id: 1,
            timestamp: Timestamp::now(),
            kind: TimelineEntryKind::ResourceRequest,
            content: "2 additional engines".to_string(),
            user: UnitId::new("FM-3"),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "resource_request");
    }

    #[test]
    fn incident_deserializes_with_missing_collections() {
        let json = serde_json::json!({
            "id": 1,
            "incident_type": "Hazmat",
            "location": "Rail yard",
            "address": "1 Depot Rd",
            "priority": 1,
            "units_requested": 5,
            "created_by": "DISPATCH-2",
            "created_at": "2025-06-01T12:00:00Z",
            "status": "active"
        });
        let incident: IncidentRecord = serde_json::from_value(json).unwrap();
        assert!(incident.timeline.is_empty());
        assert!(incident.pertinent_details.is_empty());
    }
}
