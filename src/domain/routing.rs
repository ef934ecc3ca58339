//! Event-to-notification routing.
//!
//! The only place that knows which rooms care about which domain events, and
//! the only place that builds notification payloads. Routing is a fixed
//! dispatch table keyed by event variant; it is pure and performs no I/O -
//! the caller delivers the returned notifications through the transport,
//! which keeps this component testable without a live connection.

use super::events::DispatchEvent;
use super::incident::TimelineEntryKind;
use super::messages::{
    CallTypeNotice, PushKind, PushNotification, ServerMessage, StatusNotice, TimelineNotice,
    UnitNameNotice, UnitResponseNotice,
};
use super::rooms::RoomKey;
use super::roster::UnitRoster;

/// A routed outbound message: which room gets which payload.
///
/// Derived and immediately dispatched, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub room: RoomKey,
    pub message: ServerMessage,
}

/// Computes the notification set for each domain event.
#[derive(Debug, Clone)]
pub struct NotificationRouter {
    roster: UnitRoster,
}

impl NotificationRouter {
    /// Creates a router over an injected unit roster.
    pub fn new(roster: UnitRoster) -> Self {
        Self { roster }
    }

    /// Maps a domain event to its full notification set.
    ///
    /// Total over the event enum: every variant has a defined routing, and
    /// every event yields at least the general-room broadcast.
    pub fn route(&self, event: &DispatchEvent) -> Vec<Notification> {
        match event {
            DispatchEvent::IncidentCreated(incident) => {
                let mut out = vec![Notification {
                    room: RoomKey::General,
                    message: ServerMessage::IncidentCreated(incident.clone()),
                }];
                // Message text is a UI contract: "<type> at <location>".
                let push = PushNotification {
                    kind: PushKind::NewIncident,
                    title: "New Emergency Call".to_string(),
                    message: format!("{} at {}", incident.incident_type, incident.location),
                    incident_id: incident.id,
                    priority: Some(incident.priority),
                };
                out.extend(self.push_to_all(self.roster.fire_marshals(), push));
                out
            }

            DispatchEvent::UnitResponded {
                incident_id,
                user_id,
                unit_number,
                incident_type,
            } => {
                let mut out = vec![Notification {
                    room: RoomKey::General,
                    message: ServerMessage::UnitResponse(UnitResponseNotice {
                        message: format!("{} ({}) responding to call", user_id, unit_number),
                        incident_id: *incident_id,
                        user_id: user_id.clone(),
                        unit_number: unit_number.clone(),
                    }),
                }];
                let push = PushNotification {
                    kind: PushKind::UnitResponse,
                    title: "Unit Response".to_string(),
                    message: format!("{} responding to {}", user_id, incident_type),
                    incident_id: *incident_id,
                    priority: None,
                };
                out.extend(self.push_to_all(self.roster.dispatchers(), push));
                out
            }

            DispatchEvent::StatusUpdated {
                incident_id,
                user_id,
                status,
            } => {
                let status_text = match status.as_str() {
                    "on_scene" => "on scene",
                    "clear" => "cleared from call",
                    other => other,
                };
                vec![Notification {
                    room: RoomKey::General,
                    message: ServerMessage::StatusUpdate(StatusNotice {
                        message: format!("{} marked {}", user_id, status_text),
                        incident_id: *incident_id,
                        user_id: user_id.clone(),
                        status: status.clone(),
                    }),
                }]
            }

            DispatchEvent::TimelineUpdated {
                incident_id,
                entry,
                user_id,
            } => {
                let mut out = vec![Notification {
                    room: RoomKey::General,
                    message: ServerMessage::TimelineUpdate(TimelineNotice {
                        incident_id: *incident_id,
                        entry: entry.clone(),
                        user_id: user_id.clone(),
                    }),
                }];
                if entry.kind == TimelineEntryKind::ResourceRequest {
                    let push = PushNotification {
                        kind: PushKind::ResourceRequest,
                        title: "Resource Request".to_string(),
                        message: format!("{} requested {}", user_id, entry.content),
                        incident_id: *incident_id,
                        priority: None,
                    };
                    out.extend(self.push_to_all(self.roster.dispatchers(), push));
                }
                out
            }

            DispatchEvent::CallTypeUpdated {
                action,
                call_type,
                admin_user,
            } => vec![Notification {
                room: RoomKey::General,
                message: ServerMessage::CallTypeUpdate(CallTypeNotice {
                    action: *action,
                    call_type: call_type.clone(),
                    admin_user: admin_user.clone(),
                }),
            }],

            DispatchEvent::UnitNameUpdated {
                unit_id,
                new_name,
                admin_user,
            } => vec![Notification {
                room: RoomKey::General,
                message: ServerMessage::UnitNameUpdate(UnitNameNotice {
                    unit_id: unit_id.clone(),
                    new_name: new_name.clone(),
                    admin_user: admin_user.clone(),
                }),
            }],
        }
    }

    fn push_to_all(
        &self,
        units: &[crate::domain::foundation::UnitId],
        push: PushNotification,
    ) -> Vec<Notification> {
        units
            .iter()
            .map(|unit| Notification {
                room: RoomKey::Unit(unit.clone()),
                message: ServerMessage::PushNotification(push.clone()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::CallTypeAction;
    use crate::domain::foundation::{IncidentId, Timestamp, UnitId};
    use crate::domain::incident::{
        CallTypeRecord, IncidentRecord, IncidentStatus, TimelineEntry,
    };

    fn default_router() -> NotificationRouter {
        NotificationRouter::new(UnitRoster::generated(25, 5))
    }

    fn sample_incident() -> IncidentRecord {
        IncidentRecord {
            id: IncidentId::new(7),
            incident_type: "Structure Fire".to_string(),
            location: "123 Main St".to_string(),
            address: "123 Main St, Springfield".to_string(),
            priority: 1,
            units_requested: 3,
            pertinent_details: String::new(),
            created_by: UnitId::new("DISPATCH-1"),
            created_at: Timestamp::now(),
            status: IncidentStatus::Active,
            timeline: Vec::new(),
            responding_units: Vec::new(),
        }
    }

    fn timeline_entry(kind: TimelineEntryKind, content: &str) -> TimelineEntry {
        TimelineEntry {
            id: 1,
            timestamp: Timestamp::now(),
            kind,
            content: content.to_string(),
            user: UnitId::new("FM-3"),
        }
    }

    #[test]
    fn incident_created_yields_one_broadcast_and_a_push_per_fire_marshal() {
        let notifications = default_router()
            .route(&DispatchEvent::IncidentCreated(sample_incident()));

        assert_eq!(notifications.len(), 26);
        assert_eq!(notifications[0].room, RoomKey::General);
        assert!(matches!(
            notifications[0].message,
            ServerMessage::IncidentCreated(_)
        ));

        for (i, notification) in notifications[1..].iter().enumerate() {
            assert_eq!(
                notification.room,
                RoomKey::unit(format!("FM-{}", i + 1).as_str())
            );
            match &notification.message {
                ServerMessage::PushNotification(push) => {
                    assert_eq!(push.kind, PushKind::NewIncident);
                    assert_eq!(push.title, "New Emergency Call");
                    assert_eq!(push.message, "Structure Fire at 123 Main St");
                    assert_eq!(push.incident_id, IncidentId::new(7));
                    assert_eq!(push.priority, Some(1));
                }
                other => panic!("expected push notification, got {:?}", other),
            }
        }
    }

    #[test]
    fn incident_created_broadcast_carries_full_record() {
        let incident = sample_incident();
        let notifications =
            default_router().route(&DispatchEvent::IncidentCreated(incident.clone()));

        match &notifications[0].message {
            ServerMessage::IncidentCreated(record) => assert_eq!(record, &incident),
            other => panic!("expected incident_created, got {:?}", other),
        }
    }

    #[test]
    fn unit_responded_notifies_general_and_each_dispatcher() {
        let notifications = default_router().route(&DispatchEvent::UnitResponded {
            incident_id: IncidentId::new(7),
            user_id: UnitId::new("FM-4"),
            unit_number: "Engine 4".to_string(),
            incident_type: "Structure Fire".to_string(),
        });

        assert_eq!(notifications.len(), 6);
        match &notifications[0].message {
            ServerMessage::UnitResponse(notice) => {
                assert_eq!(notice.message, "FM-4 (Engine 4) responding to call");
                assert_eq!(notice.unit_number, "Engine 4");
            }
            other => panic!("expected unit_response, got {:?}", other),
        }
        match &notifications[1].message {
            ServerMessage::PushNotification(push) => {
                assert_eq!(push.kind, PushKind::UnitResponse);
                assert_eq!(push.title, "Unit Response");
                assert_eq!(push.message, "FM-4 responding to Structure Fire");
                assert_eq!(push.priority, None);
            }
            other => panic!("expected push notification, got {:?}", other),
        }
        assert_eq!(notifications[1].room, RoomKey::unit("DISPATCH-1"));
        assert_eq!(notifications[5].room, RoomKey::unit("DISPATCH-5"));
    }

    #[test]
    fn status_on_scene_uses_literal_phrasing() {
        let notifications = default_router().route(&DispatchEvent::StatusUpdated {
            incident_id: IncidentId::new(7),
            user_id: UnitId::new("FM-3"),
            status: "on_scene".to_string(),
        });

        assert_eq!(notifications.len(), 1);
        match &notifications[0].message {
            ServerMessage::StatusUpdate(notice) => {
                assert_eq!(notice.message, "FM-3 marked on scene");
                assert_eq!(notice.status, "on_scene");
            }
            other => panic!("expected status_update, got {:?}", other),
        }
    }

    #[test]
    fn status_clear_uses_literal_phrasing() {
        let notifications = default_router().route(&DispatchEvent::StatusUpdated {
            incident_id: IncidentId::new(7),
            user_id: UnitId::new("FM-3"),
            status: "clear".to_string(),
        });

        match &notifications[0].message {
            ServerMessage::StatusUpdate(notice) => {
                assert_eq!(notice.message, "FM-3 marked cleared from call");
            }
            other => panic!("expected status_update, got {:?}", other),
        }
    }

    #[test]
    fn unknown_status_passes_through_verbatim() {
        let notifications = default_router().route(&DispatchEvent::StatusUpdated {
            incident_id: IncidentId::new(7),
            user_id: UnitId::new("FM-3"),
            status: "staging".to_string(),
        });

        match &notifications[0].message {
            ServerMessage::StatusUpdate(notice) => {
                assert_eq!(notice.message, "FM-3 marked staging");
            }
            other => panic!("expected status_update, got {:?}", other),
        }
    }

    #[test]
    fn plain_timeline_entry_yields_broadcast_only() {
        let notifications = default_router().route(&DispatchEvent::TimelineUpdated {
            incident_id: IncidentId::new(4),
            entry: timeline_entry(TimelineEntryKind::Note, "Fire knocked down"),
            user_id: UnitId::new("FM-3"),
        });

        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].room, RoomKey::General);
    }

    #[test]
    fn resource_request_also_pushes_to_dispatchers() {
        let notifications = default_router().route(&DispatchEvent::TimelineUpdated {
            incident_id: IncidentId::new(4),
            entry: timeline_entry(TimelineEntryKind::ResourceRequest, "2 additional engines"),
            user_id: UnitId::new("FM-3"),
        });

        assert_eq!(notifications.len(), 6);
        match &notifications[1].message {
            ServerMessage::PushNotification(push) => {
                assert_eq!(push.kind, PushKind::ResourceRequest);
                assert_eq!(push.title, "Resource Request");
                assert_eq!(push.message, "FM-3 requested 2 additional engines");
            }
            other => panic!("expected push notification, got {:?}", other),
        }
    }

    #[test]
    fn call_type_and_unit_name_updates_are_broadcast_only() {
        let router = default_router();

        let call_type = router.route(&DispatchEvent::CallTypeUpdated {
            action: CallTypeAction::Added,
            call_type: CallTypeRecord {
                id: 6,
                name: "Water Rescue".to_string(),
                default_priority: 1,
                created_by: UnitId::new("ADMIN"),
                created_at: Timestamp::now(),
            },
            admin_user: UnitId::new("ADMIN"),
        });
        assert_eq!(call_type.len(), 1);
        assert_eq!(call_type[0].room, RoomKey::General);

        let rename = router.route(&DispatchEvent::UnitNameUpdated {
            unit_id: UnitId::new("FM-2"),
            new_name: "Fire Marshal 2 (North)".to_string(),
            admin_user: UnitId::new("ADMIN"),
        });
        assert_eq!(rename.len(), 1);
        assert_eq!(rename[0].room, RoomKey::General);
    }

    #[test]
    fn fan_out_follows_injected_roster_not_fixed_ranges() {
        let roster = UnitRoster::new(
            vec![UnitId::new("FM-31"), UnitId::new("FM-32")],
            vec![UnitId::new("DISPATCH-9")],
        );
        let router = NotificationRouter::new(roster);

        let created = router.route(&DispatchEvent::IncidentCreated(sample_incident()));
        assert_eq!(created.len(), 3);
        assert_eq!(created[1].room, RoomKey::unit("FM-31"));
        assert_eq!(created[2].room, RoomKey::unit("FM-32"));
    }
}
