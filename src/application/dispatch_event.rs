//! DispatchEventHandler - fans a committed domain event out to rooms.
//!
//! The single canonical emit path: collaborators that mutate incident state
//! hand the resulting `DispatchEvent` here, and nothing else talks to the
//! router. Routing is pure; this handler adds delivery and observability.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::domain::events::DispatchEvent;
use crate::domain::foundation::RealtimeError;
use crate::domain::routing::NotificationRouter;
use crate::ports::RealtimeTransport;

/// Handler that routes domain events and delivers the notifications.
pub struct DispatchEventHandler {
    router: NotificationRouter,
    transport: Arc<dyn RealtimeTransport>,
}

impl DispatchEventHandler {
    pub fn new(router: NotificationRouter, transport: Arc<dyn RealtimeTransport>) -> Self {
        Self { router, transport }
    }

    /// Routes an event and broadcasts every resulting notification.
    ///
    /// Returns the total number of connections messages were enqueued for.
    /// Empty rooms are normal (offline units); delivery never fails the
    /// event as a whole.
    pub fn handle(&self, event: &DispatchEvent) -> usize {
        let notifications = self.router.route(event);
        let rooms = notifications.len();

        let mut delivered = 0;
        for notification in notifications {
            delivered += self
                .transport
                .broadcast_to_room(&notification.room, notification.message);
        }

        tracing::info!(
            tag = event.tag(),
            rooms,
            delivered,
            "dispatch event fanned out"
        );
        delivered
    }

    /// Decodes and routes a raw `(tag, payload)` envelope.
    ///
    /// An unrecognized tag means a producer is emitting events the routing
    /// table does not know; that is a wiring bug, so it is surfaced loudly
    /// rather than silently dropped.
    pub fn handle_envelope(&self, tag: &str, payload: JsonValue) -> Result<usize, RealtimeError> {
        match DispatchEvent::from_envelope(tag, payload) {
            Ok(event) => Ok(self.handle(&event)),
            Err(e) => {
                tracing::error!(tag, "dropping undeliverable event: {}", e);
                Err(e)
            }
        }
    }
}
