//! SyncIncidentsHandler - answers one client's incident snapshot request.

use std::sync::Arc;

use crate::domain::foundation::{ConnectionId, RealtimeError};
use crate::domain::messages::ServerMessage;
use crate::ports::{IncidentReader, RealtimeTransport};

/// Handler for `request_incident_sync`.
///
/// The snapshot goes to the requesting connection and nobody else; sync is
/// a point query, not a broadcast.
pub struct SyncIncidentsHandler {
    reader: Arc<dyn IncidentReader>,
    transport: Arc<dyn RealtimeTransport>,
}

impl SyncIncidentsHandler {
    pub fn new(reader: Arc<dyn IncidentReader>, transport: Arc<dyn RealtimeTransport>) -> Self {
        Self { reader, transport }
    }

    /// Fetches all active incidents and sends them to the requester.
    ///
    /// A storage failure is reported back to the requester as an error
    /// message; other clients never see either outcome.
    pub async fn handle(&self, connection: ConnectionId) -> Result<usize, RealtimeError> {
        match self.reader.list_active_incidents().await {
            Ok(incidents) => {
                let count = incidents.len();
                self.transport
                    .send(connection, ServerMessage::IncidentSync { incidents })?;
                tracing::debug!(connection = %connection, count, "incident sync sent");
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(connection = %connection, "incident sync failed: {}", e);
                // Best effort: the requester may already be gone.
                let _ = self.transport.send(
                    connection,
                    ServerMessage::Error {
                        message: "Failed to sync incidents".to_string(),
                    },
                );
                Err(e)
            }
        }
    }
}
