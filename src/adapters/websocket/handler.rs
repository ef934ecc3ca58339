//! WebSocket upgrade handler for dispatch clients.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Upgrade to WebSocket
//! 2. Register the connection and send the connected greeting
//! 3. Writer task drains the outbound queue to the socket
//! 4. Reader loop dispatches control messages until disconnect
//! 5. Unregister on disconnect (teardown always runs)

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::application::SyncIncidentsHandler;
use crate::domain::foundation::{ConnectionId, RealtimeError, Timestamp};
use crate::domain::messages::{ClientMessage, ServerMessage};
use crate::domain::rooms::RoomKey;

use super::registry::ConnectionRegistry;

/// Greeting sent as soon as a connection is registered.
const CONNECTED_GREETING: &str = "Connected to FirstAlert dispatch server";

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    /// Registry for connection lifecycle and room membership.
    pub registry: Arc<ConnectionRegistry>,
    /// Handler for incident snapshot requests.
    pub sync: Arc<SyncIncidentsHandler>,
    /// Capacity of each connection's outbound queue.
    pub channel_capacity: usize,
}

impl WebSocketState {
    /// Create a new WebSocket state.
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        sync: Arc<SyncIncidentsHandler>,
        channel_capacity: usize,
    ) -> Self {
        Self {
            registry,
            sync,
            channel_capacity,
        }
    }
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<WebSocketState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection.
///
/// Runs for the lifetime of the connection; whichever half closes first
/// tears the whole connection down, and unregistration runs exactly once on
/// every exit path.
async fn handle_socket(socket: WebSocket, state: WebSocketState) {
    let (mut sender, mut receiver) = socket.split();

    let (tx, mut rx) = mpsc::channel::<ServerMessage>(state.channel_capacity);
    let connection = state.registry.register(tx);

    if state
        .registry
        .send(
            connection,
            ServerMessage::Connected {
                message: CONNECTED_GREETING.to_string(),
            },
        )
        .is_err()
    {
        // Client disconnected before the greeting could even be queued.
        state.registry.unregister(connection);
        return;
    }

    // Writer task: drain the outbound queue to the socket.
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json = match serde_json::to_string(&msg) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!(event = msg.event_name(), "serialization failed: {}", e);
                    continue;
                }
            };
            if let Err(e) = sender.send(Message::Text(json)).await {
                tracing::debug!(connection = %connection, "send error, closing: {}", e);
                break;
            }
        }
    });

    // Reader loop: dispatch control messages.
    let registry = state.registry.clone();
    let sync = state.sync.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => {
                    handle_client_message(&registry, &sync, connection, &text);
                }
                Ok(Message::Binary(_)) => {
                    tracing::warn!(
                        connection = %connection,
                        "received unsupported binary message"
                    );
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                    // Protocol-level frames, handled by axum.
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(connection = %connection, "client sent close frame");
                    break;
                }
                Err(e) => {
                    tracing::debug!(connection = %connection, "receive error: {}", e);
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    state.registry.unregister(connection);
    tracing::debug!(connection = %connection, "connection closed");
}

/// Dispatch a single decoded client message.
fn handle_client_message(
    registry: &Arc<ConnectionRegistry>,
    sync: &Arc<SyncIncidentsHandler>,
    connection: ConnectionId,
    text: &str,
) {
    let msg = match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::debug!(connection = %connection, "undecodable client message: {}", e);
            reply(registry, connection, ServerMessage::Error {
                message: "Unrecognized message".to_string(),
            });
            return;
        }
    };

    match msg {
        ClientMessage::JoinUserRoom { user_id } => {
            match registry.announce(connection, user_id.clone()) {
                Ok(()) => {
                    let _ = registry.join_room(connection, RoomKey::Unit(user_id.clone()));
                    tracing::info!(connection = %connection, unit = %user_id, "joined user room");
                }
                Err(RealtimeError::AlreadyAnnounced { existing, .. }) => {
                    reply(registry, connection, ServerMessage::Error {
                        message: format!("Connection already announced as {}", existing),
                    });
                }
                Err(e) => {
                    tracing::debug!(connection = %connection, "join_user_room failed: {}", e);
                }
            }
        }
        ClientMessage::JoinGeneralRoom => {
            let _ = registry.join_room(connection, RoomKey::General);
        }
        ClientMessage::LeaveUserRoom { user_id } => {
            // The announcement itself is kept; only membership changes.
            let _ = registry.leave_room(connection, &RoomKey::Unit(user_id));
        }
        ClientMessage::RequestIncidentSync => {
            let sync = sync.clone();
            tokio::spawn(async move {
                if let Err(e) = sync.handle(connection).await {
                    tracing::warn!(connection = %connection, "incident sync failed: {}", e);
                }
            });
        }
        ClientMessage::Ping => {
            reply(registry, connection, ServerMessage::Pong {
                timestamp: Timestamp::now().to_rfc3339(),
            });
        }
    }
}

/// Best-effort direct reply; the connection may already be gone.
fn reply(registry: &Arc<ConnectionRegistry>, connection: ConnectionId, message: ServerMessage) {
    if let Err(e) = registry.send(connection, message) {
        tracing::debug!(connection = %connection, "reply dropped: {}", e);
    }
}

/// Create the axum router for the WebSocket endpoint.
///
/// # Example
///
/// ```ignore
/// let app = websocket_router().with_state(ws_state);
/// ```
pub fn websocket_router() -> axum::Router<WebSocketState> {
    use axum::routing::get;

    axum::Router::new().route("/ws", get(ws_handler))
}
