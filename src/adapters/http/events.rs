//! Event ingestion endpoint.
//!
//! Collaborating services that commit incident state hand the resulting
//! `(tag, payload)` envelope to `POST /internal/events`; fan-out happens
//! here, in one place, rather than in every producer.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use crate::application::DispatchEventHandler;
use crate::domain::foundation::RealtimeError;

/// Raw event envelope as produced by collaborators.
#[derive(Debug, Deserialize)]
pub struct EventEnvelope {
    pub tag: String,
    pub payload: JsonValue,
}

/// Accepts a committed domain event and fans it out.
///
/// Replies `202` with the delivery count; a bad tag or payload is the
/// producer's error, not ours, so it comes back as `400`.
pub async fn ingest_event(
    State(dispatch): State<Arc<DispatchEventHandler>>,
    Json(envelope): Json<EventEnvelope>,
) -> (StatusCode, Json<JsonValue>) {
    match dispatch.handle_envelope(&envelope.tag, envelope.payload) {
        Ok(delivered) => (StatusCode::ACCEPTED, Json(json!({ "delivered": delivered }))),
        Err(
            e @ (RealtimeError::UnrecognizedEventTag(_) | RealtimeError::InvalidEventPayload { .. }),
        ) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        ),
    }
}

/// Creates the event ingestion router.
///
/// Routes:
/// - `POST /internal/events` - fan a committed domain event out to rooms
pub fn events_router() -> Router<Arc<DispatchEventHandler>> {
    Router::new().route("/internal/events", post(ingest_event))
}
