//! FirstAlert dispatch server binary.
//!
//! Wires the realtime core together: configuration, logging, the connection
//! registry, the notification router, and the axum server exposing the
//! `/ws` endpoint plus the internal event ingestion route.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use firstalert_dispatch::adapters::http::events_router;
use firstalert_dispatch::adapters::storage::InMemoryDispatchStore;
use firstalert_dispatch::adapters::websocket::{
    websocket_router, ConnectionRegistry, WebSocketState, WsTransport,
};
use firstalert_dispatch::application::{DispatchEventHandler, SyncIncidentsHandler};
use firstalert_dispatch::config::{AppConfig, ServerConfig};
use firstalert_dispatch::domain::roster::UnitRoster;
use firstalert_dispatch::domain::routing::NotificationRouter;
use firstalert_dispatch::ports::{roster_from_units, UnitReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.parse().expect("valid log filter")),
        )
        .init();

    tracing::info!(
        "firstalert-dispatch v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    // Development runs on the in-memory store; a database-backed store
    // slots in here without touching the realtime wiring.
    let store = Arc::new(InMemoryDispatchStore::new());

    let roster = load_roster(store.as_ref(), &config).await;
    tracing::info!(
        fire_marshals = roster.fire_marshals().len(),
        dispatchers = roster.dispatchers().len(),
        "push roster loaded"
    );

    let registry = Arc::new(ConnectionRegistry::new());
    let transport = Arc::new(WsTransport::new(registry.clone()));

    let dispatch = Arc::new(DispatchEventHandler::new(
        NotificationRouter::new(roster),
        transport.clone(),
    ));
    let sync = Arc::new(SyncIncidentsHandler::new(store.clone(), transport.clone()));

    let ws_state = WebSocketState::new(registry, sync, config.realtime.channel_capacity);

    let app = Router::new()
        .merge(websocket_router().with_state(ws_state))
        .merge(events_router().with_state(dispatch))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server));

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Builds the push roster from the unit store, falling back to the
/// configured shape when the store is empty or unreachable.
async fn load_roster(store: &dyn UnitReader, config: &AppConfig) -> UnitRoster {
    match store.list_units().await {
        Ok(units) if !units.is_empty() => roster_from_units(&units),
        Ok(_) => {
            tracing::info!("unit store is empty, using configured roster");
            config.roster.generate()
        }
        Err(e) => {
            tracing::warn!("unit store unavailable ({}), using configured roster", e);
            config.roster.generate()
        }
    }
}

/// Permissive CORS unless explicit origins are configured; dispatch clients
/// connect from station browsers on whatever host is handy.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install shutdown handler: {}", e);
    }
}
