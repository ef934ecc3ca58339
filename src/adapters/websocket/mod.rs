//! WebSocket adapter - the live transport behind the real-time core.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     axum WebSocket upgrade                   │
//! │        handler.rs: one reader loop + writer task per client  │
//! └──────────────────────────────────────────────────────────────┘
//!                │ control messages            │ outbound queue
//!                ▼                             ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      ConnectionRegistry                      │
//! │   connection id → sender + announced unit                    │
//! │   owns the RoomDirectory under a single mutex                │
//! └──────────────────────────────────────────────────────────────┘
//!                ▲
//!                │ RealtimeTransport (send / broadcast_to_room)
//! ┌──────────────────────────────────────────────────────────────┐
//! │        WsTransport - port implementation over the registry   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod handler;
pub mod registry;
pub mod transport;

pub use handler::{websocket_router, ws_handler, WebSocketState};
pub use registry::ConnectionRegistry;
pub use transport::WsTransport;
