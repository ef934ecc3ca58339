//! Application layer - use-case handlers over the domain and ports.
//!
//! Two handlers cover the realtime surface: `DispatchEventHandler` fans
//! domain events out to rooms, and `SyncIncidentsHandler` answers a single
//! client's snapshot request.

pub mod dispatch_event;
pub mod sync_incidents;

pub use dispatch_event::DispatchEventHandler;
pub use sync_incidents::SyncIncidentsHandler;
