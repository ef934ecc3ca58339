//! Domain layer - the model and logic of the real-time dispatch core.
//!
//! - [`foundation`] - Value objects and the error taxonomy
//! - [`incident`] - Incident, timeline, and call-type records
//! - [`events`] - Domain events produced by collaborators after commit
//! - [`roster`] - Injected unit roster for push fan-out
//! - [`rooms`] - Room keys and the pure membership directory
//! - [`messages`] - The wire protocol spoken to connected clients
//! - [`routing`] - The event-to-notification dispatch table

pub mod events;
pub mod foundation;
pub mod incident;
pub mod messages;
pub mod rooms;
pub mod roster;
pub mod routing;
