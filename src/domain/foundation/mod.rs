//! Foundation types shared across the domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::RealtimeError;
pub use ids::{ConnectionId, IncidentId, UnitId};
pub use timestamp::Timestamp;
