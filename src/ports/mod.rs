//! Ports - interfaces to external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! real-time core and the outside world. Adapters implement these ports.
//!
//! - `IncidentReader` - read-only storage query used for resynchronization
//! - `UnitReader` - unit listing used to build the fan-out roster at startup
//! - `RealtimeTransport` - message delivery seam over the live connections

mod incident_reader;
mod transport;
mod unit_reader;

pub use incident_reader::IncidentReader;
pub use transport::RealtimeTransport;
pub use unit_reader::{roster_from_units, UnitReader, UnitRecord, UnitType};
