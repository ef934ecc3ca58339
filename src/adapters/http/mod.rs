//! HTTP adapter - the internal event ingestion surface.

pub mod events;

pub use events::{events_router, ingest_event};
