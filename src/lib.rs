//! FirstAlert Dispatch - real-time emergency incident fan-out.
//!
//! This crate implements the real-time layer of an incident dispatch system:
//! room membership tracking for connected field and dispatch clients, routing
//! of incident lifecycle events into typed notifications, and on-demand state
//! resynchronization. Persistence, authentication, and the REST CRUD surface
//! are external collaborators reached only through ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
