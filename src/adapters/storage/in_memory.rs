//! In-memory dispatch store for tests and development.
//!
//! Deterministic, lock-backed implementations of the reader ports, with a
//! failure toggle so callers can exercise their storage-error paths.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::RealtimeError;
use crate::domain::incident::{IncidentRecord, IncidentStatus};
use crate::ports::{IncidentReader, UnitReader, UnitRecord};

struct StoreState {
    incidents: Vec<IncidentRecord>,
    units: Vec<UnitRecord>,
    fail_reason: Option<String>,
}

/// In-memory `IncidentReader` + `UnitReader`.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable for
/// test and development use; production wires a database-backed store.
pub struct InMemoryDispatchStore {
    state: RwLock<StoreState>,
}

impl InMemoryDispatchStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                incidents: Vec::new(),
                units: Vec::new(),
                fail_reason: None,
            }),
        }
    }

    // === Test Helpers ===

    /// Adds an incident in insertion order.
    pub fn insert_incident(&self, incident: IncidentRecord) {
        self.write().incidents.push(incident);
    }

    /// Adds a unit in insertion order.
    pub fn insert_unit(&self, unit: UnitRecord) {
        self.write().units.push(unit);
    }

    /// Makes every subsequent read fail with `StorageUnavailable`.
    pub fn fail_reads(&self, reason: &str) {
        self.write().fail_reason = Some(reason.to_string());
    }

    /// Restores normal reads after `fail_reads`.
    pub fn restore_reads(&self) {
        self.write().fail_reason = None;
    }

    /// Number of stored incidents regardless of status.
    pub fn incident_count(&self) -> usize {
        self.read().incidents.len()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, StoreState> {
        self.state
            .read()
            .expect("InMemoryDispatchStore: lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, StoreState> {
        self.state
            .write()
            .expect("InMemoryDispatchStore: lock poisoned")
    }

    fn check_failure(&self) -> Result<(), RealtimeError> {
        match &self.read().fail_reason {
            Some(reason) => Err(RealtimeError::StorageUnavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryDispatchStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IncidentReader for InMemoryDispatchStore {
    async fn list_active_incidents(&self) -> Result<Vec<IncidentRecord>, RealtimeError> {
        self.check_failure()?;
        Ok(self
            .read()
            .incidents
            .iter()
            .filter(|incident| incident.status == IncidentStatus::Active)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UnitReader for InMemoryDispatchStore {
    async fn list_units(&self) -> Result<Vec<UnitRecord>, RealtimeError> {
        self.check_failure()?;
        Ok(self.read().units.clone())
    }
}
