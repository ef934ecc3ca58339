//! UnitReader port - unit listing for roster construction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{RealtimeError, UnitId};
use crate::domain::roster::UnitRoster;

/// Category of an issued unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    FireMarshal,
    Dispatch,
    Admin,
}

/// A unit as issued by the storage collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub unit_id: UnitId,
    pub unit_name: String,
    pub unit_type: UnitType,
}

/// Read-only access to the issued unit registry.
#[async_trait]
pub trait UnitReader: Send + Sync {
    /// Every issued unit, in storage order.
    async fn list_units(&self) -> Result<Vec<UnitRecord>, RealtimeError>;
}

/// Builds the push fan-out roster from issued units.
///
/// Admin units never receive targeted pushes and are skipped.
pub fn roster_from_units(units: &[UnitRecord]) -> UnitRoster {
    let fire_marshals = units
        .iter()
        .filter(|u| u.unit_type == UnitType::FireMarshal)
        .map(|u| u.unit_id.clone())
        .collect();
    let dispatchers = units
        .iter()
        .filter(|u| u.unit_type == UnitType::Dispatch)
        .map(|u| u.unit_id.clone())
        .collect();
    UnitRoster::new(fire_marshals, dispatchers)
}
