//! Roster configuration - default push fan-out targets.

use serde::Deserialize;

use crate::domain::roster::UnitRoster;

use super::error::ValidationError;

/// Fallback roster shape used when the unit store is empty or unreachable.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Number of fire-marshal units (FM-1 .. FM-n)
    #[serde(default = "default_fire_marshal_count")]
    pub fire_marshal_count: u32,

    /// Number of dispatcher units (DISPATCH-1 .. DISPATCH-n)
    #[serde(default = "default_dispatch_count")]
    pub dispatch_count: u32,
}

impl RosterConfig {
    /// Generates the configured fallback roster.
    pub fn generate(&self) -> UnitRoster {
        UnitRoster::generated(self.fire_marshal_count, self.dispatch_count)
    }

    /// Validate roster configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fire_marshal_count == 0 || self.dispatch_count == 0 {
            return Err(ValidationError::EmptyRoster);
        }
        Ok(())
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            fire_marshal_count: default_fire_marshal_count(),
            dispatch_count: default_dispatch_count(),
        }
    }
}

fn default_fire_marshal_count() -> u32 {
    25
}

fn default_dispatch_count() -> u32 {
    5
}
