//! IncidentReader port - the storage query behind resynchronization.
//!
//! The core never writes incidents; the CRUD collaborators own persistence.
//! This read-only seam exists so the sync responder can take a point-in-time
//! snapshot without knowing the storage technology.

use async_trait::async_trait;

use crate::domain::foundation::RealtimeError;
use crate::domain::incident::IncidentRecord;

/// Read-only access to incident state.
#[async_trait]
pub trait IncidentReader: Send + Sync {
    /// All incidents whose status is `active`, in storage order.
    ///
    /// A failure maps to `RealtimeError::StorageUnavailable`; the caller
    /// replies to the requesting client rather than retrying.
    async fn list_active_incidents(&self) -> Result<Vec<IncidentRecord>, RealtimeError>;
}
