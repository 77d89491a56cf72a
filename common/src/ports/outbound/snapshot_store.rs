use async_trait::async_trait;

use crate::error::PersistenceError;
use crate::models::host::{HostRecord, Snapshot};

/// Durable home of the host records.
///
/// Both operations are atomic with respect to a pass: a load observes a complete
/// earlier save, and a save either replaces the whole set or changes nothing.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn load_snapshot(&self) -> Result<Snapshot, PersistenceError>;

    async fn save_snapshot(&self, records: &[HostRecord]) -> Result<(), PersistenceError>;
}
