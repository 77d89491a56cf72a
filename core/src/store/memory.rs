use async_trait::async_trait;
use hostsync_common::error::PersistenceError;
use hostsync_common::models::host::{HostRecord, Snapshot};
use hostsync_common::ports::outbound::snapshot_store::SnapshotStore;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    records: RwLock<Vec<HostRecord>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing record set, as if it had been saved earlier.
    pub fn with_records(records: Vec<HostRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Copy of the last saved record set.
    pub async fn records(&self) -> Vec<HostRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load_snapshot(&self) -> Result<Snapshot, PersistenceError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .map(|record| (record.identifier.clone(), record.clone()))
            .collect())
    }

    async fn save_snapshot(&self, records: &[HostRecord]) -> Result<(), PersistenceError> {
        *self.records.write().await = records.to_vec();
        Ok(())
    }
}
