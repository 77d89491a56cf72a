//! # JSON File Store
//!
//! Keeps the snapshot as a pretty-printed JSON array of records.
//!
//! Saves never leave a half-written file behind: the new content goes to a
//! sibling `.tmp` file, is flushed to disk, then renamed over the old one.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use hostsync_common::error::PersistenceError;
use hostsync_common::models::host::{HostRecord, Snapshot};
use hostsync_common::ports::outbound::snapshot_store::SnapshotStore;
use tokio::io::AsyncWriteExt;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn corrupt(&self, reason: impl ToString) -> PersistenceError {
        PersistenceError::Corrupt {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl SnapshotStore for JsonFileSnapshotStore {
    async fn load_snapshot(&self) -> Result<Snapshot, PersistenceError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No snapshot at {}, starting empty", self.path.display());
                return Ok(Snapshot::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if text.trim().is_empty() {
            return Ok(Snapshot::new());
        }

        let records: Vec<HostRecord> = serde_json::from_str(&text).map_err(|e| self.corrupt(e))?;
        let mut snapshot = Snapshot::new();
        for record in records {
            if snapshot.contains_key(&record.identifier) {
                return Err(self.corrupt(format!("duplicate identifier {}", record.identifier)));
            }
            snapshot.insert(record.identifier.clone(), record);
        }
        Ok(snapshot)
    }

    async fn save_snapshot(&self, records: &[HostRecord]) -> Result<(), PersistenceError> {
        let body = serde_json::to_vec_pretty(records).map_err(|e| self.corrupt(e))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let temp = self.temp_path();
        let mut file = tokio::fs::File::create(&temp)
            .await
            .map_err(|e| self.io_error(e))?;
        file.write_all(&body).await.map_err(|e| self.io_error(e))?;
        file.sync_all().await.map_err(|e| self.io_error(e))?;
        drop(file);

        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        debug!(records = records.len(), "Saved snapshot to {}", self.path.display());
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
