use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::host::Change;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Unreachable,
    Malformed,
    Timeout,
    Aborted,
}

/// A source that contributed nothing to the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterFailure {
    pub source_id: String,
    pub error_kind: FailureKind,
    pub message: String,
}

/// Outcome of one pass. Plain data, no behavior beyond counting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncReport {
    pub started_at: DateTime<Utc>,
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
    pub observations: usize,
    pub rejected_observations: usize,
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub marked_stale: usize,
    pub marked_missing: usize,
    pub tracked_hosts: usize,
    pub failures: Vec<AdapterFailure>,
}

impl SyncReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            elapsed: Duration::ZERO,
            observations: 0,
            rejected_observations: 0,
            created: 0,
            updated: 0,
            unchanged: 0,
            marked_stale: 0,
            marked_missing: 0,
            tracked_hosts: 0,
            failures: Vec::new(),
        }
    }

    pub fn count(&mut self, change: Change) {
        let slot = match change {
            Change::Created => &mut self.created,
            Change::Updated => &mut self.updated,
            Change::Unchanged => &mut self.unchanged,
            Change::MarkedStale => &mut self.marked_stale,
            Change::MarkedMissing => &mut self.marked_missing,
        };
        *slot += 1;
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.rejected_observations == 0
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }
}
