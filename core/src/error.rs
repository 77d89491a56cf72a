use hostsync_common::error::PersistenceError;
use thiserror::Error;

/// Errors that abort a pass. Adapter and identifier problems never end up here,
/// they are reported in the [`SyncReport`](hostsync_common::models::report::SyncReport).
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
