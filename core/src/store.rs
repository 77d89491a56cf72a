//! # Snapshot Stores
//!
//! Concrete [`SnapshotStore`](hostsync_common::ports::outbound::snapshot_store::SnapshotStore)
//! implementations.
//!
//! * **[`json_file`]**: one JSON document on disk, replaced atomically on every save.
//! * **[`memory`]**: process-local, for tests and dry runs.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileSnapshotStore;
pub use memory::MemorySnapshotStore;
