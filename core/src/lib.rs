//! # hostsync-core
//!
//! The host reconciliation engine and its stock collaborators.
//!
//! ## Engine
//! * **[`reconciler`]**: Merges one pass's observations into one host per identifier.
//! * **[`lifecycle`]**: Moves records through `active → stale → missing` across passes.
//! * **[`orchestrator`]**: Runs a full pass: fan-out, merge, classify, persist.
//!
//! ## Collaborators
//! * **[`adapters`]**: File-backed sources reading DHCP exports.
//! * **[`store`]**: Snapshot stores (JSON file, in-memory).
//! * **[`vendors`]**: OUI vendor lookup.

pub mod adapters;
pub mod error;
pub mod lifecycle;
pub mod orchestrator;
pub mod reconciler;
pub mod store;
pub mod vendors;

pub use error::SyncError;
pub use orchestrator::SyncOrchestrator;
