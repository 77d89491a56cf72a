//! # Domain Models
//!
//! ## Per-pass values
//! * [`observation::Observation`]: One source's report of one device.
//! * [`host::ReconciledHost`]: The merged single-identity view of a device for one pass.
//!
//! ## Persistent entities
//! * [`host::HostRecord`]: The lifecycle-tracked device, keyed by canonical MAC.
//! * [`host::Snapshot`]: All known records, ordered by identifier.
//!
//! ## Outward
//! * [`report::SyncReport`]: What a pass did, for whoever drives the engine.

pub mod host;
pub mod observation;
pub mod report;
