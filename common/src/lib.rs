//! # hostsync-common
//!
//! Shared vocabulary of the host reconciliation engine.
//!
//! ## Contents
//! * **[`network`]**: Hardware address parsing and canonicalization.
//! * **[`models`]**: Observations, reconciled hosts, persistent host records and the pass report.
//! * **[`ports`]**: Traits the engine depends on (source adapters, snapshot store, vendor lookup).
//! * **[`config`]**: The YAML configuration consumed by the CLI.
//! * **[`error`]**: Typed errors shared by every layer.

pub mod config;
pub mod error;
pub mod models;
pub mod network;
pub mod ports;
