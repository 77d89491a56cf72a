//! # Outbound Ports (Driven Actors)
//!
//! Contracts for interactions *initiated by the engine* towards infrastructure.
//!
//! ## What belongs here?
//! * **Sources**: anything that can produce [`Observation`](crate::models::observation::Observation)s.
//! * **Repositories**: the snapshot store and the vendor database.
//!
//! ## Rules
//! 1. All items here must be `traits`.
//! 2. No concrete implementations allowed.
//! 3. Using domain models in method signatures is allowed and encouraged.

pub mod snapshot_store;
pub mod source_adapter;
pub mod vendor_repository;
