//! # Ports Layer (Boundaries)
//!
//! The engine only ever talks to the outside world through these traits.
//!
//! ## Dependency Rule
//! * The engine depends on these Ports.
//! * Adapters (in `hostsync-core` or elsewhere) implement them.
//! * Nothing here knows about files, sockets or vendors' APIs.

pub mod outbound;
