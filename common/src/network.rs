//! Network identifiers.

pub mod mac;
