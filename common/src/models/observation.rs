use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trust class of a source, used to rank conflicting field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    DynamicLease,
    StaticReservation,
    Other,
}

impl SourceKind {
    /// Higher wins. A static reservation is authoritative about the intended address.
    pub fn precedence(self) -> u8 {
        match self {
            SourceKind::StaticReservation => 2,
            SourceKind::DynamicLease => 1,
            SourceKind::Other => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaseWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub source_id: String,
    pub source_kind: SourceKind,
    pub raw_identifier: String,
    pub ip_address: Option<IpAddr>,
    pub hostname: Option<String>,
    /// Free text attached by an operator, e.g. a reservation's `descr`.
    pub description: Option<String>,
    /// Site the reporting source belongs to.
    pub location: Option<String>,
    pub observed_at: DateTime<Utc>,
    /// Only meaningful for [`SourceKind::DynamicLease`].
    pub lease_window: Option<LeaseWindow>,
}

impl Observation {
    pub fn new(
        source_id: impl Into<String>,
        source_kind: SourceKind,
        raw_identifier: impl Into<String>,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            source_kind,
            raw_identifier: raw_identifier.into(),
            ip_address: None,
            hostname: None,
            description: None,
            location: None,
            observed_at,
            lease_window: None,
        }
    }

    pub fn with_ip(mut self, ip: IpAddr) -> Self {
        self.ip_address = Some(ip);
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Attaches a lease window. Ignored unless the observation is a dynamic lease.
    pub fn with_lease(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if self.source_kind == SourceKind::DynamicLease {
            self.lease_window = Some(LeaseWindow { start, end });
        }
        self
    }
}
