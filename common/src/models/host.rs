use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Known records keyed by canonical identifier.
pub type Snapshot = BTreeMap<String, HostRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostStatus {
    Active,
    Stale,
    Missing,
}

impl fmt::Display for HostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HostStatus::Active => "active",
            HostStatus::Stale => "stale",
            HostStatus::Missing => "missing",
        };
        f.write_str(label)
    }
}

/// One device as seen by all sources during a single pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledHost {
    pub identifier: String,
    pub ip_address: Option<IpAddr>,
    pub hostname: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub contributing_sources: Vec<String>,
    pub is_static: bool,
    pub last_observed_at: DateTime<Utc>,
    pub lease_expires: Option<DateTime<Utc>>,
    pub vendor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostRecord {
    pub identifier: String,
    pub ip_address: Option<IpAddr>,
    pub hostname: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Set by the first source that knows it, then left alone.
    #[serde(default)]
    pub location: Option<String>,
    pub is_static: bool,
    pub status: HostStatus,
    pub first_seen_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
    pub missing_since: Option<DateTime<Utc>>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub lease_expires: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl HostRecord {
    /// Best label for display: hostname if known, identifier otherwise.
    pub fn display_name(&self) -> &str {
        self.hostname.as_deref().unwrap_or(&self.identifier)
    }

    /// Compares the fields that matter to consumers, ignoring pass bookkeeping.
    pub fn same_state_as(&self, other: &HostRecord) -> bool {
        self.ip_address == other.ip_address
            && self.hostname == other.hostname
            && self.description == other.description
            && self.location == other.location
            && self.is_static == other.is_static
            && self.status == other.status
            && self.missing_since == other.missing_since
            && self.vendor == other.vendor
            && self.lease_expires == other.lease_expires
    }
}

/// How a record moved during one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    Created,
    Updated,
    Unchanged,
    MarkedStale,
    MarkedMissing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostChange {
    pub record: HostRecord,
    pub change: Change,
}

/// Inventory totals. Only `Active` hosts count as online.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HostStats {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub static_leases: usize,
    pub dynamic_leases: usize,
}

impl HostStats {
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a HostRecord>) -> Self {
        let mut stats = HostStats::default();
        for record in records {
            stats.total += 1;
            if record.status == HostStatus::Active {
                stats.online += 1;
            }
            if record.is_static {
                stats.static_leases += 1;
            }
        }
        stats.offline = stats.total - stats.online;
        stats.dynamic_leases = stats.total - stats.static_leases;
        stats
    }
}
