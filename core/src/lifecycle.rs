//! # Lifecycle Tracker
//!
//! Compares the hosts reconciled in this pass with the previous snapshot and
//! decides the next state of every record.
//!
//! ```text
//!             present & fresh                      absent
//!   (new) ──────────────────▶ ACTIVE ─────────────────────────▶ STALE
//!                               ▲  │ present, no fresh            │ absent for
//!                               │  │ observation past stale_after │ missing_after
//!                               │  ▼                              ▼
//!                               └─ STALE ◀──────────────────── MISSING
//!                present & fresh          (reappears, not fresh)
//! ```
//!
//! Records are never removed here. Retention is somebody else's decision.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use hostsync_common::models::host::{
    Change, HostChange, HostRecord, HostStatus, ReconciledHost, Snapshot,
};

/// Computes the next snapshot. Output is ordered by identifier.
pub fn classify(
    previous: &Snapshot,
    current: &[ReconciledHost],
    now: DateTime<Utc>,
    stale_after: TimeDelta,
    missing_after: TimeDelta,
) -> Vec<HostChange> {
    let mut present: BTreeMap<&str, &ReconciledHost> = current
        .iter()
        .map(|host| (host.identifier.as_str(), host))
        .collect();

    let mut changes: Vec<HostChange> = Vec::with_capacity(previous.len() + present.len());

    for (identifier, prior) in previous {
        let next = match present.remove(identifier.as_str()) {
            Some(host) => refresh(prior, host, now, stale_after),
            None => age(prior, now, missing_after),
        };
        changes.push(HostChange {
            change: transition(prior, &next),
            record: next,
        });
    }

    for host in present.into_values() {
        changes.push(HostChange {
            record: admit(host, now),
            change: Change::Created,
        });
    }

    changes.sort_by(|a, b| a.record.identifier.cmp(&b.record.identifier));
    changes
}

fn admit(host: &ReconciledHost, now: DateTime<Utc>) -> HostRecord {
    HostRecord {
        identifier: host.identifier.clone(),
        ip_address: host.ip_address,
        hostname: host.hostname.clone(),
        description: host.description.clone(),
        location: host.location.clone(),
        is_static: host.is_static,
        status: HostStatus::Active,
        first_seen_at: now,
        last_seen_at: now,
        missing_since: None,
        vendor: host.vendor.clone(),
        lease_expires: host.lease_expires,
        sources: host.contributing_sources.clone(),
    }
}

fn refresh(
    prior: &HostRecord,
    host: &ReconciledHost,
    now: DateTime<Utc>,
    stale_after: TimeDelta,
) -> HostRecord {
    // A host coming back from an absence is active again, whatever the age of its entry.
    let returning = prior.missing_since.is_some() || prior.status == HostStatus::Missing;
    // A cached entry (e.g. a reservation list) keeps a host present without proving it is alive.
    let fresh = returning || now - host.last_observed_at < stale_after;
    let last_seen_at = if fresh { now } else { prior.last_seen_at };
    let status = if now - last_seen_at < stale_after {
        HostStatus::Active
    } else {
        HostStatus::Stale
    };

    HostRecord {
        identifier: prior.identifier.clone(),
        ip_address: host.ip_address.or(prior.ip_address),
        hostname: host.hostname.clone().or_else(|| prior.hostname.clone()),
        description: host.description.clone().or_else(|| prior.description.clone()),
        location: prior.location.clone().or_else(|| host.location.clone()),
        is_static: prior.is_static || host.is_static,
        status,
        first_seen_at: prior.first_seen_at,
        last_seen_at,
        missing_since: None,
        vendor: host.vendor.clone().or_else(|| prior.vendor.clone()),
        lease_expires: host.lease_expires,
        sources: host.contributing_sources.clone(),
    }
}

fn age(prior: &HostRecord, now: DateTime<Utc>, missing_after: TimeDelta) -> HostRecord {
    let mut next = prior.clone();
    match prior.missing_since {
        None => {
            next.missing_since = Some(now);
            if prior.status != HostStatus::Missing {
                next.status = HostStatus::Stale;
            }
        }
        Some(since) if now - since >= missing_after => {
            next.status = HostStatus::Missing;
        }
        Some(_) => {}
    }
    next
}

fn transition(prior: &HostRecord, next: &HostRecord) -> Change {
    if prior.status != next.status {
        return match next.status {
            HostStatus::Stale => Change::MarkedStale,
            HostStatus::Missing => Change::MarkedMissing,
            HostStatus::Active => Change::Updated,
        };
    }
    if next.same_state_as(prior) {
        Change::Unchanged
    } else {
        Change::Updated
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
