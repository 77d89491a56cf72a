//! # Reconciler
//!
//! Turns the flat list of observations gathered during one pass into exactly one
//! [`ReconciledHost`] per canonical identifier.
//!
//! Field values are picked independently, each by the same ranking:
//! 1. **Precedence class**: static reservation > dynamic lease > other.
//! 2. **Recency**: the latest `observed_at` wins inside a class.
//! 3. **Source id**: the lexically smallest id wins a remaining tie.
//!
//! Only observations that actually carry the field take part, so an absent value
//! never overrides a present one, whatever its rank.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use hostsync_common::error::IdentifierError;
use hostsync_common::models::host::ReconciledHost;
use hostsync_common::models::observation::{Observation, SourceKind};
use hostsync_common::network::mac;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reconciliation {
    pub hosts: Vec<ReconciledHost>,
    pub rejected: Vec<RejectedObservation>,
}

/// An observation dropped because its identifier could not be normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedObservation {
    pub source_id: String,
    pub error: IdentifierError,
}

struct Group<'a> {
    identifier: String,
    members: Vec<&'a Observation>,
    last_observed_at: DateTime<Utc>,
}

impl<'a> Group<'a> {
    fn new(identifier: String, first: &'a Observation) -> Self {
        Self {
            identifier,
            members: vec![first],
            last_observed_at: first.observed_at,
        }
    }

    fn push(&mut self, obs: &'a Observation) {
        self.last_observed_at = self.last_observed_at.max(obs.observed_at);
        self.members.push(obs);
    }
}

/// Merges observations into hosts. Pure: the same input always yields the same output.
///
/// Hosts come out in the order their identifier was first observed.
pub fn reconcile(observations: &[Observation]) -> Reconciliation {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();
    let mut rejected: Vec<RejectedObservation> = Vec::new();

    for obs in observations {
        let identifier = match mac::normalize(&obs.raw_identifier) {
            Ok(identifier) => identifier,
            Err(error) => {
                warn!(
                    source_id = %obs.source_id,
                    raw = %obs.raw_identifier,
                    "Dropping observation with an unparsable identifier"
                );
                rejected.push(RejectedObservation {
                    source_id: obs.source_id.clone(),
                    error,
                });
                continue;
            }
        };

        if let Some(&slot) = index.get(&identifier) {
            groups[slot].push(obs);
            continue;
        }
        index.insert(identifier.clone(), groups.len());
        groups.push(Group::new(identifier, obs));
    }

    debug!(
        observations = observations.len(),
        hosts = groups.len(),
        rejected = rejected.len(),
        "Reconciled observations"
    );

    Reconciliation {
        hosts: groups.into_iter().map(merge).collect(),
        rejected,
    }
}

fn merge(group: Group) -> ReconciledHost {
    let members = group.members.as_slice();

    let ip_address = resolve(members, |obs| obs.ip_address);
    let hostname = resolve(members, |obs| clean_text(obs.hostname.as_deref()));
    let description = resolve(members, |obs| clean_text(obs.description.as_deref()));
    let location = resolve(members, |obs| clean_text(obs.location.as_deref()));
    let lease_expires = resolve(members, |obs| obs.lease_window.map(|window| window.end));
    let is_static = members
        .iter()
        .any(|obs| obs.source_kind == SourceKind::StaticReservation);

    let mut contributing_sources: Vec<String> = Vec::new();
    for obs in members {
        if !contributing_sources.contains(&obs.source_id) {
            contributing_sources.push(obs.source_id.clone());
        }
    }

    ReconciledHost {
        identifier: group.identifier,
        ip_address,
        hostname,
        description,
        location,
        contributing_sources,
        is_static,
        last_observed_at: group.last_observed_at,
        lease_expires,
        vendor: None,
    }
}

/// Picks the value reported by the highest-ranked observation that has one.
///
/// Equal ranks (same class, instant and source) fall back to the smallest value,
/// which keeps the result independent of input order.
fn resolve<T, F>(members: &[&Observation], field: F) -> Option<T>
where
    T: Ord,
    F: Fn(&Observation) -> Option<T>,
{
    members
        .iter()
        .filter_map(|obs| field(*obs).map(|value| (*obs, value)))
        .max_by(|(a, a_value), (b, b_value)| rank(a, b).then_with(|| b_value.cmp(a_value)))
        .map(|(_, value)| value)
}

fn rank(a: &Observation, b: &Observation) -> Ordering {
    a.source_kind
        .precedence()
        .cmp(&b.source_kind.precedence())
        .then_with(|| a.observed_at.cmp(&b.observed_at))
        .then_with(|| b.source_id.cmp(&a.source_id))
}

fn clean_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
