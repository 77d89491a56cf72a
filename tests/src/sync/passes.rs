#![cfg(test)]
use std::sync::Arc;

use hostsync_common::config::SyncSettings;
use hostsync_common::models::host::{HostRecord, HostStatus};
use hostsync_common::models::observation::SourceKind;
use hostsync_common::models::report::FailureKind;
use hostsync_core::store::MemorySnapshotStore;
use hostsync_core::SyncOrchestrator;

use crate::support::{hours, ip, t0, ScriptedAdapter};

const LAPTOP: &str = "aa:bb:cc:dd:ee:01";
const PHONE: &str = "aa:bb:cc:dd:ee:02";

struct Lab {
    dhcp: Arc<ScriptedAdapter>,
    reservations: Arc<ScriptedAdapter>,
    store: Arc<MemorySnapshotStore>,
    orchestrator: SyncOrchestrator,
}

impl Lab {
    fn new() -> Self {
        let dhcp = ScriptedAdapter::new("dhcp", SourceKind::DynamicLease);
        let reservations = ScriptedAdapter::new("reservations", SourceKind::StaticReservation);
        let store = Arc::new(MemorySnapshotStore::new());
        let orchestrator = SyncOrchestrator::new(store.clone(), &SyncSettings::default())
            .with_source(dhcp.clone())
            .with_source(reservations.clone());
        Self {
            dhcp,
            reservations,
            store,
            orchestrator,
        }
    }

    async fn host(&self, identifier: &str) -> HostRecord {
        self.store
            .records()
            .await
            .into_iter()
            .find(|r| r.identifier == identifier)
            .unwrap_or_else(|| panic!("{identifier} not in snapshot"))
    }
}

/// This test walks one host through the whole lifecycle while another stays put:
/// created, stale after its lease disappears, missing a day later, then back.
#[tokio::test]
async fn host_goes_stale_then_missing_then_returns() {
    let lab = Lab::new();

    // Pass 1: both hosts leased, the laptop also reserved (different notation).
    lab.dhcp.serve(
        t0(),
        &[
            ("AA-BB-CC-DD-EE-01", "10.0.1.50", Some("laptop")),
            ("aa:bb:cc:dd:ee:02", "10.0.1.51", Some("phone")),
        ],
    );
    lab.reservations
        .serve(t0(), &[("aabb.ccdd.ee01", "10.0.1.10", None)]);

    let report = lab.orchestrator.run_pass_at(t0()).await.unwrap();
    assert_eq!(report.created, 2);
    assert_eq!(report.observations, 3);
    assert!(report.is_clean());

    let laptop = lab.host(LAPTOP).await;
    assert_eq!(laptop.ip_address, Some(ip("10.0.1.10")));
    assert_eq!(laptop.hostname.as_deref(), Some("laptop"));
    assert!(laptop.is_static);
    assert_eq!(laptop.sources, ["dhcp", "reservations"]);

    // Pass 2: the phone's lease is gone.
    let second = t0() + hours(1);
    lab.dhcp
        .serve(second, &[(LAPTOP, "10.0.1.50", Some("laptop"))]);
    lab.reservations
        .serve(second, &[("aabb.ccdd.ee01", "10.0.1.10", None)]);

    let report = lab.orchestrator.run_pass_at(second).await.unwrap();
    assert_eq!(report.marked_stale, 1);
    assert_eq!(report.unchanged, 1);

    let phone = lab.host(PHONE).await;
    assert_eq!(phone.status, HostStatus::Stale);
    assert_eq!(phone.missing_since, Some(second));
    assert_eq!(phone.ip_address, Some(ip("10.0.1.51")));

    // Pass 3: still absent a day later.
    let third = second + hours(25);
    lab.dhcp
        .serve(third, &[(LAPTOP, "10.0.1.50", Some("laptop"))]);
    lab.reservations
        .serve(third, &[("aabb.ccdd.ee01", "10.0.1.10", None)]);

    let report = lab.orchestrator.run_pass_at(third).await.unwrap();
    assert_eq!(report.marked_missing, 1);
    assert_eq!(report.tracked_hosts, 2);

    let phone = lab.host(PHONE).await;
    assert_eq!(phone.status, HostStatus::Missing);
    assert_eq!(phone.missing_since, Some(second));

    // Pass 4: the phone is back with a new address.
    let fourth = third + hours(1);
    lab.dhcp.serve(
        fourth,
        &[
            (LAPTOP, "10.0.1.50", Some("laptop")),
            (PHONE, "10.0.1.77", None),
        ],
    );
    lab.reservations
        .serve(fourth, &[("aabb.ccdd.ee01", "10.0.1.10", None)]);

    let report = lab.orchestrator.run_pass_at(fourth).await.unwrap();
    assert_eq!(report.updated, 1);

    let phone = lab.host(PHONE).await;
    assert_eq!(phone.status, HostStatus::Active);
    assert_eq!(phone.missing_since, None);
    assert_eq!(phone.last_seen_at, fourth);
    assert_eq!(phone.first_seen_at, t0());
    assert_eq!(phone.ip_address, Some(ip("10.0.1.77")));
    assert_eq!(phone.hostname.as_deref(), Some("phone"));
}

#[tokio::test]
async fn failing_source_costs_only_its_own_observations() {
    let lab = Lab::new();
    lab.dhcp
        .serve(t0(), &[(LAPTOP, "10.0.1.50", Some("laptop"))]);
    lab.reservations
        .serve(t0(), &[(LAPTOP, "10.0.1.10", Some("laptop"))]);
    lab.orchestrator.run_pass_at(t0()).await.unwrap();

    let later = t0() + hours(1);
    lab.dhcp
        .serve(later, &[(LAPTOP, "10.0.1.50", Some("laptop"))]);
    lab.reservations.go_down();

    let report = lab.orchestrator.run_pass_at(later).await.unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].source_id, "reservations");
    assert_eq!(report.failures[0].error_kind, FailureKind::Unreachable);

    let laptop = lab.host(LAPTOP).await;
    assert_eq!(laptop.status, HostStatus::Active);
    assert!(laptop.is_static);
    assert_eq!(laptop.sources, ["dhcp"]);
}

#[tokio::test]
async fn every_source_down_ages_every_host() {
    let lab = Lab::new();
    lab.dhcp
        .serve(t0(), &[(LAPTOP, "10.0.1.50", None), (PHONE, "10.0.1.51", None)]);
    lab.orchestrator.run_pass_at(t0()).await.unwrap();

    lab.dhcp.go_down();
    lab.reservations.go_down();
    let report = lab.orchestrator.run_pass_at(t0() + hours(1)).await.unwrap();

    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.marked_stale, 2);
    assert_eq!(lab.store.records().await.len(), 2);
}

#[tokio::test]
async fn static_reservation_wins_regardless_of_source_order() {
    let dhcp = ScriptedAdapter::new("dhcp", SourceKind::DynamicLease);
    let reservations = ScriptedAdapter::new("reservations", SourceKind::StaticReservation);
    dhcp.serve(t0(), &[(LAPTOP, "10.0.1.50", Some("lease-name"))]);
    reservations.serve(t0() - hours(48), &[(LAPTOP, "10.0.1.10", Some("reserved-name"))]);

    let store = Arc::new(MemorySnapshotStore::new());
    let orchestrator = SyncOrchestrator::new(store.clone(), &SyncSettings::default())
        .with_source(reservations.clone())
        .with_source(dhcp.clone());

    orchestrator.run_pass_at(t0()).await.unwrap();

    let records = store.records().await;
    assert_eq!(records[0].ip_address, Some(ip("10.0.1.10")));
    assert_eq!(records[0].hostname.as_deref(), Some("reserved-name"));
    assert_eq!(records[0].sources, ["reservations", "dhcp"]);
}

/// This test brings a missing host back through a reservation export that is
/// days old. Coming back counts as being seen, whatever the entry's age.
#[tokio::test]
async fn missing_host_returns_through_an_old_reservation() {
    let lab = Lab::new();
    lab.dhcp.serve(t0(), &[(PHONE, "10.0.1.51", Some("phone"))]);
    lab.orchestrator.run_pass_at(t0()).await.unwrap();

    lab.dhcp.serve(t0(), &[]);
    let gone = t0() + hours(1);
    lab.orchestrator.run_pass_at(gone).await.unwrap();
    let report = lab.orchestrator.run_pass_at(gone + hours(25)).await.unwrap();
    assert_eq!(report.marked_missing, 1);

    let back = gone + hours(26);
    lab.reservations
        .serve(back - hours(72), &[(PHONE, "10.0.1.20", None)]);

    let report = lab.orchestrator.run_pass_at(back).await.unwrap();
    assert_eq!(report.updated, 1);
    assert_eq!(report.marked_stale, 0);

    let phone = lab.host(PHONE).await;
    assert_eq!(phone.status, HostStatus::Active);
    assert_eq!(phone.last_seen_at, back);
    assert_eq!(phone.missing_since, None);
    assert_eq!(phone.ip_address, Some(ip("10.0.1.20")));
    assert!(phone.is_static);
}
