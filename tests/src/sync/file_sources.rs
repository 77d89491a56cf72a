#![cfg(test)]
use std::path::Path;
use std::sync::Arc;

use hostsync_common::config::Config;
use hostsync_common::models::host::HostStatus;
use hostsync_common::models::report::FailureKind;
use hostsync_common::ports::outbound::snapshot_store::SnapshotStore;
use hostsync_core::adapters;
use hostsync_core::store::JsonFileSnapshotStore;
use hostsync_core::SyncOrchestrator;
use tempfile::TempDir;

use crate::support::ip;

fn write(dir: &Path, name: &str, body: &str) {
    std::fs::write(dir.join(name), body).unwrap();
}

fn config_for(dir: &Path) -> anyhow::Result<Config> {
    let yaml = format!(
        r#"
sync:
  stale_after: 1h
  missing_after: 24h
  adapter_timeout: 5s
store:
  path: {root}/state/hosts.json
vendor_lookup: false
sources:
  - id: opnsense-leases
    format: leases
    path: {root}/leases.json
  - id: opnsense-static
    format: reservations
    path: {root}/reservations.json
    location: main-office
  - id: offline-router
    format: leases
    path: {root}/absent.json
    timeout: 1s
"#,
        root = dir.display()
    );
    Ok(Config::from_yaml(&yaml)?)
}

fn orchestrator_for(config: &Config) -> SyncOrchestrator {
    let store = Arc::new(JsonFileSnapshotStore::new(&config.store.path));
    config.sources.iter().fold(
        SyncOrchestrator::new(store, &config.sync),
        |orchestrator, source| {
            let timeout = source.timeout.unwrap_or(config.sync.adapter_timeout);
            orchestrator.with_source_timeout(adapters::from_config(source), timeout)
        },
    )
}

/// This test runs a pass over real export files and reads the result back from disk.
#[tokio::test]
async fn exports_on_disk_become_a_persisted_snapshot() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    write(
        dir.path(),
        "leases.json",
        r#"{"rows": [
            {"mac": "00-11-32-AA-BB-CC", "address": "192.168.1.140", "hostname": "nas",
             "starts": "2026-05-04T08:00:00Z", "ends": "2099-01-01T00:00:00Z"},
            {"mac": "de:ad:be:ef:00:01", "address": "192.168.1.141", "client-hostname": "tv"},
            {"mac": "not a mac", "address": "192.168.1.142"}
        ]}"#,
    );
    write(
        dir.path(),
        "reservations.json",
        r#"{"rows": [{"mac": "0011.32aa.bbcc", "ipaddr": "192.168.1.20", "descr": "storage"}]}"#,
    );

    let config = config_for(dir.path())?;
    let orchestrator = orchestrator_for(&config);
    assert_eq!(
        orchestrator.source_ids(),
        ["opnsense-leases", "opnsense-static", "offline-router"]
    );

    let report = orchestrator.run_pass().await?;

    assert_eq!(report.observations, 4);
    assert_eq!(report.rejected_observations, 1);
    assert_eq!(report.created, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].source_id, "offline-router");
    assert_eq!(report.failures[0].error_kind, FailureKind::Unreachable);

    let snapshot = JsonFileSnapshotStore::new(&config.store.path)
        .load_snapshot()
        .await?;
    assert_eq!(snapshot.len(), 2);

    let nas = &snapshot["00:11:32:aa:bb:cc"];
    assert_eq!(nas.ip_address, Some(ip("192.168.1.20")));
    assert_eq!(nas.hostname.as_deref(), Some("nas"));
    assert_eq!(nas.description.as_deref(), Some("storage"));
    assert_eq!(nas.location.as_deref(), Some("main-office"));
    assert!(nas.is_static);
    assert_eq!(nas.status, HostStatus::Active);
    assert!(nas.lease_expires.is_some());
    assert_eq!(nas.sources, ["opnsense-leases", "opnsense-static"]);

    let tv = &snapshot["de:ad:be:ef:00:01"];
    assert_eq!(tv.hostname.as_deref(), Some("tv"));
    assert_eq!(tv.location, None);
    assert!(!tv.is_static);
    Ok(())
}

#[tokio::test]
async fn reservation_description_does_not_replace_the_lease_hostname() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    write(
        dir.path(),
        "leases.json",
        r#"{"rows": [{"mac": "3c:2a:f4:00:00:01", "address": "192.168.1.150", "hostname": "HP-LaserJet"}]}"#,
    );
    write(
        dir.path(),
        "reservations.json",
        r#"{"rows": [{"mac": "3c:2a:f4:00:00:01", "ipaddr": "192.168.1.30",
                      "hostname": "", "descr": "Living room printer - ask Bob"}]}"#,
    );

    let config = config_for(dir.path())?;
    orchestrator_for(&config).run_pass().await?;

    let snapshot = JsonFileSnapshotStore::new(&config.store.path)
        .load_snapshot()
        .await?;
    let printer = &snapshot["3c:2a:f4:00:00:01"];
    assert_eq!(printer.hostname.as_deref(), Some("HP-LaserJet"));
    assert_eq!(
        printer.description.as_deref(),
        Some("Living room printer - ask Bob")
    );
    assert_eq!(printer.ip_address, Some(ip("192.168.1.30")));
    Ok(())
}

#[tokio::test]
async fn rerunning_on_unchanged_exports_changes_nothing() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    write(
        dir.path(),
        "leases.json",
        r#"{"rows": [{"mac": "de:ad:be:ef:00:01", "address": "192.168.1.141"}]}"#,
    );
    write(dir.path(), "reservations.json", r#"{"rows": []}"#);

    let config = config_for(dir.path())?;
    let orchestrator = orchestrator_for(&config);

    orchestrator.run_pass().await?;
    let report = orchestrator.run_pass().await?;

    assert_eq!(report.created, 0);
    assert_eq!(report.unchanged, 1);
    assert_eq!(report.tracked_hosts, 1);
    Ok(())
}

#[tokio::test]
async fn corrupt_snapshot_aborts_the_pass() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    write(dir.path(), "leases.json", r#"{"rows": []}"#);
    write(dir.path(), "reservations.json", r#"{"rows": []}"#);
    std::fs::create_dir_all(dir.path().join("state"))?;
    write(dir.path(), "state/hosts.json", "[{\"identifier\": 42}]");

    let config = config_for(dir.path())?;
    let result = orchestrator_for(&config).run_pass().await;

    assert!(result.is_err());
    let on_disk = std::fs::read_to_string(dir.path().join("state/hosts.json"))?;
    assert_eq!(on_disk, "[{\"identifier\": 42}]");
    Ok(())
}
