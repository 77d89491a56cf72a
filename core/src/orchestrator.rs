//! # Sync Orchestrator
//!
//! Implements the "Reconcile Pass" use case.
//!
//! One pass:
//! 1. **Load** the previous snapshot from the [`SnapshotStore`].
//! 2. **Fetch** from every [`SourceAdapter`] concurrently, each bounded by its own timeout.
//! 3. **Reconcile** the observations into one host per identifier.
//! 4. **Enrich** hosts with vendor names, if a [`VendorRepository`] is configured.
//! 5. **Classify** every record against the previous snapshot.
//! 6. **Save** the full record set and report what happened.
//!
//! A failing adapter costs that pass its observations, nothing more. A failing
//! store aborts the pass before anything is written.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeDelta, Utc};
use hostsync_common::config::SyncSettings;
use hostsync_common::error::{AdapterCause, AdapterError};
use hostsync_common::models::host::{HostRecord, ReconciledHost};
use hostsync_common::models::observation::Observation;
use hostsync_common::models::report::{AdapterFailure, SyncReport};
use hostsync_common::network::mac;
use hostsync_common::ports::outbound::snapshot_store::SnapshotStore;
use hostsync_common::ports::outbound::source_adapter::SourceAdapter;
use hostsync_common::ports::outbound::vendor_repository::VendorRepository;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::SyncError;
use crate::{lifecycle, reconciler};

/// An adapter together with the time it is allowed to take.
#[derive(Clone)]
pub struct SourceHandle {
    pub adapter: Arc<dyn SourceAdapter>,
    pub timeout: Duration,
}

impl SourceHandle {
    pub fn new(adapter: Arc<dyn SourceAdapter>, timeout: Duration) -> Self {
        Self { adapter, timeout }
    }

    pub fn source_id(&self) -> &str {
        self.adapter.source_id()
    }
}

/// Everything the adapters delivered in one fan-out.
#[derive(Debug, Default)]
pub struct Fetched {
    /// Concatenated in source order, whatever order the adapters finished in.
    pub observations: Vec<Observation>,
    pub failures: Vec<AdapterFailure>,
}

pub struct SyncOrchestrator {
    sources: Vec<SourceHandle>,
    store: Arc<dyn SnapshotStore>,
    vendor_repo: Option<Arc<dyn VendorRepository>>,
    stale_after: TimeDelta,
    missing_after: TimeDelta,
    default_timeout: Duration,
    pass_lock: Mutex<()>,
}

impl SyncOrchestrator {
    pub fn new(store: Arc<dyn SnapshotStore>, settings: &SyncSettings) -> Self {
        Self {
            sources: Vec::new(),
            store,
            vendor_repo: None,
            stale_after: settings.stale_after_delta(),
            missing_after: settings.missing_after_delta(),
            default_timeout: settings.adapter_timeout,
            pass_lock: Mutex::new(()),
        }
    }

    /// Adds a source bounded by the default adapter timeout.
    pub fn with_source(self, adapter: Arc<dyn SourceAdapter>) -> Self {
        let timeout = self.default_timeout;
        self.with_source_timeout(adapter, timeout)
    }

    pub fn with_source_timeout(mut self, adapter: Arc<dyn SourceAdapter>, timeout: Duration) -> Self {
        self.sources.push(SourceHandle::new(adapter, timeout));
        self
    }

    pub fn with_vendor_repo(mut self, vendor_repo: Arc<dyn VendorRepository>) -> Self {
        self.vendor_repo = Some(vendor_repo);
        self
    }

    pub fn source_ids(&self) -> Vec<&str> {
        self.sources.iter().map(SourceHandle::source_id).collect()
    }

    pub async fn run_pass(&self) -> Result<SyncReport, SyncError> {
        self.run_pass_at(Utc::now()).await
    }

    /// Runs one pass as if the clock read `now`.
    ///
    /// Passes never overlap: a second caller waits until the first one has saved.
    pub async fn run_pass_at(&self, now: DateTime<Utc>) -> Result<SyncReport, SyncError> {
        let _guard = self.pass_lock.lock().await;
        let started = Instant::now();
        let mut report = SyncReport::new(now);

        let previous = self.store.load_snapshot().await?;
        debug!(known = previous.len(), "Loaded previous snapshot");

        let Fetched {
            observations,
            failures,
        } = fetch_all(&self.sources).await;
        report.observations = observations.len();
        report.failures = failures;

        let reconciliation = reconciler::reconcile(&observations);
        report.rejected_observations = reconciliation.rejected.len();

        let mut hosts = reconciliation.hosts;
        self.enrich_vendors(&mut hosts);

        let changes = lifecycle::classify(
            &previous,
            &hosts,
            now,
            self.stale_after,
            self.missing_after,
        );
        for change in &changes {
            report.count(change.change);
        }

        let records: Vec<HostRecord> = changes.into_iter().map(|c| c.record).collect();
        self.store.save_snapshot(&records).await?;

        report.tracked_hosts = records.len();
        report.elapsed = started.elapsed();

        info!(
            created = report.created,
            updated = report.updated,
            unchanged = report.unchanged,
            stale = report.marked_stale,
            missing = report.marked_missing,
            failures = report.failures.len(),
            "Pass complete"
        );
        Ok(report)
    }

    fn enrich_vendors(&self, hosts: &mut [ReconciledHost]) {
        let Some(vendor_repo) = &self.vendor_repo else {
            return;
        };
        for host in hosts.iter_mut() {
            if let Ok(mac) = mac::parse(&host.identifier)
                && let Some(vendor) = vendor_repo.get_vendor(mac)
            {
                host.vendor = Some(vendor);
            }
        }
    }
}

/// Calls every source at once and gathers the results in source order.
///
/// Each adapter runs in its own task, so a panic or a hang stays with that
/// adapter and turns into a failure record carrying its configured id.
pub async fn fetch_all(sources: &[SourceHandle]) -> Fetched {
    let handles: Vec<(String, JoinHandle<Result<Vec<Observation>, AdapterError>>)> = sources
        .iter()
        .map(|source| {
            let id = source.source_id().to_string();
            (id, tokio::spawn(fetch_one(source.clone())))
        })
        .collect();

    let mut fetched = Fetched::default();
    for (source_id, handle) in handles {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(join_err) => Err(AdapterError::new(
                source_id.as_str(),
                AdapterCause::Aborted(join_err.to_string()),
            )),
        };

        match outcome {
            Ok(mut observations) => {
                debug!(source_id = %source_id, count = observations.len(), "Source delivered");
                fetched.observations.append(&mut observations);
            }
            Err(err) => {
                warn!(source_id = %source_id, "{}", err.cause);
                fetched.failures.push(AdapterFailure {
                    source_id,
                    error_kind: err.kind(),
                    message: err.cause.to_string(),
                });
            }
        }
    }
    fetched
}

async fn fetch_one(source: SourceHandle) -> Result<Vec<Observation>, AdapterError> {
    match tokio::time::timeout(source.timeout, source.adapter.fetch()).await {
        Ok(outcome) => outcome,
        Err(_) => Err(AdapterError::new(
            source.source_id(),
            AdapterCause::TimedOut(source.timeout),
        )),
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
