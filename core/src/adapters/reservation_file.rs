use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hostsync_common::error::AdapterError;
use hostsync_common::models::observation::{Observation, SourceKind};
use hostsync_common::ports::outbound::source_adapter::SourceAdapter;
use serde::Deserialize;
use tracing::debug;

use super::{non_blank, parse_ip, read_export};

/// Static mappings exported as `{"rows": [{"mac", "ipaddr", "hostname", "descr"}]}`.
///
/// A reservation says what a host *should* get, not that it is online, so every
/// observation carries the export's modification time rather than the fetch time.
pub struct ReservationFileAdapter {
    source_id: String,
    kind: SourceKind,
    path: PathBuf,
    location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReservationRow {
    mac: Option<String>,
    ipaddr: Option<String>,
    hostname: Option<String>,
    descr: Option<String>,
}

impl ReservationFileAdapter {
    pub fn new(source_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            source_id: source_id.into(),
            kind: SourceKind::StaticReservation,
            path: path.into(),
            location: None,
        }
    }

    pub fn with_kind(mut self, kind: SourceKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = non_blank(location);
        self
    }

    async fn exported_at(&self) -> Result<DateTime<Utc>, AdapterError> {
        let metadata = tokio::fs::metadata(&self.path).await.map_err(|e| {
            AdapterError::unreachable(&self.source_id, format!("{}: {e}", self.path.display()))
        })?;
        Ok(metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now()))
    }

    fn to_observation(&self, row: ReservationRow, exported_at: DateTime<Utc>) -> Option<Observation> {
        let mac = non_blank(row.mac)?;
        let ipaddr = non_blank(row.ipaddr)?;

        let mut obs = Observation::new(&self.source_id, self.kind, mac, exported_at);
        if let Some(ip) = parse_ip(&self.source_id, &ipaddr) {
            obs = obs.with_ip(ip);
        }
        if let Some(hostname) = non_blank(row.hostname) {
            obs = obs.with_hostname(hostname);
        }
        if let Some(descr) = non_blank(row.descr) {
            obs = obs.with_description(descr);
        }
        if let Some(location) = &self.location {
            obs = obs.with_location(location);
        }
        Some(obs)
    }
}

#[async_trait]
impl SourceAdapter for ReservationFileAdapter {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn source_kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self) -> Result<Vec<Observation>, AdapterError> {
        let exported_at = self.exported_at().await?;
        let rows: Vec<ReservationRow> = read_export(&self.source_id, &self.path).await?;
        let total = rows.len();

        let observations: Vec<Observation> = rows
            .into_iter()
            .filter_map(|row| self.to_observation(row, exported_at))
            .collect();

        debug!(
            source_id = %self.source_id,
            rows = total,
            skipped = total - observations.len(),
            "Read reservation export"
        );
        Ok(observations)
    }
}
