use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hostsync_common::error::AdapterError;
use hostsync_common::models::observation::{Observation, SourceKind};
use hostsync_common::ports::outbound::source_adapter::SourceAdapter;
use serde::Deserialize;
use tracing::debug;

use super::{non_blank, parse_ip, read_export};

/// Dynamic leases exported as `{"rows": [{"mac", "address", "hostname", "starts", "ends"}]}`.
pub struct LeaseFileAdapter {
    source_id: String,
    kind: SourceKind,
    path: PathBuf,
    location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LeaseRow {
    mac: Option<String>,
    address: Option<String>,
    hostname: Option<String>,
    #[serde(rename = "client-hostname")]
    client_hostname: Option<String>,
    starts: Option<String>,
    ends: Option<String>,
}

impl LeaseFileAdapter {
    pub fn new(source_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            source_id: source_id.into(),
            kind: SourceKind::DynamicLease,
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

    fn to_observation(&self, row: LeaseRow, now: DateTime<Utc>) -> Option<Observation> {
        let mac = non_blank(row.mac)?;
        let address = non_blank(row.address)?;

        let starts = row.starts.as_deref().and_then(timestamp);
        let ends = row.ends.as_deref().and_then(timestamp);
        // An expired lease only proves the host was there until it ended.
        let observed_at = match ends {
            Some(end) if end < now => end,
            _ => now,
        };

        let mut obs = Observation::new(&self.source_id, self.kind, mac, observed_at);
        if let Some(ip) = parse_ip(&self.source_id, &address) {
            obs = obs.with_ip(ip);
        }
        if let Some(hostname) = non_blank(row.hostname).or(non_blank(row.client_hostname)) {
            obs = obs.with_hostname(hostname);
        }
        if let (Some(start), Some(end)) = (starts, ends) {
            obs = obs.with_lease(start, end);
        }
        if let Some(location) = &self.location {
            obs = obs.with_location(location);
        }
        Some(obs)
    }
}

#[async_trait]
impl SourceAdapter for LeaseFileAdapter {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn source_kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self) -> Result<Vec<Observation>, AdapterError> {
        let rows: Vec<LeaseRow> = read_export(&self.source_id, &self.path).await?;
        let total = rows.len();
        let now = Utc::now();

        let observations: Vec<Observation> = rows
            .into_iter()
            .filter_map(|row| self.to_observation(row, now))
            .collect();

        debug!(
            source_id = %self.source_id,
            rows = total,
            skipped = total - observations.len(),
            "Read lease export"
        );
        Ok(observations)
    }
}

fn timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
