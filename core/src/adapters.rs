//! # Source Adapters
//!
//! File-backed [`SourceAdapter`]s reading JSON exports of a DHCP server, in the
//! `{"rows": [...]}` layout the OPNsense search endpoints return.
//!
//! Each adapter owns its field mapping. Everything past this module sees only
//! [`Observation`](hostsync_common::models::observation::Observation)s.

pub mod lease_file;
pub mod reservation_file;

use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;

use hostsync_common::config::{SourceConfig, SourceFormat};
use hostsync_common::error::AdapterError;
use hostsync_common::ports::outbound::source_adapter::SourceAdapter;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

pub use lease_file::LeaseFileAdapter;
pub use reservation_file::ReservationFileAdapter;

/// Builds the adapter described by one `sources` entry.
pub fn from_config(source: &SourceConfig) -> Arc<dyn SourceAdapter> {
    let kind = source.source_kind();
    match source.format {
        SourceFormat::Leases => Arc::new(
            LeaseFileAdapter::new(&source.id, &source.path)
                .with_kind(kind)
                .with_location(source.location.clone()),
        ),
        SourceFormat::Reservations => Arc::new(
            ReservationFileAdapter::new(&source.id, &source.path)
                .with_kind(kind)
                .with_location(source.location.clone()),
        ),
    }
}

#[derive(Debug, Deserialize)]
struct Export<R> {
    #[serde(default = "Vec::new")]
    rows: Vec<R>,
}

/// Reads and decodes an export. I/O trouble is `unreachable`, bad JSON is `malformed`.
async fn read_export<R: DeserializeOwned>(
    source_id: &str,
    path: &Path,
) -> Result<Vec<R>, AdapterError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AdapterError::unreachable(source_id, format!("{}: {e}", path.display())))?;
    let export: Export<R> = serde_json::from_slice(&bytes)
        .map_err(|e| AdapterError::malformed(source_id, format!("{}: {e}", path.display())))?;
    Ok(export.rows)
}

fn parse_ip(source_id: &str, raw: &str) -> Option<IpAddr> {
    match raw.trim().parse() {
        Ok(ip) => Some(ip),
        Err(_) => {
            warn!(source_id, raw, "Ignoring unparsable IP address");
            None
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
