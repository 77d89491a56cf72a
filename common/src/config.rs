//! # Configuration
//!
//! Loaded from a YAML file. Durations are human readable (`90s`, `1h 30m`, `2days`).
//!
//! ```yaml
//! sync:
//!   stale_after: 1h
//!   missing_after: 24h
//!   adapter_timeout: 30s
//! store:
//!   path: hosts.json
//! sources:
//!   - id: opnsense-main
//!     format: leases
//!     path: exports/leases.json
//!     location: main-office
//! ```

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::TimeDelta;
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::error::ConfigError;
use crate::models::observation::SourceKind;

pub const DEFAULT_CONFIG_PATH: &str = "hostsync.yaml";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub store: StoreConfig,
    /// Fill in vendor names from the embedded OUI database.
    #[serde(default = "enabled")]
    pub vendor_lookup: bool,
    /// Order matters: it is the fan-out order and the order of `contributing_sources`.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncSettings {
    /// A host with no fresh observation for this long is no longer considered active.
    #[serde(deserialize_with = "human_duration")]
    pub stale_after: Duration,
    /// Continuous absence after which a stale host is declared missing.
    #[serde(deserialize_with = "human_duration")]
    pub missing_after: Duration,
    /// Upper bound for a single adapter call unless the source overrides it.
    #[serde(deserialize_with = "human_duration")]
    pub adapter_timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// JSON export of dynamic DHCP leases.
    Leases,
    /// JSON export of static DHCP mappings.
    Reservations,
}

impl SourceFormat {
    pub fn default_kind(self) -> SourceKind {
        match self {
            SourceFormat::Leases => SourceKind::DynamicLease,
            SourceFormat::Reservations => SourceKind::StaticReservation,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub id: String,
    pub format: SourceFormat,
    #[serde(default)]
    pub kind: Option<SourceKind>,
    pub path: PathBuf,
    #[serde(default, deserialize_with = "human_duration_opt")]
    pub timeout: Option<Duration>,
    /// Tags hosts from this source that have no location yet.
    #[serde(default)]
    pub location: Option<String>,
}

impl SourceConfig {
    pub fn source_kind(&self) -> SourceKind {
        self.kind.unwrap_or(self.format.default_kind())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync: SyncSettings::default(),
            store: StoreConfig::default(),
            vendor_lookup: true,
            sources: Vec::new(),
        }
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_secs(60 * 60),
            missing_after: Duration::from_secs(24 * 60 * 60),
            adapter_timeout: Duration::from_secs(30),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("hosts.json"),
        }
    }
}

impl SyncSettings {
    pub fn stale_after_delta(&self) -> TimeDelta {
        to_delta(self.stale_after)
    }

    pub fn missing_after_delta(&self) -> TimeDelta {
        to_delta(self.missing_after)
    }
}

impl Config {
    /// Reads and validates the file at `path`.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_yaml(&text)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub async fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path).await {
            Err(ConfigError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
                warn!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_duration("sync.stale_after", self.sync.stale_after)?;
        check_duration("sync.missing_after", self.sync.missing_after)?;
        check_duration("sync.adapter_timeout", self.sync.adapter_timeout)?;

        let mut seen: HashSet<&str> = HashSet::new();
        for source in &self.sources {
            if source.id.trim().is_empty() {
                return Err(ConfigError::EmptySourceId);
            }
            if !seen.insert(source.id.as_str()) {
                return Err(ConfigError::DuplicateSource(source.id.clone()));
            }
            if let Some(timeout) = source.timeout {
                check_duration(&format!("sources.{}.timeout", source.id), timeout)?;
            }
        }
        Ok(())
    }
}

fn enabled() -> bool {
    true
}

fn check_duration(name: &str, value: Duration) -> Result<(), ConfigError> {
    if value.is_zero() {
        return Err(ConfigError::ZeroDuration(name.to_string()));
    }
    if TimeDelta::from_std(value).is_err() {
        return Err(ConfigError::DurationOutOfRange(name.to_string()));
    }
    Ok(())
}

// Validated durations always fit.
fn to_delta(value: Duration) -> TimeDelta {
    TimeDelta::from_std(value).unwrap_or(TimeDelta::MAX)
}

fn human_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    humantime::parse_duration(&text).map_err(serde::de::Error::custom)
}

fn human_duration_opt<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|text| humantime::parse_duration(&text).map_err(serde::de::Error::custom))
        .transpose()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
