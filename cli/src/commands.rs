pub mod hosts;
pub mod normalize;
pub mod sync;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use hostsync_common::config::{Config, DEFAULT_CONFIG_PATH};
use hostsync_common::models::host::HostStatus;
use hostsync_core::adapters;
use hostsync_core::store::JsonFileSnapshotStore;
use hostsync_core::vendors::MacOuiRepo;
use hostsync_core::SyncOrchestrator;
use tracing::debug;

#[derive(Parser)]
#[command(name = "hostsync")]
#[command(about = "Reconciles DHCP exports into one inventory of hosts.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file
    #[arg(short, long, env = "HOSTSYNC_CONFIG", default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// More log output (repeat for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Less terminal output
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single reconciliation pass
    #[command(alias = "s")]
    Sync {
        /// Print the pass report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run passes on a fixed interval until interrupted
    #[command(alias = "w")]
    Watch {
        /// Time between passes, e.g. `90s` or `5m`
        #[arg(short, long, default_value = "5m", value_parser = humantime::parse_duration)]
        interval: Duration,
    },
    /// List the hosts in the current snapshot
    #[command(alias = "h")]
    Hosts {
        /// Only show hosts in this state
        #[arg(short, long)]
        status: Option<StatusFilter>,
    },
    /// Print the canonical form of hardware addresses
    #[command(alias = "n")]
    Normalize {
        #[arg(required = true)]
        macs: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusFilter {
    Active,
    Stale,
    Missing,
}

impl From<StatusFilter> for HostStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Active => HostStatus::Active,
            StatusFilter::Stale => HostStatus::Stale,
            StatusFilter::Missing => HostStatus::Missing,
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

pub async fn load_config(path: &Path) -> anyhow::Result<Config> {
    Config::load_or_default(path)
        .await
        .with_context(|| format!("loading {}", path.display()))
}

/// Wires the configured sources, store and vendor lookup into an orchestrator.
pub fn build_orchestrator(config: &Config) -> SyncOrchestrator {
    let store = Arc::new(JsonFileSnapshotStore::new(&config.store.path));
    let mut orchestrator = SyncOrchestrator::new(store, &config.sync);

    for source in &config.sources {
        let adapter = adapters::from_config(source);
        let timeout = source.timeout.unwrap_or(config.sync.adapter_timeout);
        debug!(source_id = %source.id, path = %source.path.display(), ?timeout, "Configured source");
        orchestrator = orchestrator.with_source_timeout(adapter, timeout);
    }

    if config.vendor_lookup {
        orchestrator = orchestrator.with_vendor_repo(Arc::new(MacOuiRepo));
    }
    orchestrator
}
