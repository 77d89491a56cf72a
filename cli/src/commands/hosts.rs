use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use colored::{ColoredString, Colorize};
use hostsync_common::models::host::{HostRecord, HostStats, HostStatus};
use hostsync_common::ports::outbound::snapshot_store::SnapshotStore;
use hostsync_core::store::JsonFileSnapshotStore;

use crate::commands::load_config;
use crate::hprint;
use crate::terminal::{format, print};

pub async fn hosts(config_path: &Path, status: Option<HostStatus>, quiet: u8) -> anyhow::Result<()> {
    let config = load_config(config_path).await?;
    let store = JsonFileSnapshotStore::new(&config.store.path);
    let snapshot = store
        .load_snapshot()
        .await
        .with_context(|| format!("reading {}", store.path().display()))?;

    let hosts: Vec<&HostRecord> = snapshot
        .values()
        .filter(|host| status.is_none_or(|wanted| host.status == wanted))
        .collect();

    print::header("known hosts", quiet);
    if hosts.is_empty() {
        print::no_results("hosts");
        return Ok(());
    }

    let now = Utc::now();
    for (idx, host) in hosts.iter().enumerate() {
        print::tree_head(idx, host.display_name(), format::status(host.status));
        if quiet < 2 {
            print::as_tree_one_level(format::host_details(host, now));
        }
        if idx + 1 != hosts.len() {
            hprint!();
        }
    }

    if quiet < 2 {
        hprint!();
        print_stats(&HostStats::tally(snapshot.values()));
    }

    if quiet == 0 {
        print::fat_separator();
        print::centerln(&format!("{} of {} hosts", hosts.len(), snapshot.len()));
    }
    Ok(())
}

fn print_stats(stats: &HostStats) {
    let rows: [(&str, ColoredString); 5] = [
        ("Total", stats.total.to_string().bold()),
        ("Online", stats.online.to_string().green()),
        ("Offline", stats.offline.to_string().red()),
        ("Static", stats.static_leases.to_string().normal()),
        ("Dynamic", stats.dynamic_leases.to_string().normal()),
    ];
    print::set_key_width(rows.iter().map(|(key, _)| *key));
    for (key, value) in rows {
        print::aligned_line(key, value);
    }
}
