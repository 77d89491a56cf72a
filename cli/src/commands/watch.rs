use std::path::Path;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::commands::sync::{print_report, run_with_progress};
use crate::commands::{build_orchestrator, load_config};
use crate::terminal::print;

/// Runs a pass every `interval` until Ctrl-C. A failed pass is logged and retried next tick.
pub async fn watch(config_path: &Path, interval: Duration, quiet: u8) -> anyhow::Result<()> {
    let config = load_config(config_path).await?;
    let orchestrator = build_orchestrator(&config);

    info!(
        "Watching {} sources every {}",
        config.sources.len(),
        humantime::format_duration(interval)
    );

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match run_with_progress(&orchestrator).await {
                    Ok(report) => print_report(&report, quiet.max(1)),
                    Err(e) => error!("{e:#}"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping");
                break;
            }
        }
    }

    print::end_of_program();
    Ok(())
}
