use std::path::Path;

use anyhow::Context;
use colored::*;
use hostsync_common::models::report::SyncReport;
use hostsync_core::SyncOrchestrator;
use tracing::{Instrument, info_span};

use crate::commands::{build_orchestrator, load_config};
use crate::hprint;
use crate::terminal::{colors, format, print};

pub async fn sync(config_path: &Path, json: bool, quiet: u8) -> anyhow::Result<()> {
    let config = load_config(config_path).await?;
    if config.sources.is_empty() {
        tracing::warn!("No sources configured in {}", config_path.display());
    }
    let orchestrator = build_orchestrator(&config);

    let report = run_with_progress(&orchestrator).await?;

    if json {
        let body = serde_json::to_string_pretty(&report).context("encoding report")?;
        println!("{body}");
    } else {
        print_report(&report, quiet);
    }
    Ok(())
}

pub async fn run_with_progress(orchestrator: &SyncOrchestrator) -> anyhow::Result<SyncReport> {
    let span = info_span!("reconciling", indicatif.pb_show = true);
    orchestrator
        .run_pass()
        .instrument(span)
        .await
        .context("reconciliation pass failed")
}

pub fn print_report(report: &SyncReport, quiet: u8) {
    print::header("pass report", quiet);

    if quiet < 2 {
        let rows: [(&str, ColoredString); 8] = [
            ("Observations", report.observations.to_string().normal()),
            ("Rejected", counter(report.rejected_observations, Color::Yellow)),
            ("Created", counter(report.created, Color::Green)),
            ("Updated", counter(report.updated, Color::Cyan)),
            ("Unchanged", report.unchanged.to_string().normal()),
            ("Marked stale", counter(report.marked_stale, Color::Yellow)),
            ("Marked missing", counter(report.marked_missing, Color::Red)),
            ("Tracked hosts", report.tracked_hosts.to_string().bold()),
        ];
        print::set_key_width(rows.iter().map(|(key, _)| *key));
        for (key, value) in rows {
            print::aligned_line(key, value);
        }
    }

    if !report.failures.is_empty() {
        hprint!();
        for (idx, failure) in report.failures.iter().enumerate() {
            print::tree_head(idx, &failure.source_id, format::failure_kind(failure.error_kind));
            print::as_tree_one_level(vec![("Error".to_string(), failure.message.normal())]);
        }
    }

    let elapsed: ColoredString = format!("{:.2}s", report.elapsed.as_secs_f64()).bold().yellow();
    let hosts: ColoredString = format!("{} hosts", report.tracked_hosts).bold().green();
    let summary: String = if report.failures.is_empty() {
        format!("Pass complete: {hosts} tracked in {elapsed}")
    } else {
        let failed: ColoredString = format!("{} failed sources", report.failures.len()).bold().red();
        format!("Pass complete: {hosts} tracked in {elapsed}, {failed}")
    };

    match quiet {
        0 => {
            print::fat_separator();
            print::centerln(&summary.color(colors::TEXT_DEFAULT).to_string());
        }
        _ => print::print_status(summary),
    }
}

fn counter(value: usize, color: Color) -> ColoredString {
    if value == 0 {
        value.to_string().color(colors::SEPARATOR)
    } else {
        value.to_string().color(color).bold()
    }
}
