use crate::terminal::colors;
use chrono::{DateTime, Utc};
use colored::*;
use hostsync_common::models::host::{HostRecord, HostStatus};
use hostsync_common::models::report::FailureKind;
use std::net::{IpAddr, Ipv6Addr};
use std::time::Duration;

pub type Detail = (String, ColoredString);

pub fn ipv6_to_type_str(ipv6_addr: &Ipv6Addr) -> &'static str {
    let first_byte = ipv6_addr.octets()[0];
    if (0x20..=0x3F).contains(&first_byte) {
        return "GUA";
    }
    if ipv6_addr.is_unique_local() {
        return "ULA";
    }
    if ipv6_addr.is_unicast_link_local() {
        return "LLA";
    }
    "IPv6"
}

pub fn ip_to_detail(ip: &IpAddr) -> Detail {
    match ip {
        IpAddr::V4(ipv4_addr) => (
            String::from("IPv4"),
            ipv4_addr.to_string().color(colors::IPV4_ADDR),
        ),
        IpAddr::V6(ipv6_addr) => (
            String::from(ipv6_to_type_str(ipv6_addr)),
            ipv6_addr.to_string().color(colors::IPV6_ADDR),
        ),
    }
}

pub fn status(status: HostStatus) -> ColoredString {
    let label = status.to_string().to_uppercase();
    match status {
        HostStatus::Active => label.color(colors::ACTIVE).bold(),
        HostStatus::Stale => label.color(colors::STALE).bold(),
        HostStatus::Missing => label.color(colors::MISSING).bold(),
    }
}

pub fn failure_kind(kind: FailureKind) -> ColoredString {
    let label = match kind {
        FailureKind::Unreachable => "unreachable",
        FailureKind::Malformed => "malformed",
        FailureKind::Timeout => "timeout",
        FailureKind::Aborted => "aborted",
    };
    label.red()
}

/// `3h 12m ago`, rounded to whole seconds.
pub fn ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - at).num_seconds().max(0) as u64;
    if secs == 0 {
        return "just now".to_string();
    }
    format!("{} ago", humantime::format_duration(Duration::from_secs(secs)))
}

pub fn timestamp(at: DateTime<Utc>, now: DateTime<Utc>) -> ColoredString {
    format!(
        "{} {}",
        at.format("%Y-%m-%d %H:%M:%S"),
        format!("({})", ago(at, now)).color(colors::SEPARATOR)
    )
    .normal()
}

pub fn host_details(host: &HostRecord, now: DateTime<Utc>) -> Vec<Detail> {
    let mut details: Vec<Detail> = Vec::new();

    if let Some(ip) = &host.ip_address {
        details.push(ip_to_detail(ip));
    }
    details.push((
        "MAC".to_string(),
        host.identifier.color(colors::MAC_ADDR),
    ));
    if let Some(description) = &host.description {
        details.push(("Description".to_string(), description.normal()));
    }
    if let Some(location) = &host.location {
        details.push(("Location".to_string(), location.color(colors::SECONDARY)));
    }
    if let Some(vendor) = &host.vendor {
        details.push(("Vendor".to_string(), vendor.color(colors::SECONDARY)));
    }
    if host.is_static {
        details.push(("Static".to_string(), "yes".color(colors::ACCENT)));
    }
    details.push(("Seen".to_string(), timestamp(host.last_seen_at, now)));
    if let Some(since) = host.missing_since {
        details.push(("Absent".to_string(), timestamp(since, now)));
    }
    if let Some(expires) = host.lease_expires {
        details.push((
            "Lease".to_string(),
            expires.format("%Y-%m-%d %H:%M:%S").to_string().normal(),
        ));
    }
    if !host.sources.is_empty() {
        details.push(("Sources".to_string(), host.sources.join(", ").normal()));
    }
    details
}
