use std::net::IpAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use hostsync_common::error::AdapterError;
use hostsync_common::models::observation::{Observation, SourceKind};
use hostsync_common::ports::outbound::source_adapter::SourceAdapter;

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 8, 0, 0).unwrap()
}

pub fn hours(h: i64) -> TimeDelta {
    TimeDelta::hours(h)
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

enum Script {
    Rows(Vec<Observation>),
    Down,
}

/// A source whose answer is set by the test before each pass.
pub struct ScriptedAdapter {
    id: &'static str,
    kind: SourceKind,
    script: Mutex<Script>,
}

impl ScriptedAdapter {
    pub fn new(id: &'static str, kind: SourceKind) -> Arc<Self> {
        Arc::new(Self {
            id,
            kind,
            script: Mutex::new(Script::Rows(Vec::new())),
        })
    }

    /// Answers the next fetch with `(mac, ip, hostname)` rows observed at `at`.
    pub fn serve(&self, at: DateTime<Utc>, rows: &[(&str, &str, Option<&str>)]) {
        let observations = rows
            .iter()
            .map(|(mac, addr, hostname)| {
                let obs = Observation::new(self.id, self.kind, *mac, at).with_ip(ip(addr));
                match hostname {
                    Some(name) => obs.with_hostname(*name),
                    None => obs,
                }
            })
            .collect();
        *self.script.lock().unwrap() = Script::Rows(observations);
    }

    pub fn go_down(&self) {
        *self.script.lock().unwrap() = Script::Down;
    }
}

#[async_trait]
impl SourceAdapter for ScriptedAdapter {
    fn source_id(&self) -> &str {
        self.id
    }

    fn source_kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self) -> Result<Vec<Observation>, AdapterError> {
        match &*self.script.lock().unwrap() {
            Script::Rows(rows) => Ok(rows.clone()),
            Script::Down => Err(AdapterError::unreachable(self.id, "connection refused")),
        }
    }
}
