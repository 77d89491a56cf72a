use colored::*;
use hostsync_common::network::mac;
use tracing::error;

use crate::terminal::{colors, print};

pub fn normalize(macs: &[String]) -> anyhow::Result<()> {
    let mut invalid: usize = 0;
    for raw in macs {
        match mac::normalize(raw) {
            Ok(canonical) => print::print(&format!(
                "{} {} {}",
                raw.color(colors::TEXT_DEFAULT),
                "→".color(colors::SEPARATOR),
                canonical.color(colors::MAC_ADDR)
            )),
            Err(e) => {
                error!("{e}");
                invalid += 1;
            }
        }
    }

    if invalid > 0 {
        anyhow::bail!("{invalid} of {} addresses could not be normalized", macs.len());
    }
    Ok(())
}
