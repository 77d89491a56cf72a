//! # Identifier Normalizer
//!
//! Sources report hardware addresses in whatever notation their vendor prefers.
//! Everything downstream compares identifiers as plain strings, so every address
//! is funneled through [`normalize`] first.
//!
//! Accepted notations:
//! * Colon-delimited: `AA:BB:CC:DD:EE:FF`
//! * Hyphen-delimited: `aa-bb-cc-dd-ee-ff`
//! * Cisco dotted groups: `aabb.ccdd.eeff`
//! * Bare hex: `aabbccddeeff`

use pnet::util::MacAddr;

use crate::error::IdentifierError;

const MAC_HEX_LEN: usize = 12;

/// Parses a hardware address in any supported notation.
pub fn parse(raw: &str) -> Result<MacAddr, IdentifierError> {
    let invalid = || IdentifierError::Invalid {
        raw: raw.to_string(),
    };

    let digits: Vec<u8> = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ':' | '-' | '.'))
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(invalid)?;

    if digits.len() != MAC_HEX_LEN {
        return Err(invalid());
    }

    let mut octets = [0u8; 6];
    for (octet, pair) in octets.iter_mut().zip(digits.chunks_exact(2)) {
        *octet = (pair[0] << 4) | pair[1];
    }

    let [a, b, c, d, e, f] = octets;
    Ok(MacAddr::new(a, b, c, d, e, f))
}

/// Canonicalizes a hardware address into the lowercase, colon-delimited form.
///
/// `normalize(normalize(x)) == normalize(x)` for every accepted `x`.
pub fn normalize(raw: &str) -> Result<String, IdentifierError> {
    parse(raw).map(|mac| mac.to_string())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
