//! Parser for `route -n get <addr>` key/value output.

use crate::error::{Error, Result};
use crate::records::RouteLookup;

/// Parse the key/value blob printed by `route -n get`.
///
/// Only the keys the report needs are read; the rest (`mask:`,
/// `flags:`, the statistics footer) are skipped. The preferred source
/// address and uid are runtime properties filled in by the caller.
pub fn parse(text: &str, requested: &str) -> Result<RouteLookup> {
    let mut destination = None;
    let mut gateway = None;
    let mut device = None;

    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.trim() {
            "route to" => destination = Some(value.to_string()),
            "gateway" => gateway = Some(value.to_string()),
            "interface" => device = Some(value.to_string()),
            _ => {}
        }
    }

    let device = device
        .ok_or_else(|| Error::malformed("route", "lookup output names no interface"))?;

    Ok(RouteLookup {
        destination: destination.unwrap_or_else(|| requested.to_string()),
        gateway,
        device,
        prefsrc: None,
        uid: 0,
    })
}
