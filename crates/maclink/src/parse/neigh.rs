//! Parsers for the neighbor caches: `ndp -an` (IPv6) and `arp -anl`
//! (IPv4).

use crate::error::{Error, Result};
use crate::records::{NeighborRecord, NeighborState};
use crate::util::addr::{parse_mac, strip_zone};

/// Parse `ndp -an` output into IPv6 neighbor records.
///
/// Column layout: `Neighbor Linklayer-Address Netif Expire St Flgs...`.
/// A `(incomplete)` link-layer column means no resolved address; such an
/// entry is reported as reachable only when the state column says so,
/// otherwise it collapses to incomplete. An `R` flags column marks the
/// neighbor as a router.
pub fn parse_ndp(text: &str) -> Result<Vec<NeighborRecord>> {
    let mut neighbors = Vec::new();

    for line in text.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() < 5 {
            return Err(Error::malformed("ndp", format!("bad neighbor row `{line}`")));
        }

        let destination = strip_zone(cols[0])
            .parse()
            .map_err(|_| Error::malformed("ndp", format!("bad address `{}`", cols[0])))?;
        let lladdr = if cols[1] == "(incomplete)" {
            None
        } else {
            Some(parse_mac_lenient(cols[1])?)
        };

        let mut state = match cols[4] {
            "R" => NeighborState::Reachable,
            "S" => NeighborState::Stale,
            "D" => NeighborState::Delay,
            "P" => NeighborState::Probe,
            "I" | "N" | "W" => NeighborState::Incomplete,
            other => {
                return Err(Error::malformed("ndp", format!("unknown state `{other}`")));
            }
        };
        if lladdr.is_none() && cols[4] != "R" {
            state = NeighborState::Incomplete;
        }
        let is_router = cols.len() > 5 && cols[5] == "R";

        neighbors.push(NeighborRecord {
            destination,
            lladdr,
            device: cols[2].to_string(),
            state,
            is_router,
        });
    }

    Ok(neighbors)
}

/// Parse `arp -anl` output into IPv4 neighbor records.
///
/// Column layout: `Neighbor Linklayer-Address Expire(O) Expire(I) Netif
/// Refs Prbs`. The ARP cache carries no state machine; resolved entries
/// are reported reachable, unresolved ones incomplete.
pub fn parse_arp(text: &str) -> Result<Vec<NeighborRecord>> {
    let mut neighbors = Vec::new();

    for line in text.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() < 5 {
            return Err(Error::malformed("arp", format!("bad neighbor row `{line}`")));
        }

        let destination = cols[0]
            .parse()
            .map_err(|_| Error::malformed("arp", format!("bad address `{}`", cols[0])))?;
        let (lladdr, state) = if cols[1] == "(incomplete)" {
            (None, NeighborState::Incomplete)
        } else {
            (Some(parse_mac_lenient(cols[1])?), NeighborState::Reachable)
        };

        neighbors.push(NeighborRecord {
            destination,
            lladdr,
            device: cols[4].to_string(),
            state,
            is_router: false,
        });
    }

    Ok(neighbors)
}

/// The native tools print MAC octets without leading zeros (`0:1:2:...`);
/// renormalize to the canonical two-digit form.
fn parse_mac_lenient(s: &str) -> Result<String> {
    parse_mac(s).map_err(|_| Error::malformed("neighbor cache", format!("bad lladdr `{s}`")))
}
