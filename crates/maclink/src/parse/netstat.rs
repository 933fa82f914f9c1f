//! Parser for `netstat -nr -f <family>` routing tables.
//!
//! Rows are whitespace-separated columns under a `Destination` header.
//! Two column layouts exist in the wild: the older one carries `Refs`
//! and `Use` columns (device in column 5), the newer one drops them
//! (device in column 3). Both parse here.

use crate::error::{Error, Result};
use crate::records::{Family, RouteRecord};
use crate::util::addr::{cidr_from_netstat_dst, strip_zone_before_slash};

/// Parse one address family's routing table into ordered records.
///
/// Rows flagged `W` (transient cloned routes) are never surfaced. Rows
/// flagged `B` become blackhole routes regardless of other columns. A
/// `link#N` gateway marks a directly connected route.
pub fn parse(text: &str, family: Family) -> Result<Vec<RouteRecord>> {
    let mut routes = Vec::new();
    let mut in_table = false;

    for line in text.lines() {
        if !in_table {
            in_table = line.starts_with("Destination");
            continue;
        }
        if line.trim().is_empty() {
            // End of this family's section.
            break;
        }

        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() < 4 {
            return Err(Error::malformed("netstat", format!("bad route row `{line}`")));
        }
        let target = cols[0];
        let gateway = cols[1];
        let flags = cols[2];
        // Older layout has Refs/Use columns before Netif.
        let device = if cols.len() >= 6 { cols[5] } else { cols[3] };

        if flags.contains('W') {
            continue;
        }

        let destination = match family {
            Family::Inet => cidr_from_netstat_dst(target),
            Family::Inet6 => strip_zone_before_slash(target),
        };

        if flags.contains('B') {
            routes.push(RouteRecord::blackhole(destination));
        } else if is_link_gateway(gateway) {
            routes.push(RouteRecord::link_scope(destination, device));
        } else {
            routes.push(RouteRecord::via_gateway(destination, gateway, device));
        }
    }

    if !in_table {
        return Err(Error::malformed("netstat", "no routing table header found"));
    }
    Ok(routes)
}

/// Gateways of directly connected routes read `link#<ifindex>`.
fn is_link_gateway(gateway: &str) -> bool {
    gateway
        .strip_prefix("link")
        .is_some_and(|tail| !tail.is_empty())
}
