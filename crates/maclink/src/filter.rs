//! Caller-supplied filters, applied uniformly across commands.
//!
//! Family, device-name and prefix-membership filtering all happen here,
//! after parsing and state derivation, so every command filters the
//! same way.

use std::net::IpAddr;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::records::{Family, LinkRecord, NeighborRecord, SocketRecord};
use crate::util::addr;

/// A CIDR network used for containment filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefix {
    pub addr: IpAddr,
    pub len: u8,
}

impl Prefix {
    /// Test membership; addresses of the other family never match.
    pub fn contains(&self, addr: &IpAddr) -> bool {
        match (self.addr, addr) {
            (IpAddr::V4(net), IpAddr::V4(a)) => addr::ipv4_in_prefix(*a, net, self.len),
            (IpAddr::V6(net), IpAddr::V6(a)) => addr::ipv6_in_prefix(*a, net, self.len),
            _ => false,
        }
    }
}

impl FromStr for Prefix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (addr, len) = addr::parse_prefix(s)?;
        Ok(Prefix { addr, len })
    }
}

/// Drop every address list entry whose family doesn't match the filter.
pub fn filter_addresses(links: &mut [LinkRecord], family: Option<Family>) {
    let Some(family) = family else { return };
    for link in links {
        link.addresses.retain(|a| a.family == family);
    }
}

/// Drop all address lists (for `ip link show`, which never reports
/// addresses).
pub fn strip_addresses(links: &mut [LinkRecord]) {
    for link in links {
        link.addresses.clear();
    }
}

/// Apply device and prefix filters to a merged neighbor list.
pub fn filter_neighbors(
    neighbors: Vec<NeighborRecord>,
    device: Option<&str>,
    prefix: Option<&Prefix>,
) -> Vec<NeighborRecord> {
    neighbors
        .into_iter()
        .filter(|n| device.is_none_or(|d| n.device == d))
        .filter(|n| prefix.is_none_or(|p| p.contains(&n.destination)))
        .collect()
}

/// Socket selection flags, one per `ss` option.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocketFilter {
    /// Keep LISTEN sockets (`-a`/`-l`).
    pub listening: bool,
    pub tcp_only: bool,
    pub udp_only: bool,
    pub unix_only: bool,
    pub raw_only: bool,
    pub family: Option<Family>,
}

impl SocketFilter {
    fn matches(&self, socket: &SocketRecord) -> bool {
        let netid = socket.netid.as_str();
        if self.tcp_only && !netid.starts_with("tcp") {
            return false;
        }
        if self.udp_only && !netid.starts_with("udp") {
            return false;
        }
        if self.unix_only && !netid.starts_with("unix") {
            return false;
        }
        if self.raw_only && !netid.contains("raw") {
            return false;
        }
        match self.family {
            Some(Family::Inet) if !netid.contains('4') => return false,
            Some(Family::Inet6) if !netid.contains('6') => return false,
            _ => {}
        }
        if !self.listening && socket.state == "LISTEN" {
            return false;
        }
        true
    }
}

/// Apply protocol, family and listening filters to a socket list.
pub fn filter_sockets(sockets: Vec<SocketRecord>, filter: &SocketFilter) -> Vec<SocketRecord> {
    sockets.into_iter().filter(|s| filter.matches(s)).collect()
}

/// Require a device name to be present in a parsed link set.
pub fn require_device(links: &[LinkRecord], name: &str) -> Result<()> {
    if links.iter().any(|l| l.ifname == name) {
        Ok(())
    } else {
        Err(Error::NotFound { name: name.into() })
    }
}
