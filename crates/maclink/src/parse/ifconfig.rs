//! Parser for `ifconfig -v` interface listings.
//!
//! A line starting in column zero with `name:` opens a new record and
//! flushes the previous one; indented lines update the record in
//! progress. Only the bracketed flag-name list is used for semantics,
//! never the hex flag bitmask.

use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use winnow::ascii::{digit1, hex_digit1};
use winnow::combinator::{opt, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{rest, take_until, take_while};

use crate::error::{Error, Result};
use crate::records::{
    AddressRecord, BridgeInfo, BridgeMember, Family, LinkRecord, LinkType, OperState, VlanInfo,
};
use crate::util::addr::{netmask_to_length, parse_mac};

const ZERO_MAC: &str = "00:00:00:00:00:00";
const BROADCAST_MAC: &str = "ff:ff:ff:ff:ff:ff";

/// Parse a full `ifconfig -v` listing into an ordered link sequence.
///
/// Records with no address lines still appear, with an empty address
/// list. A header line that does not match the expected pattern fails
/// the whole parse.
pub fn parse(text: &str) -> Result<Vec<LinkRecord>> {
    let mut links: Vec<LinkRecord> = Vec::new();
    let mut current: Option<LinkRecord> = None;

    for line in text.lines() {
        if is_header_line(line) {
            let hdr = header
                .parse(line)
                .map_err(|_| Error::malformed("ifconfig", format!("bad interface header `{line}`")))?;
            if let Some(done) = current.take() {
                links.push(done);
            }
            current = Some(new_record(hdr));
            continue;
        }

        let Some(link) = current.as_mut() else {
            continue;
        };
        apply_detail(link, line.trim_start())?;
    }

    if let Some(done) = current.take() {
        links.push(done);
    }

    check_unique(&links)?;
    Ok(links)
}

/// A header line starts in column zero with `name:`.
fn is_header_line(line: &str) -> bool {
    let Some(colon) = line.find(':') else {
        return false;
    };
    colon > 0
        && line[..colon]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

struct Header {
    ifname: String,
    flags: Vec<String>,
    mtu: u32,
    ifindex: u32,
}

fn new_record(hdr: Header) -> LinkRecord {
    let mut link = LinkRecord {
        ifindex: hdr.ifindex,
        ifname: hdr.ifname,
        flags: hdr.flags,
        mtu: hdr.mtu,
        oper_state: OperState::Unknown,
        link_type: LinkType::Unknown,
        address: None,
        broadcast: None,
        addresses: Vec::new(),
        bridge: None,
        master: None,
        parent: None,
        vlan: None,
    };
    // Loopback links never carry a real hardware address; point-to-point
    // links carry none at all.
    if link.has_flag("LOOPBACK") {
        link.link_type = LinkType::Loopback;
        link.address = Some(ZERO_MAC.to_string());
        link.broadcast = Some(ZERO_MAC.to_string());
    } else if link.has_flag("POINTOPOINT") {
        link.link_type = LinkType::None;
    }
    link
}

fn apply_detail(link: &mut LinkRecord, line: &str) -> Result<()> {
    if line.starts_with("ether ") {
        let mac = ether_line
            .parse(line)
            .ok()
            .and_then(|m| parse_mac(m).ok())
            .ok_or_else(|| Error::malformed("ifconfig", format!("bad ether line `{line}`")))?;
        // LOOPBACK wins over any ether line.
        if link.link_type != LinkType::Loopback {
            link.link_type = LinkType::Ether;
            link.address = Some(mac);
            link.broadcast = Some(BROADCAST_MAC.to_string());
        }
    } else if line.starts_with("inet6 ") {
        let addr = inet6_line
            .parse(line)
            .map_err(|_| Error::malformed("ifconfig", format!("bad inet6 line `{line}`")))?;
        link.addresses.push(addr);
    } else if line.starts_with("inet ") {
        let addr = inet4_line
            .parse(line)
            .map_err(|_| Error::malformed("ifconfig", format!("bad inet line `{line}`")))?;
        link.addresses.push(addr);
    } else if line.starts_with("status: ") {
        match line["status: ".len()..].split_whitespace().next() {
            Some("active") => link.oper_state = OperState::Up,
            Some("inactive") => link.oper_state = OperState::Down,
            _ => {}
        }
    } else if line.starts_with("vlan: ") {
        let (id, parent) = vlan_line
            .parse(line)
            .map_err(|_| Error::malformed("ifconfig", format!("bad vlan line `{line}`")))?;
        link.vlan = Some(VlanInfo {
            protocol: "802.1Q",
            vlan_id: id,
        });
        link.parent = parent;
    } else if line.starts_with("maxage ") {
        let info = bridge_params_line
            .parse(line)
            .map_err(|_| Error::malformed("ifconfig", format!("bad bridge parameters `{line}`")))?;
        link.bridge = Some(info);
    } else if line.starts_with("member: ") {
        let member = member_line
            .parse(line)
            .map_err(|_| Error::malformed("ifconfig", format!("bad member line `{line}`")))?;
        link.bridge
            .get_or_insert_with(default_bridge)
            .members
            .push(member);
    } else if line.starts_with("ifmaxaddr ") {
        let (if_max_addr, port, priority, path_cost) = port_params_line
            .parse(line)
            .map_err(|_| Error::malformed("ifconfig", format!("bad port parameters `{line}`")))?;
        if let Some(member) = link.bridge.as_mut().and_then(|b| b.members.last_mut()) {
            member.if_max_addr = if_max_addr;
            member.port = port;
            member.priority = priority;
            member.path_cost = path_cost;
        }
    }
    // Everything else (options:, media:, nd6 options:, ...) is noise.
    Ok(())
}

fn check_unique(links: &[LinkRecord]) -> Result<()> {
    let mut names = HashSet::new();
    let mut indexes = HashSet::new();
    for link in links {
        if !names.insert(link.ifname.as_str()) {
            return Err(Error::malformed(
                "ifconfig",
                format!("duplicate interface name {}", link.ifname),
            ));
        }
        if !indexes.insert(link.ifindex) {
            return Err(Error::malformed(
                "ifconfig",
                format!("duplicate interface index {}", link.ifindex),
            ));
        }
    }
    Ok(())
}

fn default_bridge() -> BridgeInfo {
    BridgeInfo {
        max_age: 0,
        hold_count: 0,
        protocol: String::new(),
        max_addr: 0,
        timeout: 0,
        members: Vec::new(),
    }
}

// Line grammars.

fn ident<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

fn header(input: &mut &str) -> ModalResult<Header> {
    let ifname = ident.parse_next(input)?;
    ": flags=".parse_next(input)?;
    let _bits = hex_digit1.parse_next(input)?;
    '<'.parse_next(input)?;
    let flags: &str = take_until(0.., ">").parse_next(input)?;
    '>'.parse_next(input)?;
    take_until(1.., "mtu ").parse_next(input)?;
    "mtu ".parse_next(input)?;
    let mtu = digit1.parse_to().parse_next(input)?;
    take_until(1.., "index ").parse_next(input)?;
    "index ".parse_next(input)?;
    let ifindex = digit1.parse_to().parse_next(input)?;
    rest.parse_next(input)?;
    Ok(Header {
        ifname: ifname.to_string(),
        flags: split_flags(flags),
        mtu,
        ifindex,
    })
}

/// The flag list may legitimately be empty (`flags=0<>`).
fn split_flags(flags: &str) -> Vec<String> {
    if flags.is_empty() {
        Vec::new()
    } else {
        flags.split(',').map(str::to_string).collect()
    }
}

fn ipv4(input: &mut &str) -> ModalResult<Ipv4Addr> {
    take_while(1.., |c: char| c.is_ascii_digit() || c == '.')
        .parse_to()
        .parse_next(input)
}

/// An inet6 token with an optional `%zone` suffix, which is stripped.
fn ipv6(input: &mut &str) -> ModalResult<Ipv6Addr> {
    let token = take_while(1.., |c: char| c.is_ascii_hexdigit() || c == ':').parse_next(input)?;
    let _zone = opt(preceded('%', ident)).parse_next(input)?;
    token
        .parse()
        .map_err(|_| ErrMode::Cut(ContextError::new()))
}

fn ether_line<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    "ether ".parse_next(input)?;
    let mac = take_while(1.., |c: char| c.is_ascii_hexdigit() || c == ':').parse_next(input)?;
    rest.parse_next(input)?;
    Ok(mac)
}

fn inet4_line(input: &mut &str) -> ModalResult<AddressRecord> {
    "inet ".parse_next(input)?;
    let local = ipv4.parse_next(input)?;
    let peer = opt(preceded(" --> ", ipv4)).parse_next(input)?;
    " netmask 0x".parse_next(input)?;
    let mask: &str = hex_digit1.parse_next(input)?;
    let prefix_len = netmask_to_length(mask).map_err(|_| ErrMode::Cut(ContextError::new()))?;
    let broadcast = opt(preceded(" broadcast ", ipv4)).parse_next(input)?;
    rest.parse_next(input)?;
    Ok(AddressRecord {
        family: Family::Inet,
        local: IpAddr::V4(local),
        peer: peer.map(IpAddr::V4),
        prefix_len,
        broadcast,
    })
}

fn inet6_line(input: &mut &str) -> ModalResult<AddressRecord> {
    "inet6 ".parse_next(input)?;
    let local = ipv6.parse_next(input)?;
    let peer = opt(preceded(" --> ", ipv6)).parse_next(input)?;
    " prefixlen ".parse_next(input)?;
    let prefix_len = digit1.parse_to().parse_next(input)?;
    rest.parse_next(input)?;
    Ok(AddressRecord {
        family: Family::Inet6,
        local: IpAddr::V6(local),
        peer: peer.map(IpAddr::V6),
        prefix_len,
        broadcast: None,
    })
}

fn vlan_line(input: &mut &str) -> ModalResult<(u16, Option<String>)> {
    "vlan: ".parse_next(input)?;
    let id = digit1.parse_to().parse_next(input)?;
    " parent interface: ".parse_next(input)?;
    let parent: &str = rest.parse_next(input)?;
    let parent = parent.trim();
    let parent = if parent.is_empty() || parent == "<none>" {
        None
    } else {
        Some(parent.to_string())
    };
    Ok((id, parent))
}

fn bridge_params_line(input: &mut &str) -> ModalResult<BridgeInfo> {
    "maxage ".parse_next(input)?;
    let max_age = digit1.parse_to().parse_next(input)?;
    " holdcnt ".parse_next(input)?;
    let hold_count = digit1.parse_to().parse_next(input)?;
    " proto ".parse_next(input)?;
    let protocol = ident.parse_next(input)?;
    " maxaddr ".parse_next(input)?;
    let max_addr = digit1.parse_to().parse_next(input)?;
    " timeout ".parse_next(input)?;
    let timeout = digit1.parse_to().parse_next(input)?;
    rest.parse_next(input)?;
    Ok(BridgeInfo {
        max_age,
        hold_count,
        protocol: protocol.to_string(),
        max_addr,
        timeout,
        members: Vec::new(),
    })
}

fn member_line(input: &mut &str) -> ModalResult<BridgeMember> {
    "member: ".parse_next(input)?;
    let ifname = ident.parse_next(input)?;
    " flags=".parse_next(input)?;
    let _bits = hex_digit1.parse_next(input)?;
    '<'.parse_next(input)?;
    let flags: &str = take_until(0.., ">").parse_next(input)?;
    '>'.parse_next(input)?;
    rest.parse_next(input)?;
    Ok(BridgeMember {
        ifname: ifname.to_string(),
        flags: split_flags(flags),
        if_max_addr: 0,
        port: 0,
        priority: 0,
        path_cost: 0,
    })
}

fn port_params_line(input: &mut &str) -> ModalResult<(u32, u32, u32, u32)> {
    "ifmaxaddr ".parse_next(input)?;
    let if_max_addr = digit1.parse_to().parse_next(input)?;
    " port ".parse_next(input)?;
    let port = digit1.parse_to().parse_next(input)?;
    " priority ".parse_next(input)?;
    let priority = digit1.parse_to().parse_next(input)?;
    " path cost ".parse_next(input)?;
    let path_cost = digit1.parse_to().parse_next(input)?;
    rest.parse_next(input)?;
    Ok((if_max_addr, port, priority, path_cost))
}
