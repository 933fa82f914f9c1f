//! Interface records recovered from `ifconfig -v` output.

use std::net::{IpAddr, Ipv4Addr};

use super::Family;

/// Operational state of an interface.
///
/// Derived from the `status:` line; interfaces without one (loopback,
/// bridges) stay `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OperState {
    Up,
    Down,
    #[default]
    Unknown,
}

impl OperState {
    pub fn name(self) -> &'static str {
        match self {
            OperState::Up => "UP",
            OperState::Down => "DOWN",
            OperState::Unknown => "UNKNOWN",
        }
    }
}

/// Link-layer type, as iproute2 spells it in the `link/...` line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkType {
    /// Has an `ether` line.
    Ether,
    /// LOOPBACK flag set; never carries a real hardware address.
    Loopback,
    /// POINTOPOINT without LOOPBACK (utun, ppp).
    None,
    #[default]
    Unknown,
}

impl LinkType {
    pub fn name(self) -> &'static str {
        match self {
            LinkType::Ether => "ether",
            LinkType::Loopback => "loopback",
            LinkType::None => "none",
            LinkType::Unknown => "unknown",
        }
    }
}

/// One `inet` or `inet6` line of an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    pub family: Family,
    /// Local address, zone suffix already stripped.
    pub local: IpAddr,
    /// Peer address on point-to-point links (`--> addr`).
    pub peer: Option<IpAddr>,
    /// Prefix length; hex netmasks are converted by counting set bits.
    pub prefix_len: u8,
    /// Broadcast address, inet only.
    pub broadcast: Option<Ipv4Addr>,
}

/// One `member:` line inside a bridge configuration block.
///
/// The port/priority/cost fields come from the `ifmaxaddr ... port ...`
/// continuation line and default to zero when it is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeMember {
    pub ifname: String,
    pub flags: Vec<String>,
    pub if_max_addr: u32,
    /// Bridge port index, not the member's interface index.
    pub port: u32,
    pub priority: u32,
    pub path_cost: u32,
}

/// Bridge parameters from the `maxage ... holdcnt ...` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeInfo {
    pub max_age: u32,
    pub hold_count: u32,
    pub protocol: String,
    pub max_addr: u32,
    pub timeout: u32,
    pub members: Vec<BridgeMember>,
}

/// VLAN sub-interface parameters from the `vlan: <id> parent interface:`
/// line. The protocol is always 802.1Q on this platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlanInfo {
    pub protocol: &'static str,
    pub vlan_id: u16,
}

/// One interface as reported by `ifconfig -v`.
///
/// `ifindex` and `ifname` are each unique within one parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub ifindex: u32,
    pub ifname: String,
    /// The bracketed flag-name list, split on commas; may be empty.
    pub flags: Vec<String>,
    pub mtu: u32,
    pub oper_state: OperState,
    pub link_type: LinkType,
    /// Hardware address. Fixed all-zero for loopback links.
    pub address: Option<String>,
    /// Hardware broadcast address.
    pub broadcast: Option<String>,
    pub addresses: Vec<AddressRecord>,
    /// Bridge parameter block, present on bridge interfaces.
    pub bridge: Option<BridgeInfo>,
    /// Name of the bridge this link is a member of (resolved after the
    /// parse, see [`crate::resolve`]).
    pub master: Option<String>,
    /// Parent interface of a vlan sub-interface.
    pub parent: Option<String>,
    pub vlan: Option<VlanInfo>,
}

impl LinkRecord {
    /// Check whether a flag name is set.
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.iter().any(|f| f == name)
    }
}

/// One row of `bridge link show`: a bridge member joined with its own
/// link record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeLink {
    /// Bridge port index (from the member block, not the ifindex).
    pub port: u32,
    pub ifname: String,
    /// Flags of the member's own link record.
    pub flags: Vec<String>,
    pub mtu: u32,
    /// Name of the owning bridge.
    pub master: String,
    /// The native tools expose no per-port STP state; members are
    /// reported as forwarding.
    pub state: &'static str,
    pub priority: u32,
    pub cost: u32,
}

/// One block of `networksetup -listallhardwareports`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwarePort {
    /// Human-readable port name ("Wi-Fi", "Thunderbolt Ethernet").
    pub name: String,
    /// BSD device name ("en0").
    pub device: String,
    /// Factory MAC address; "N/A" blocks parse to `None`.
    pub ethernet_address: Option<String>,
}
