//! Typed records recovered from the native tools' output.
//!
//! Every record is built fresh from a single parse and discarded after
//! one render; there is no cross-invocation state.

pub mod link;
pub mod neigh;
pub mod route;
pub mod socket;

pub use link::{
    AddressRecord, BridgeInfo, BridgeLink, BridgeMember, HardwarePort, LinkRecord, LinkType,
    OperState, VlanInfo,
};
pub use neigh::{NeighborRecord, NeighborState};
pub use route::{RouteKind, RouteLookup, RouteRecord};
pub use socket::SocketRecord;

/// Address family of a parsed address or table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// IPv4.
    Inet,
    /// IPv6.
    Inet6,
}

impl Family {
    /// The family keyword as the native tools and iproute2 spell it.
    pub fn name(self) -> &'static str {
        match self {
            Family::Inet => "inet",
            Family::Inet6 => "inet6",
        }
    }

    /// Family of an address.
    pub fn of(addr: &std::net::IpAddr) -> Self {
        if addr.is_ipv4() {
            Family::Inet
        } else {
            Family::Inet6
        }
    }
}
