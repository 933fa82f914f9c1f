//! Neighbor-cache records recovered from `ndp -an` and `arp -anl`.

use std::net::IpAddr;

/// Reachability state of a neighbor entry.
///
/// `ndp` reports a one-letter code per row; `arp` has no state column,
/// so its entries are either reachable or incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborState {
    Reachable,
    Stale,
    Delay,
    Probe,
    Incomplete,
}

impl NeighborState {
    pub fn name(self) -> &'static str {
        match self {
            NeighborState::Reachable => "REACHABLE",
            NeighborState::Stale => "STALE",
            NeighborState::Delay => "DELAY",
            NeighborState::Probe => "PROBE",
            NeighborState::Incomplete => "INCOMPLETE",
        }
    }
}

/// One neighbor-cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborRecord {
    /// Neighbor address, zone suffix already stripped.
    pub destination: IpAddr,
    /// Link-layer address; `None` means resolution is incomplete.
    pub lladdr: Option<String>,
    pub device: String,
    pub state: NeighborState,
    /// IPv6 router flag; always false for arp-sourced entries.
    pub is_router: bool,
}
