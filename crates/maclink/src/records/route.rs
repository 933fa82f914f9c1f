//! Route records recovered from `netstat -nr` and `route -n get`.

/// How a route resolves.
///
/// Exactly one of "blackhole", "has a gateway", "scope link" describes
/// any parsed route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RouteKind {
    #[default]
    Unicast,
    /// Matching traffic is discarded (B flag in the native table).
    Blackhole,
}

/// One row of the routing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    /// CIDR destination, already normalized from classful shorthand,
    /// or the literal `default`.
    pub destination: String,
    pub kind: RouteKind,
    /// Next-hop gateway; absent for blackhole and link-scope routes.
    pub gateway: Option<String>,
    /// Output device; absent for blackhole routes.
    pub device: Option<String>,
    /// `true` for directly connected (link-scope) routes.
    pub scope_link: bool,
    /// Reserved; the native table exposes nothing to put here yet.
    pub flags: Vec<String>,
}

impl RouteRecord {
    pub fn blackhole(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            kind: RouteKind::Blackhole,
            gateway: None,
            device: None,
            scope_link: false,
            flags: Vec::new(),
        }
    }

    pub fn link_scope(destination: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            kind: RouteKind::Unicast,
            gateway: None,
            device: Some(device.into()),
            scope_link: true,
            flags: Vec::new(),
        }
    }

    pub fn via_gateway(
        destination: impl Into<String>,
        gateway: impl Into<String>,
        device: impl Into<String>,
    ) -> Self {
        Self {
            destination: destination.into(),
            kind: RouteKind::Unicast,
            gateway: Some(gateway.into()),
            device: Some(device.into()),
            scope_link: false,
            flags: Vec::new(),
        }
    }
}

/// Result of a single-destination lookup (`route -n get`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLookup {
    pub destination: String,
    pub gateway: Option<String>,
    pub device: String,
    /// Preferred source address, probed by binding a throwaway UDP
    /// socket towards the destination; best effort.
    pub prefsrc: Option<String>,
    /// Uid of the caller, reported for iproute2 parity.
    pub uid: u32,
}
