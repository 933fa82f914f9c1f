//! Socket records recovered from `netstat -na`, for the `ss` front-end.

/// One socket row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketRecord {
    /// Protocol column, lowercased ("tcp4", "udp6", ...).
    pub netid: String,
    /// Connection state in ss spelling (ESTAB, LISTEN, CLOSE-WAIT, ...);
    /// UNKNOWN for stateless rows.
    pub state: String,
    pub recv_q: u64,
    pub send_q: u64,
    pub local_addr: String,
    pub local_port: String,
    pub peer_addr: String,
    pub peer_port: String,
}

impl SocketRecord {
    /// `addr:port` form of the local endpoint.
    pub fn local(&self) -> String {
        format!("{}:{}", self.local_addr, self.local_port)
    }

    /// `addr:port` form of the peer endpoint.
    pub fn peer(&self) -> String {
        format!("{}:{}", self.peer_addr, self.peer_port)
    }
}
