//! Printable implementation for SocketRecord.

use std::io::Write;

use crate::output::{OutputOptions, Printable};
use crate::records::{Family, SocketRecord};

impl Printable for SocketRecord {
    fn print_text<W: Write>(&self, w: &mut W, opts: &OutputOptions) -> std::io::Result<()> {
        let color = opts.color;
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.netid,
            color.socket_state(&self.state),
            self.recv_q,
            self.send_q,
            color.ifname(&self.local()),
            color.inet(Family::Inet, &self.peer())
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "netid": self.netid,
            "state": self.state,
            "recv_q": self.recv_q,
            "send_q": self.send_q,
            "local_addr": self.local_addr,
            "local_port": self.local_port,
            "peer_addr": self.peer_addr,
            "peer_port": self.peer_port,
        })
    }
}

/// The column header printed before text-mode socket rows.
pub const SOCKET_TABLE_HEADER: &str =
    "Netid\tState\tRecv-Q\tSend-Q\tLocal Address:Port\tPeer Address:Port";
