//! Printable implementation for BridgeLink.

use std::io::Write;

use crate::output::{OutputOptions, Printable};
use crate::records::BridgeLink;

impl Printable for BridgeLink {
    fn print_text<W: Write>(&self, w: &mut W, opts: &OutputOptions) -> std::io::Result<()> {
        writeln!(
            w,
            "{}: {}: <{}> mtu {} master {} state {} priority {} cost {}",
            self.port,
            opts.color.ifname(&self.ifname),
            self.flags.join(","),
            self.mtu,
            self.master,
            self.state,
            self.priority,
            self.cost
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "ifindex": self.port,
            "ifname": self.ifname,
            "flags": self.flags,
            "mtu": self.mtu,
            "master": self.master,
            "state": self.state,
            "priority": self.priority,
            "cost": self.cost,
        })
    }
}
