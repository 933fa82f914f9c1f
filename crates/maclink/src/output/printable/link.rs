//! Printable implementation for LinkRecord.

use std::io::Write;

use crate::output::{OutputOptions, Printable};
use crate::records::LinkRecord;

impl Printable for LinkRecord {
    fn print_text<W: Write>(&self, w: &mut W, opts: &OutputOptions) -> std::io::Result<()> {
        let color = opts.color;

        write!(
            w,
            "{}: {}: <{}> mtu {}",
            self.ifindex,
            color.ifname(&self.ifname),
            self.flags.join(","),
            self.mtu
        )?;
        if let Some(ref master) = self.master {
            write!(w, " master {}", master)?;
        }
        writeln!(w, " status {}", color.oper_state(self.oper_state.name()))?;

        write!(w, "    link/{}", self.link_type.name())?;
        if let Some(ref address) = self.address {
            write!(w, " {}", color.mac(address))?;
        }
        if let Some(ref broadcast) = self.broadcast {
            write!(w, " brd {}", color.mac(broadcast))?;
        }
        writeln!(w)?;

        if opts.details
            && let Some(ref vlan) = self.vlan
        {
            write!(w, "    vlan protocol {} id {}", vlan.protocol, vlan.vlan_id)?;
            if let Some(ref parent) = self.parent {
                write!(w, " parent {}", parent)?;
            }
            writeln!(w)?;
        }

        for a in &self.addresses {
            let family = a.family.name();
            write!(w, "    {} {}", family, color.inet(a.family, &a.local.to_string()))?;
            if let Some(peer) = a.peer {
                write!(w, " peer {}", color.inet(a.family, &peer.to_string()))?;
            }
            write!(w, "/{}", a.prefix_len)?;
            if let Some(brd) = a.broadcast {
                write!(w, " brd {}", color.inet(a.family, &brd.to_string()))?;
            }
            writeln!(w)?;
        }

        Ok(())
    }

    fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "ifindex": self.ifindex,
            "ifname": self.ifname,
            "flags": self.flags,
            "mtu": self.mtu,
            "operstate": self.oper_state.name(),
            "link_type": self.link_type.name(),
        });

        if let Some(ref address) = self.address {
            obj["address"] = serde_json::json!(address);
        }
        if let Some(ref broadcast) = self.broadcast {
            obj["broadcast"] = serde_json::json!(broadcast);
        }
        if let Some(ref master) = self.master {
            obj["master"] = serde_json::json!(master);
        }
        if let Some(ref parent) = self.parent {
            obj["link"] = serde_json::json!(parent);
        }
        if let Some(ref vlan) = self.vlan {
            obj["linkinfo"] = serde_json::json!({
                "info_kind": "vlan",
                "info_data": { "protocol": vlan.protocol, "id": vlan.vlan_id },
            });
        }

        // The link report strips addresses before rendering; only the
        // address report carries addr_info.
        if self.addresses.is_empty() {
            return obj;
        }
        let addr_info: Vec<serde_json::Value> = self
            .addresses
            .iter()
            .map(|a| {
                let mut addr = serde_json::json!({
                    "family": a.family.name(),
                    "local": a.local.to_string(),
                    "prefixlen": a.prefix_len,
                });
                if let Some(peer) = a.peer {
                    addr["address"] = serde_json::json!(peer.to_string());
                }
                if let Some(brd) = a.broadcast {
                    addr["broadcast"] = serde_json::json!(brd.to_string());
                }
                addr
            })
            .collect();
        obj["addr_info"] = serde_json::Value::Array(addr_info);

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{AddressRecord, Family, LinkType, OperState};

    fn en0() -> LinkRecord {
        LinkRecord {
            ifindex: 4,
            ifname: "en0".into(),
            flags: vec![
                "UP".into(),
                "BROADCAST".into(),
                "SMART".into(),
                "RUNNING".into(),
                "SIMPLEX".into(),
                "MULTICAST".into(),
            ],
            mtu: 1500,
            oper_state: OperState::Up,
            link_type: LinkType::Ether,
            address: Some("aa:bb:cc:dd:ee:ff".into()),
            broadcast: Some("ff:ff:ff:ff:ff:ff".into()),
            addresses: vec![AddressRecord {
                family: Family::Inet,
                local: "192.168.1.5".parse().unwrap(),
                peer: None,
                prefix_len: 24,
                broadcast: Some("192.168.1.255".parse().unwrap()),
            }],
            bridge: None,
            master: None,
            parent: None,
            vlan: None,
        }
    }

    fn render(link: &LinkRecord, opts: &OutputOptions) -> String {
        let mut buf = Vec::new();
        link.print_text(&mut buf, opts).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_layout() {
        let text = render(&en0(), &OutputOptions::default());
        assert_eq!(
            text,
            "4: en0: <UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500 status UP\n\
             \x20   link/ether aa:bb:cc:dd:ee:ff brd ff:ff:ff:ff:ff:ff\n\
             \x20   inet 192.168.1.5/24 brd 192.168.1.255\n"
        );
    }

    #[test]
    fn test_text_with_master() {
        let mut link = en0();
        link.master = Some("bridge0".into());
        let text = render(&link, &OutputOptions::default());
        assert!(text.starts_with(
            "4: en0: <UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500 master bridge0 status UP\n"
        ));
    }

    #[test]
    fn test_peer_precedes_prefix_len() {
        let mut link = en0();
        link.addresses = vec![AddressRecord {
            family: Family::Inet,
            local: "10.8.0.2".parse().unwrap(),
            peer: Some("10.8.0.1".parse().unwrap()),
            prefix_len: 32,
            broadcast: None,
        }];
        let text = render(&link, &OutputOptions::default());
        assert!(text.contains("    inet 10.8.0.2 peer 10.8.0.1/32\n"));
    }

    #[test]
    fn test_json_optional_fields() {
        let mut link = en0();
        link.address = None;
        link.broadcast = None;
        let json = link.to_json();
        assert_eq!(json["ifindex"], 4);
        assert_eq!(json["operstate"], "UP");
        assert!(json.get("address").is_none());
        assert!(json.get("master").is_none());
        assert_eq!(json["addr_info"][0]["local"], "192.168.1.5");
        assert_eq!(json["addr_info"][0]["prefixlen"], 24);
        assert!(json["addr_info"][0].get("address").is_none());
    }

    #[test]
    fn test_json_omits_addr_info_when_stripped() {
        let mut link = en0();
        link.addresses.clear();
        let json = link.to_json();
        assert!(json.get("addr_info").is_none());
        assert_eq!(json["ifname"], "en0");
    }
}
