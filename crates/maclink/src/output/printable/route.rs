//! Printable implementations for route records and lookups.

use std::io::Write;

use crate::output::{OutputOptions, Printable};
use crate::records::{RouteKind, RouteLookup, RouteRecord};

impl Printable for RouteRecord {
    fn print_text<W: Write>(&self, w: &mut W, opts: &OutputOptions) -> std::io::Result<()> {
        let color = opts.color;
        let dst = color.inet_guess(&self.destination);

        if self.kind == RouteKind::Blackhole {
            writeln!(w, "blackhole {}", dst)
        } else if self.scope_link {
            let dev = self.device.as_deref().unwrap_or("");
            writeln!(w, "{} dev {} scope link", dst, color.ifname(dev))
        } else {
            let gw = self.gateway.as_deref().unwrap_or("");
            let dev = self.device.as_deref().unwrap_or("");
            writeln!(
                w,
                "{} via {} dev {}",
                dst,
                color.inet_guess(gw),
                color.ifname(dev)
            )
        }
    }

    fn to_json(&self) -> serde_json::Value {
        if self.kind == RouteKind::Blackhole {
            return serde_json::json!({
                "type": "blackhole",
                "dst": self.destination,
                "flags": self.flags,
            });
        }

        let mut obj = serde_json::json!({
            "dst": self.destination,
            "flags": self.flags,
        });
        if self.scope_link {
            obj["scope"] = serde_json::json!("link");
        }
        if let Some(ref gateway) = self.gateway {
            obj["gateway"] = serde_json::json!(gateway);
        }
        if let Some(ref device) = self.device {
            obj["dev"] = serde_json::json!(device);
        }
        obj
    }
}

impl Printable for RouteLookup {
    fn print_text<W: Write>(&self, w: &mut W, opts: &OutputOptions) -> std::io::Result<()> {
        let color = opts.color;

        write!(w, "{}", color.inet_guess(&self.destination))?;
        if let Some(ref gateway) = self.gateway {
            write!(w, " via {}", color.inet_guess(gateway))?;
        }
        write!(w, " dev {}", color.ifname(&self.device))?;
        if let Some(ref prefsrc) = self.prefsrc {
            write!(w, " src {}", color.inet_guess(prefsrc))?;
        }
        writeln!(w, " uid {}", self.uid)
    }

    fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "dst": self.destination,
            "dev": self.device,
            "uid": self.uid,
            "flags": [],
            "cache": [],
        });
        if let Some(ref gateway) = self.gateway {
            obj["gateway"] = serde_json::json!(gateway);
        }
        if let Some(ref prefsrc) = self.prefsrc {
            obj["prefsrc"] = serde_json::json!(prefsrc);
        }
        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<T: Printable>(item: &T) -> String {
        let mut buf = Vec::new();
        item.print_text(&mut buf, &OutputOptions::default()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_route_text_forms() {
        assert_eq!(
            render(&RouteRecord::via_gateway("default", "192.168.1.1", "en0")),
            "default via 192.168.1.1 dev en0\n"
        );
        assert_eq!(
            render(&RouteRecord::link_scope("169.254.0.0/16", "en0")),
            "169.254.0.0/16 dev en0 scope link\n"
        );
        assert_eq!(
            render(&RouteRecord::blackhole("10.9.8.7/32")),
            "blackhole 10.9.8.7/32\n"
        );
    }

    #[test]
    fn test_route_json_shapes() {
        let via = RouteRecord::via_gateway("default", "192.168.1.1", "en0").to_json();
        assert_eq!(via["gateway"], "192.168.1.1");
        assert!(via.get("scope").is_none());
        assert!(via.get("type").is_none());

        let link = RouteRecord::link_scope("169.254.0.0/16", "en0").to_json();
        assert_eq!(link["scope"], "link");
        assert!(link.get("gateway").is_none());

        let bh = RouteRecord::blackhole("10.9.8.7/32").to_json();
        assert_eq!(bh["type"], "blackhole");
        assert!(bh.get("dev").is_none());
    }

    #[test]
    fn test_lookup_text() {
        let lookup = RouteLookup {
            destination: "1.1.1.1".into(),
            gateway: Some("192.168.1.1".into()),
            device: "en0".into(),
            prefsrc: Some("192.168.1.5".into()),
            uid: 501,
        };
        assert_eq!(
            render(&lookup),
            "1.1.1.1 via 192.168.1.1 dev en0 src 192.168.1.5 uid 501\n"
        );

        let direct = RouteLookup {
            destination: "192.168.1.7".into(),
            gateway: None,
            device: "en0".into(),
            prefsrc: None,
            uid: 0,
        };
        assert_eq!(render(&direct), "192.168.1.7 dev en0 uid 0\n");
    }

    #[test]
    fn test_lookup_json_is_one_element_array() {
        use crate::output::{OutputFormat, print_all};

        let lookup = RouteLookup {
            destination: "1.1.1.1".into(),
            gateway: Some("192.168.1.1".into()),
            device: "en0".into(),
            prefsrc: Some("192.168.1.5".into()),
            uid: 501,
        };
        let mut buf = Vec::new();
        print_all(
            &mut buf,
            std::slice::from_ref(&lookup),
            OutputFormat::Json,
            &OutputOptions::default(),
        )
        .unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["dst"], "1.1.1.1");
        assert_eq!(arr[0]["flags"], serde_json::json!([]));
        assert_eq!(arr[0]["cache"], serde_json::json!([]));
        assert_eq!(arr[0]["prefsrc"], "192.168.1.5");
    }
}
