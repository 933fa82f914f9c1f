//! Printable implementation for NeighborRecord.

use std::io::Write;

use crate::output::{OutputOptions, Printable};
use crate::records::{Family, NeighborRecord};

impl Printable for NeighborRecord {
    fn print_text<W: Write>(&self, w: &mut W, opts: &OutputOptions) -> std::io::Result<()> {
        let color = opts.color;
        let family = Family::of(&self.destination);

        write!(w, "{}", color.inet(family, &self.destination.to_string()))?;
        write!(w, " dev {}", color.ifname(&self.device))?;
        if let Some(ref lladdr) = self.lladdr {
            write!(w, " lladdr {}", color.mac(lladdr))?;
        }
        if self.is_router {
            write!(w, " router")?;
        }
        writeln!(w, " {}", self.state.name())
    }

    fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "dst": self.destination.to_string(),
            "dev": self.device,
            "state": [self.state.name()],
        });
        if let Some(ref lladdr) = self.lladdr {
            obj["lladdr"] = serde_json::json!(lladdr);
        }
        // iproute2 emits a null router field rather than a boolean.
        if self.is_router {
            obj["router"] = serde_json::Value::Null;
        }
        obj
    }
}
