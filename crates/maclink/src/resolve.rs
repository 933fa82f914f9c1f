//! Cross-reference resolution over a freshly parsed link set.
//!
//! The parsers record references by name only (bridge members, vlan
//! parents); this pass joins them back onto the link records they name.
//! A dangling reference is an inconsistency in the tool output, not a
//! caller mistake, so it is logged and skipped rather than failed.

use tracing::warn;

use crate::records::{BridgeLink, LinkRecord};

/// Fill in `master` on every link that some bridge claims as a member,
/// and validate vlan parent references.
pub fn resolve_masters(links: &mut [LinkRecord]) {
    let memberships: Vec<(String, String)> = links
        .iter()
        .filter_map(|l| l.bridge.as_ref().map(|b| (l.ifname.clone(), b)))
        .flat_map(|(bridge, info)| {
            info.members
                .iter()
                .map(move |m| (bridge.clone(), m.ifname.clone()))
        })
        .collect();

    for (bridge, member) in memberships {
        match links.iter_mut().find(|l| l.ifname == member) {
            Some(link) => link.master = Some(bridge),
            None => warn!(bridge, member, "bridge member has no interface record"),
        }
    }

    let names: Vec<String> = links.iter().map(|l| l.ifname.clone()).collect();
    for link in links.iter() {
        if let Some(parent) = &link.parent
            && !names.contains(parent)
        {
            warn!(vlan = link.ifname, parent, "vlan parent has no interface record");
        }
    }
}

/// Join every bridge's member list with the members' own link records,
/// in bridge order then member order. Members without a link record
/// are dropped.
pub fn bridge_links(links: &[LinkRecord]) -> Vec<BridgeLink> {
    let mut rows = Vec::new();
    for bridge in links {
        let Some(info) = &bridge.bridge else { continue };
        for member in &info.members {
            let Some(link) = links.iter().find(|l| l.ifname == member.ifname) else {
                continue;
            };
            rows.push(BridgeLink {
                port: member.port,
                ifname: member.ifname.clone(),
                flags: link.flags.clone(),
                mtu: link.mtu,
                master: bridge.ifname.clone(),
                state: "forwarding",
                priority: member.priority,
                cost: member.path_cost,
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{BridgeInfo, BridgeMember, LinkType, OperState};

    fn link(ifindex: u32, ifname: &str) -> LinkRecord {
        LinkRecord {
            ifindex,
            ifname: ifname.into(),
            flags: vec!["UP".into(), "BROADCAST".into()],
            mtu: 1500,
            oper_state: OperState::Up,
            link_type: LinkType::Ether,
            address: Some("aa:bb:cc:dd:ee:ff".into()),
            broadcast: Some("ff:ff:ff:ff:ff:ff".into()),
            addresses: vec![],
            bridge: None,
            master: None,
            parent: None,
            vlan: None,
        }
    }

    fn member(ifname: &str, port: u32) -> BridgeMember {
        BridgeMember {
            ifname: ifname.into(),
            flags: vec![],
            if_max_addr: 0,
            port,
            priority: 0,
            path_cost: 0,
        }
    }

    fn bridge(ifindex: u32, ifname: &str, members: Vec<BridgeMember>) -> LinkRecord {
        let mut l = link(ifindex, ifname);
        l.bridge = Some(BridgeInfo {
            max_age: 20,
            hold_count: 1,
            protocol: "stp".into(),
            max_addr: 100,
            timeout: 1200,
            members,
        });
        l
    }

    #[test]
    fn test_resolve_masters() {
        let mut links = vec![
            link(4, "en1"),
            link(5, "en2"),
            bridge(7, "bridge0", vec![member("en1", 1), member("en2", 2)]),
        ];
        resolve_masters(&mut links);
        assert_eq!(links[0].master.as_deref(), Some("bridge0"));
        assert_eq!(links[1].master.as_deref(), Some("bridge0"));
        assert!(links[2].master.is_none());
    }

    #[test]
    fn test_dangling_member_is_skipped() {
        let mut links = vec![
            link(4, "en1"),
            bridge(7, "bridge0", vec![member("en1", 1), member("en9", 2)]),
        ];
        resolve_masters(&mut links);
        assert_eq!(links[0].master.as_deref(), Some("bridge0"));
    }

    #[test]
    fn test_bridge_links_join() {
        let mut links = vec![
            link(4, "en1"),
            link(5, "en2"),
            bridge(
                7,
                "bridge0",
                vec![
                    BridgeMember {
                        priority: 32,
                        path_cost: 55,
                        ..member("en1", 1)
                    },
                    member("en9", 2),
                    member("en2", 3),
                ],
            ),
        ];
        resolve_masters(&mut links);
        let rows = bridge_links(&links);

        // The dangling en9 member is dropped without renumbering.
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].ifname, "en1");
        assert_eq!(rows[0].port, 1);
        assert_eq!(rows[0].master, "bridge0");
        assert_eq!(rows[0].mtu, 1500);
        assert_eq!(rows[0].state, "forwarding");
        assert_eq!(rows[0].priority, 32);
        assert_eq!(rows[0].cost, 55);
        assert_eq!(rows[1].ifname, "en2");
        assert_eq!(rows[1].port, 3);
    }
}
