//! End-to-end pipeline tests: parse fixture tool output, resolve
//! cross-references, filter, and render.

use maclink::filter;
use maclink::output::{self, OutputFormat, OutputOptions, Printable};
use maclink::parse::{ifconfig, neigh, netstat};
use maclink::records::{Family, LinkType, OperState};
use maclink::resolve;

const IFCONFIG_FIXTURE: &str = "\
lo0: flags=8049<UP,LOOPBACK,RUNNING,MULTICAST> mtu 16384 index 1
\toptions=1203<RXCSUM,TXCSUM,TXSTATUS,SW_TIMESTAMP>
\tinet 127.0.0.1 netmask 0xff000000
\tinet6 ::1 prefixlen 128
\tinet6 fe80::1%lo0 prefixlen 64 scopeid 0x1
en0: flags=8863<UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500 index 4
\tether aa:bb:cc:dd:ee:ff
\tinet6 fe80::1c2a:abcd:1234:5678%en0 prefixlen 64 secured scopeid 0x4
\tinet 192.168.1.5 netmask 0xffffff00 broadcast 192.168.1.255
\tmedia: autoselect
\tstatus: active
en1: flags=8963<UP,BROADCAST,SMART,RUNNING,PROMISC,SIMPLEX,MULTICAST> mtu 1500 index 5
\tether aa:bb:cc:dd:ee:01
\tstatus: active
vlan10: flags=8843<UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500 index 6
\tether aa:bb:cc:dd:ee:ff
\tvlan: 10 parent interface: en0
\tstatus: active
bridge0: flags=8863<UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500 index 7
\tether 36:5d:77:aa:bb:00
\tConfiguration:
\t\tid 0:0:0:0:0:0 priority 0 hellotime 0 fwddelay 0
\t\tmaxage 0 holdcnt 0 proto stp maxaddr 100 timeout 1200
\t\troot id 0:0:0:0:0:0 priority 0 ifcost 0 port 0
\tmember: en1 flags=3<LEARNING,DISCOVER>
\t        ifmaxaddr 0 port 5 priority 0 path cost 0
\tstatus: inactive
utun0: flags=8051<UP,POINTOPOINT,RUNNING,MULTICAST> mtu 1380 index 8
\tinet 10.8.0.2 --> 10.8.0.1 netmask 0xffffffff
";

fn parse_and_resolve() -> Vec<maclink::records::LinkRecord> {
    let mut links = ifconfig::parse(IFCONFIG_FIXTURE).unwrap();
    resolve::resolve_masters(&mut links);
    links
}

#[test]
fn link_records_survive_the_pipeline() {
    let links = parse_and_resolve();
    assert_eq!(links.len(), 6);

    let lo0 = &links[0];
    assert_eq!(lo0.link_type, LinkType::Loopback);
    assert_eq!(lo0.address.as_deref(), Some("00:00:00:00:00:00"));
    assert_eq!(lo0.oper_state, OperState::Unknown);

    let en0 = &links[1];
    assert_eq!(en0.ifindex, 4);
    assert_eq!(en0.oper_state, OperState::Up);
    assert_eq!(en0.addresses.len(), 2);

    let utun0 = &links[5];
    assert_eq!(utun0.link_type, LinkType::None);
    assert_eq!(
        utun0.addresses[0].peer,
        Some("10.8.0.1".parse().unwrap())
    );
    assert_eq!(utun0.addresses[0].prefix_len, 32);
}

#[test]
fn bridge_membership_resolves_and_projects() {
    let links = parse_and_resolve();

    let en1 = links.iter().find(|l| l.ifname == "en1").unwrap();
    assert_eq!(en1.master.as_deref(), Some("bridge0"));

    let rows = resolve::bridge_links(&links);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ifname, "en1");
    assert_eq!(rows[0].port, 5);
    assert_eq!(rows[0].master, "bridge0");
    assert_eq!(rows[0].mtu, 1500);
}

#[test]
fn vlan_parent_is_recorded() {
    let links = parse_and_resolve();
    let vlan10 = links.iter().find(|l| l.ifname == "vlan10").unwrap();
    assert_eq!(vlan10.parent.as_deref(), Some("en0"));
    assert_eq!(vlan10.vlan.as_ref().unwrap().vlan_id, 10);
}

#[test]
fn family_filter_narrows_addresses() {
    let mut links = parse_and_resolve();
    filter::filter_addresses(&mut links, Some(Family::Inet6));

    let lo0 = &links[0];
    assert_eq!(lo0.addresses.len(), 2);
    assert!(lo0.addresses.iter().all(|a| a.family == Family::Inet6));

    let en1 = links.iter().find(|l| l.ifname == "en1").unwrap();
    assert!(en1.addresses.is_empty());
}

#[test]
fn rendered_text_matches_report_grammar() {
    let links = parse_and_resolve();
    let en0 = &links[1];

    let mut buf = Vec::new();
    en0.print_text(&mut buf, &OutputOptions::default()).unwrap();
    let text = String::from_utf8(buf).unwrap();

    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "4: en0: <UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500 status UP"
    );
    assert_eq!(
        lines.next().unwrap(),
        "    link/ether aa:bb:cc:dd:ee:ff brd ff:ff:ff:ff:ff:ff"
    );
    // Parse order preserved: the inet6 line came first in the fixture.
    assert_eq!(
        lines.next().unwrap(),
        "    inet6 fe80::1c2a:abcd:1234:5678/64"
    );
    assert_eq!(
        lines.next().unwrap(),
        "    inet 192.168.1.5/24 brd 192.168.1.255"
    );
    assert!(lines.next().is_none());
}

#[test]
fn compact_and_pretty_json_carry_the_same_data() {
    let links = parse_and_resolve();
    let opts = OutputOptions::default();
    let pretty_opts = OutputOptions {
        pretty: true,
        ..opts
    };

    let mut compact = Vec::new();
    let mut pretty = Vec::new();
    output::print_all(&mut compact, &links, OutputFormat::Json, &opts).unwrap();
    output::print_all(&mut pretty, &links, OutputFormat::Json, &pretty_opts).unwrap();

    let a: serde_json::Value = serde_json::from_slice(&compact).unwrap();
    let b: serde_json::Value = serde_json::from_slice(&pretty).unwrap();
    assert_eq!(a, b);

    let arr = a.as_array().unwrap();
    assert_eq!(arr.len(), 6);
    let en1 = arr.iter().find(|l| l["ifname"] == "en1").unwrap();
    assert_eq!(en1["master"], "bridge0");
}

#[test]
fn neighbor_merge_keeps_v6_before_v4() {
    let ndp = "\
Neighbor                        Linklayer Address  Netif Expire    St Flgs Prbs
fe80::1%en0                     aa:bb:cc:dd:ee:1    en0 23h59m57s S  R
";
    let arp = "\
Neighbor                Linklayer Address Expire(O) Expire(I)    Netif Refs Prbs
192.168.1.1             aa:bb:cc:dd:ee:1  1m10s     1m10s          en0    3
192.168.1.9             aa:bb:cc:dd:ee:2  1m10s     1m10s          en1    1
";
    let mut merged = neigh::parse_ndp(ndp).unwrap();
    merged.extend(neigh::parse_arp(arp).unwrap());

    let kept = filter::filter_neighbors(merged, Some("en0"), None);
    assert_eq!(kept.len(), 2);
    assert!(kept[0].destination.is_ipv6());
    assert!(kept[1].destination.is_ipv4());
}

#[test]
fn route_table_renders_linux_style() {
    let table = "\
Routing tables

Internet:
Destination        Gateway            Flags           Netif Expire
default            192.168.1.1        UGScg             en0
169.254            link#4             UCS               en0      !
10.9.8.7           127.0.0.1          UGHSB             lo0
";
    let routes = netstat::parse(table, Family::Inet).unwrap();
    let mut buf = Vec::new();
    output::print_all(&mut buf, &routes, OutputFormat::Text, &OutputOptions::default()).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "default via 192.168.1.1 dev en0\n\
         169.254.0.0/16 dev en0 scope link\n\
         blackhole 10.9.8.7/32\n"
    );
}
