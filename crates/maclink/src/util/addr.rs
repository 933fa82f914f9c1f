//! Address parsing and formatting utilities.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use rand::Rng;

use crate::error::{Error, Result};

/// Parse an IP address from string.
pub fn parse_addr(s: &str) -> Result<IpAddr> {
    s.parse()
        .map_err(|_| Error::usage(format!("invalid address: {s}")))
}

/// Parse an IP address with prefix length (CIDR notation).
/// Returns (address, prefix_length). A bare address gets the full
/// host-prefix for its family.
pub fn parse_prefix(s: &str) -> Result<(IpAddr, u8)> {
    if let Some((addr_str, prefix_str)) = s.split_once('/') {
        let addr = parse_addr(addr_str)?;
        let prefix: u8 = prefix_str
            .parse()
            .map_err(|_| Error::usage(format!("invalid prefix length: {prefix_str}")))?;

        let max_prefix = if addr.is_ipv4() { 32 } else { 128 };
        if prefix > max_prefix {
            return Err(Error::usage(format!(
                "prefix length {prefix} exceeds maximum {max_prefix} for address family"
            )));
        }

        Ok((addr, prefix))
    } else {
        let addr = parse_addr(s)?;
        let prefix = if addr.is_ipv4() { 32 } else { 128 };
        Ok((addr, prefix))
    }
}

/// Parse a MAC address from string into canonical lowercase form.
pub fn parse_mac(s: &str) -> Result<String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 6 {
        return Err(Error::usage(format!("invalid MAC address: {s}")));
    }

    let mut mac = [0u8; 6];
    for (i, part) in parts.iter().enumerate() {
        if part.len() > 2 {
            return Err(Error::usage(format!("invalid MAC address: {s}")));
        }
        mac[i] = u8::from_str_radix(part, 16)
            .map_err(|_| Error::usage(format!("invalid MAC address: {s}")))?;
    }

    Ok(format_mac(&mac))
}

/// Format a MAC address.
pub fn format_mac(bytes: &[u8; 6]) -> String {
    format!(
        "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5]
    )
}

/// Generate a random MAC address under the XenSource Inc. OUI.
pub fn random_mac() -> String {
    let mut rng = rand::thread_rng();
    format_mac(&[
        0x00,
        0x16,
        0x3e,
        rng.gen_range(0x00..=0x7f),
        rng.r#gen(),
        rng.r#gen(),
    ])
}

/// Convert a hexadecimal netmask (`0xffffff00`) to a prefix length by
/// counting set bits.
pub fn netmask_to_length(mask: &str) -> Result<u8> {
    let digits = mask.strip_prefix("0x").unwrap_or(mask);
    let bits = u32::from_str_radix(digits, 16)
        .map_err(|_| Error::usage(format!("invalid netmask: {mask}")))?;
    Ok(bits.count_ones() as u8)
}

/// Normalize a netstat destination from classful shorthand to CIDR.
///
/// A bare address implies a mask from the historical class rule (one
/// written octet per /8), and the address is zero-padded to four
/// octets; `default` and already-CIDR destinations pass through with
/// only the padding applied. Idempotent on CIDR input.
pub fn cidr_from_netstat_dst(target: &str) -> String {
    if target == "default" {
        return target.to_string();
    }

    let dots = target.matches('.').count();
    let (addr, netmask) = match target.split_once('/') {
        Some((addr, mask)) => (addr, mask.to_string()),
        None => (target, ((dots + 1) * 8).to_string()),
    };

    let mut addr = addr.to_string();
    for _ in dots..3 {
        addr.push_str(".0");
    }
    format!("{addr}/{netmask}")
}

/// Strip a `%zone` suffix from an address token (`fe80::1%lo0`).
pub fn strip_zone(addr: &str) -> &str {
    addr.split('%').next().unwrap_or(addr)
}

/// Strip a `%zone` suffix sitting before the prefix slash of an inet6
/// netstat destination (`fe80::%lo0/64` becomes `fe80::/64`).
pub fn strip_zone_before_slash(target: &str) -> String {
    if let (Some(pct), Some(slash)) = (target.find('%'), target.find('/'))
        && pct < slash
    {
        return format!("{}{}", &target[..pct], &target[slash..]);
    }
    target.to_string()
}

/// Check if an IPv4 address is in a given prefix.
pub fn ipv4_in_prefix(addr: Ipv4Addr, prefix_addr: Ipv4Addr, prefix_len: u8) -> bool {
    if prefix_len == 0 {
        return true;
    }
    if prefix_len > 32 {
        return false;
    }

    let mask = !0u32 << (32 - prefix_len);
    (u32::from(addr) & mask) == (u32::from(prefix_addr) & mask)
}

/// Check if an IPv6 address is in a given prefix.
pub fn ipv6_in_prefix(addr: Ipv6Addr, prefix_addr: Ipv6Addr, prefix_len: u8) -> bool {
    if prefix_len == 0 {
        return true;
    }
    if prefix_len > 128 {
        return false;
    }

    let mask = !0u128 << (128 - prefix_len);
    (u128::from(addr) & mask) == (u128::from(prefix_addr) & mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_addr() {
        assert_eq!(
            parse_addr("192.168.1.1").unwrap(),
            IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1))
        );
        assert_eq!(parse_addr("::1").unwrap(), IpAddr::V6(Ipv6Addr::LOCALHOST));
        assert!(parse_addr("not-an-address").unwrap_err().is_usage());
    }

    #[test]
    fn test_parse_prefix() {
        let (addr, prefix) = parse_prefix("192.168.1.0/24").unwrap();
        assert_eq!(addr, IpAddr::V4(Ipv4Addr::new(192, 168, 1, 0)));
        assert_eq!(prefix, 24);

        let (_, prefix) = parse_prefix("fe80::1").unwrap();
        assert_eq!(prefix, 128);

        assert!(parse_prefix("10.0.0.0/33").unwrap_err().is_usage());
    }

    #[test]
    fn test_parse_mac() {
        assert_eq!(parse_mac("AA:BB:cc:dd:ee:ff").unwrap(), "aa:bb:cc:dd:ee:ff");
        assert!(parse_mac("aa:bb:cc").is_err());
        assert!(parse_mac("aa:bb:cc:dd:ee:zz").is_err());
    }

    #[test]
    fn test_random_mac_oui() {
        let mac = random_mac();
        assert!(mac.starts_with("00:16:3e:"));
        assert_eq!(mac.len(), 17);
    }

    #[test]
    fn test_netmask_to_length() {
        assert_eq!(netmask_to_length("0xffffff00").unwrap(), 24);
        assert_eq!(netmask_to_length("0xff000000").unwrap(), 8);
        assert_eq!(netmask_to_length("0xffffffff").unwrap(), 32);
        assert!(netmask_to_length("0xzz").is_err());
    }

    #[test]
    fn test_cidr_from_netstat_dst() {
        assert_eq!(cidr_from_netstat_dst("default"), "default");
        assert_eq!(cidr_from_netstat_dst("192.168/16"), "192.168.0.0/16");
        assert_eq!(cidr_from_netstat_dst("10"), "10.0.0.0/8");
        assert_eq!(cidr_from_netstat_dst("169.254"), "169.254.0.0/16");
        assert_eq!(cidr_from_netstat_dst("192.168.1"), "192.168.1.0/24");
        assert_eq!(cidr_from_netstat_dst("192.168.1.1"), "192.168.1.1/32");
    }

    #[test]
    fn test_cidr_normalization_idempotent() {
        let once = cidr_from_netstat_dst("172.16/12");
        let twice = cidr_from_netstat_dst(&once);
        assert_eq!(once, twice);
        assert_eq!(cidr_from_netstat_dst("10.0.0.0/8"), "10.0.0.0/8");
    }

    #[test]
    fn test_strip_zone() {
        assert_eq!(strip_zone("fe80::1%lo0"), "fe80::1");
        assert_eq!(strip_zone("fe80::1"), "fe80::1");
        assert_eq!(strip_zone_before_slash("fe80::%lo0/64"), "fe80::/64");
        assert_eq!(strip_zone_before_slash("fe80::/64"), "fe80::/64");
        assert_eq!(strip_zone_before_slash("2001:db8::"), "2001:db8::");
    }

    #[test]
    fn test_prefix_containment() {
        assert!(ipv4_in_prefix(
            Ipv4Addr::new(192, 168, 1, 50),
            Ipv4Addr::new(192, 168, 1, 0),
            24
        ));
        assert!(!ipv4_in_prefix(
            Ipv4Addr::new(192, 168, 2, 50),
            Ipv4Addr::new(192, 168, 1, 0),
            24
        ));
        assert!(ipv4_in_prefix(
            Ipv4Addr::new(8, 8, 8, 8),
            Ipv4Addr::new(0, 0, 0, 0),
            0
        ));

        let net: Ipv6Addr = "2001:db8::".parse().unwrap();
        assert!(ipv6_in_prefix("2001:db8::42".parse().unwrap(), net, 32));
        assert!(!ipv6_in_prefix("2001:db9::42".parse().unwrap(), net, 32));
    }
}
