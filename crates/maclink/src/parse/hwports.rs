//! Parser for `networksetup -listallhardwareports`.

use crate::error::Result;
use crate::records::HardwarePort;

/// Parse the hardware port inventory into records.
///
/// Output is blocks of three labelled lines separated by blank lines:
///
/// ```text
/// Hardware Port: Wi-Fi
/// Device: en0
/// Ethernet Address: aa:bb:cc:dd:ee:ff
/// ```
///
/// Ports without a burned-in address print `N/A`; those records carry
/// no ethernet address. Trailing commentary (the VLAN configuration
/// note) has no `Device:` line and is dropped.
pub fn parse(text: &str) -> Result<Vec<HardwarePort>> {
    let mut ports = Vec::new();
    let mut current: Option<HardwarePort> = None;

    for line in text.lines() {
        if let Some(name) = line.strip_prefix("Hardware Port: ") {
            if let Some(port) = current.take()
                && !port.device.is_empty()
            {
                ports.push(port);
            }
            current = Some(HardwarePort {
                name: name.trim().to_string(),
                device: String::new(),
                ethernet_address: None,
            });
        } else if let Some(device) = line.strip_prefix("Device: ") {
            if let Some(port) = current.as_mut() {
                port.device = device.trim().to_string();
            }
        } else if let Some(mac) = line.strip_prefix("Ethernet Address: ") {
            let mac = mac.trim();
            if let Some(port) = current.as_mut()
                && mac != "N/A"
            {
                port.ethernet_address = Some(mac.to_string());
            }
        }
    }
    if let Some(port) = current
        && !port.device.is_empty()
    {
        ports.push(port);
    }

    Ok(ports)
}

/// Find the hardware port backing a device name.
pub fn find_port<'a>(ports: &'a [HardwarePort], device: &str) -> Option<&'a HardwarePort> {
    ports.iter().find(|p| p.device == device)
}
