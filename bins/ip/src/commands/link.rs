//! ip link command implementation.

use std::io;

use clap::{Args, Subcommand};
use maclink::output::{self, OutputFormat, OutputOptions};
use maclink::parse::{hwports, ifconfig};
use maclink::records::LinkRecord;
use maclink::util::addr::{parse_mac, random_mac};
use maclink::{Error, Result, exec, filter, resolve};

#[derive(Args)]
pub struct LinkCmd {
    #[command(subcommand)]
    action: Option<LinkAction>,
}

#[derive(Subcommand)]
enum LinkAction {
    /// Show link state.
    Show {
        /// Interface name.
        dev: Option<String>,
    },

    /// Change device attributes.
    Set {
        /// Interface name.
        dev: String,

        /// Bring the interface up.
        #[arg(long)]
        up: bool,

        /// Bring the interface down.
        #[arg(long)]
        down: bool,

        /// Set the MTU.
        #[arg(long)]
        mtu: Option<u32>,

        /// New link-layer address: a MAC, `random`, or `factory`.
        #[arg(long, value_name = "LLADDR")]
        address: Option<String>,
    },
}

impl LinkCmd {
    pub async fn run(self, format: OutputFormat, opts: &OutputOptions) -> Result<()> {
        match self.action.unwrap_or(LinkAction::Show { dev: None }) {
            LinkAction::Show { dev } => show(dev.as_deref(), format, opts).await,
            LinkAction::Set {
                dev,
                up,
                down,
                mtu,
                address,
            } => set(&dev, up, down, mtu, address.as_deref()).await,
        }
    }
}

/// Fetch the interface listing and resolve bridge memberships. Shared
/// with the address command.
pub async fn fetch_links(dev: Option<&str>) -> Result<Vec<LinkRecord>> {
    let text = match dev {
        Some(dev) => exec::capture(exec::IFCONFIG, &["-v", dev], Some(dev)).await?,
        None => exec::capture(exec::IFCONFIG, &["-v", "-a"], None).await?,
    };
    let mut links = ifconfig::parse(&text)?;
    resolve::resolve_masters(&mut links);
    Ok(links)
}

async fn show(dev: Option<&str>, format: OutputFormat, opts: &OutputOptions) -> Result<()> {
    let mut links = fetch_links(dev).await?;
    // The link report never carries addresses.
    filter::strip_addresses(&mut links);

    let mut w = io::stdout().lock();
    output::print_all(&mut w, &links, format, opts)?;
    Ok(())
}

async fn set(
    dev: &str,
    up: bool,
    down: bool,
    mtu: Option<u32>,
    address: Option<&str>,
) -> Result<()> {
    if up {
        exec::execute_sudo(exec::IFCONFIG, &[dev, "up"]).await?;
    }
    if down {
        exec::execute_sudo(exec::IFCONFIG, &[dev, "down"]).await?;
    }
    if let Some(address) = address {
        let lladdr = match address {
            "random" | "rand" => random_mac(),
            "factory" => factory_mac(dev).await?,
            other => parse_mac(other)?,
        };
        exec::execute_sudo(exec::IFCONFIG, &[dev, "lladdr", &lladdr]).await?;
    }
    if let Some(mtu) = mtu {
        exec::execute_sudo(exec::IFCONFIG, &[dev, "mtu", &mtu.to_string()]).await?;
    }
    Ok(())
}

/// Look up the burned-in address of the hardware port backing a device.
async fn factory_mac(dev: &str) -> Result<String> {
    let text = exec::capture(exec::NETWORKSETUP, &["-listallhardwareports"], None).await?;
    let ports = hwports::parse(&text)?;
    hwports::find_port(&ports, dev)
        .and_then(|p| p.ethernet_address.clone())
        .ok_or_else(|| Error::NotFound {
            name: dev.to_string(),
        })
}
