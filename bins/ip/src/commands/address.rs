//! ip address command implementation.

use std::io;

use clap::{Args, Subcommand};
use maclink::output::{self, OutputFormat, OutputOptions};
use maclink::records::Family;
use maclink::util::addr::parse_prefix;
use maclink::{Result, exec, filter};

use super::link::fetch_links;

#[derive(Args)]
pub struct AddressCmd {
    #[command(subcommand)]
    action: Option<AddressAction>,
}

#[derive(Subcommand)]
enum AddressAction {
    /// Show addresses.
    Show {
        /// Interface name.
        dev: Option<String>,
    },

    /// Add an address to an interface.
    Add {
        /// Address with prefix length (CIDR).
        prefix: String,

        /// Interface name.
        #[arg(long)]
        dev: String,

        /// Peer address for point-to-point links.
        #[arg(long)]
        peer: Option<String>,
    },

    /// Remove an address from an interface.
    Del {
        /// Address with prefix length (CIDR).
        prefix: String,

        /// Interface name.
        #[arg(long)]
        dev: String,
    },
}

impl AddressCmd {
    pub async fn run(
        self,
        format: OutputFormat,
        opts: &OutputOptions,
        family: Option<Family>,
    ) -> Result<()> {
        match self.action.unwrap_or(AddressAction::Show { dev: None }) {
            AddressAction::Show { dev } => show(dev.as_deref(), format, opts, family).await,
            AddressAction::Add { prefix, dev, peer } => {
                add(&prefix, &dev, peer.as_deref(), family).await
            }
            AddressAction::Del { prefix, dev } => del(&prefix, &dev, family).await,
        }
    }
}

async fn show(
    dev: Option<&str>,
    format: OutputFormat,
    opts: &OutputOptions,
    family: Option<Family>,
) -> Result<()> {
    let mut links = fetch_links(dev).await?;
    filter::filter_addresses(&mut links, family);

    let mut w = io::stdout().lock();
    output::print_all(&mut w, &links, format, opts)?;
    Ok(())
}

fn is_inet6(prefix: &str, family: Option<Family>) -> bool {
    prefix.contains(':') || family == Some(Family::Inet6)
}

async fn add(prefix: &str, dev: &str, peer: Option<&str>, family: Option<Family>) -> Result<()> {
    // Validate before touching the system.
    parse_prefix(prefix)?;

    let mut args = vec![dev];
    if is_inet6(prefix, family) {
        args.push("inet6");
    }
    args.push("add");
    args.push(prefix);
    if let Some(peer) = peer {
        args.push(peer);
    }
    exec::execute_sudo(exec::IFCONFIG, &args).await
}

async fn del(prefix: &str, dev: &str, family: Option<Family>) -> Result<()> {
    parse_prefix(prefix)?;

    let inet = if is_inet6(prefix, family) {
        "inet6"
    } else {
        "inet"
    };
    exec::execute_sudo(exec::IFCONFIG, &[dev, inet, prefix, "remove"]).await
}
