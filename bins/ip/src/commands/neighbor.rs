//! ip neighbor command implementation.

use std::io;

use clap::{Args, Subcommand};
use maclink::filter::Prefix;
use maclink::output::{self, OutputFormat, OutputOptions};
use maclink::parse::neigh;
use maclink::records::Family;
use maclink::{Error, Result, exec, filter};

#[derive(Args)]
pub struct NeighborCmd {
    #[command(subcommand)]
    action: Option<NeighborAction>,
}

#[derive(Subcommand)]
enum NeighborAction {
    /// Show neighbor cache entries.
    Show {
        /// Only entries inside this prefix.
        prefix: Option<String>,

        /// Only entries on this interface.
        #[arg(long)]
        dev: Option<String>,
    },

    /// Flush neighbor cache entries.
    Flush {
        /// Interface to flush.
        #[arg(long)]
        dev: String,
    },
}

impl NeighborCmd {
    pub async fn run(
        self,
        format: OutputFormat,
        opts: &OutputOptions,
        family: Option<Family>,
    ) -> Result<()> {
        match self.action.unwrap_or(NeighborAction::Show {
            prefix: None,
            dev: None,
        }) {
            NeighborAction::Show { prefix, dev } => {
                show(prefix.as_deref(), dev.as_deref(), format, opts, family).await
            }
            NeighborAction::Flush { dev } => flush(&dev, family).await,
        }
    }
}

/// A device filter naming a nonexistent interface is an error, not an
/// empty result.
async fn require_device(dev: &str) -> Result<()> {
    exec::capture(exec::IFCONFIG, &["-v", dev], Some(dev))
        .await
        .map_err(|_| Error::NotFound {
            name: dev.to_string(),
        })?;
    Ok(())
}

async fn show(
    prefix: Option<&str>,
    dev: Option<&str>,
    format: OutputFormat,
    opts: &OutputOptions,
    family: Option<Family>,
) -> Result<()> {
    // Bad filter arguments fail before any tool runs.
    let prefix: Option<Prefix> = prefix.map(str::parse).transpose()?;
    if let Some(dev) = dev {
        require_device(dev).await?;
    }

    // IPv6 entries first, then IPv4, matching the kernel tool's order.
    let mut neighbors = Vec::new();
    if family != Some(Family::Inet) {
        let text = exec::capture(exec::NDP, &["-an"], None).await?;
        neighbors.extend(neigh::parse_ndp(&text)?);
    }
    if family != Some(Family::Inet6) {
        let mut args = vec!["-anl"];
        if let Some(dev) = dev {
            args.push("-i");
            args.push(dev);
        }
        let text = exec::capture(exec::ARP, &args, None).await?;
        neighbors.extend(neigh::parse_arp(&text)?);
    }

    let neighbors = filter::filter_neighbors(neighbors, dev, prefix.as_ref());

    let mut w = io::stdout().lock();
    output::print_all(&mut w, &neighbors, format, opts)?;
    Ok(())
}

async fn flush(dev: &str, family: Option<Family>) -> Result<()> {
    require_device(dev).await?;

    if family != Some(Family::Inet) {
        // ndp has no per-interface flush.
        println!("ndp cannot flush a single interface; flushing all IPv6 entries.");
        exec::execute_sudo(exec::NDP, &["-cn"]).await?;
    }
    if family != Some(Family::Inet6) {
        exec::execute_sudo(exec::ARP, &["-a", "-d", "-i", dev]).await?;
    }
    Ok(())
}
