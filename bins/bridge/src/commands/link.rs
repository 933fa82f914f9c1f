//! bridge link command implementation.

use std::io;

use clap::{Args, Subcommand};
use maclink::output::{self, OutputFormat, OutputOptions};
use maclink::parse::ifconfig;
use maclink::{Result, exec, filter, resolve};

#[derive(Args)]
pub struct LinkCmd {
    #[command(subcommand)]
    action: Option<LinkAction>,
}

#[derive(Subcommand)]
enum LinkAction {
    /// Show bridge port state.
    Show {
        /// Only ports on this interface.
        #[arg(long)]
        dev: Option<String>,
    },
}

impl LinkCmd {
    pub async fn run(self, format: OutputFormat, opts: &OutputOptions) -> Result<()> {
        match self.action.unwrap_or(LinkAction::Show { dev: None }) {
            LinkAction::Show { dev } => show(dev.as_deref(), format, opts).await,
        }
    }
}

async fn show(dev: Option<&str>, format: OutputFormat, opts: &OutputOptions) -> Result<()> {
    let text = exec::capture(exec::IFCONFIG, &["-v", "-a"], None).await?;
    let mut links = ifconfig::parse(&text)?;
    resolve::resolve_masters(&mut links);

    if let Some(dev) = dev {
        filter::require_device(&links, dev)?;
    }

    let mut rows = resolve::bridge_links(&links);
    if let Some(dev) = dev {
        rows.retain(|r| r.ifname == dev);
    }

    let mut w = io::stdout().lock();
    output::print_all(&mut w, &rows, format, opts)?;
    Ok(())
}
