//! ip command - Linux-style network reporting over the BSD tools.

mod commands;

use clap::{Parser, Subcommand};
use maclink::output::{ColorMode, ColorScheme, OutputFormat, OutputOptions};
use maclink::records::Family;

#[derive(Parser)]
#[command(name = "ip", version, about = "Network configuration tool")]
struct Cli {
    /// Use IPv4 only.
    #[arg(short = '4')]
    ipv4: bool,

    /// Use IPv6 only.
    #[arg(short = '6')]
    ipv6: bool,

    /// Output JSON.
    #[arg(short = 'j', long)]
    json: bool,

    /// Pretty print JSON.
    #[arg(short = 'p', long)]
    pretty: bool,

    /// Show details.
    #[arg(short = 'd', long)]
    details: bool,

    /// Colorize output (never, auto, always).
    #[arg(
        short = 'c',
        long,
        value_name = "WHEN",
        num_args = 0..=1,
        default_value = "never",
        default_missing_value = "always"
    )]
    color: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage network interfaces.
    #[command(visible_alias = "l")]
    Link(commands::link::LinkCmd),

    /// Manage IP addresses.
    #[command(visible_alias = "a", visible_alias = "addr")]
    Address(commands::address::AddressCmd),

    /// Manage routing table.
    #[command(visible_alias = "r")]
    Route(commands::route::RouteCmd),

    /// Manage ARP/NDP cache.
    #[command(visible_alias = "n", visible_alias = "neigh")]
    Neighbor(commands::neighbor::NeighborCmd),
}

async fn run(cli: Cli) -> maclink::Result<()> {
    let color_mode: ColorMode = cli.color.parse()?;

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let opts = OutputOptions {
        details: cli.details,
        pretty: cli.pretty,
        color: ColorScheme::detect(color_mode, cli.json),
    };

    let family = match (cli.ipv4, cli.ipv6) {
        (true, false) => Some(Family::Inet),
        (false, true) => Some(Family::Inet6),
        _ => None,
    };

    match cli.command {
        Command::Link(cmd) => cmd.run(format, &opts).await,
        Command::Address(cmd) => cmd.run(format, &opts, family).await,
        Command::Route(cmd) => cmd.run(format, &opts, family).await,
        Command::Neighbor(cmd) => cmd.run(format, &opts, family).await,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{}", e);
        // Usage mistakes and operational failures exit differently, the
        // way the Linux tool family does.
        let code = if e.is_usage() { 255 } else { 1 };
        std::process::exit(code);
    }
}
