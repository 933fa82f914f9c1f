//! ss command - socket listing from netstat.

use std::io::{self, Write};

use clap::Parser;
use maclink::filter::{self, SocketFilter};
use maclink::output::{self, ColorMode, ColorScheme, OutputFormat, OutputOptions};
use maclink::parse::sockets;
use maclink::records::Family;
use maclink::{Result, exec};

#[derive(Parser)]
#[command(name = "ss", version, about = "Socket statistics tool")]
struct Cli {
    /// Show all sockets, listening included.
    #[arg(short = 'a', long)]
    all: bool,

    /// Show listening sockets.
    #[arg(short = 'l', long)]
    listening: bool,

    /// Show only TCP sockets.
    #[arg(short = 't', long)]
    tcp: bool,

    /// Show only UDP sockets.
    #[arg(short = 'u', long)]
    udp: bool,

    /// Show only unix sockets.
    #[arg(short = 'x', long)]
    unix: bool,

    /// Show only raw sockets.
    #[arg(short = 'w', long)]
    raw: bool,

    /// IPv4 sockets only.
    #[arg(short = '4')]
    ipv4: bool,

    /// IPv6 sockets only.
    #[arg(short = '6')]
    ipv6: bool,

    /// Numeric output (never resolve names; always on).
    #[arg(short = 'n', long)]
    numeric: bool,

    /// Print protocol statistics instead of sockets.
    #[arg(short = 's', long)]
    summary: bool,

    /// Output JSON.
    #[arg(short = 'j', long)]
    json: bool,

    /// Pretty print JSON.
    #[arg(short = 'p', long)]
    pretty: bool,

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
}

async fn run(cli: Cli) -> Result<()> {
    let color_mode: ColorMode = cli.color.parse()?;

    if cli.summary {
        // The statistics report is netstat's own, verbatim.
        let text = exec::capture(exec::NETSTAT, &["-s"], None).await?;
        print!("{}", text);
        return Ok(());
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let opts = OutputOptions {
        details: false,
        pretty: cli.pretty,
        color: ColorScheme::detect(color_mode, cli.json),
    };

    let socket_filter = SocketFilter {
        listening: cli.all || cli.listening,
        tcp_only: cli.tcp,
        udp_only: cli.udp,
        unix_only: cli.unix,
        raw_only: cli.raw,
        family: match (cli.ipv4, cli.ipv6) {
            (true, false) => Some(Family::Inet),
            (false, true) => Some(Family::Inet6),
            _ => None,
        },
    };

    let text = exec::capture(exec::NETSTAT, &["-na"], None).await?;
    let rows = filter::filter_sockets(sockets::parse(&text)?, &socket_filter);

    let mut w = io::stdout().lock();
    if format == OutputFormat::Text {
        writeln!(&mut w, "{}", output::SOCKET_TABLE_HEADER)?;
    }
    output::print_all(&mut w, &rows, format, &opts)?;
    Ok(())
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
        let code = if e.is_usage() { 255 } else { 1 };
        std::process::exit(code);
    }
}
