//! bridge command - bridge port reporting.

mod commands;

use clap::{Parser, Subcommand};
use maclink::output::{ColorMode, ColorScheme, OutputFormat, OutputOptions};

#[derive(Parser)]
#[command(name = "bridge", version, about = "Bridge port tool")]
struct Cli {
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
    /// Show bridge ports.
    #[command(visible_alias = "l")]
    Link(commands::link::LinkCmd),
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

    match cli.command {
        Command::Link(cmd) => cmd.run(format, &opts).await,
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
        let code = if e.is_usage() { 255 } else { 1 };
        std::process::exit(code);
    }
}
