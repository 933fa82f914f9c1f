//! ip route command implementation.

use std::io;
use std::net::{IpAddr, SocketAddr, UdpSocket};

use clap::{Args, Subcommand};
use maclink::output::{self, OutputFormat, OutputOptions};
use maclink::parse::{netstat, route_get};
use maclink::records::Family;
use maclink::{Error, Result, exec};

#[derive(Args)]
pub struct RouteCmd {
    #[command(subcommand)]
    action: Option<RouteAction>,
}

#[derive(Subcommand)]
enum RouteAction {
    /// List routes.
    Show,

    /// Look up the route to a single destination.
    Get {
        /// Destination address.
        address: String,
    },

    /// Add a route.
    Add {
        /// Destination (CIDR or `default`).
        destination: String,

        /// Next-hop gateway.
        #[arg(long)]
        via: Option<String>,

        /// Output device.
        #[arg(long)]
        dev: Option<String>,

        /// Discard matching traffic.
        #[arg(long)]
        blackhole: bool,
    },

    /// Delete a route.
    Del {
        /// Destination (CIDR or `default`).
        destination: String,

        /// The route being removed is a blackhole.
        #[arg(long)]
        blackhole: bool,
    },

    /// Replace a route (delete then add).
    Replace {
        /// Destination (CIDR or `default`).
        destination: String,

        /// Next-hop gateway.
        #[arg(long)]
        via: Option<String>,

        /// Output device.
        #[arg(long)]
        dev: Option<String>,

        /// Discard matching traffic.
        #[arg(long)]
        blackhole: bool,
    },

    /// Flush routes (`cache` or `table main`).
    Flush {
        #[arg(required = true)]
        target: Vec<String>,
    },
}

impl RouteCmd {
    pub async fn run(
        self,
        format: OutputFormat,
        opts: &OutputOptions,
        family: Option<Family>,
    ) -> Result<()> {
        match self.action.unwrap_or(RouteAction::Show) {
            RouteAction::Show => show(format, opts, family).await,
            RouteAction::Get { address } => get(&address, format, opts, family).await,
            RouteAction::Add {
                destination,
                via,
                dev,
                blackhole,
            } => add(&destination, via.as_deref(), dev.as_deref(), blackhole, family).await,
            RouteAction::Del {
                destination,
                blackhole,
            } => del(&destination, blackhole, family).await,
            RouteAction::Replace {
                destination,
                via,
                dev,
                blackhole,
            } => {
                del(&destination, blackhole, family).await?;
                add(&destination, via.as_deref(), dev.as_deref(), blackhole, family).await
            }
            RouteAction::Flush { target } => flush(&target, family).await,
        }
    }
}

/// The route listing covers one family at a time, IPv4 by default.
async fn show(format: OutputFormat, opts: &OutputOptions, family: Option<Family>) -> Result<()> {
    let family = family.unwrap_or(Family::Inet);
    let text = exec::capture(exec::NETSTAT, &["-nr", "-f", family.name()], None).await?;
    let routes = netstat::parse(&text, family)?;

    let mut w = io::stdout().lock();
    output::print_all(&mut w, &routes, format, opts)?;
    Ok(())
}

fn is_inet6(target: &str, family: Option<Family>) -> bool {
    target.contains(':') || family == Some(Family::Inet6)
}

async fn get(
    address: &str,
    format: OutputFormat,
    opts: &OutputOptions,
    family: Option<Family>,
) -> Result<()> {
    let args: Vec<&str> = if is_inet6(address, family) {
        vec!["-n", "get", "-inet6", address]
    } else {
        vec!["-n", "get", address]
    };
    let text = exec::capture(exec::ROUTE, &args, Some(address)).await?;
    if text.contains("not in table") {
        return Err(Error::ExternalTool {
            tool: "route".into(),
            message: text.trim().to_string(),
        });
    }

    let mut lookup = route_get::parse(&text, address)?;
    lookup.prefsrc = preferred_source(&lookup.destination);
    lookup.uid = unsafe { libc::getuid() };

    let mut w = io::stdout().lock();
    output::print_all(&mut w, std::slice::from_ref(&lookup), format, opts)?;
    Ok(())
}

/// Probe the preferred source address by connecting a throwaway UDP
/// socket towards the destination. Best effort; symbolic destinations
/// (`default`) simply yield nothing.
fn preferred_source(destination: &str) -> Option<String> {
    let addr: IpAddr = destination.parse().ok()?;
    let bind = if addr.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
    let socket = UdpSocket::bind(bind).ok()?;
    socket.connect(SocketAddr::new(addr, 7)).ok()?;
    socket.local_addr().ok().map(|a| a.ip().to_string())
}

async fn add(
    destination: &str,
    via: Option<&str>,
    dev: Option<&str>,
    blackhole: bool,
    family: Option<Family>,
) -> Result<()> {
    let inet6 = is_inet6(destination, family);

    let mut args: Vec<&str> = vec!["add"];
    if inet6 {
        args.push("-inet6");
    }
    args.push(destination);

    if blackhole {
        // A blackhole route is a loopback gateway with the -blackhole
        // modifier.
        args.push(if inet6 { "::1" } else { "127.0.0.1" });
        args.push("-blackhole");
    } else if let Some(via) = via {
        args.push(via);
    } else if let Some(dev) = dev {
        args.push("-interface");
        args.push(dev);
    } else {
        return Err(Error::usage(
            "route add requires --via, --dev, or --blackhole",
        ));
    }

    exec::execute_sudo(exec::ROUTE, &args).await
}

async fn del(destination: &str, blackhole: bool, family: Option<Family>) -> Result<()> {
    let inet6 = is_inet6(destination, family);

    let mut args: Vec<&str> = vec!["delete"];
    if inet6 {
        args.push("-inet6");
    }
    args.push(destination);
    if blackhole {
        args.push(if inet6 { "::1" } else { "127.0.0.1" });
        args.push("-blackhole");
    }

    exec::execute_sudo(exec::ROUTE, &args).await
}

async fn flush(target: &[String], family: Option<Family>) -> Result<()> {
    let target: Vec<&str> = target.iter().map(String::as_str).collect();
    match target.as_slice() {
        ["cache"] => {
            // There is no route cache on this platform; succeed so
            // scripts written against the Linux tool keep working.
            println!("There is no route cache to flush,");
            println!("returning 0 status code for compatibility.");
            Ok(())
        }
        ["table", "main"] => {
            let inet = if family == Some(Family::Inet6) {
                "-inet6"
            } else {
                "-inet"
            };
            println!("Flushing all routes");
            exec::execute_sudo(exec::ROUTE, &["-n", "flush", inet]).await
        }
        _ => Err(Error::usage(format!(
            "cannot flush `{}`; expected `cache` or `table main`",
            target.join(" ")
        ))),
    }
}
