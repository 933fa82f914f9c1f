//! Linux `ip`/`bridge`/`ss` command emulation over the BSD networking stack.
//!
//! This crate is the core of a compatibility shim that lets people used to
//! the Linux iproute2 grammar drive the macOS/BSD tools (`ifconfig`,
//! `route`, `netstat`, `arp`, `ndp`, `networksetup`). Each command is a
//! one-shot pipeline:
//!
//! 1. invoke the native tool ([`exec`]) and capture its text output,
//! 2. parse that text into typed records ([`parse`], [`records`]),
//! 3. join related records ([`resolve`]) and apply caller filters
//!    ([`filter`]),
//! 4. render the records as Linux-style report lines or JSON ([`output`]).
//!
//! The parsers are the interesting part: `ifconfig` and friends emit
//! loosely formatted, version-dependent text, and the line state machines
//! in [`parse`] recover interfaces, addresses, routes, neighbor entries
//! and bridge memberships from it.
//!
//! # Example
//!
//! ```
//! use maclink::parse::ifconfig;
//! use maclink::resolve;
//!
//! let text = "lo0: flags=8049<UP,LOOPBACK,RUNNING,MULTICAST> mtu 16384 index 1\n\
//!             \tinet 127.0.0.1 netmask 0xff000000\n";
//! let mut links = ifconfig::parse(text)?;
//! resolve::resolve_masters(&mut links);
//! assert_eq!(links[0].ifname, "lo0");
//! # Ok::<(), maclink::Error>(())
//! ```

pub mod error;
pub mod exec;
pub mod filter;
pub mod output;
pub mod parse;
pub mod records;
pub mod resolve;
pub mod util;

pub use error::{Error, Result};
