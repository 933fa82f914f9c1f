//! Subcommand implementations for ip.

pub mod address;
pub mod link;
pub mod neighbor;
pub mod route;
