//! Subcommand implementations for bridge.

pub mod link;
