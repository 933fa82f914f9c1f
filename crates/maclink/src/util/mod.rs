//! Shared utilities.

pub mod addr;
