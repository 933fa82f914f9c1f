//! Printable implementations for the report records.

mod bridge;
mod link;
mod neigh;
mod route;
mod socket;

pub use socket::SOCKET_TABLE_HEADER;
