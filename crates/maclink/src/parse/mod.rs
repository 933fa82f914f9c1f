//! Parsers for the native tools' text output.
//!
//! One module per output format. Each parser is an explicit state
//! machine over input lines: a current-record accumulator, a flush on
//! every new record header, and a small winnow grammar per line kind.
//! Unrecognized lines are ignored; recognized lines that fail their
//! grammar abort the whole parse with [`crate::Error::MalformedInput`].

pub mod hwports;
pub mod ifconfig;
pub mod neigh;
pub mod netstat;
pub mod route_get;
pub mod sockets;
