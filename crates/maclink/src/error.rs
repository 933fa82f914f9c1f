//! Error types for command translation.

use std::io;

/// Result type for maclink operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while translating a command.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error from spawning or talking to an external tool.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An external tool exited non-zero. `message` is the tool's own
    /// output when it produced any, or a synthesized "<subject> not
    /// found" when it exited silently.
    #[error("{message}")]
    ExternalTool {
        /// The tool that failed (e.g. "ifconfig").
        tool: String,
        /// The error text surfaced to the user.
        message: String,
    },

    /// An external tool's output did not match any recognized record
    /// or field pattern. Fatal for the parse in progress; a broken
    /// parse cannot be trusted to represent live state.
    #[error("cannot parse {tool} output: {reason}")]
    MalformedInput {
        /// The tool whose output failed to parse.
        tool: String,
        /// What was wrong, including the offending line.
        reason: String,
    },

    /// Caller-supplied arguments are semantically invalid. Reported
    /// before any external tool is invoked.
    #[error("{0}")]
    Usage(String),

    /// A device-name filter named a device absent from the parsed set.
    #[error("Cannot find device \"{name}\"")]
    NotFound {
        /// The device name that was not found.
        name: String,
    },
}

impl Error {
    /// Create a malformed-input error for a tool's output.
    pub fn malformed(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Create a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Check if this is a usage error (exit status 255 rather than 1).
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    /// Check if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
