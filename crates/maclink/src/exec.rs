//! External tool invocation.
//!
//! Every piece of live state this crate reports comes from the textual
//! output of the platform's own networking tools. Queries go through
//! [`capture`]; mutations go through [`execute`]/[`execute_sudo`], which
//! echo the command line and forward the tool's output verbatim. No
//! retries, no timeouts: a command either completes or its failure is
//! surfaced as-is.

use tokio::process::Command;

use crate::error::{Error, Result};

/// Path to ifconfig.
pub const IFCONFIG: &str = "/sbin/ifconfig";
/// Path to route.
pub const ROUTE: &str = "/sbin/route";
/// Path to netstat.
pub const NETSTAT: &str = "/usr/sbin/netstat";
/// Path to ndp.
pub const NDP: &str = "/usr/sbin/ndp";
/// Path to arp.
pub const ARP: &str = "/usr/sbin/arp";
/// Path to networksetup.
pub const NETWORKSETUP: &str = "/usr/sbin/networksetup";
/// Path to sudo.
pub const SUDO: &str = "/usr/bin/sudo";

fn tool_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn merged_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(stderr).trim().to_string();
    let out = String::from_utf8_lossy(stdout);
    let out = out.trim();
    if !out.is_empty() {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(out);
    }
    text
}

/// Run a query command and capture its stdout.
///
/// On non-zero exit the tool's combined output becomes the error text;
/// if the tool exited silently, a "`subject` not found" message is
/// synthesized instead (the usual cause is a missing device argument).
pub async fn capture(tool: &str, args: &[&str], subject: Option<&str>) -> Result<String> {
    tracing::debug!(tool, ?args, "running query");
    let out = Command::new(tool).args(args).output().await?;

    if out.status.success() {
        return Ok(String::from_utf8_lossy(&out.stdout).into_owned());
    }

    let mut message = merged_output(&out.stdout, &out.stderr);
    if message.is_empty() {
        message = format!("{} not found", subject.unwrap_or(tool_name(tool)));
    }
    Err(Error::ExternalTool {
        tool: tool_name(tool).to_string(),
        message,
    })
}

/// Run a mutating command, echoing the command line first.
///
/// Prints the tool's stdout verbatim on success. On failure the tool's
/// own output is the error message; no independent check is made that
/// the mutation took effect.
pub async fn execute(tool: &str, args: &[&str]) -> Result<()> {
    println!("Executing: {} {}", tool, args.join(" "));
    tracing::debug!(tool, ?args, "running mutation");

    let out = Command::new(tool).args(args).output().await?;
    if out.status.success() {
        let text = String::from_utf8_lossy(&out.stdout);
        let text = text.trim_end();
        if !text.is_empty() {
            println!("{}", text);
        }
        return Ok(());
    }

    let mut message = merged_output(&out.stdout, &out.stderr);
    if message.is_empty() {
        message = format!("{} failed", tool_name(tool));
    }
    Err(Error::ExternalTool {
        tool: tool_name(tool).to_string(),
        message,
    })
}

/// Run a mutating command under sudo.
pub async fn execute_sudo(tool: &str, args: &[&str]) -> Result<()> {
    let mut full = Vec::with_capacity(args.len() + 1);
    full.push(tool);
    full.extend_from_slice(args);
    execute(SUDO, &full).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_capture_success() {
        let out = capture("/bin/echo", &["hello"], None).await.unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[tokio::test]
    async fn test_capture_silent_failure_synthesizes_not_found() {
        // `false` exits 1 with no output.
        let err = capture("/usr/bin/false", &[], Some("en9")).await.unwrap_err();
        match err {
            Error::ExternalTool { message, .. } => assert_eq!(message, "en9 not found"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_capture_failure_surfaces_output() {
        let err = capture("/bin/sh", &["-c", "echo boom >&2; exit 2"], None)
            .await
            .unwrap_err();
        match err {
            Error::ExternalTool { message, .. } => assert_eq!(message, "boom"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
