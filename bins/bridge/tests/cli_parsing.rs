//! CLI argument parsing tests for the bridge command.

use assert_cmd::Command;
use predicates::prelude::*;

fn bridge_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bridge"))
}

#[test]
fn test_help() {
    bridge_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bridge port tool"));
}

#[test]
fn test_link_show_help() {
    bridge_cmd()
        .args(["link", "show", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--dev"));
}

#[test]
fn test_invalid_subcommand() {
    bridge_cmd()
        .arg("fdb")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
