//! Integration tests for CLI infrastructure

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tex2svg_testkit::temp_dir_in_workspace;

#[test]
fn test_cli_version_flag() {
    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    let assert = cmd.arg("--version").assert();

    assert
        .success()
        .stdout(predicate::str::contains("tex2svg"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    let assert = cmd.arg("--help").assert();

    assert
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("doctor"));
}

#[test]
fn test_cli_requires_subcommand() {
    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    cmd.assert().failure();
}

#[test]
fn test_serve_rejects_invalid_config() {
    let temp = temp_dir_in_workspace();
    fs::write(
        temp.path().join("tex2svg.toml"),
        "[session]\nttl_secs = 0\n",
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    let assert = cmd.arg("serve").current_dir(temp.path()).assert();

    assert
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("session.ttl_secs"));
}

#[test]
fn test_serve_rejects_short_secret() {
    let temp = temp_dir_in_workspace();
    fs::write(
        temp.path().join("tex2svg.toml"),
        "[session]\nsecret = \"too-short\"\n",
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    let assert = cmd.arg("serve").current_dir(temp.path()).assert();

    assert
        .failure()
        .stderr(predicate::str::contains("session.secret"));
}

#[test]
fn test_explicit_missing_config_is_error() {
    let temp = temp_dir_in_workspace();

    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    let assert = cmd
        .args(["--config", "missing.toml", "convert", "snippet.tex"])
        .current_dir(temp.path())
        .assert();

    assert
        .failure()
        .stderr(predicate::str::contains("CONFIG_PARSE_ERROR"));
}

#[test]
fn test_config_path_from_env() {
    let temp = temp_dir_in_workspace();

    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    let assert = cmd
        .args(["convert", "snippet.tex"])
        .env("TEX2SVG_CONFIG", temp.path().join("nope.toml"))
        .current_dir(temp.path())
        .assert();

    assert
        .failure()
        .stderr(predicate::str::contains("nope.toml").or(predicate::str::contains(
            "CONFIG_PARSE_ERROR",
        )));
}
