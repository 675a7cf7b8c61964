//! Integration tests for the convert command, using the fake toolchain

#![cfg(unix)]

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tex2svg_testkit::{MINIMAL_TEMPLATE, shared_fake_toolchain, temp_dir_in_workspace};

/// Write a tex2svg.toml pointing at the fake tools and a template file
fn write_fake_config(root: &Path, converter: &Path) {
    let tools = shared_fake_toolchain();
    let config = format!(
        "[toolchain]\ntypesetter = '{}'\nconverter = '{}'\n\n[paths]\ntemplate = 'template.tex'\nwork_dir = '{}'\n",
        tools.typesetter.display(),
        converter.display(),
        root.join("work").display()
    );
    fs::write(root.join("tex2svg.toml"), config).unwrap();
    fs::write(root.join("template.tex"), MINIMAL_TEMPLATE).unwrap();
}

#[test]
fn test_convert_writes_svg() {
    let temp = temp_dir_in_workspace();
    write_fake_config(temp.path(), &shared_fake_toolchain().converter);
    fs::write(temp.path().join("snippet.tex"), "\\textbf{Hi}").unwrap();

    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    let assert = cmd
        .args(["convert", "snippet.tex", "-o", "out.svg"])
        .current_dir(temp.path())
        .assert();

    assert.success().stdout(predicate::str::contains("out.svg"));
    let svg = fs::read_to_string(temp.path().join("out.svg")).unwrap();
    assert!(svg.starts_with("<?xml") || svg.starts_with("<svg"));
    assert!(svg.contains("\\textbf{Hi}"));
    assert_eq!(fs::read_dir(temp.path().join("work")).unwrap().count(), 0);
}

#[test]
fn test_convert_defaults_to_output_svg() {
    let temp = temp_dir_in_workspace();
    write_fake_config(temp.path(), &shared_fake_toolchain().converter);
    fs::write(temp.path().join("snippet.tex"), "x").unwrap();

    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    cmd.args(["convert", "snippet.tex"])
        .current_dir(temp.path())
        .assert()
        .success();

    assert!(temp.path().join("output.svg").is_file());
}

#[test]
fn test_convert_reads_stdin() {
    let temp = temp_dir_in_workspace();
    write_fake_config(temp.path(), &shared_fake_toolchain().converter);

    let mut cmd = assert_cmd::Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    cmd.args(["convert", "-", "-o", "stdin.svg"])
        .current_dir(temp.path())
        .write_stdin("from-stdin")
        .assert()
        .success();

    let svg = fs::read_to_string(temp.path().join("stdin.svg")).unwrap();
    assert!(svg.contains("from-stdin"));
}

#[test]
fn test_convert_uses_explicit_template() {
    let temp = temp_dir_in_workspace();
    write_fake_config(temp.path(), &shared_fake_toolchain().converter);
    fs::write(temp.path().join("snippet.tex"), "inner").unwrap();
    fs::write(temp.path().join("other.tex"), "OTHER[%%content%%]").unwrap();

    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    cmd.args(["convert", "snippet.tex", "--template", "other.tex"])
        .current_dir(temp.path())
        .assert()
        .success();

    let svg = fs::read_to_string(temp.path().join("output.svg")).unwrap();
    assert!(svg.contains("OTHER[inner]"));
}

#[test]
fn test_convert_missing_explicit_template_is_error() {
    let temp = temp_dir_in_workspace();
    write_fake_config(temp.path(), &shared_fake_toolchain().converter);
    fs::write(temp.path().join("snippet.tex"), "x").unwrap();

    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    cmd.args(["convert", "snippet.tex", "--template", "absent.tex"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.tex"));
}

#[test]
fn test_convert_typeset_failure_prints_diagnostics() {
    let temp = temp_dir_in_workspace();
    write_fake_config(temp.path(), &shared_fake_toolchain().converter);
    fs::write(temp.path().join("snippet.tex"), "\\badcommand").unwrap();

    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    let assert = cmd
        .args(["convert", "snippet.tex"])
        .current_dir(temp.path())
        .assert();

    assert
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error during conversion:"))
        .stderr(predicate::str::contains("Undefined control sequence"));
    assert!(!temp.path().join("output.svg").exists());
    assert_eq!(fs::read_dir(temp.path().join("work")).unwrap().count(), 0);
}

#[test]
fn test_convert_converter_failure_prints_diagnostics() {
    let temp = temp_dir_in_workspace();
    write_fake_config(temp.path(), &shared_fake_toolchain().broken_converter);
    fs::write(temp.path().join("snippet.tex"), "x").unwrap();

    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    cmd.args(["convert", "snippet.tex"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed with return code 3"));
}

#[test]
fn test_convert_missing_snippet_is_error() {
    let temp = temp_dir_in_workspace();
    write_fake_config(temp.path(), &shared_fake_toolchain().converter);

    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    cmd.args(["convert", "nowhere.tex"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere.tex"));
}
