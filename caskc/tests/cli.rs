//! CLI integration tests for `caskc`, exercising the built binary
//! end to end rather than calling into `cask_par` directly.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn caskc() -> Command {
    Command::cargo_bin("caskc").expect("caskc binary builds")
}

fn cask_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp cask file");
    write!(file, "{contents}").expect("write temp cask file");
    file
}

#[test]
fn parses_minimal_cask_and_exits_success() {
    let file = cask_file("cask 'empty' do\nend\n");

    caskc()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("token"));
}

#[test]
fn json_format_emits_serialized_model() {
    let file = cask_file("cask 'latest' do\n  version :latest\nend\n");

    caskc()
        .arg(file.path())
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"token\""))
        .stdout(predicate::str::contains("\"variants\""));
}

#[test]
fn malformed_input_exits_failure_with_grouped_errors() {
    let file = cask_file("\\");

    caskc()
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Parsing errors"))
        .stderr(predicate::str::contains("Illegal character"));
}

#[test]
fn missing_file_exits_failure() {
    caskc()
        .arg("/no/such/cask/file.rb")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not read"));
}

#[test]
fn verbose_flag_is_accepted() {
    let file = cask_file("cask 'empty' do\nend\n");

    caskc().arg(file.path()).arg("--verbose").assert().success();
}
