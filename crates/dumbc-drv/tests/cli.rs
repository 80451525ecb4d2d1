//! End-to-end invocations of the `faxc` binary: the process boundary
//! `src/lib.rs`'s unit tests don't exercise (argument handling via
//! `std::env::args`, actual process exit codes, stdout/stderr).

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn write_source(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::with_suffix(".fax").unwrap();
    write!(file, "{content}").unwrap();
    file
}

#[test]
fn compiles_a_well_formed_program() {
    let file = write_source("func main(): i32 { return 0 }");
    Command::cargo_bin("faxc")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("function(s) in the function table"));
}

#[test]
fn reports_a_type_error_and_exits_nonzero() {
    let file = write_source("func main(): i32 { return y }");
    Command::cargo_bin("faxc")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error[name]"));
}

#[test]
fn missing_main_is_reported() {
    let file = write_source("func helper(): void {}");
    Command::cargo_bin("faxc")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .code(1);
}

#[test]
fn no_input_files_is_a_usage_error() {
    Command::cargo_bin("faxc")
        .unwrap()
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("usage error"));
}

#[test]
fn emit_tokens_prints_token_kinds_not_the_ast() {
    let file = write_source("func main(): i32 { return 0 }");
    Command::cargo_bin("faxc")
        .unwrap()
        .args(["--emit-tokens"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Func"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let file = write_source("func main(): i32 { return 0 }");
    Command::cargo_bin("faxc")
        .unwrap()
        .args(["--bogus-flag"])
        .arg(file.path())
        .assert()
        .failure()
        .code(3);
}
