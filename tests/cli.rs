//! End-to-end tests that drive the compiled binary on script files.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn write_script(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp script");
    file.write_all(source.as_bytes()).expect("write temp script");
    file
}

fn rlox() -> Command {
    Command::cargo_bin("rlox").expect("binary builds")
}

#[test]
fn arithmetic_precedence() {
    let script = write_script("print 11 + 45 * 2 / (3 - 1);");
    rlox().arg(script.path()).assert().success().stdout("56\n");
}

#[test]
fn for_loop_accumulates() {
    let script =
        write_script("var x = 0; for (var i = 0; i < 3; i = i + 1) { x = x + i; } print x;");
    rlox().arg(script.path()).assert().success().stdout("3\n");
}

#[test]
fn block_shadowing() {
    let script = write_script("var a = 1; { var a = 2; print a; } print a;");
    rlox().arg(script.path()).assert().success().stdout("2\n1\n");
}

#[test]
fn short_circuit_returns_deciding_value() {
    let script = write_script("print true and 0; print false or \"y\";");
    rlox().arg(script.path()).assert().success().stdout("0\ny\n");
}

#[test]
fn if_else() {
    let script = write_script("if (1 == 1) print \"yes\"; else print \"no\";");
    rlox().arg(script.path()).assert().success().stdout("yes\n");
}

#[test]
fn number_builtin() {
    let script = write_script("print number(\"2.5\") + 1;");
    rlox().arg(script.path()).assert().success().stdout("3.5\n");
}

#[test]
fn time_builtin_returns_a_number() {
    let script = write_script("print time() > 0;");
    rlox().arg(script.path()).assert().success().stdout("true\n");
}

#[test]
fn input_builtin_reads_stdin() {
    let script = write_script("print input(\"name? \");");
    rlox()
        .arg(script.path())
        .write_stdin("world\n")
        .assert()
        .success()
        .stdout("name? world\n");
}

#[test]
fn empty_script_succeeds() {
    let script = write_script("");
    rlox().arg(script.path()).assert().success().stdout("");
}

#[test]
fn comments_are_ignored() {
    let script = write_script("// a comment\nprint 1; // trailing\n");
    rlox().arg(script.path()).assert().success().stdout("1\n");
}

#[test]
fn undefined_variable_is_a_name_error() {
    let script = write_script("print y;");
    rlox()
        .arg(script.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("name error"));
}

#[test]
fn non_numeric_operand_is_a_value_error() {
    let script = write_script("print 1 + \"abc\";");
    rlox()
        .arg(script.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("value error"));
}

#[test]
fn calling_a_string_is_a_type_error() {
    let script = write_script("\"hi\"();");
    rlox()
        .arg(script.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("type error"));
}

#[test]
fn unterminated_string_is_a_lex_error() {
    let script = write_script("print \"unterminated;");
    rlox()
        .arg(script.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unterminated string"));
}

#[test]
fn missing_semicolon_is_a_parse_error() {
    let script = write_script("print 1");
    rlox()
        .arg(script.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse error"));
}

#[test]
fn missing_file_fails() {
    rlox()
        .arg("does-not-exist.lox")
        .assert()
        .failure()
        .stderr(predicate::str::contains("io error"));
}
