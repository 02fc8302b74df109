//! Tests for the `decode` command.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn schemabridge() -> Command {
    let mut cmd = Command::cargo_bin("schemabridge").unwrap();
    cmd.env_remove("SCHEMABRIDGE_INBOUND_TOPIC")
        .env_remove("SCHEMABRIDGE_OUTBOUND_TOPIC");
    cmd
}

/// Test decoding an events batch from stdin.
#[test]
fn test_decode_events_from_stdin() {
    let mut cmd = schemabridge();
    cmd.args(["decode", "--topic", "/19/0/0"])
        .write_stdin(r#"[{"tmp":{"ts":1547660823,"v":-3.7}},{"hmd":{"ts":1547660823,"v":34}}]"#);

    cmd.assert().success().stdout(predicate::str::contains(
        r#"{"data_type":"events","data":[{"temperature":{"time":1547660823,"value":-3.7}},{"humidity":{"time":1547660823,"value":34}}]}"#,
    ));
}

/// Test decoding a response from a file.
#[test]
fn test_decode_response_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"req_id":1,"code":0,"st":1}}"#).unwrap();

    let mut cmd = schemabridge();
    cmd.args(["decode", "--topic", "/19/0/0", "--input"])
        .arg(file.path());

    cmd.assert().success().stdout(predicate::str::contains(
        r#"{"data_type":"responses","data":{"request_id":1,"result":{"code":0,"msg":"ok","is_working":true}}}"#,
    ));
}

/// Test that the wrong topic exits with the error status.
#[test]
fn test_decode_wrong_topic() {
    let mut cmd = schemabridge();
    cmd.args(["decode", "--topic", "/19/9/9"]).write_stdin("[]");

    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("incorrect topic: /19/9/9"));
}

/// Test that malformed JSON exits with the error status.
#[test]
fn test_decode_malformed_payload() {
    let mut cmd = schemabridge();
    cmd.args(["decode", "--topic", "/19/0/0"]).write_stdin("{oops");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("decode error"))
        .stderr(predicate::str::contains("{oops"));
}

/// Test that the inbound topic can be overridden by flag.
#[test]
fn test_decode_inbound_topic_flag() {
    let mut cmd = schemabridge();
    cmd.args(["--inbound-topic", "devices/up", "decode", "--topic", "devices/up"])
        .write_stdin("[]");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#"{"data_type":"events","data":[]}"#));
}

/// Test that the inbound topic can be overridden by environment.
#[test]
fn test_decode_inbound_topic_env() {
    let mut cmd = schemabridge();
    cmd.env("SCHEMABRIDGE_INBOUND_TOPIC", "env/up")
        .args(["decode", "--topic", "env/up"])
        .write_stdin("[]");

    cmd.assert().success();
}

/// Test that topics can come from a TOML config file.
#[test]
fn test_decode_with_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"inbound_topic = "cfg/up""#).unwrap();

    let mut cmd = schemabridge();
    cmd.arg("--config")
        .arg(file.path())
        .args(["decode", "--topic", "cfg/up"])
        .write_stdin("[]");

    cmd.assert().success();
}
