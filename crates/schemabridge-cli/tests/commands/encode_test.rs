//! Tests for the `encode` command.

use assert_cmd::Command;
use predicates::prelude::*;

fn schemabridge() -> Command {
    let mut cmd = Command::cargo_bin("schemabridge").unwrap();
    cmd.env_remove("SCHEMABRIDGE_INBOUND_TOPIC")
        .env_remove("SCHEMABRIDGE_OUTBOUND_TOPIC");
    cmd
}

/// Test encoding a request with parameters.
#[test]
fn test_encode_request() {
    let mut cmd = schemabridge();
    cmd.args(["encode", "--topic", "/19/1/0"]).write_stdin(
        r#"{"data_type":"requests","data":{"request_type":"get_temperature","request_id":2,"parameters":[{"sensor_id":0}]}}"#,
    );

    cmd.assert()
        .success()
        .stdout("{\"cmd\":\"get\",\"req_id\":2,\"res\":\"tmp\",\"params\":[{\"sensor_id\":0}]}\n");
}

/// Test that an empty parameter list is dropped.
#[test]
fn test_encode_without_params() {
    let mut cmd = schemabridge();
    cmd.args(["encode", "--topic", "/19/1/0"]).write_stdin(
        r#"{"data_type":"requests","data":{"request_type":"get_device_status","request_id":3,"parameters":[]}}"#,
    );

    cmd.assert()
        .success()
        .stdout("{\"cmd\":\"get\",\"req_id\":3,\"res\":\"st\"}\n");
}

/// Test that non-request messages are rejected.
#[test]
fn test_encode_not_a_request() {
    let mut cmd = schemabridge();
    cmd.args(["encode", "--topic", "/19/1/0"])
        .write_stdin(r#"{"data_type":"events","data":[]}"#);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not a request"));
}

/// Test that the inbound topic is not accepted for encoding.
#[test]
fn test_encode_wrong_topic() {
    let mut cmd = schemabridge();
    cmd.args(["encode", "--topic", "/19/0/0"]).write_stdin(
        r#"{"data_type":"requests","data":{"request_type":"get_humidity","request_id":1}}"#,
    );

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("incorrect topic: /19/0/0"));
}

/// Test that --topic is required.
#[test]
fn test_encode_requires_topic() {
    let mut cmd = schemabridge();
    cmd.arg("encode").write_stdin("{}");

    cmd.assert().failure().code(2);
}
