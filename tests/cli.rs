use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const NO_FAILING_TESTS: &str = include_str!("data/no-failing-tests.json");

const OPTION_ENVS: &[&str] = &[
    "JEST_SUITE_NAME",
    "JEST_JUNIT_OUTPUT",
    "JEST_JUNIT_CLASSNAME",
    "JEST_JUNIT_TITLE",
    "JEST_JUNIT_ANCESTOR_SEPARATOR",
    "JEST_USE_PATH_FOR_SUITE_NAME",
];

fn jest_junit<T: AsRef<Path>>(current_dir: T) -> Command {
    let mut command = Command::cargo_bin("jest-junit").unwrap();
    command.current_dir(current_dir);
    for env in OPTION_ENVS {
        command.env_remove(env);
    }
    command
}

#[test]
fn writes_report_to_output_file() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("results.json"), NO_FAILING_TESTS).unwrap();

    let assert = jest_junit(&temp_dir)
        .args(["results.json", "--output", "reports/junit.xml"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote JUnit report to"));
    println!("{assert}");

    let xml = fs::read_to_string(temp_dir.path().join("reports/junit.xml")).unwrap();
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.contains(r#"<testsuites name="jest tests">"#));
    assert!(xml.contains(r#"<testsuite name="foo" tests="1" errors="0" failures="0" skipped="0" timestamp="2017-03-17T01:05:47" time="0.552">"#));
}

#[test]
fn reads_stdin_and_writes_stdout() {
    let temp_dir = tempdir().unwrap();

    let assert = jest_junit(&temp_dir)
        .args(["--output", "-", "--ancestor-separator", " › "])
        .write_stdin(NO_FAILING_TESTS)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<testcase classname="foo › baz should bar" name="foo › baz should bar" time="0.001"/>"#,
        ));
    println!("{assert}");
}

#[test]
fn env_overrides_package_json() {
    let temp_dir = tempdir().unwrap();
    fs::write(
        temp_dir.path().join("package.json"),
        r#"{ "jest-junit": { "suiteName": "from package.json", "usePathForSuiteName": "true" } }"#,
    )
    .unwrap();

    let assert = jest_junit(&temp_dir)
        .args(["--output", "-"])
        .env("JEST_SUITE_NAME", "from env")
        .write_stdin(NO_FAILING_TESTS)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<testsuites name="from env">"#))
        .stdout(predicate::str::contains(
            r#"<testsuite name="/path/to/test/__tests__/foo.test.js""#,
        ));
    println!("{assert}");
}

#[test]
fn undecodable_report_is_a_data_error() {
    let temp_dir = tempdir().unwrap();

    let assert = jest_junit(&temp_dir)
        .args(["--output", "-"])
        .write_stdin("{ \"testResults\": 3 }")
        .assert()
        .code(exitcode::DATAERR)
        .stderr(predicate::str::contains("could not decode test report"));
    println!("{assert}");
}

#[test]
fn malformed_package_json_is_a_config_error() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("package.json"), "{ nope").unwrap();

    let assert = jest_junit(&temp_dir)
        .args(["--output", "-"])
        .write_stdin(NO_FAILING_TESTS)
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("failed to parse"));
    println!("{assert}");
}
