//! Smoke tests for the `heddle` binary entrypoint.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use tempfile::TempDir;

#[test]
fn grep_exits_successfully_when_a_template_matches() {
    let dir = TempDir::new().expect("temp dir");
    let file = dir.path().join("main.ts");
    std::fs::write(&file, "const answer = compute(41);\n").expect("write source");

    let mut command = cargo_bin_cmd!("heddle");
    command.args(["grep", "--pattern", "compute($ARG)"]).arg(&file);
    command
        .assert()
        .success()
        .stdout(contains(":1:16: compute(41)"));
}

#[test]
fn missing_files_are_reported_on_stderr() {
    let mut command = cargo_bin_cmd!("heddle");
    command.args(["grep", "--pattern", "foo()", "does-not-exist.rs"]);
    command
        .assert()
        .code(2)
        .stderr(contains("failed to read does-not-exist.rs"));
}

#[test]
fn invalid_log_filters_fail_fast() {
    let mut command = cargo_bin_cmd!("heddle");
    command.args(["--log-filter", "heddle=loud", "explain", "-l", "py", "-p", "x"]);
    command
        .assert()
        .code(2)
        .stderr(contains("invalid log filter"));
}

#[test]
fn environment_limits_sit_between_the_file_and_the_flags() {
    let dir = TempDir::new().expect("temp dir");
    let file = dir.path().join("lib.rs");
    std::fs::write(&file, "fn a() {}\nfn b() {}\nfn c() {}\n").expect("write source");
    let config = dir.path().join("heddle.toml");
    std::fs::write(&config, "max_matches = 1\n").expect("write config");

    let grep = |flags: &[&str]| {
        let mut command = cargo_bin_cmd!("heddle");
        command
            .env("HEDDLE_MAX_MATCHES", "2")
            .arg("--config-path")
            .arg(&config)
            .arg("grep")
            .args(flags)
            .args(["-p", "fn $NAME() {}"])
            .arg(&file);
        let output = command.output().expect("run heddle");
        String::from_utf8(output.stdout).expect("utf-8 stdout")
    };

    assert_eq!(grep(&[]).lines().count(), 2);
    assert_eq!(grep(&["--max-matches", "3"]).lines().count(), 3);
}
