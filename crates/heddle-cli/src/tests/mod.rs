//! In-process tests for the CLI runtime.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use insta::assert_snapshot;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use crate::run;

struct Output {
    code: ExitCode,
    stdout: String,
    stderr: String,
}

fn run_with(args: &[&str]) -> Output {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let argv = std::iter::once("heddle")
        .chain(args.iter().copied())
        .map(Into::into);
    let code = run(argv, &mut stdout, &mut stderr);
    Output {
        code,
        stdout: String::from_utf8(stdout).expect("utf-8 stdout"),
        stderr: String::from_utf8(stderr).expect("utf-8 stderr"),
    }
}

#[fixture]
fn workspace() -> TempDir {
    tempfile::tempdir().expect("temp dir")
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write source");
    path
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}

#[rstest]
fn grep_reports_each_match_with_its_position(workspace: TempDir) {
    let file = write_file(
        workspace.path(),
        "lib.rs",
        "fn main() {\n    foo(1);\n    foo(2);\n}\n",
    );

    let output = run_with(&["grep", "--pattern", "foo($X)", path_arg(&file)]);

    assert_eq!(output.code, ExitCode::SUCCESS);
    let lines: Vec<&str> = output.stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|line| line.starts_with(path_arg(&file))));
    assert!(output.stdout.contains(":2:5: foo(1)"));
    assert!(output.stdout.contains(":3:5: foo(2)"));
}

#[rstest]
fn grep_without_matches_exits_with_one(workspace: TempDir) {
    let file = write_file(workspace.path(), "lib.rs", "fn main() { bar(); }\n");

    let output = run_with(&["grep", "-p", "foo($X)", path_arg(&file)]);

    assert_eq!(output.code, ExitCode::from(1));
    assert!(output.stdout.is_empty());
}

#[rstest]
fn grep_json_lists_captures(workspace: TempDir) {
    let file = write_file(workspace.path(), "app.py", "print(a, b)\n");

    let output = run_with(&["grep", "--json", "-p", "print($$$ARGS)", path_arg(&file)]);

    assert_eq!(output.code, ExitCode::SUCCESS);
    let record: serde_json::Value =
        serde_json::from_str(output.stdout.trim_end()).expect("one JSON record");
    assert_eq!(record["line"], 1);
    assert_eq!(record["column"], 1);
    assert_eq!(record["text"], "print(a, b)");
    assert_eq!(record["captures"]["ARGS"], "a, b");
}

#[rstest]
fn max_matches_flag_caps_results(workspace: TempDir) {
    let file = write_file(workspace.path(), "lib.rs", "fn a() {}\nfn b() {}\nfn c() {}\n");

    let output = run_with(&[
        "grep",
        "--max-matches",
        "2",
        "-p",
        "fn $NAME() {}",
        path_arg(&file),
    ]);

    assert_eq!(output.stdout.lines().count(), 2);
}

#[rstest]
fn config_file_limits_apply_until_a_flag_overrides_them(workspace: TempDir) {
    let file = write_file(workspace.path(), "lib.rs", "fn a() {}\nfn b() {}\nfn c() {}\n");
    let config = write_file(workspace.path(), "heddle.toml", "max_matches = 1\n");

    let from_file = run_with(&[
        "--config-path",
        path_arg(&config),
        "grep",
        "-p",
        "fn $NAME() {}",
        path_arg(&file),
    ]);
    let overridden = run_with(&[
        "--config-path",
        path_arg(&config),
        "grep",
        "--max-matches",
        "3",
        "-p",
        "fn $NAME() {}",
        path_arg(&file),
    ]);

    assert_eq!(from_file.stdout.lines().count(), 1);
    assert_eq!(overridden.stdout.lines().count(), 3);
}

#[rstest]
fn oversized_files_are_skipped(workspace: TempDir) {
    let file = write_file(workspace.path(), "lib.rs", "fn main() { foo(1); }\n");
    let config = write_file(workspace.path(), "heddle.toml", "max_file_bytes = 4\n");

    let output = run_with(&[
        "--config-path",
        path_arg(&config),
        "grep",
        "-p",
        "foo($X)",
        path_arg(&file),
    ]);

    assert_eq!(output.code, ExitCode::from(1));
}

#[rstest]
fn malformed_config_files_exit_with_two(workspace: TempDir) {
    let config = write_file(workspace.path(), "heddle.toml", "max_matches = \"many\"\n");

    let output = run_with(&[
        "--config-path",
        path_arg(&config),
        "explain",
        "-l",
        "rust",
        "-p",
        "x",
    ]);

    assert_eq!(output.code, ExitCode::from(2));
    assert!(
        output.stderr.starts_with("heddle: failed to load configuration"),
        "stderr was: {}",
        output.stderr
    );
}

#[rstest]
fn rewrite_prints_the_new_source(workspace: TempDir) {
    let file = write_file(workspace.path(), "lib.rs", "fn main() { foo(1); foo(2); }\n");

    let output = run_with(&[
        "rewrite",
        "-p",
        "foo($X)",
        "-r",
        "bar($X)",
        path_arg(&file),
    ]);

    assert_eq!(output.code, ExitCode::SUCCESS);
    assert_eq!(output.stdout, "fn main() { bar(1); bar(2); }\n");
    assert_eq!(output.stderr.trim_end(), "2 replacement(s) in 1 file(s)");
    assert_eq!(
        fs::read_to_string(&file).expect("read source"),
        "fn main() { foo(1); foo(2); }\n"
    );
}

#[rstest]
fn rewrite_in_place_updates_the_file(workspace: TempDir) {
    let file = write_file(workspace.path(), "lib.rs", "fn main() { foo(1); }\n");

    let output = run_with(&[
        "rewrite",
        "--in-place",
        "-p",
        "foo($X)",
        "-r",
        "bar($X)",
        path_arg(&file),
    ]);

    assert_eq!(output.code, ExitCode::SUCCESS);
    assert!(output.stdout.is_empty());
    assert_eq!(
        fs::read_to_string(&file).expect("read source"),
        "fn main() { bar(1); }\n"
    );
}

#[test]
fn explain_prints_the_compiled_pattern() {
    let output = run_with(&["explain", "-l", "rust", "-p", "$X + 1"]);

    assert_eq!(output.code, ExitCode::SUCCESS);
    assert_snapshot!(
        output.stdout.trim_end(),
        @r#"(binary_expression left: <expression $X> operator: "+" right: (integer_literal "1"))"#
    );
}

#[rstest]
#[case::bad_metavariable(&["explain", "-l", "rust", "-p", "$$X"], "invalid metavariable syntax")]
#[case::unknown_language(&["explain", "-l", "cobol", "-p", "x"], "invalid value 'cobol'")]
#[case::missing_command(&[], "Usage")]
fn misuse_exits_with_two(#[case] args: &[&str], #[case] message: &str) {
    let output = run_with(args);

    assert_eq!(output.code, ExitCode::from(2));
    assert!(
        output.stderr.contains(message),
        "stderr was: {}",
        output.stderr
    );
}

#[rstest]
fn unsupported_extensions_are_errors(workspace: TempDir) {
    let file = write_file(workspace.path(), "notes.txt", "foo(1)\n");

    let output = run_with(&["grep", "-p", "foo($X)", path_arg(&file)]);

    assert_eq!(output.code, ExitCode::from(2));
    assert!(output.stderr.starts_with("heddle: "));
}

#[test]
fn help_goes_to_stdout() {
    let output = run_with(&["--help"]);

    assert_eq!(output.code, ExitCode::SUCCESS);
    assert!(output.stdout.contains("grep"));
    assert!(output.stderr.is_empty());
}
