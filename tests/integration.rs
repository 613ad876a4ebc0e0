//! End-to-end tests for the bdd-fixtures CLI
//!
//! Each test gets its own working directory with a fixture folder, runs
//! the binary there and checks its output.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::{tempdir, TempDir};

const SUM_JSON: &str = r#"{
    "two values a=%[input.a]v b=%[input.b]v": [
        {"input": {"a": 2, "b": 3}, "golden": {"sum": 5}},
        {"input": {"a": -4, "b": 4}, "golden": {"sum": 0}}
    ],
    "empty": []
}"#;

/// Test context with a working directory
struct TestContext {
    dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempdir().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("testdata")).expect("Failed to create data dir");
        Self { dir }
    }

    /// Write a file relative to the working directory
    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Run a CLI command
    fn run(&self, args: &[&str]) -> CliOutput {
        let output = Command::new(env!("CARGO_BIN_EXE_bdd-fixtures"))
            .args(args)
            .current_dir(self.dir.path())
            .env_remove("BDD_DATA_DIR")
            .env_remove("BDD_SUFFIX")
            .env("NO_COLOR", "1")
            .output()
            .expect("Failed to run bdd-fixtures");

        CliOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        }
    }

    /// Run a CLI command expecting success
    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.success,
            "Command {:?} failed:\nstdout: {}\nstderr: {}",
            args, output.stdout, output.stderr
        );
        output.stdout
    }
}

/// Output from a CLI command
#[derive(Debug)]
struct CliOutput {
    stdout: String,
    stderr: String,
    success: bool,
}

// ============== Tests ==============

#[test]
fn test_name_before_fixture_exists() {
    let ctx = TestContext::new();
    let stdout = ctx.run_ok(&["name", "tests::test_sum_operation"]);

    assert!(stdout.contains("Feature: Sum operation"), "{stdout}");
    assert!(stdout.contains("Stem:    SumOperation"), "{stdout}");
    assert!(stdout.contains("not created yet"), "{stdout}");
}

#[test]
fn test_name_finds_yaml_fixture() {
    let ctx = TestContext::new();
    ctx.write("testdata/SumOperation.yml", "ctx: []\n");

    let stdout = ctx.run_ok(&["name", "test_sum_operation"]);
    assert!(stdout.contains("SumOperation.yml"), "{stdout}");
    assert!(!stdout.contains("not created yet"), "{stdout}");
}

#[test]
fn test_config_file_moves_data_dir() {
    let ctx = TestContext::new();
    ctx.write("bdd.toml", "data_dir = \"fixtures\"\nsuffix = \".yaml\"\n");

    let stdout = ctx.run_ok(&["name", "test_sum_operation"]);
    let expected = PathBuf::from("fixtures").join("SumOperation.yaml");
    assert!(stdout.contains(&expected.display().to_string()), "{stdout}");
}

#[test]
fn test_check_lists_contexts() {
    let ctx = TestContext::new();
    ctx.write("testdata/SumOperation.json", SUM_JSON);

    let stdout = ctx.run_ok(&["check", "testdata/SumOperation.json"]);
    assert!(stdout.contains("2 context(s), 2 record(s) [json]"), "{stdout}");
    assert!(stdout.contains("two values a=%[input.a]v b=%[input.b]v"), "{stdout}");
}

#[test]
fn test_check_rejects_malformed_file() {
    let ctx = TestContext::new();
    ctx.write("testdata/Broken.json", "{\"ctx\": [");

    let output = ctx.run(&["check", "testdata/Broken.json"]);
    assert!(!output.success);
    assert!(output.stderr.contains("Failed to parse fixture file"), "{}", output.stderr);
}

#[test]
fn test_check_rejects_unknown_extension() {
    let ctx = TestContext::new();
    ctx.write("testdata/Sum.txt", "{}");

    let output = ctx.run(&["check", "testdata/Sum.txt"]);
    assert!(!output.success);
    assert!(output.stderr.contains("Unsupported fixture format"), "{}", output.stderr);
}

#[test]
fn test_get_resolves_prefixed_keys() {
    let ctx = TestContext::new();
    ctx.write("testdata/SumOperation.json", SUM_JSON);
    let context = "two values a=%[input.a]v b=%[input.b]v";

    let stdout = ctx.run_ok(&["get", "testdata/SumOperation.json", context, "golden.sum"]);
    assert_eq!(stdout.trim(), "5");

    let stdout = ctx.run_ok(&[
        "get",
        "testdata/SumOperation.json",
        context,
        "input.a",
        "--index",
        "1",
    ]);
    assert_eq!(stdout.trim(), "-4");
}

#[test]
fn test_get_rejects_bad_prefix() {
    let ctx = TestContext::new();
    ctx.write("testdata/SumOperation.json", SUM_JSON);

    let output = ctx.run(&[
        "get",
        "testdata/SumOperation.json",
        "two values a=%[input.a]v b=%[input.b]v",
        "output.sum",
    ]);
    assert!(!output.success);
    assert!(output.stderr.contains("Invalid fixture key 'output.sum'"), "{}", output.stderr);
}

#[test]
fn test_convert_to_yaml_and_back() {
    let ctx = TestContext::new();
    ctx.write("testdata/SumOperation.json", SUM_JSON);

    ctx.run_ok(&["convert", "testdata/SumOperation.json", "yaml/SumOperation.yaml"]);
    let yaml = fs::read_to_string(ctx.dir.path().join("yaml/SumOperation.yaml")).unwrap();
    assert!(yaml.contains("golden:"), "{yaml}");

    ctx.run_ok(&["convert", "yaml/SumOperation.yaml", "testdata/Again.json"]);
    let stdout = ctx.run_ok(&[
        "get",
        "testdata/Again.json",
        "two values a=%[input.a]v b=%[input.b]v",
        "input.b",
    ]);
    assert_eq!(stdout.trim(), "3");
}

#[test]
fn test_convert_refuses_file_as_data_dir() {
    let ctx = TestContext::new();
    ctx.write("testdata/SumOperation.json", SUM_JSON);
    ctx.write("blocked", "");

    let output = ctx.run(&["convert", "testdata/SumOperation.json", "blocked/Sum.json"]);
    assert!(!output.success);
    assert!(output.stderr.contains("Data folder is a file"), "{}", output.stderr);
}
