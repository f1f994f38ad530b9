//! Integration tests for the srclint CLI

use std::fs;
use std::path::Path;
use std::process::Command;

fn run_srclint(args: &[&str]) -> (String, String, Option<i32>) {
    let mut cmd_args = vec!["run", "-p", "srclint", "--quiet", "--"];
    cmd_args.extend(args);

    let output = Command::new("cargo")
        .args(&cmd_args)
        .current_dir(env!("CARGO_MANIFEST_DIR").to_string() + "/..")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (stdout, stderr, output.status.code())
}

fn write_js(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

const CLEAN_FILE: &str = "\
// Site helpers.\n\
function greet(name) {\n\
  return `hello ${name}`;\n\
}\n";

fn long_function_file() -> String {
    let mut text = String::from("function sprawling() {\n");
    for i in 0..40 {
        text.push_str(&format!("  step{i}();\n"));
    }
    text.push_str("}\n");
    text
}

#[test]
fn test_cli_help() {
    let (stdout, _, code) = run_srclint(&["--help"]);

    assert_eq!(code, Some(0));
    assert!(stdout.contains("srclint"));
    assert!(stdout.contains("--check"));
    assert!(stdout.contains("--max-lines"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--list-functions"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, code) = run_srclint(&["--version"]);

    assert_eq!(code, Some(0));
    assert!(stdout.contains("srclint"));
}

#[test]
fn test_clean_directory_passes() {
    let temp = tempfile::tempdir().unwrap();
    write_js(temp.path(), "clean.js", CLEAN_FILE);

    let (stdout, _, code) = run_srclint(&[temp.path().to_str().unwrap()]);

    assert_eq!(code, Some(0));
    assert!(stdout.contains("no violations"));
    assert!(stdout.contains("1 files scanned"));
}

#[test]
fn test_long_function_fails() {
    let temp = tempfile::tempdir().unwrap();
    write_js(temp.path(), "long.js", &long_function_file());

    let (stdout, _, code) = run_srclint(&[temp.path().to_str().unwrap()]);

    assert_eq!(code, Some(1));
    assert!(stdout.contains("long.js:1"));
    assert!(stdout.contains("'sprawling'"));
    assert!(stdout.contains("limit 30"));
}

#[test]
fn test_max_lines_flag() {
    let temp = tempfile::tempdir().unwrap();
    write_js(temp.path(), "long.js", &long_function_file());

    let (_, _, code) = run_srclint(&[temp.path().to_str().unwrap(), "--max-lines", "100"]);

    assert_eq!(code, Some(0));
}

#[test]
fn test_duplicate_names_across_files() {
    let temp = tempfile::tempdir().unwrap();
    write_js(temp.path(), "a.js", "function helper() {\n  a();\n}\n");
    write_js(temp.path(), "b.js", "function helper() {\n  b();\n}\n");

    let (stdout, _, code) = run_srclint(&[temp.path().to_str().unwrap()]);

    assert_eq!(code, Some(1));
    assert!(stdout.contains("a.js:1"));
    assert!(stdout.contains("b.js:1"));
    assert!(stdout.contains("'helper'"));
}

#[test]
fn test_check_selection_skips_other_checks() {
    let temp = tempfile::tempdir().unwrap();
    write_js(temp.path(), "alias.js", "const fmt = formatDate;\n");

    let (_, _, code) = run_srclint(&[temp.path().to_str().unwrap(), "--check", "length"]);
    assert_eq!(code, Some(0));

    let (stdout, _, code) = run_srclint(&[temp.path().to_str().unwrap(), "--check", "aliases"]);
    assert_eq!(code, Some(1));
    assert!(stdout.contains("alias"));
}

#[test]
fn test_json_output() {
    let temp = tempfile::tempdir().unwrap();
    write_js(temp.path(), "alias.js", "const fmt = formatDate;\n");

    let (stdout, _, code) = run_srclint(&[temp.path().to_str().unwrap(), "--output", "json"]);

    assert_eq!(code, Some(1));
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed["files_scanned"], 1);
    assert_eq!(parsed["violations"][0]["line"], 1);
    assert!(parsed["violations"][0]["detail"]
        .as_str()
        .unwrap()
        .contains("alias"));
}

#[test]
fn test_list_functions() {
    let temp = tempfile::tempdir().unwrap();
    write_js(temp.path(), "clean.js", CLEAN_FILE);

    let (stdout, _, code) = run_srclint(&[temp.path().to_str().unwrap(), "--list-functions"]);

    assert_eq!(code, Some(0));
    assert!(stdout.contains("clean.js"));
    assert!(stdout.contains("greet"));
}

#[test]
fn test_exclude_pattern() {
    let temp = tempfile::tempdir().unwrap();
    fs::create_dir(temp.path().join("vendor")).unwrap();
    write_js(temp.path(), "clean.js", CLEAN_FILE);
    write_js(&temp.path().join("vendor"), "long.js", &long_function_file());

    let (_, _, code) = run_srclint(&[
        temp.path().to_str().unwrap(),
        "--exclude",
        "**/vendor/**",
    ]);

    assert_eq!(code, Some(0));
}

#[test]
fn test_invalid_path() {
    let (_, stderr, code) = run_srclint(&["/nonexistent/path"]);

    assert_eq!(code, Some(2));
    assert!(stderr.contains("Error:"));
}
