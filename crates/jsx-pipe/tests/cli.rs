//! End-to-end tests for the jsx-pipe binary.
//!
//! Every test runs the binary in a fresh temporary directory so that no
//! config file from the repository is picked up.

use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_jsx-pipe"))
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    binary()
        .args(args)
        .current_dir(dir)
        .env_remove("NO_COLOR")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run jsx-pipe")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

/// Drops `ESC [ ... m` sequences.
fn strip_sgr(text: &str) -> String {
    let mut out = String::new();
    let mut rest = text;
    while let Some(start) = rest.find('\u{1b}') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        rest = match tail.find('m') {
            Some(end) => &tail[end + 1..],
            None => "",
        };
    }
    out.push_str(rest);
    out
}

fn workspace() -> TempDir {
    tempfile::tempdir().unwrap()
}

// ============================================================================
// DEMO DOCUMENT
// ============================================================================

#[test]
fn test_demo_plain() {
    let dir = workspace();
    let output = run_in(dir.path(), &["--color", "never"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    insta::assert_snapshot!("demo_stdout", stdout(&output));
}

#[test]
fn test_demo_colored_has_same_visible_text() {
    let dir = workspace();
    let plain = run_in(dir.path(), &["--color", "never"]);
    let colored = run_in(dir.path(), &["--color", "always"]);

    assert!(colored.status.success());
    assert!(stdout(&colored).contains('\u{1b}'));
    assert_eq!(strip_sgr(&stdout(&colored)), stdout(&plain));
}

#[test]
fn test_unknown_language_prints_plain_text() {
    let dir = workspace();
    let plain = run_in(dir.path(), &["--color", "never"]);
    let fallback = run_in(dir.path(), &["--color", "always", "--language", "cobol"]);

    assert!(fallback.status.success());
    assert_eq!(stdout(&fallback), stdout(&plain));
    assert!(stderr(&fallback).contains("cobol"));
}

// ============================================================================
// INPUT FILES AND CONFIGURATION
// ============================================================================

#[test]
fn test_input_file_to_commonjs() {
    let dir = workspace();
    std::fs::write(
        dir.path().join("App.tsx"),
        "import { helper } from './util';\nexport const app = <A><B /></A>;\n",
    )
    .unwrap();

    let output = run_in(dir.path(), &["App.tsx", "--no-module", "--color", "never"]);
    let text = stdout(&output);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(text.contains("require(\"react/jsx-runtime\")"));
    assert!(text.contains("exports"));
    assert!(text.contains("\"app\""));
    for line in text.lines() {
        assert!(!line.starts_with("import "), "import left: {line}");
        assert!(!line.starts_with("export "), "export left: {line}");
    }
}

#[test]
fn test_stdin_input() {
    let dir = workspace();
    let mut child = binary()
        .args(["-", "--color", "never", "--target", "es2022"])
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"const a: number = 1;\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "const a = 1;\n");
}

#[test]
fn test_discovered_config_file() {
    let dir = workspace();
    std::fs::write(
        dir.path().join(".jsxpiperc"),
        r#"{
            // classic runtime with a custom pragma
            "jsc": { "transform": { "react": { "runtime": "classic", "pragma": "h" } } }
        }"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("a.jsx"), "const a = <div />;\n").unwrap();

    let output = run_in(dir.path(), &["a.jsx", "--color", "never"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "var a = /*#__PURE__*/ h(\"div\", null);\n");
}

#[test]
fn test_out_file_with_source_map() {
    let dir = workspace();
    let output = run_in(
        dir.path(),
        &["--out-file", "Demo.js", "--source-maps", "--color", "always"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).is_empty());

    let code = std::fs::read_to_string(dir.path().join("Demo.js")).unwrap();
    assert!(!code.contains('\u{1b}'));
    assert!(code.contains("_jsxs(Container"));

    let map = std::fs::read_to_string(dir.path().join("Demo.js.map")).unwrap();
    let map: serde_json::Value = serde_json::from_str(&map).unwrap();
    assert_eq!(map["version"], 3);
    assert_eq!(map["sources"][0], "Demo.tsx");
}

#[test]
fn test_timings_json_on_stderr() {
    let dir = workspace();
    let output = run_in(dir.path(), &["--color", "never", "--timings-format", "json"]);

    assert!(output.status.success());
    let line = stderr(&output)
        .lines()
        .find(|line| line.starts_with('{'))
        .map(str::to_string)
        .expect("no timings line");
    let timings: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert!(timings["transform_ms"].is_number());
    assert!(timings["present_ms"].is_null());
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_unresolved_plugin_fails_without_output() {
    let dir = workspace();
    let output = run_in(dir.path(), &["--plugin", "swc-plugin-unknown"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("unresolved plugin `swc-plugin-unknown`"));
}

#[test]
fn test_parse_error_names_the_file() {
    let dir = workspace();
    std::fs::write(dir.path().join("Broken.tsx"), "const a = <div>;\n").unwrap();

    let output = run_in(dir.path(), &["Broken.tsx", "--color", "never"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("Broken.tsx"));
}

#[test]
fn test_missing_input_fails() {
    let dir = workspace();
    let output = run_in(dir.path(), &["nope.tsx"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("nope.tsx"));
}

#[test]
fn test_bad_config_file_fails() {
    let dir = workspace();
    std::fs::write(dir.path().join(".jsxpiperc.json"), "{ \"jsc\": ").unwrap();

    let output = run_in(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains(".jsxpiperc.json"));
}
