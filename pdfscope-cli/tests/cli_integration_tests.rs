//! Integration tests for the pdfscope CLI
//!
//! Tests command-line interface functionality including:
//! - Report parsing from captured engine output
//! - End-to-end analysis through a stand-in engine
//! - Error handling and exit codes

use anyhow::Result;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::{tempdir, TempDir};

const SAMPLE_REPORT: &str = "PDFiD 0.2.8 sample.pdf
 PDF Header: %PDF-1.4
 Count obj: 12
 Count endobj: 12
 /JavaScript present
 /Launch 1
";

/// Test helper to run CLI command and return output
fn run_cli_command(args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_pdfscope"))
        .args(args)
        .output()?;
    Ok(output)
}

/// Test helper to create a temporary directory
fn setup_temp_dir() -> TempDir {
    tempdir().expect("Failed to create temp directory")
}

fn write_file(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path.to_str().unwrap().to_string()
}

#[test]
fn test_cli_help() {
    let output = run_cli_command(&["--help"]).expect("CLI should run");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("analyze"));
    assert!(stdout.contains("parse"));
}

#[test]
fn test_cli_parse_text_view() {
    let temp_dir = setup_temp_dir();
    let report = write_file(temp_dir.path(), "report.txt", SAMPLE_REPORT);

    let output = run_cli_command(&["parse", &report]).expect("CLI should run");
    assert!(output.status.success(), "Command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("  header: %PDF-1.4"));
    assert!(stdout.contains("  obj: 12"));
    assert!(stdout.contains("Suspicious Elements Found (2):"));
    assert!(stdout.contains("! /Launch 1"));
}

#[test]
fn test_cli_parse_json() {
    let temp_dir = setup_temp_dir();
    let report = write_file(temp_dir.path(), "report.txt", SAMPLE_REPORT);

    let output = run_cli_command(&["parse", "--json", &report]).expect("CLI should run");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["header"], "%PDF-1.4");
    assert_eq!(json["summary"]["endobj"], 12);
    assert_eq!(
        json["suspicious"],
        serde_json::json!(["/JavaScript present", "/Launch 1"])
    );
}

#[test]
fn test_cli_parse_missing_report_fails() {
    let output =
        run_cli_command(&["parse", "/nonexistent/report.txt"]).expect("CLI should run");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"));
}

#[test]
fn test_cli_analyze_rejects_non_pdf() {
    let temp_dir = setup_temp_dir();
    let input = write_file(temp_dir.path(), "notes.txt", "hello");

    let output = run_cli_command(&["analyze", &input]).expect("CLI should run");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("File type not supported"));
}

#[test]
fn test_cli_analyze_missing_engine_fails_and_cleans_up() {
    let temp_dir = setup_temp_dir();
    let scratch = temp_dir.path().join("scratch");
    fs::create_dir(&scratch).unwrap();
    let input = write_file(temp_dir.path(), "doc.pdf", "%PDF-1.4\n");

    let output = run_cli_command(&[
        "analyze",
        &input,
        "--engine",
        "/nonexistent/pdfid",
        "--scratch-dir",
        scratch.to_str().unwrap(),
    ])
    .expect("CLI should run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to launch"), "stderr was: {stderr}");
    assert!(fs::read_dir(&scratch).unwrap().next().is_none());
}

/// The stand-in engine prints the staged file, so the "PDF" holds the report
#[cfg(unix)]
fn echo_engine_args<'a>(input: &'a str, scratch: &'a str) -> Vec<&'a str> {
    vec![
        "analyze",
        input,
        "--engine",
        "sh",
        "--engine-arg",
        "-c",
        "--engine-arg",
        "cat \"$1\"",
        "--engine-arg",
        "sh",
        "--scratch-dir",
        scratch,
    ]
}

#[cfg(unix)]
#[test]
fn test_cli_analyze_text_view() {
    let temp_dir = setup_temp_dir();
    let scratch = temp_dir.path().join("scratch");
    fs::create_dir(&scratch).unwrap();
    let input = write_file(temp_dir.path(), "sample.pdf", SAMPLE_REPORT);

    let output = run_cli_command(&echo_engine_args(&input, scratch.to_str().unwrap()))
        .expect("CLI should run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("PDF Analysis Results: sample.pdf"));
    assert!(stdout.contains("! /JavaScript present"));
    assert!(stdout.contains("Raw output:"));
    assert!(fs::read_dir(&scratch).unwrap().next().is_none());
}

#[cfg(unix)]
#[test]
fn test_cli_analyze_json() {
    let temp_dir = setup_temp_dir();
    let scratch = temp_dir.path().join("scratch");
    fs::create_dir(&scratch).unwrap();
    let input = write_file(temp_dir.path(), "sample.pdf", SAMPLE_REPORT);

    let mut args = echo_engine_args(&input, scratch.to_str().unwrap());
    args.push("--json");
    let output = run_cli_command(&args).expect("CLI should run");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["filename"], "sample.pdf");
    assert_eq!(json["analysis"]["summary"]["obj"], 12);
    assert_eq!(json["analysis"]["objects"], serde_json::json!([]));
    assert_eq!(json["rawOutput"], SAMPLE_REPORT);
}

#[cfg(unix)]
#[test]
fn test_cli_analyze_engine_failure_exit_code() {
    let temp_dir = setup_temp_dir();
    let input = write_file(temp_dir.path(), "doc.pdf", "%PDF-1.4\n");

    let output = run_cli_command(&[
        "analyze",
        &input,
        "--engine",
        "sh",
        "--engine-arg",
        "-c",
        "--engine-arg",
        "echo 'invalid PDF' >&2; exit 2",
    ])
    .expect("CLI should run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid PDF"), "stderr was: {stderr}");
}
