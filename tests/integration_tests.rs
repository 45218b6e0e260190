//! End-to-end tests driving the compiled binary.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;
use std::process::Command;

use tempfile::tempdir;

fn rustig_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_rustig"))
}

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn cli_help_flag() {
    let output = rustig_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("rustig"));
    assert!(stdout.contains("contigs"));
}

#[test]
fn cli_version_flag() {
    let output = rustig_cmd()
        .arg("--version")
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_missing_input() {
    let output = rustig_cmd().output().expect("Failed to execute");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("required") || stderr.contains("Usage"));
}

#[test]
fn cli_rejects_even_k() {
    let output = rustig_cmd()
        .arg("--input")
        .arg(fixture_path("reads.fq"))
        .args(["-k", "4"])
        .output()
        .expect("Failed to execute");
    assert!(!output.status.success());
}

#[test]
fn cli_rejects_missing_file() {
    let output = rustig_cmd()
        .args(["--input", "does/not/exist.fq", "-k", "3", "--quiet"])
        .output()
        .expect("Failed to execute");
    assert!(!output.status.success());
}

#[test]
fn cli_assembles_fastq_to_stdout() {
    let output = rustig_cmd()
        .arg("--input")
        .arg(fixture_path("reads.fq"))
        .args(["-k", "3", "--quiet"])
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(">contig_0 len=7"));
    assert!(stdout.contains("ATGCGTA"));
}

#[test]
fn cli_assembles_fasta_input() {
    let output = rustig_cmd()
        .arg("--input")
        .arg(fixture_path("simple.fa"))
        .args(["-k", "3", "--quiet"])
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ATGCGTA"));
}

#[test]
fn cli_writes_output_file() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("contigs.fa");

    let output = rustig_cmd()
        .arg("--input")
        .arg(fixture_path("reads.fq"))
        .arg("--output")
        .arg(&out)
        .args(["-k", "3", "--quiet"])
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());

    let written = std::fs::read_to_string(&out).expect("output file");
    assert_eq!(written, ">contig_0 len=7\nATGCGTA\n");
}

#[test]
fn cli_tsv_format() {
    let output = rustig_cmd()
        .arg("--input")
        .arg(fixture_path("reads.fq"))
        .args(["-k", "3", "--quiet", "--format", "tsv"])
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("contig_0\t7\tATGCGTA"));
}

#[test]
fn cli_json_format() {
    let output = rustig_cmd()
        .arg("--input")
        .arg(fixture_path("reads.fq"))
        .args(["-k", "3", "--quiet", "--format", "json"])
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let records = parsed.as_array().expect("JSON array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["sequence"], "ATGCGTA");
    assert_eq!(records[0]["length"], 7);
}

#[test]
fn cli_pops_bubble() {
    let output = rustig_cmd()
        .arg("--input")
        .arg(fixture_path("bubble.fq"))
        .args(["-k", "3", "--quiet"])
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("CATGGA"));
    assert!(!stdout.contains("CATCGA"));
}

#[test]
fn cli_min_len_filters() {
    let output = rustig_cmd()
        .arg("--input")
        .arg(fixture_path("reads.fq"))
        .args(["-k", "3", "--quiet", "--min-len", "100"])
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}
