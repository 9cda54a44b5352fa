//! End to end runs of both binaries

use assert_cmd::Command;
use predicates::prelude::*;
use std::{fs, path::Path};

const POSTGRES_RUN: &str = r#"{"dbType":"postgres","ingestion":[{"durationMs":100,"nRecords":1000}],"queries":[{"queryId":1,"durationMs":50,"description":"count"}]}"#;
const QUESTDB_RUN: &str = r#"{"dbType":"questdb","ingestion":[{"durationMs":50,"nRecords":1000}],"queries":[{"queryId":1,"durationMs":25,"description":"count"},{"queryId":2,"durationMs":-1}]}"#;

fn write_run(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn report_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let postgres = write_run(dir.path(), "postgres.json", POSTGRES_RUN);
    let output = dir.path().join("report.md");

    Command::cargo_bin("speedup-report")
        .unwrap()
        .arg(&postgres)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Processing 1 benchmark files (averaging by dbType)...",
        ))
        .stderr(predicate::str::contains("Speedup report generated"));

    let report = fs::read_to_string(&output).unwrap();
    assert!(report.starts_with("# Database Performance Speedup Report (Averaged Results)\n"));
    assert!(report.contains("**Baseline Database:** postgres\n"));
    assert!(report.contains("| 1 | count | 1.00x |\n"));
}

#[test]
fn directories_are_searched() {
    let dir = tempfile::tempdir().unwrap();
    let runs = dir.path().join("runs");
    fs::create_dir(&runs).unwrap();
    write_run(&runs, "postgres.json", POSTGRES_RUN);
    write_run(&runs, "questdb.json", QUESTDB_RUN);
    write_run(&runs, "notes.txt", "not a run");
    let output = dir.path().join("report.md");

    Command::cargo_bin("speedup-report")
        .unwrap()
        .arg(&runs)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let report = fs::read_to_string(&output).unwrap();
    assert!(report.contains("| Query ID | Description | postgres (ms) | questdb (ms) |\n"));
    assert!(report.contains("| 2 | Query 2 | N/A | N/A |\n"));
    assert!(report.contains("*Report generated from 2 benchmark files, averaged by database type*"));
}

#[test]
fn missing_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let postgres = write_run(dir.path(), "postgres.json", POSTGRES_RUN);
    let output = dir.path().join("report.md");

    Command::cargo_bin("speedup-report")
        .unwrap()
        .arg(&postgres)
        .arg(dir.path().join("missing.json"))
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("File not found"));

    assert!(output.exists());
}

#[test]
fn no_valid_files_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.md");

    Command::cargo_bin("speedup-report")
        .unwrap()
        .arg(dir.path().join("a.json"))
        .arg(dir.path().join("b.json"))
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .code(1);

    assert!(!output.exists());
}

#[test]
fn malformed_file_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let postgres = write_run(dir.path(), "postgres.json", POSTGRES_RUN);
    let broken = write_run(dir.path(), "broken.json", "{\"dbType\": ");
    let output = dir.path().join("report.md");

    Command::cargo_bin("speedup-report")
        .unwrap()
        .arg(&postgres)
        .arg(&broken)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("broken.json"));

    assert!(!output.exists());
}

#[test]
fn plots_are_written() {
    let dir = tempfile::tempdir().unwrap();
    let postgres = write_run(dir.path(), "postgres.json", POSTGRES_RUN);
    let questdb = write_run(dir.path(), "questdb.json", QUESTDB_RUN);
    let output = dir.path().join("plots");

    Command::cargo_bin("query-plots")
        .unwrap()
        .arg(&postgres)
        .arg(&questdb)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Created plot for Query 1"))
        .stderr(predicate::str::contains("Skipping Query 2: No valid data"));

    assert!(output.join("query_01_comparison.svg").exists());
    assert!(!output.join("query_02_comparison.svg").exists());
}

#[test]
fn invalid_plot_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let postgres = write_run(dir.path(), "postgres.json", POSTGRES_RUN);
    let config = write_run(dir.path(), "plots.yaml", "palette:\n  postgres: blue\n");
    let output = dir.path().join("plots");

    Command::cargo_bin("query-plots")
        .unwrap()
        .arg(&postgres)
        .arg("-c")
        .arg(&config)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("palette.postgres"));

    assert!(!output.exists());
}
