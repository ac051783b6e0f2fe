//! Integration tests for the CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn migrator() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("jira-devops-migrator"))
}

fn write_exports(dir: &TempDir) {
    fs::write(
        dir.path().join("all_fields.csv"),
        "Issue key,Description,Environment,Attachment\n\
         BUG-1,*Steps*,Linux,https://x/a.png\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("default_fields.csv"),
        "Issue key,Summary,Assignee,Reporter,Priority,Status,Created,Updated\n\
         BUG-1,Crash on save,Ann,Bob,Highest,Open,2024-01-02,\n",
    )
    .unwrap();
}

#[test]
fn test_cli_version() {
    migrator()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jira-devops-migrator"));
}

#[test]
fn test_cli_help() {
    migrator()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Azure DevOps"))
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("clean"))
        .stdout(predicate::str::contains("extract-attachments"));
}

#[test]
fn test_no_command_shows_overview() {
    migrator()
        .assert()
        .success()
        .stdout(predicate::str::contains("COMMANDS:"));
}

#[test]
fn test_convert_requires_base_url() {
    let dir = TempDir::new().unwrap();
    write_exports(&dir);

    migrator()
        .current_dir(dir.path())
        .args(["convert", "-q"])
        .env("XDG_CONFIG_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Issue base URL is not configured"));

    assert!(!dir.path().join("azure_output.csv").exists());
}

#[test]
fn test_convert_rejects_unknown_priority_scheme() {
    migrator()
        .args(["convert", "--priority-scheme", "sideways"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sideways"));
}

#[test]
fn test_convert_missing_input_fails() {
    let dir = TempDir::new().unwrap();

    migrator()
        .current_dir(dir.path())
        .args(["convert", "-q", "--base-url", "https://j/browse/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_convert_end_to_end() {
    let dir = TempDir::new().unwrap();
    write_exports(&dir);

    migrator()
        .current_dir(dir.path())
        .args([
            "convert",
            "--base-url",
            "https://jira.example.com/browse/",
            "--output-format",
            "json",
        ])
        .env("XDG_CONFIG_HOME", dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"records_written\": 1"));

    let output = fs::read_to_string(dir.path().join("azure_output.csv")).unwrap();
    assert!(output.starts_with(
        "Work Item Type,Title,Assigned To,Created By,Priority,State,Created Date,Changed Date,Description\n"
    ));
    assert!(output.contains("Bug,Crash on save,Ann,Bob,1,Open,2024-01-02T00:00:00.000Z,,"));
    assert!(output.contains("[View in Jira](https://jira.example.com/browse/BUG-1)"));
    assert!(output.contains("_Steps_"));
}

#[test]
fn test_config_file_supplies_base_url() {
    let dir = TempDir::new().unwrap();
    write_exports(&dir);
    let config = dir.path().join("migrator.toml");
    fs::write(
        &config,
        "[migration]\nissue_base_url = \"https://cfg.example.com/browse/\"\nwork_item_type = \"Issue\"\n",
    )
    .unwrap();

    migrator()
        .current_dir(dir.path())
        .args(["convert", "-q", "--config"])
        .arg(&config)
        .assert()
        .success();

    let output = fs::read_to_string(dir.path().join("azure_output.csv")).unwrap();
    assert!(output.contains("https://cfg.example.com/browse/BUG-1"));
    assert!(output.contains("\nIssue,Crash on save,"));
}

#[test]
fn test_extract_attachments() {
    let dir = TempDir::new().unwrap();
    write_exports(&dir);

    migrator()
        .current_dir(dir.path())
        .args(["extract-attachments", "-q", "all_fields.csv"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dir.path().join("attachment-links.txt")).unwrap(),
        "https://x/a.png"
    );
}

#[test]
fn test_clean_single_file() {
    let dir = TempDir::new().unwrap();
    write_exports(&dir);

    migrator()
        .current_dir(dir.path())
        .args(["clean", "-q", "all_fields.csv", "-o", "cleaned.csv"])
        .assert()
        .success();

    let cleaned = fs::read_to_string(dir.path().join("cleaned.csv")).unwrap();
    assert_eq!(
        cleaned,
        "Issue key,Description,Environment,Attachment\nBUG-1,_Steps_,Linux,https://x/a.png\n"
    );
}
