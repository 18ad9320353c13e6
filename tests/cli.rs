use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn collate(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("collate").unwrap();
    cmd.env("STATEMENT_COLLATE_CONFIG_DIR", config_dir)
        .env("RUST_LOG", "off");
    cmd
}

fn write_statements(dir: &Path) {
    std::fs::write(
        dir.join("2024_01_td_cheq.csv"),
        "01/05/2024,LOBLAWS,45.20,,954.80\n01/09/2024,TFR-TO SIM,100.00,,854.80\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("2024_01_sim_cheq.csv"),
        "Date,Transaction Details,Funds Out,Funds In\n01/09/2024,TRANSFER FROM TD,,100.00\n",
    )
    .unwrap();
    std::fs::write(dir.join("2024_13_td_cheq.csv"), "").unwrap();
}

#[test]
fn run_writes_workbook() {
    let config = TempDir::new().unwrap();
    let statements = TempDir::new().unwrap();
    write_statements(statements.path());

    collate(config.path())
        .args(["run", "--dir"])
        .arg(statements.path())
        .args(["--transfers", "--budget"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Combined 3 transactions"))
        .stdout(predicate::str::contains("1 pair matched"))
        .stdout(predicate::str::contains("invalid month '13'"))
        .stdout(predicate::str::contains("Groceries"));

    assert!(statements.path().join("combined_statements.xlsx").exists());
}

#[test]
fn run_with_no_data_is_not_an_error() {
    let config = TempDir::new().unwrap();
    let statements = TempDir::new().unwrap();

    collate(config.path())
        .args(["run", "--dir"])
        .arg(statements.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No data found to combine."));

    assert!(!statements.path().join("combined_statements.xlsx").exists());
}

#[test]
fn run_csv_format() {
    let config = TempDir::new().unwrap();
    let statements = TempDir::new().unwrap();
    write_statements(statements.path());

    collate(config.path())
        .args(["run", "--format", "csv", "--dir"])
        .arg(statements.path())
        .assert()
        .success();

    let contents =
        std::fs::read_to_string(statements.path().join("combined_statements.csv")).unwrap();
    assert!(contents.starts_with("Date,Transaction,Description,Amount"));
    assert_eq!(contents.lines().count(), 4);

    collate(config.path())
        .args(["run", "--format", "csv", "--dir"])
        .arg(statements.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 invalid"))
        .stdout(predicate::str::contains("Combined 3 transactions"));
}

#[test]
fn missing_directory_fails() {
    let config = TempDir::new().unwrap();
    let statements = TempDir::new().unwrap();

    collate(config.path())
        .args(["run", "--dir"])
        .arg(statements.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn files_reports_classification() {
    let config = TempDir::new().unwrap();
    let statements = TempDir::new().unwrap();
    write_statements(statements.path());

    collate(config.path())
        .args(["files", "--dir"])
        .arg(statements.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 valid"))
        .stdout(predicate::str::contains("Missing statements"));
}

#[test]
fn init_then_config() {
    let config = TempDir::new().unwrap();

    collate(config.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default settings"));
    assert!(config.path().join("settings.json").exists());

    collate(config.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("wea, tan, sim, td"));
}

#[test]
fn explicit_config_file_is_used() {
    let config = TempDir::new().unwrap();
    let statements = TempDir::new().unwrap();
    let settings = config.path().join("custom.json");
    std::fs::write(
        &settings,
        format!(
            r#"{{ "statements_dir": {:?}, "accounts": ["td"] }}"#,
            statements.path().display().to_string()
        ),
    )
    .unwrap();
    write_statements(statements.path());

    collate(config.path())
        .arg("--config")
        .arg(&settings)
        .assert()
        .success()
        .stdout(predicate::str::contains("Combined 2 transactions"));
}
