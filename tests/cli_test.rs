mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let input = common::command_file(&[
        "create checking 12345678 1.0",
        "deposit 12345678 500",
        "",
        "create savings 87654321 2.5",
        "transfer 12345678 87654321 200",
        "pass 1",
        "withdraw 87654321 50",
        "creat checking 11111111 1.0",
    ])?;

    let mut cmd = Command::new(cargo_bin!("banksim"));
    cmd.arg("run").arg(input.path());

    cmd.assert().success().stdout(
        "Checking 12345678 300.25 1.00\n\
         deposit 12345678 500\n\
         transfer 12345678 87654321 200\n\
         Savings 87654321 150.42 2.50\n\
         transfer 12345678 87654321 200\n\
         withdraw 87654321 50\n\
         creat checking 11111111 1.0\n",
    );

    Ok(())
}

#[test]
fn test_cli_csv_format() -> Result<(), Box<dyn std::error::Error>> {
    let input = common::command_file(&["create cd 12345678 4.5 5000", "deposit 12345678 10"])?;

    let mut cmd = Command::new(cargo_bin!("banksim"));
    cmd.arg("run").arg(input.path()).args(["--format", "csv"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("type,id,balance,apr,months_open"))
        .stdout(predicate::str::contains("Cd,12345678,5000.00,4.50,0"))
        .stdout(predicate::str::contains("deposit 12345678 10").not());

    Ok(())
}

#[test]
fn test_cli_json_format() -> Result<(), Box<dyn std::error::Error>> {
    let input = common::command_file(&["create savings 12345678 2.0", "pass 0"])?;

    let output = Command::new(cargo_bin!("banksim"))
        .arg("run")
        .arg(input.path())
        .args(["--format", "json"])
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["accounts"][0]["state"], "Savings 12345678 0.00 2.00");
    assert_eq!(report["invalidCommands"][0], "pass 0");

    Ok(())
}

#[test]
fn test_cli_missing_file_fails() {
    let mut cmd = Command::new(cargo_bin!("banksim"));
    cmd.arg("run").arg("does/not/exist.txt");

    cmd.assert().failure();
}

#[test]
fn test_cli_lists_scenarios() {
    let mut cmd = Command::new(cargo_bin!("banksim"));
    cmd.arg("scenarios");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("basic-operations"))
        .stdout(predicate::str::contains("apr-accrual"));
}

#[test]
fn test_cli_runs_scenario() {
    let mut cmd = Command::new(cargo_bin!("banksim"));
    cmd.args(["scenario", "apr-accrual"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("Savings 11111111 1061.68 6.00\n"));
}

#[test]
fn test_cli_unknown_scenario_fails() {
    let mut cmd = Command::new(cargo_bin!("banksim"));
    cmd.args(["scenario", "no-such-thing"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown scenario"));
}
