use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use rust_decimal_macros::dec;
use std::process::Command;

mod common;
use common::decimal;

#[test]
fn test_unknown_token_falls_back_to_unit_price() -> Result<(), Box<dyn std::error::Error>> {
    let roster = common::roster_with_lines(&[])?;

    let output = Command::new(cargo_bin!("crypto-payroll"))
        .arg("quote")
        .arg(roster.path())
        .args(["--token", "DOGE"])
        .output()?;
    assert!(output.status.success());

    let quote: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(decimal(&quote["total_usd"]), dec!(0));
    assert_eq!(decimal(&quote["token_price"]), dec!(1));
    assert_eq!(decimal(&quote["gas_usd"]), dec!(1));
    assert_eq!(decimal(&quote["fees_usd"]), dec!(2));
    assert_eq!(decimal(&quote["token_amount"]), dec!(3.009));

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("using fallback token price"));

    Ok(())
}

#[test]
fn test_strict_mode_rejects_unknown_token() {
    let mut cmd = Command::new(cargo_bin!("crypto-payroll"));
    cmd.args(["quote", "tests/fixtures/roster.csv", "--token", "DOGE", "--strict"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown funding token: DOGE"));
}

#[test]
fn test_strict_mode_accepts_known_token() {
    let mut cmd = Command::new(cargo_bin!("crypto-payroll"));
    cmd.args(["execute", "tests/fixtures/roster.csv", "--token", "ARB", "--strict"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"token_price\": \"1.25\""));
}
