use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use rust_decimal_macros::dec;
use std::io::Write;
use std::process::Command;

mod common;
use common::decimal;

#[test]
fn test_malformed_rows_are_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let w = common::WALLET;
    let roster = common::roster_with_lines(&[
        &format!("e1,Valid,{w},true,1000,70,20,10,USDC,IN"),
        // Negative salary
        &format!("e2,Negative,{w},true,-5,70,20,10,USDC,IN"),
        // Share above 100
        &format!("e3,Split,{w},true,10,170,20,10,USDC,IN"),
        // Unknown stablecoin
        &format!("e4,Coin,{w},true,10,70,20,10,BUSD,IN"),
        // Not a number
        &format!("e5,Text,{w},true,lots,70,20,10,USDC,IN"),
        &format!("e6,Valid,{w},true,500,70,20,10,DAI,IN"),
    ])?;

    let output = Command::new(cargo_bin!("crypto-payroll"))
        .arg("quote")
        .arg(roster.path())
        .output()?;
    assert!(output.status.success());

    let quote: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(decimal(&quote["total_usd"]), dec!(1500));

    let stderr = String::from_utf8(output.stderr)?;
    assert_eq!(stderr.matches("skipping roster row").count(), 4);

    Ok(())
}

#[test]
fn test_malformed_wallet_is_kept_and_flagged() -> Result<(), Box<dyn std::error::Error>> {
    let roster = common::roster_with_lines(&["e1,Odd,0x1234,false,1000,70,20,10,USDC,IN"])?;

    let mut cmd = Command::new(cargo_bin!("crypto-payroll"));
    cmd.arg("screen").arg(roster.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("e1,Odd,0x1234,Malformed wallet address"));

    Ok(())
}

#[test]
fn test_missing_roster_file_fails() {
    let mut cmd = Command::new(cargo_bin!("crypto-payroll"));
    cmd.args(["quote", "tests/fixtures/does_not_exist.csv"]);
    cmd.assert().failure();
}

#[test]
fn test_large_roster() -> Result<(), Box<dyn std::error::Error>> {
    let roster = common::generate_roster(1000, "100")?;

    let output = Command::new(cargo_bin!("crypto-payroll"))
        .arg("quote")
        .arg(roster.path())
        .output()?;
    assert!(output.status.success());

    let quote: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(decimal(&quote["total_usd"]), dec!(100000));
    // 1000 * 0.03
    assert_eq!(decimal(&quote["gas_usd"]), dec!(30));
    // 100000 * 0.002
    assert_eq!(decimal(&quote["fees_usd"]), dec!(200));

    Ok(())
}

#[test]
fn test_duplicate_ids_keep_first_row() -> Result<(), Box<dyn std::error::Error>> {
    let w = common::WALLET;
    let roster = common::roster_with_lines(&[
        &format!("e1,Aisha Khan,{w},true,2800,70,20,10,USDC,IN"),
        &format!("e1,Leo Martins,{w},true,3100,60,30,10,USDT,BR"),
    ])?;

    let output = Command::new(cargo_bin!("crypto-payroll"))
        .arg("quote")
        .arg(roster.path())
        .output()?;
    assert!(output.status.success());

    let quote: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(decimal(&quote["total_usd"]), dec!(2800));

    let stderr = String::from_utf8(output.stderr)?;
    assert_eq!(stderr.matches("skipping roster row").count(), 1);
    assert!(stderr.contains("Duplicate payee id: e1"));

    Ok(())
}

#[test]
fn test_oversized_salaries_are_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let w = common::WALLET;
    // Each just over half of Decimal::MAX.
    let roster = common::roster_with_lines(&[
        &format!("e1,Big,{w},true,39614081257132168796771975168,70,20,10,USDC,IN"),
        &format!("e2,Bigger,{w},true,39614081257132168796771975168,70,20,10,USDC,IN"),
        &format!("e3,Normal,{w},true,2500,70,20,10,USDC,IN"),
    ])?;

    let output = Command::new(cargo_bin!("crypto-payroll"))
        .arg("quote")
        .arg(roster.path())
        .output()?;
    assert!(output.status.success());

    let quote: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(decimal(&quote["total_usd"]), dec!(2500));

    let stderr = String::from_utf8(output.stderr)?;
    assert_eq!(stderr.matches("Salary out of range").count(), 2);

    Ok(())
}

#[test]
fn test_dust_price_table_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut prices = tempfile::NamedTempFile::new()?;
    write!(prices, r#"{{"MEME": "0.0000000000000000000000001"}}"#)?;

    let mut cmd = Command::new(cargo_bin!("crypto-payroll"));
    cmd.args(["quote", "tests/fixtures/roster.csv", "--token", "MEME"])
        .arg("--prices")
        .arg(prices.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid price for MEME"))
        .stderr(predicate::str::contains("panicked").not());

    Ok(())
}

#[test]
fn test_pricing_flags_only_on_quoting_commands() {
    for command in ["screen", "payouts", "forecast"] {
        let mut cmd = Command::new(cargo_bin!("crypto-payroll"));
        cmd.args([command, "tests/fixtures/roster.csv", "--strict"]);
        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("unexpected argument"));
    }
}

#[test]
fn test_forecast_months_are_bounded() -> Result<(), Box<dyn std::error::Error>> {
    for months in ["0", "121", "4294967295"] {
        let mut cmd = Command::new(cargo_bin!("crypto-payroll"));
        cmd.args(["forecast", "tests/fixtures/roster.csv", "--months", months]);
        cmd.assert().failure();
    }

    let output = Command::new(cargo_bin!("crypto-payroll"))
        .args(["forecast", "tests/fixtures/roster.csv", "--months", "120"])
        .args(["--start", "2025-08-01"])
        .output()?;
    assert!(output.status.success());
    // Header plus one row per month.
    assert_eq!(String::from_utf8(output.stdout)?.lines().count(), 121);

    Ok(())
}
