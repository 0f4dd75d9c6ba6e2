use std::io::{Error, Write};
use tempfile::NamedTempFile;

pub const HEADER: [&str; 10] = [
    "id",
    "name",
    "wallet",
    "verified",
    "salary_usd",
    "stable",
    "offramp",
    "alt",
    "stablecoin",
    "jurisdiction",
];

pub const WALLET: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";

/// Writes a roster of `rows` identical payees earning `salary` each.
pub fn generate_roster(rows: usize, salary: &str) -> Result<NamedTempFile, Error> {
    let file = NamedTempFile::new()?;
    let mut wtr = csv::Writer::from_writer(file.reopen()?);
    wtr.write_record(HEADER)?;

    for i in 1..=rows {
        wtr.write_record([
            &format!("e{i}"),
            &format!("Payee {i}"),
            WALLET,
            "true",
            salary,
            "70",
            "20",
            "10",
            "USDC",
            "IN",
        ])?;
    }

    wtr.flush()?;
    Ok(file)
}

/// Writes raw CSV lines below the standard header.
pub fn roster_with_lines(lines: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{}", HEADER.join(","))?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    Ok(file)
}

/// Reads a decimal serialised as a JSON string.
pub fn decimal(value: &serde_json::Value) -> rust_decimal::Decimal {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| panic!("not a decimal string: {value}"))
}
