use crate::domain::money::Usd;
use crate::domain::payee::{Payee, PayoutSplit};
use crate::error::{PayrollError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One row of a roster CSV file.
#[derive(Debug, Deserialize)]
struct PayeeRecord {
    id: String,
    name: String,
    wallet: String,
    verified: bool,
    salary_usd: Decimal,
    stable: u8,
    offramp: u8,
    alt: u8,
    stablecoin: String,
    jurisdiction: String,
}

impl TryFrom<PayeeRecord> for Payee {
    type Error = PayrollError;

    fn try_from(record: PayeeRecord) -> Result<Self> {
        let payee = Payee {
            id: record.id,
            name: record.name,
            wallet: record.wallet,
            verified: record.verified,
            salary_usd: Usd::new(record.salary_usd),
            split: PayoutSplit::new(record.stable, record.offramp, record.alt)?,
            stablecoin: record.stablecoin.parse()?,
            jurisdiction: record.jurisdiction,
        };
        payee.validate()?;
        Ok(payee)
    }
}

/// Reads a payee roster from a CSV source.
///
/// Expects a header row with the columns
/// `id,name,wallet,verified,salary_usd,stable,offramp,alt,stablecoin,jurisdiction`.
/// Wallets are not checked here; malformed ones surface in the compliance
/// queue instead.
pub struct PayeeReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PayeeReader<R> {
    /// Creates a new `PayeeReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and validates payees.
    pub fn payees(self) -> impl Iterator<Item = Result<Payee>> {
        self.reader
            .into_deserialize::<PayeeRecord>()
            .map(|result| result.map_err(PayrollError::from).and_then(Payee::try_from))
    }
}
