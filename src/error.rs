use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayrollError {
    #[error("Unknown funding token: {0}")]
    UnknownToken(String),
    #[error("Invalid wallet address: {0}")]
    InvalidWalletAddress(String),
    #[error("Negative salary: {0}")]
    NegativeSalary(Decimal),
    #[error("Salary out of range: {0}")]
    SalaryOutOfRange(Decimal),
    #[error("Invalid payout split: {0}")]
    InvalidSplit(String),
    #[error("Invalid stablecoin basket: {0}")]
    InvalidBasket(String),
    #[error("Invalid price for {token}: {price}")]
    InvalidPrice { token: String, price: Decimal },
    #[error("Payee not found: {0}")]
    PayeeNotFound(String),
    #[error("Duplicate payee id: {0}")]
    DuplicatePayee(String),
    #[error("Amount overflow computing {0}")]
    AmountOverflow(&'static str),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PayrollError>;
