use super::payee::Payee;
use super::quote::StableBasket;
use super::run::PayrollRun;
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::fmt;

/// Market data: the USD unit price of a funding token.
pub trait PriceSource: Send + Sync {
    fn price_of(&self, token: &str) -> Option<Decimal>;
}

/// Decides how payroll value is spread across stablecoins.
pub trait AllocationPolicy: Send + Sync {
    fn allocation(&self) -> StableBasket;
}

/// Produces run identifiers and transaction hashes.
pub trait IdSource: Send + Sync {
    fn run_id(&self) -> String;
    fn payee_id(&self) -> String;
    fn tx_hash(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceFlag {
    MalformedWallet,
    KnownVanityPattern,
}

impl fmt::Display for ComplianceFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceFlag::MalformedWallet => f.write_str("Malformed wallet address"),
            ComplianceFlag::KnownVanityPattern => f.write_str("Known vanity prefix"),
        }
    }
}

/// Sanctions and risk screening of a payee.
pub trait ComplianceScreen: Send + Sync {
    fn screen(&self, payee: &Payee) -> Option<ComplianceFlag>;
}

#[async_trait]
pub trait RosterStore: Send + Sync {
    /// Adds a payee whose id is not yet on the roster.
    ///
    /// Fails with [`PayrollError::DuplicatePayee`](crate::error::PayrollError::DuplicatePayee) otherwise, leaving the
    /// existing entry untouched.
    async fn insert(&self, payee: Payee) -> Result<()>;
    /// Adds the payee, or replaces the one with the same id in place.
    async fn store(&self, payee: Payee) -> Result<()>;
    async fn get(&self, payee_id: &str) -> Result<Option<Payee>>;
    /// All payees in insertion order.
    async fn all_payees(&self) -> Result<Vec<Payee>>;
}

#[async_trait]
pub trait RunStore: Send + Sync {
    async fn store(&self, run: PayrollRun) -> Result<()>;
    async fn get(&self, run_id: &str) -> Result<Option<PayrollRun>>;
    /// All runs, newest first.
    async fn history(&self) -> Result<Vec<PayrollRun>>;
}

pub type PriceSourceBox = Box<dyn PriceSource>;
pub type AllocationPolicyBox = Box<dyn AllocationPolicy>;
pub type IdSourceBox = Box<dyn IdSource>;
pub type ComplianceScreenBox = Box<dyn ComplianceScreen>;
pub type RosterStoreBox = Box<dyn RosterStore>;
pub type RunStoreBox = Box<dyn RunStore>;
