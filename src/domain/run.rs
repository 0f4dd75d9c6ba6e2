use super::quote::Quote;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    Pending,
    Confirmed,
    Failed,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Quoted,
    Executed,
    Settled,
}

/// Proof of one payout within a run.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct PayoutReceipt {
    pub payee_id: String,
    pub tx_hash: String,
    pub status: ReceiptStatus,
}

/// An executed quote together with its payout receipts.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PayrollRun {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub token: String,
    pub quote: Quote,
    pub receipts: Vec<PayoutReceipt>,
    pub status: RunStatus,
}

impl PayrollRun {
    pub fn receipt_for(&self, payee_id: &str) -> Option<&PayoutReceipt> {
        self.receipts.iter().find(|r| r.payee_id == payee_id)
    }

    pub fn all_confirmed(&self) -> bool {
        self.receipts
            .iter()
            .all(|r| r.status == ReceiptStatus::Confirmed)
    }
}
