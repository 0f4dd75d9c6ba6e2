use crate::domain::payee::Payee;
use crate::domain::ports::{RosterStore, RunStore};
use crate::domain::run::PayrollRun;
use crate::error::{PayrollError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory payee roster.
///
/// Uses `Arc<RwLock<Vec<Payee>>>` so that insertion order is the display
/// order. Ids are unique: `insert` refuses a taken id, `store` replaces the
/// existing entry in place.
#[derive(Default, Clone)]
pub struct InMemoryRosterStore {
    payees: Arc<RwLock<Vec<Payee>>>,
}

impl InMemoryRosterStore {
    /// Creates a new, empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a roster pre-populated with `payees`.
    pub fn with_payees(payees: Vec<Payee>) -> Self {
        Self {
            payees: Arc::new(RwLock::new(payees)),
        }
    }
}

#[async_trait]
impl RosterStore for InMemoryRosterStore {
    async fn insert(&self, payee: Payee) -> Result<()> {
        let mut payees = self.payees.write().await;
        if payees.iter().any(|p| p.id == payee.id) {
            return Err(PayrollError::DuplicatePayee(payee.id));
        }
        payees.push(payee);
        Ok(())
    }

    async fn store(&self, payee: Payee) -> Result<()> {
        let mut payees = self.payees.write().await;
        match payees.iter_mut().find(|p| p.id == payee.id) {
            Some(existing) => *existing = payee,
            None => payees.push(payee),
        }
        Ok(())
    }

    async fn get(&self, payee_id: &str) -> Result<Option<Payee>> {
        let payees = self.payees.read().await;
        Ok(payees.iter().find(|p| p.id == payee_id).cloned())
    }

    async fn all_payees(&self) -> Result<Vec<Payee>> {
        Ok(self.payees.read().await.clone())
    }
}

/// A thread-safe in-memory run history.
///
/// Runs are kept in execution order and served newest first.
#[derive(Default, Clone)]
pub struct InMemoryRunStore {
    runs: Arc<RwLock<Vec<PayrollRun>>>,
}

impl InMemoryRunStore {
    /// Creates a new, empty run history.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RunStore for InMemoryRunStore {
    async fn store(&self, run: PayrollRun) -> Result<()> {
        self.runs.write().await.push(run);
        Ok(())
    }

    async fn get(&self, run_id: &str) -> Result<Option<PayrollRun>> {
        let runs = self.runs.read().await;
        Ok(runs.iter().rev().find(|r| r.id == run_id).cloned())
    }

    async fn history(&self) -> Result<Vec<PayrollRun>> {
        let runs = self.runs.read().await;
        Ok(runs.iter().rev().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Usd;
    use crate::domain::payee::tests::payee;
    use crate::domain::quote::{Quote, StableBasket};
    use crate::domain::run::RunStatus;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn run(id: &str) -> PayrollRun {
        PayrollRun {
            id: id.to_string(),
            created_at: chrono::Utc::now(),
            token: "ETH".to_string(),
            quote: Quote {
                total_usd: Usd::ZERO,
                token: "ETH".to_string(),
                token_price: dec!(3200),
                token_amount: Decimal::ZERO,
                gas_usd: Usd::new(dec!(1)),
                fees_usd: Usd::new(dec!(2)),
                slippage: dec!(0.003),
                stable_basket: StableBasket::diversified(),
            },
            receipts: Vec::new(),
            status: RunStatus::Executed,
        }
    }

    #[tokio::test]
    async fn test_in_memory_roster_store() {
        let store = InMemoryRosterStore::new();
        let p = payee("e1", dec!(2800));

        store.store(p.clone()).await.unwrap();
        let retrieved = store.get("e1").await.unwrap().unwrap();
        assert_eq!(retrieved, p);

        assert!(store.get("e2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_roster_keeps_insertion_order_and_replaces() {
        let store = InMemoryRosterStore::new();
        store.store(payee("e2", dec!(1))).await.unwrap();
        store.store(payee("e1", dec!(2))).await.unwrap();

        let mut updated = payee("e2", dec!(1));
        updated.verified = false;
        store.store(updated).await.unwrap();

        let all = store.all_payees().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "e2");
        assert!(!all[0].verified);
        assert_eq!(all[1].id, "e1");
    }

    #[tokio::test]
    async fn test_insert_rejects_taken_id() {
        let store = InMemoryRosterStore::new();
        store.insert(payee("e1", dec!(2800))).await.unwrap();

        let result = store.insert(payee("e1", dec!(3100))).await;
        assert!(matches!(result, Err(PayrollError::DuplicatePayee(id)) if id == "e1"));

        let all = store.all_payees().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].salary_usd, Usd::new(dec!(2800)));
    }

    #[tokio::test]
    async fn test_in_memory_run_store_newest_first() {
        let store = InMemoryRunStore::new();
        store.store(run("run_1")).await.unwrap();
        store.store(run("run_2")).await.unwrap();

        let history = store.history().await.unwrap();
        let ids: Vec<_> = history.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["run_2", "run_1"]);

        assert_eq!(store.get("run_1").await.unwrap().unwrap().id, "run_1");
        assert!(store.get("run_9").await.unwrap().is_none());
    }
}
