use crate::domain::payee::Payee;
use crate::domain::ports::IdSourceBox;
use crate::domain::quote::Quote;
use crate::domain::run::{PayoutReceipt, PayrollRun, ReceiptStatus, RunStatus};
use chrono::Utc;

/// Turns a quote into an executed payroll run.
///
/// Nothing is broadcast: every receipt is confirmed immediately with a
/// placeholder transaction hash.
pub struct PayrollRunExecutor {
    ids: IdSourceBox,
}

impl PayrollRunExecutor {
    pub fn new(ids: IdSourceBox) -> Self {
        Self { ids }
    }

    pub fn execute_run(&self, payees: &[Payee], quote: &Quote) -> PayrollRun {
        let receipts = payees
            .iter()
            .map(|payee| PayoutReceipt {
                payee_id: payee.id.clone(),
                tx_hash: self.ids.tx_hash(),
                status: ReceiptStatus::Confirmed,
            })
            .collect();

        let run = PayrollRun {
            id: self.ids.run_id(),
            created_at: Utc::now(),
            token: quote.token.clone(),
            quote: quote.clone(),
            receipts,
            status: RunStatus::Executed,
        };

        tracing::info!(
            run = %run.id,
            token = %run.token,
            payees = run.receipts.len(),
            total_usd = %run.quote.total_usd,
            "executed payroll run"
        );
        run
    }
}
