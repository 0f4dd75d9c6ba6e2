use super::executor::PayrollRunExecutor;
use super::forecast::{ForecastPoint, forecast};
use super::quote::PayrollQuoteCalculator;
use crate::domain::payee::{NewPayee, Payee, PayoutPreview};
use crate::domain::ports::{
    ComplianceFlag, ComplianceScreenBox, IdSourceBox, RosterStoreBox, RunStoreBox,
};
use crate::domain::quote::Quote;
use crate::domain::run::PayrollRun;
use crate::error::{PayrollError, Result};
use chrono::NaiveDate;

/// Fresh ids drawn for a new payee before giving up on collisions.
const PAYEE_ID_ATTEMPTS: u32 = 3;

/// The entry point used by a presentation layer.
///
/// `PayrollService` owns the roster and run history through its store ports
/// and delegates pricing and execution to [`PayrollQuoteCalculator`] and
/// [`PayrollRunExecutor`].
pub struct PayrollService {
    roster: RosterStoreBox,
    runs: RunStoreBox,
    calculator: PayrollQuoteCalculator,
    executor: PayrollRunExecutor,
    screen: ComplianceScreenBox,
    ids: IdSourceBox,
}

impl PayrollService {
    /// Creates a new `PayrollService`.
    ///
    /// # Arguments
    ///
    /// * `roster` - The store for payees.
    /// * `runs` - The store for executed runs.
    /// * `calculator` - Prices runs.
    /// * `executor` - Produces run receipts.
    /// * `screen` - Flags payees for compliance review.
    /// * `ids` - Generates ids for newly added payees.
    pub fn new(
        roster: RosterStoreBox,
        runs: RunStoreBox,
        calculator: PayrollQuoteCalculator,
        executor: PayrollRunExecutor,
        screen: ComplianceScreenBox,
        ids: IdSourceBox,
    ) -> Self {
        Self {
            roster,
            runs,
            calculator,
            executor,
            screen,
            ids,
        }
    }

    /// Loads payees as-is, keeping those with malformed wallets so they show
    /// up in the compliance queue. A payee whose id is already on the roster
    /// is refused with [`PayrollError::DuplicatePayee`].
    pub async fn import_payee(&self, payee: Payee) -> Result<()> {
        payee.validate()?;
        self.roster.insert(payee).await
    }

    /// Adds a payee entered by a user. The wallet must be well formed.
    ///
    /// A generated id that is already taken is redrawn, up to
    /// `PAYEE_ID_ATTEMPTS` times.
    pub async fn add_payee(&self, draft: NewPayee) -> Result<Payee> {
        let mut attempt = 1;
        loop {
            let payee = draft.clone().into_payee(self.ids.payee_id())?;
            match self.roster.insert(payee.clone()).await {
                Ok(()) => {
                    tracing::info!(payee = %payee.id, "added payee");
                    return Ok(payee);
                }
                Err(PayrollError::DuplicatePayee(id)) if attempt < PAYEE_ID_ATTEMPTS => {
                    tracing::debug!(payee = %id, attempt, "payee id taken, drawing another");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Flips the verification flag and returns the updated payee.
    pub async fn toggle_verified(&self, payee_id: &str) -> Result<Payee> {
        let mut payee = self
            .roster
            .get(payee_id)
            .await?
            .ok_or_else(|| PayrollError::PayeeNotFound(payee_id.to_string()))?;
        payee.verified = !payee.verified;
        self.roster.store(payee.clone()).await?;
        Ok(payee)
    }

    pub async fn payees(&self) -> Result<Vec<Payee>> {
        self.roster.all_payees().await
    }

    pub async fn payout_preview(&self, payee_id: &str) -> Result<PayoutPreview> {
        self.roster
            .get(payee_id)
            .await?
            .map(|p| p.payout_preview())
            .ok_or_else(|| PayrollError::PayeeNotFound(payee_id.to_string()))
    }

    /// Prices the current roster in `token`.
    pub async fn quote(&self, token: &str) -> Result<Quote> {
        let payees = self.roster.all_payees().await?;
        self.calculator.quote(&payees, token)
    }

    /// Quotes the current roster, executes it and records the run.
    pub async fn execute(&self, token: &str) -> Result<PayrollRun> {
        let payees = self.roster.all_payees().await?;
        let quote = self.calculator.quote(&payees, token)?;
        let run = self.executor.execute_run(&payees, &quote);
        self.runs.store(run.clone()).await?;
        Ok(run)
    }

    /// Executed runs, newest first.
    pub async fn history(&self) -> Result<Vec<PayrollRun>> {
        self.runs.history().await
    }

    /// Payees needing compliance review, in roster order.
    pub async fn compliance_queue(&self) -> Result<Vec<(Payee, ComplianceFlag)>> {
        let payees = self.roster.all_payees().await?;
        Ok(payees
            .into_iter()
            .filter_map(|p| self.screen.screen(&p).map(|flag| (p, flag)))
            .collect())
    }

    pub async fn forecast(&self, start: NaiveDate, months: u32) -> Result<Vec<ForecastPoint>> {
        let payees = self.roster.all_payees().await?;
        forecast(&payees, start, months)
    }
}
