use crate::domain::money::Usd;
use crate::domain::payee::Payee;
use crate::error::{PayrollError, Result};
use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Assumed month-over-month payroll growth.
pub const MONTHLY_GROWTH: Decimal = dec!(0.005);
/// Longest horizon projected; ten years.
pub const MAX_FORECAST_MONTHS: u32 = 120;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Abbreviated month name, e.g. `Aug`.
    pub month: String,
    pub payroll: Usd,
    /// Mock risk score around 5, one decimal place.
    pub risk: f64,
}

/// Projects monthly payroll for `months` months starting at `start`.
///
/// Payroll grows linearly by [`MONTHLY_GROWTH`] per month from the current
/// roster total. The horizon is capped at [`MAX_FORECAST_MONTHS`] and ends
/// early at the edge of chrono's calendar.
pub fn forecast(payees: &[Payee], start: NaiveDate, months: u32) -> Result<Vec<ForecastPoint>> {
    let base = Usd::checked_sum(payees.iter().map(|p| p.salary_usd))
        .ok_or(PayrollError::AmountOverflow("forecast base"))?;

    (0..months.min(MAX_FORECAST_MONTHS))
        .map_while(|i| start.checked_add_months(Months::new(i)).map(|date| (i, date)))
        .map(|(i, date)| {
            let growth = Decimal::ONE + MONTHLY_GROWTH * Decimal::from(i);
            let payroll = base
                .value()
                .checked_mul(growth)
                .ok_or(PayrollError::AmountOverflow("forecast payroll"))?;
            let risk = ((f64::from(i) / 2.0).sin() * 2.0 + 5.0) * 10.0;
            Ok(ForecastPoint {
                month: date.format("%b").to_string(),
                payroll: Usd::new(payroll).round_cents(),
                risk: risk.round() / 10.0,
            })
        })
        .collect()
}
