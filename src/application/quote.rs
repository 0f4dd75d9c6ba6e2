use crate::domain::money::Usd;
use crate::domain::payee::Payee;
use crate::domain::ports::{AllocationPolicyBox, PriceSource, PriceSourceBox};
use crate::domain::quote::{MIN_TOKEN_PRICE, Quote, StableBasket};
use crate::error::{PayrollError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Assumed execution variance on the token conversion (0.3%).
pub const SLIPPAGE: Decimal = dec!(0.003);
/// Flat L2 network-fee estimate per payout.
pub const GAS_PER_PAYEE_USD: Decimal = dec!(0.03);
pub const MIN_GAS_USD: Decimal = dec!(1);
/// Proportional routing fee (0.2%).
pub const ROUTING_FEE_RATE: Decimal = dec!(0.002);
pub const MIN_FEES_USD: Decimal = dec!(2);
/// Unit price used when a token has no usable price.
pub const FALLBACK_PRICE: Decimal = Decimal::ONE;

/// Quotes a run with the diversified stablecoin basket.
///
/// An unknown token, or one priced below [`MIN_TOKEN_PRICE`], is priced at
/// [`FALLBACK_PRICE`] and a warning is logged. The only error is
/// [`PayrollError::AmountOverflow`], which a validated roster cannot reach.
pub fn compute_quote(payees: &[Payee], token: &str, prices: &dyn PriceSource) -> Result<Quote> {
    build_quote(
        payees,
        token,
        lenient_price(token, prices),
        StableBasket::diversified(),
    )
}

/// Like [`compute_quote`], but rejects tokens without a usable price.
pub fn compute_quote_strict(
    payees: &[Payee],
    token: &str,
    prices: &dyn PriceSource,
) -> Result<Quote> {
    build_quote(
        payees,
        token,
        strict_price(token, prices)?,
        StableBasket::diversified(),
    )
}

fn lenient_price(token: &str, prices: &dyn PriceSource) -> Decimal {
    match strict_price(token, prices) {
        Ok(price) => price,
        Err(e) => {
            tracing::warn!(token, error = %e, fallback = %FALLBACK_PRICE, "using fallback token price");
            FALLBACK_PRICE
        }
    }
}

fn strict_price(token: &str, prices: &dyn PriceSource) -> Result<Decimal> {
    match prices.price_of(token) {
        Some(price) if price >= MIN_TOKEN_PRICE => Ok(price),
        Some(price) => Err(PayrollError::InvalidPrice {
            token: token.to_string(),
            price,
        }),
        None => Err(PayrollError::UnknownToken(token.to_string())),
    }
}

fn build_quote(
    payees: &[Payee],
    token: &str,
    token_price: Decimal,
    basket: StableBasket,
) -> Result<Quote> {
    let total_usd = Usd::checked_sum(payees.iter().map(|p| p.salary_usd))
        .ok_or(PayrollError::AmountOverflow("total salary"))?;
    let gas_usd = Usd::new((Decimal::from(payees.len()) * GAS_PER_PAYEE_USD).max(MIN_GAS_USD));
    let fees_usd = total_usd
        .value()
        .checked_mul(ROUTING_FEE_RATE)
        .map(|fees| Usd::new(fees.max(MIN_FEES_USD)))
        .ok_or(PayrollError::AmountOverflow("routing fees"))?;
    let token_amount = total_usd
        .checked_add(gas_usd)
        .and_then(|gross| gross.checked_add(fees_usd))
        .and_then(|gross| gross.value().checked_div(token_price))
        .and_then(|units| units.checked_mul(Decimal::ONE + SLIPPAGE))
        .ok_or(PayrollError::AmountOverflow("token amount"))?;

    tracing::debug!(
        payees = payees.len(),
        token,
        %total_usd,
        %token_amount,
        "computed payroll quote"
    );

    Ok(Quote {
        total_usd,
        token: token.to_string(),
        token_price,
        token_amount,
        gas_usd,
        fees_usd,
        slippage: SLIPPAGE,
        stable_basket: basket,
    })
}

/// Quotes payroll runs against an injected price source and allocation
/// policy.
///
/// Holds no roster state; every call produces a fresh [`Quote`].
pub struct PayrollQuoteCalculator {
    prices: PriceSourceBox,
    policy: AllocationPolicyBox,
    strict: bool,
}

impl PayrollQuoteCalculator {
    pub fn new(prices: PriceSourceBox, policy: AllocationPolicyBox) -> Self {
        Self {
            prices,
            policy,
            strict: false,
        }
    }

    /// Makes [`PayrollQuoteCalculator::quote`] reject unpriced tokens
    /// instead of falling back.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn quote(&self, payees: &[Payee], token: &str) -> Result<Quote> {
        let price = if self.strict {
            strict_price(token, self.prices.as_ref())?
        } else {
            lenient_price(token, self.prices.as_ref())
        };
        build_quote(payees, token, price, self.policy.allocation())
    }
}
