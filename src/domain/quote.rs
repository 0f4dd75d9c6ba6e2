use super::money::Usd;
use super::payee::Stablecoin;
use crate::error::{PayrollError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Smallest usable token price in USD. Anything cheaper would push a token
/// amount past what `Decimal` can hold.
pub const MIN_TOKEN_PRICE: Decimal = dec!(0.000000001);

/// Target allocation of payroll value across stablecoins, in percent.
///
/// Always sums to exactly 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Stablecoin, Decimal>", into = "BTreeMap<Stablecoin, Decimal>")]
pub struct StableBasket(BTreeMap<Stablecoin, Decimal>);

impl StableBasket {
    pub fn new(weights: impl IntoIterator<Item = (Stablecoin, Decimal)>) -> Result<Self> {
        let mut allocation = BTreeMap::new();
        for (coin, pct) in weights {
            if pct.is_sign_negative() && !pct.is_zero() {
                return Err(PayrollError::InvalidBasket(format!(
                    "{coin} weight {pct} is negative"
                )));
            }
            *allocation.entry(coin).or_insert(Decimal::ZERO) += pct;
        }

        let total: Decimal = allocation.values().sum();
        if total != Decimal::ONE_HUNDRED {
            return Err(PayrollError::InvalidBasket(format!(
                "weights sum to {total}, expected 100"
            )));
        }
        Ok(Self(allocation))
    }

    /// 50% USDC, 25% USDP, 25% DAI to spread issuer risk.
    pub fn diversified() -> Self {
        Self(BTreeMap::from([
            (Stablecoin::Usdc, dec!(50)),
            (Stablecoin::Usdp, dec!(25)),
            (Stablecoin::Dai, dec!(25)),
        ]))
    }

    pub fn weight(&self, coin: Stablecoin) -> Decimal {
        self.0.get(&coin).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stablecoin, Decimal)> + '_ {
        self.0.iter().map(|(coin, pct)| (*coin, *pct))
    }

    pub fn total(&self) -> Decimal {
        self.0.values().sum()
    }
}

impl TryFrom<BTreeMap<Stablecoin, Decimal>> for StableBasket {
    type Error = PayrollError;

    fn try_from(value: BTreeMap<Stablecoin, Decimal>) -> Result<Self> {
        Self::new(value)
    }
}

impl From<StableBasket> for BTreeMap<Stablecoin, Decimal> {
    fn from(basket: StableBasket) -> Self {
        basket.0
    }
}

/// Cost breakdown for funding one payroll run with a given token.
///
/// A quote is a snapshot: a different roster or token yields a new quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub total_usd: Usd,
    pub token: String,
    pub token_price: Decimal,
    /// Units of `token` needed to cover payroll, gas and fees after slippage.
    pub token_amount: Decimal,
    pub gas_usd: Usd,
    pub fees_usd: Usd,
    /// Slippage as a fraction, e.g. 0.003 for 0.3%.
    pub slippage: Decimal,
    pub stable_basket: StableBasket,
}

impl Quote {
    /// Everything the run costs in USD before conversion, or `None` if it
    /// overflows.
    pub fn gross_usd(&self) -> Option<Usd> {
        self.total_usd
            .checked_add(self.gas_usd)?
            .checked_add(self.fees_usd)
    }
}
